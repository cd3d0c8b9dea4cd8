// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{AMBER, GREEN, LIGHTBLUE, ORANGE, PURPLE};
use plotters::style::RGBColor;

use crate::channel_names::CHANNEL_COUNT;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Font sizes used by the plot framework.
pub const FONT_SIZE_MAIN_TITLE: u32 = 30;
pub const FONT_SIZE_CHART_TITLE: u32 = 20;
pub const FONT_SIZE_AXIS_LABEL: u32 = 12;
pub const FONT_SIZE_LEGEND: u32 = 12;
pub const FONT_SIZE_MESSAGE: i32 = 24;
pub const FONT_SIZE_PEAK_LABEL: u32 = 14;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Spectrum plot Y-axis scaling.
pub const SPECTRUM_Y_AXIS_FLOOR: f64 = 0.1;
pub const SPECTRUM_Y_AXIS_HEADROOM_FACTOR: f64 = 1.1;

// --- Signal Health Check Thresholds (raw channel data, volts) ---

// A channel whose mean absolute level stays below this is flatlined at 0V
// (dead sensor or broken wiring).
pub const ZERO_CHECK_MAX_MEAN_ABS_V: f64 = 0.1;

// Level above which a sample counts as "at the 5V supply rail".
pub const RAIL_CHECK_MIN_LEVEL_V: f64 = 4.8;
// Fraction of samples at rail above which a channel is flagged as shorted to VCC.
pub const RAIL_CHECK_MAX_FRACTION: f64 = 0.5;

// RMS of successive sample differences below which a channel is considered static.
pub const STATIC_CHECK_MAX_DIFF_RMS_V: f64 = 0.01;

// --- Self-Check Scenario (synthetic quadrature signals) ---
pub const SELF_CHECK_FREQ_HZ: f64 = 1000.0;
pub const SELF_CHECK_START_S: f64 = 25.0;
pub const SELF_CHECK_DURATION_S: f64 = 0.01;
pub const SELF_CHECK_SAMPLES: usize = 100;

// --- Plot Color Assignments ---
pub const CHANNEL_COLORS: [&RGBColor; CHANNEL_COUNT] = [&LIGHTBLUE, &ORANGE, &GREEN, &PURPLE];
pub const COLOR_SPECTRUM: &RGBColor = &AMBER;
