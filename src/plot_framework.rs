// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{
    FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, FONT_SIZE_MAIN_TITLE,
    FONT_SIZE_MESSAGE, FONT_SIZE_PEAK_LABEL, LINE_WIDTH_LEGEND, PLOT_HEIGHT, PLOT_WIDTH,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    /// (frequency, amplitude) markers labeled along the bottom of the pane.
    pub peaks: Vec<(f64, f64)>,
}

/// Draw a "Data Unavailable" message on a plot pane.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    pane_name: &str,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{pane_name} {plot_type} Data Unavailable: {reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_text_width = (message.len() as i32).saturating_mul(estimated_char_width);

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

/// Draws a single chart pane from a PlotConfig.
fn draw_single_pane_chart(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(8)
        .y_label_formatter(&|y| {
            // Format Y-axis labels with "k" and "M" notation for large values;
            // small fractional values (normalized signals) keep one decimal.
            if y.abs() >= 1_000_000.0 {
                format!("{:.1}M", y / 1_000_000.0)
            } else if y.abs() >= 1000.0 {
                format!("{:.0}k", y / 1000.0)
            } else if y.abs() < 10.0 && y.fract() != 0.0 {
                format!("{:.1}", y)
            } else {
                format!("{:.0}", y)
            }
        })
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let mut legend_series_count = 0;
    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            let color = s.color;
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    // Peak labels along the bottom of the pane, anchored at the peak frequency.
    if !plot_config.peaks.is_empty() {
        const LABEL_HEIGHT: i32 = 20;
        const BOTTOM_MARGIN_PX: i32 = 45;

        let area_offset = area.get_base_pixel();
        let area_height = {
            let y_range = area.get_pixel_range().1;
            y_range.end - y_range.start
        };

        for (row, &(peak_freq, peak_amp)) in plot_config.peaks.iter().enumerate() {
            let label_text = if row == 0 {
                format!("\u{25B2} Primary Peak: {peak_amp:.2} at {peak_freq:.0} Hz")
            } else {
                format!("\u{25B2} Peak: {peak_amp:.2} at {peak_freq:.0} Hz")
            };
            let peak_x_pixel =
                chart.backend_coord(&(peak_freq, plot_config.y_range.start)).0 - area_offset.0;
            let text_y = area_height - BOTTOM_MARGIN_PX - (row as i32) * LABEL_HEIGHT;
            let text_style = ("sans-serif", FONT_SIZE_PEAK_LABEL).into_font().color(&BLACK);
            area.draw(&Text::new(label_text, (peak_x_pixel, text_y), text_style))?;
        }
    }

    Ok(())
}

/// Renders a vertically stacked multi-pane PNG. `pane_config_fn` supplies the
/// configuration for each pane; `None` panes get an "unavailable" placeholder.
pub fn draw_stacked_plot<F>(
    output_file: &str,
    root_name: &str,
    plot_type_name: &str,
    pane_names: &[&str],
    mut pane_config_fn: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(usize) -> Option<PlotConfig>,
{
    let root_area = BitMapBackend::new(output_file, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let titled_area = root_area.titled(
        &format!("{} - {}", root_name, plot_type_name),
        ("sans-serif", FONT_SIZE_MAIN_TITLE),
    )?;
    let sub_plot_areas = titled_area.split_evenly((pane_names.len(), 1));

    for (pane_index, pane_name) in pane_names.iter().enumerate() {
        let area = &sub_plot_areas[pane_index];
        match pane_config_fn(pane_index) {
            Some(config) => draw_single_pane_chart(area, &config)?,
            None => {
                println!(
                    "  INFO: No {} data available for {}. Drawing placeholder.",
                    plot_type_name, pane_name
                );
                draw_unavailable_message(area, pane_name, plot_type_name, "No Valid Data")?;
            }
        }
    }

    titled_area.present()?;
    println!("  {} plot saved as '{}'.", plot_type_name, output_file);
    Ok(())
}


// src/plot_framework.rs
