// src/plot_functions/plot_channel_waveforms.rs

use std::error::Error;

use ndarray::{Array1, Array2};

use crate::channel_names::{CHANNEL_COUNT, CHANNEL_NAMES};
use crate::constants::{CHANNEL_COLORS, LINE_WIDTH_PLOT};
use crate::plot_framework::{calculate_range, draw_stacked_plot, PlotConfig, PlotSeries};
use crate::types::AllChannelSeries;

/// Generates a stacked plot with one time-domain pane per RPS channel plus a
/// combined overlay pane of all available channels.
pub fn plot_channel_waveforms(
    time: &Array1<f64>,
    signals: &Array2<f64>,
    kept_channels: &[usize],
    root_name: &str,
) -> Result<(), Box<dyn Error>> {
    let output_file = format!("{}_RPS_Waveforms_stacked.png", root_name);
    let plot_type_name = "RPS Waveforms";

    if time.is_empty() {
        println!("\nINFO: Skipping RPS Waveform Plot: no samples to draw.");
        return Ok(());
    }

    let mut all_series: AllChannelSeries = Default::default();
    for (col, &ch) in kept_channels.iter().enumerate() {
        let series: Vec<(f64, f64)> = time
            .iter()
            .zip(signals.column(col).iter())
            .map(|(&t, &v)| (t, v))
            .collect();
        all_series[ch] = Some(series);
    }

    let time_min = time[0];
    let time_max = time[time.len() - 1];

    // Shared value range so every pane is directly comparable.
    let (mut val_min, mut val_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for series in all_series.iter().flatten() {
        for &(_, v) in series {
            val_min = val_min.min(v);
            val_max = val_max.max(v);
        }
    }
    if val_min.is_infinite() {
        println!("\nINFO: Skipping RPS Waveform Plot: no channel data available.");
        return Ok(());
    }
    let (final_val_min, final_val_max) = calculate_range(val_min, val_max);

    let pane_names = ["SinP", "CosP", "SinN", "CosN", "Combined"];

    println!("\n--- Generating RPS Waveform Plot ---");
    draw_stacked_plot(
        &output_file,
        root_name,
        plot_type_name,
        &pane_names,
        |pane_index| {
            if pane_index < CHANNEL_COUNT {
                let series = all_series[pane_index].clone()?;
                Some(PlotConfig {
                    title: format!("{} Channel", CHANNEL_NAMES[pane_index]),
                    x_range: time_min..time_max,
                    y_range: final_val_min..final_val_max,
                    series: vec![PlotSeries {
                        data: series,
                        label: String::new(),
                        color: *CHANNEL_COLORS[pane_index],
                        stroke_width: LINE_WIDTH_PLOT,
                    }],
                    x_label: "Time (s)".to_string(),
                    y_label: "Normalized Signal".to_string(),
                    peaks: Vec::new(),
                })
            } else {
                // Combined overlay pane.
                let series: Vec<PlotSeries> = (0..CHANNEL_COUNT)
                    .filter_map(|ch| {
                        all_series[ch].clone().map(|data| PlotSeries {
                            data,
                            label: CHANNEL_NAMES[ch].to_string(),
                            color: *CHANNEL_COLORS[ch],
                            stroke_width: LINE_WIDTH_PLOT,
                        })
                    })
                    .collect();
                if series.is_empty() {
                    return None;
                }
                Some(PlotConfig {
                    title: "All Channels".to_string(),
                    x_range: time_min..time_max,
                    y_range: final_val_min..final_val_max,
                    series,
                    x_label: "Time (s)".to_string(),
                    y_label: "Normalized Signal".to_string(),
                    peaks: Vec::new(),
                })
            }
        },
    )
}

// src/plot_functions/plot_channel_waveforms.rs
