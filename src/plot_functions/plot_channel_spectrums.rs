// src/plot_functions/plot_channel_spectrums.rs

use std::error::Error;

use ndarray::{Array1, Array2};

use crate::channel_names::{CHANNEL_COUNT, CHANNEL_NAMES};
use crate::constants::{
    COLOR_SPECTRUM, LINE_WIDTH_PLOT, SPECTRUM_Y_AXIS_FLOOR, SPECTRUM_Y_AXIS_HEADROOM_FACTOR,
};
use crate::data_analysis::spectrum;
use crate::plot_framework::{draw_stacked_plot, PlotConfig, PlotSeries};
use crate::types::AllChannelSpectra;

/// Generates a stacked plot of the one-sided amplitude spectrum of each RPS
/// channel, with the primary peak labeled.
pub fn plot_channel_spectrums(
    time: &Array1<f64>,
    signals: &Array2<f64>,
    kept_channels: &[usize],
    root_name: &str,
) -> Result<(), Box<dyn Error>> {
    let output_file = format!("{}_RPS_Spectrums_stacked.png", root_name);
    let plot_type_name = "RPS Spectrums";

    let n = signals.nrows();
    if n < 2 {
        println!("\nINFO: Skipping RPS Spectrum Plot: not enough samples for a spectrum.");
        return Ok(());
    }

    println!("\n--- Generating RPS Spectrum Plot ---");
    let sample_rate = spectrum::sampling_frequency(time);
    let spectra = spectrum::one_sided_amplitude_spectrum(signals);
    let freqs = spectrum::frequency_vector(n, sample_rate);

    let mut all_spectra: AllChannelSpectra = Default::default();
    let mut global_max_amplitude = 0.0f64;

    for (col, &ch) in kept_channels.iter().enumerate() {
        let mut series: Vec<(f64, f64)> = Vec::with_capacity(freqs.len());
        let mut primary_peak: Option<(f64, f64)> = None;

        for (k, (&freq, &amp)) in freqs.iter().zip(spectra.column(col).iter()).enumerate() {
            series.push((freq, amp));
            // Bin 0 is the zeroed DC component; it never qualifies as a peak.
            if k > 0 && amp > primary_peak.map_or(0.0, |(_, a)| a) {
                primary_peak = Some((freq, amp));
            }
            global_max_amplitude = global_max_amplitude.max(amp);
        }

        match primary_peak {
            Some((freq, amp)) => println!(
                "  {} Spectrum: Primary Peak amplitude {:.3} at {:.0} Hz",
                CHANNEL_NAMES[ch], amp, freq
            ),
            None => println!("  {} Spectrum: No significant peaks found.", CHANNEL_NAMES[ch]),
        }

        all_spectra[ch] = Some((series, primary_peak));
    }

    let y_max = SPECTRUM_Y_AXIS_FLOOR.max(global_max_amplitude * SPECTRUM_Y_AXIS_HEADROOM_FACTOR);
    let x_max = sample_rate / 2.0 * 1.05;

    draw_stacked_plot(
        &output_file,
        root_name,
        plot_type_name,
        &CHANNEL_NAMES,
        |pane_index| {
            debug_assert!(pane_index < CHANNEL_COUNT);
            let (series, primary_peak) = all_spectra[pane_index].take()?;
            Some(PlotConfig {
                title: format!("{} Amplitude Spectrum", CHANNEL_NAMES[pane_index]),
                x_range: 0.0..x_max,
                y_range: 0.0..y_max,
                series: vec![PlotSeries {
                    data: series,
                    label: String::new(),
                    color: *COLOR_SPECTRUM,
                    stroke_width: LINE_WIDTH_PLOT,
                }],
                x_label: "Frequency (Hz)".to_string(),
                y_label: "Amplitude".to_string(),
                peaks: primary_peak.into_iter().collect(),
            })
        },
    )
}

// src/plot_functions/plot_channel_spectrums.rs
