// src/main.rs

use std::env;
use std::error::Error;
use std::path::Path;
use std::process;

use ndarray::{stack, Array1, Array2, Axis};

use rps_csv_analyze::channel_names::{CHANNEL_COUNT, CHANNEL_NAMES};
use rps_csv_analyze::constants::{
    SELF_CHECK_DURATION_S, SELF_CHECK_FREQ_HZ, SELF_CHECK_SAMPLES, SELF_CHECK_START_S,
};
use rps_csv_analyze::data_analysis::{normalize, signal_checks, spectrum};
use rps_csv_analyze::data_input::log_parser::parse_log_file;
use rps_csv_analyze::plot_functions::plot_channel_spectrums::plot_channel_spectrums;
use rps_csv_analyze::plot_functions::plot_channel_waveforms::plot_channel_waveforms;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // --- Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input_file.csv> | --self-check", args[0]);
        process::exit(1);
    }
    if args[1] == "--self-check" {
        return run_self_check();
    }

    let input_file = &args[1];
    let input_path = Path::new(input_file);
    let root_name = input_path.file_stem().unwrap_or_default().to_string_lossy();

    // --- Parse Log File ---
    let (all_log_data, sample_rate, channel_header_found, _metadata) = parse_log_file(input_path)?;

    // --- Assemble Channel Matrix ---
    // Only channels whose header was found contribute a column; rows missing a
    // timestamp or any kept channel value are dropped.
    let kept_channels: Vec<usize> =
        (0..CHANNEL_COUNT).filter(|&ch| channel_header_found[ch]).collect();

    let mut time_values: Vec<f64> = Vec::new();
    let mut flat_values: Vec<f64> = Vec::new();
    for row in &all_log_data {
        let Some(t) = row.time_sec else { continue };
        let values: Option<Vec<f64>> =
            kept_channels.iter().map(|&ch| row.channels[ch]).collect();
        if let Some(values) = values {
            time_values.push(t);
            flat_values.extend(values);
        }
    }

    let num_rows = time_values.len();
    if num_rows < 2 {
        return Err(format!(
            "Not enough complete data rows for analysis: got {}, need at least 2.",
            num_rows
        )
        .into());
    }
    let time = Array1::from(time_values);
    let raw_signals = Array2::from_shape_vec((num_rows, kept_channels.len()), flat_values)?;
    println!(
        "\nAssembled {} complete rows across {} channel(s).",
        num_rows,
        kept_channels.len()
    );

    // --- Signal Health Checks (raw volts) ---
    println!("\n--- Signal Health Checks ---");
    let zero_flags = signal_checks::zero_check(&raw_signals);
    let rail_flags = signal_checks::supply_rail_check(&raw_signals);
    let static_flags = signal_checks::static_check(&raw_signals);
    for (col, &ch) in kept_channels.iter().enumerate() {
        let mut faults: Vec<&str> = Vec::new();
        if zero_flags[col] {
            faults.push("flatlined near 0V");
        }
        if rail_flags[col] {
            faults.push("pinned at supply rail");
        }
        if static_flags[col] {
            faults.push("static (no activity)");
        }
        if faults.is_empty() {
            println!("  {}: OK", CHANNEL_NAMES[ch]);
        } else {
            println!("  {}: FAULT ({})", CHANNEL_NAMES[ch], faults.join(", "));
        }
    }

    // --- Normalize Channels ---
    let normalized_columns: Vec<Array1<f64>> = raw_signals
        .columns()
        .into_iter()
        .map(|col| normalize::normalise_signal(&col.to_owned()))
        .collect();
    let normalized_views: Vec<_> = normalized_columns.iter().map(|c| c.view()).collect();
    let signals = stack(Axis(1), &normalized_views)?;

    // --- Estimate Channel Frequencies ---
    // Without two distinct timestamps there is no usable time base; a mean
    // delta of zero would send the estimated sample rate to infinity.
    let Some(parsed_rate) = sample_rate else {
        println!("\nSkipping frequency estimation and spectrum plot: sample rate could not be determined.");
        return plot_channel_waveforms(&time, &signals, &kept_channels, &root_name);
    };
    println!("\n--- Estimating Channel Frequencies ---");
    let frequencies = spectrum::peak_frequencies(&time, &signals)?;
    let fs = spectrum::sampling_frequency(&time);
    println!(
        "  Sample rate: {:.2} Hz, frequency resolution: {:.2} Hz",
        fs,
        fs / num_rows as f64
    );
    if (parsed_rate - fs).abs() > fs * 0.01 {
        println!(
            "  Note: parser-estimated sample rate {:.2} Hz differs (irregular timestamps?).",
            parsed_rate
        );
    }
    for (col, &ch) in kept_channels.iter().enumerate() {
        println!("  {}: {:.1} Hz", CHANNEL_NAMES[ch], frequencies[col]);
    }
    println!("The frequencies of the signals are {:?}.", frequencies);

    // --- Render Plots ---
    plot_channel_waveforms(&time, &signals, &kept_channels, &root_name)?;
    plot_channel_spectrums(&time, &signals, &kept_channels, &root_name)?;

    Ok(())
}

/// Built-in order-check scenario: four synthetic quadrature channels at a
/// known frequency must all resolve to the same bin, within one bin width of
/// the input frequency.
fn run_self_check() -> Result<(), Box<dyn Error>> {
    println!("{} order checker {}", "_".repeat(60), "_".repeat(60));

    let f0 = SELF_CHECK_FREQ_HZ;
    let time = Array1::linspace(
        SELF_CHECK_START_S,
        SELF_CHECK_START_S + SELF_CHECK_DURATION_S,
        SELF_CHECK_SAMPLES,
    );
    let omega = 2.0 * std::f64::consts::PI * f0;
    let sin_p = time.mapv(|t| (omega * t).sin());
    let cos_p = time.mapv(|t| -(omega * t).cos());
    let sin_n = time.mapv(|t| -(omega * t).sin());
    let cos_n = time.mapv(|t| (omega * t).cos());

    let channels = [sin_p, cos_p, sin_n, cos_n].map(|c| normalize::normalise_signal(&c));
    let views: Vec<_> = channels.iter().map(|c| c.view()).collect();
    let signals = stack(Axis(1), &views)?;

    let frequencies = spectrum::peak_frequencies(&time, &signals)?;
    let fs = spectrum::sampling_frequency(&time);
    let bin_width = fs / SELF_CHECK_SAMPLES as f64;

    println!("The frequencies of the signals are {:?}.", frequencies);

    let mut all_ok = true;
    for (ch, &freq) in frequencies.iter().enumerate() {
        let within_band = (freq - f0).abs() <= bin_width;
        println!(
            "  {}: {:.1} Hz ({})",
            CHANNEL_NAMES[ch],
            freq,
            if within_band { "ok" } else { "OUT OF BAND" }
        );
        all_ok &= within_band;
    }
    let all_equal = frequencies.windows(2).all(|pair| pair[0] == pair[1]);
    if !all_equal {
        println!("  Channel estimates disagree.");
    }
    all_ok &= all_equal;

    println!("{}", "=".repeat(120));
    if all_ok {
        println!("Self-check passed.");
        Ok(())
    } else {
        Err("Self-check failed: channel frequency estimates out of band or inconsistent.".into())
    }
}

// src/main.rs
