// src/data_input/log_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

use crate::channel_names::{CHANNEL_COUNT, CHANNEL_NAMES};
use crate::data_input::log_data::RpsRowData;
use crate::types::LogParseResult;

/// Parses the CSV log file, extracts data, determines header presence, and calculates sample rate.
///
/// Returns a tuple containing:
/// 1. `Vec<RpsRowData>`: All parsed log data rows.
/// 2. `Option<f64>`: The estimated sample rate in Hz.
/// 3. `[bool; CHANNEL_COUNT]`: Flags indicating which channel headers were found.
/// 4. `Vec<(String, String)>`: Metadata key-value pairs found before the CSV headers.
pub fn parse_log_file(input_file_path: &Path) -> LogParseResult {
    // --- Header Definition ---
    // Index 0 is the timestamp; 1..=CHANNEL_COUNT are the RPS channels.
    let target_headers = ["time (s)", "sinP", "cosP", "sinN", "cosN"];

    // --- Metadata Extraction ---
    // Test-rig exports prepend key-value lines (rig id, EOL test id, probe
    // ranges) before the actual CSV header row.
    let mut metadata: Vec<(String, String)> = Vec::new();
    let mut csv_lines: Vec<String> = Vec::new();
    let mut found_csv_headers = false;

    {
        use std::io::{BufRead, BufReader};
        let file = File::open(input_file_path)?;
        let reader = BufReader::new(file);

        for line_result in reader.lines() {
            let line = line_result?;
            let trimmed_line = line.trim();

            if trimmed_line.is_empty() {
                continue;
            }

            // The CSV header row contains "time" plus at least one channel name.
            if !found_csv_headers
                && trimmed_line.contains("time")
                && (trimmed_line.contains("sin") || trimmed_line.contains("cos"))
            {
                found_csv_headers = true;
                csv_lines.push(line);
                continue;
            }

            if found_csv_headers {
                csv_lines.push(line);
            } else {
                // Parse metadata lines (key-value pairs)
                let mut rdr = csv::ReaderBuilder::new()
                    .has_headers(false)
                    .from_reader(trimmed_line.as_bytes());
                if let Some(Ok(record)) = rdr.records().next() {
                    if record.len() >= 2 {
                        let key = record.get(0).unwrap_or("").trim().trim_matches('"').to_string();
                        let value = record.get(1).unwrap_or("").trim().trim_matches('"').to_string();
                        if !key.is_empty() {
                            metadata.push((key, value));
                        }
                    }
                }
            }
        }
    }

    if !found_csv_headers {
        return Err("Could not find CSV headers in the file".into());
    }

    println!("Extracted {} metadata entries", metadata.len());
    if !metadata.is_empty() {
        println!("Sample metadata:");
        for (i, (key, value)) in metadata.iter().take(5).enumerate() {
            println!("  {}: '{}' = '{}'", i + 1, key, value);
        }
        if metadata.len() > 5 {
            println!("  ... and {} more", metadata.len() - 5);
        }
    }

    let csv_content = csv_lines.join("\n");

    let mut channel_header_found = [false; CHANNEL_COUNT];
    let header_indices: Vec<Option<usize>>;

    // Read CSV header and map target headers to indices.
    {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_content.as_bytes());
        let header_record = reader.headers()?.clone();
        println!("Headers found in CSV: {:?}", header_record);

        header_indices = target_headers
            .iter()
            .enumerate()
            .map(|(i, &target_header)| {
                if i == 0 {
                    // Special case for time header: check for both "time (s)" and "time"
                    header_record.iter().position(|h| {
                        let trimmed = h.trim();
                        trimmed == "time (s)" || trimmed == "time"
                    })
                } else {
                    header_record.iter().position(|h| h.trim() == target_header)
                }
            })
            .collect();

        println!("Header mapping status:");
        let time_found = header_indices[0].is_some();
        println!(
            "  '{}': {} (Essential)",
            target_headers[0],
            if time_found { "Found" } else { "Not Found" }
        );

        for ch in 0..CHANNEL_COUNT {
            channel_header_found[ch] = header_indices[1 + ch].is_some();
            println!(
                "  '{}': {} (RPS channel {})",
                target_headers[1 + ch],
                if channel_header_found[ch] { "Found" } else { "Not Found" },
                CHANNEL_NAMES[ch]
            );
        }

        if !time_found {
            return Err("Error: Missing essential 'time (s)' header. Aborting.".into());
        }
        if !channel_header_found.iter().any(|&found| found) {
            return Err("Error: No RPS channel headers (sinP/cosP/sinN/cosN) found. Aborting.".into());
        }
    }

    // --- Data Reading and Storage ---
    let mut all_log_data: Vec<RpsRowData> = Vec::new();
    println!("\nReading data rows...");
    {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_content.as_bytes());

        for (row_index, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let mut current_row_data = RpsRowData::default();

                    let parse_f64_by_target_idx = |target_idx: usize| -> Option<f64> {
                        header_indices
                            .get(target_idx)
                            .and_then(|opt_csv_idx| opt_csv_idx.as_ref())
                            .and_then(|&csv_idx| record.get(csv_idx))
                            .and_then(|val_str| val_str.parse::<f64>().ok())
                    };

                    // Parse timestamp
                    if let Some(t_sec) = parse_f64_by_target_idx(0) {
                        current_row_data.time_sec = Some(t_sec);
                    } else {
                        eprintln!(
                            "Warning: Skipping row {} due to missing or invalid 'time (s)'",
                            row_index + 1
                        );
                        continue;
                    }

                    // Parse RPS channels
                    for ch in 0..CHANNEL_COUNT {
                        if channel_header_found[ch] {
                            current_row_data.channels[ch] = parse_f64_by_target_idx(1 + ch);
                        }
                    }

                    all_log_data.push(current_row_data);
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Skipping row {} due to CSV read error: {}",
                        row_index + 1,
                        e
                    );
                }
            }
        }
    }

    println!("Finished reading {} data rows.", all_log_data.len());

    // --- Calculate Average Sample Rate ---
    let mut sample_rate: Option<f64> = None;
    if all_log_data.len() > 1 {
        let mut total_delta = 0.0;
        let mut count = 0;
        let mut prev_time: Option<f64> = None;
        for row in &all_log_data {
            if let Some(current_time) = row.time_sec {
                if let Some(pt) = prev_time {
                    let delta = current_time - pt;
                    if delta > 1e-9 {
                        total_delta += delta;
                        count += 1;
                    }
                }
                prev_time = Some(current_time);
            }
        }
        if count > 0 {
            let avg_delta = total_delta / count as f64;
            sample_rate = Some(1.0 / avg_delta);
            println!("Estimated Sample Rate: {:.2} Hz", sample_rate.unwrap());
        }
    }
    if sample_rate.is_none() {
        println!("Warning: Could not determine sample rate (need >= 2 data points with distinct timestamps). Frequency estimation will be skipped.");
    }

    Ok((all_log_data, sample_rate, channel_header_found, metadata))
}

// src/data_input/log_parser.rs
