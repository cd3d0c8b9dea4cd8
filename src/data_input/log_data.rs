// src/data_input/log_data.rs

use crate::channel_names::CHANNEL_COUNT;

/// Structure to hold data parsed from a single row of the CSV log.
/// Uses `Option<f64>` to handle potentially missing or unparseable values.
#[derive(Debug, Default, Clone)]
pub struct RpsRowData {
    pub time_sec: Option<f64>,                  // Timestamp (in seconds).
    pub channels: [Option<f64>; CHANNEL_COUNT], // Raw RPS readings in volts [SinP, CosP, SinN, CosN].
}

// src/data_input/log_data.rs
