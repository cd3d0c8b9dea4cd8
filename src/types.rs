// src/types.rs
// Type aliases to reduce complexity warnings

use std::error::Error;

use crate::channel_names::CHANNEL_COUNT;

// Log parser return type
pub type LogParseResult = Result<
    (
        Vec<crate::data_input::log_data::RpsRowData>,
        Option<f64>,            // estimated sample rate (Hz)
        [bool; CHANNEL_COUNT],  // channel_header_found
        Vec<(String, String)>,  // header_metadata
    ),
    Box<dyn Error>,
>;

// Plot data types
pub type ChannelSeries = Vec<(f64, f64)>;
pub type AllChannelSeries = [Option<ChannelSeries>; CHANNEL_COUNT];

// Spectrum plot data: amplitude series plus the primary peak, if any.
pub type ChannelSpectrum = (ChannelSeries, Option<(f64, f64)>);
pub type AllChannelSpectra = [Option<ChannelSpectrum>; CHANNEL_COUNT];

// src/types.rs
