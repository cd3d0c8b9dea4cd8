// src/data_analysis/mod.rs

pub mod fft_utils;
pub mod normalize;
pub mod signal_checks;
pub mod spectrum;

// src/data_analysis/mod.rs
