// src/lib.rs - Library interface for internal module access

pub mod channel_names;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod plot_framework;
pub mod plot_functions;
pub mod types;
