//! Settings for the APRS monitor
//!
//! Supports `<config_dir>/aprs-monitor/config.toml`, or any path given on
//! the command line.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings};
pub use types::*;
