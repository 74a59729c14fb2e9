//! APRS Monitor
//!
//! A terminal monitoring and control console for an APRS radio backend.
//! The dashboard lives in `aprsmon-tui`; this crate adds the headless NDJSON
//! frontend and settings resolution for the `aprsmon` binary.

pub mod headless;

use std::path::Path;

use aprsmon_app::config::{load_settings, Settings};

// Re-export main entry points
pub use aprsmon_tui::run;
pub use headless::runner::run_headless;

/// Settings from the file at `config_path` (if any), with `url` overriding
/// the configured backend.
pub fn resolve_settings(config_path: Option<&Path>, url: Option<String>) -> Settings {
    let mut settings = config_path.map(load_settings).unwrap_or_default();
    if let Some(url) = url {
        settings.backend.url = url;
    }
    settings
}
