//! Settings file loading
//!
//! The settings file is optional. A missing file yields defaults quietly; an
//! unreadable or malformed one yields defaults with a warning, so a bad edit
//! never keeps the monitor from starting.

use std::path::{Path, PathBuf};

use aprsmon_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "aprs-monitor";

const DEFAULT_CONFIG_CONTENT: &str = r#"# APRS Monitor Configuration

[backend]
url = "http://127.0.0.1:5000"   # Backend base URL (push channel and config API)
request_timeout_ms = 5000       # Config API request timeout

[channel]
max_reconnect_attempts = 10     # Give up after this many failed reconnects
event_buffer = 256              # Application message queue capacity

[ui]
show_timestamps = true          # Prefix log entries with their arrival time
notification_ms = 4000          # How long notification toasts stay visible
confirm_restart = true          # Ask before restarting reception
"#;

/// Default settings file location: `<config_dir>/aprs-monitor/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`, falling back to defaults
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Write a commented default settings file unless one already exists
///
/// Returns `true` when a file was created.
pub fn init_config_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_CONTENT)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", path, e)))?;
    info!("Created default settings at {:?}", path);
    Ok(true)
}
