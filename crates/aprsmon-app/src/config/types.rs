//! Configuration types for the APRS monitor
//!
//! Defines `Settings` and its sections, all deserialized from
//! `config.toml` with per-field defaults so partial files are valid.

use serde::{Deserialize, Serialize};

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Application settings (`<config_dir>/aprs-monitor/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub channel: ChannelSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend location and HTTP behavior
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Base URL of the backend; the push channel and config API share it
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Timeout for config API requests
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

/// Push-channel behavior
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChannelSettings {
    /// Consecutive reconnection attempts before giving up
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,

    /// Capacity of the application message queue
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            max_reconnect_attempts: default_max_reconnect_attempts(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_max_reconnect_attempts() -> u32 {
    10
}

fn default_event_buffer() -> usize {
    256
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Show arrival timestamps in the message log
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// How long a notification toast stays visible
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,

    /// Ask before restarting reception
    #[serde(default = "default_true")]
    pub confirm_restart: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            notification_ms: default_notification_ms(),
            confirm_restart: true,
        }
    }
}

fn default_notification_ms() -> u64 {
    4000
}

fn default_true() -> bool {
    true
}
