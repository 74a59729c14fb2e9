//! Headless mode - NDJSON event output instead of the TUI
//!
//! Every state change the Engine reports is written to stdout as one JSON
//! object per line, tagged by an `event` field. Useful for scripting and for
//! running the monitor under a supervisor without a terminal.
//!
//! # Example Output
//!
//! ```json
//! {"event":"connection","state":"Connected","connected":true,"timestamp":1704700001000}
//! {"event":"subsystem","subsystem":"reception","label":"Reception: Active","color":"red","timestamp":1704700002000}
//! {"event":"message","seq":0,"text":"N0CALL>APRS:>hello","timestamp":1704700003000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use aprsmon_app::EngineEvent;
use aprsmon_core::{NotificationLevel, StatusColor, Subsystem};

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Push channel connection state changed
    Connection {
        state: String,
        connected: bool,
        timestamp: i64,
    },

    /// A subsystem's displayed status changed
    Subsystem {
        subsystem: Subsystem,
        label: String,
        color: StatusColor,
        timestamp: i64,
    },

    /// System error banner shown (`message` set) or cleared (`null`)
    ErrorBanner {
        message: Option<String>,
        timestamp: i64,
    },

    /// APRS message appended to the log
    Message {
        seq: u64,
        text: String,
        timestamp: i64,
    },

    /// Operator notification
    Notification {
        level: NotificationLevel,
        text: String,
        timestamp: i64,
    },

    /// Dashboard reset after a configuration update
    Reset { timestamp: i64 },

    /// Monitor shutting down
    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn from_engine_event(event: &EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::ConnectionChanged { state } => Self::Connection {
                state: state.label(),
                connected: state.is_connected(),
                timestamp,
            },
            EngineEvent::SubsystemChanged { subsystem, state } => Self::Subsystem {
                subsystem: *subsystem,
                label: state.label.clone(),
                color: state.color,
                timestamp,
            },
            EngineEvent::ErrorBanner { text } => Self::ErrorBanner {
                message: text.clone(),
                timestamp,
            },
            EngineEvent::MessageReceived { entry } => Self::Message {
                seq: entry.seq,
                text: entry.text.clone(),
                timestamp: entry.received_at.timestamp_millis(),
            },
            EngineEvent::Notification { notification } => Self::Notification {
                level: notification.level,
                text: notification.text.clone(),
                timestamp,
            },
            EngineEvent::DashboardReset => Self::Reset { timestamp },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }

    /// Write this event as one NDJSON line
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Emit this event to stdout
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aprsmon_app::ConnectionState;
    use aprsmon_core::{MessageLog, Notification, SubsystemState};

    fn to_value(event: &HeadlessEvent) -> serde_json::Value {
        let mut buf = Vec::new();
        event.write_to(&mut buf).expect("write failed");
        let line = String::from_utf8(buf).expect("utf8");
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        serde_json::from_str(line.trim_end()).expect("invalid JSON")
    }

    #[test]
    fn test_connection_serialization() {
        let event = HeadlessEvent::from_engine_event(&EngineEvent::ConnectionChanged {
            state: ConnectionState::Reconnecting { attempt: 2 },
        });
        let value = to_value(&event);

        assert_eq!(value["event"], "connection");
        assert_eq!(value["state"], "Reconnecting (2)");
        assert_eq!(value["connected"], false);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_subsystem_serialization() {
        let event = HeadlessEvent::from_engine_event(&EngineEvent::SubsystemChanged {
            subsystem: Subsystem::UdpListener,
            state: SubsystemState::new("UDP Listener: Active", StatusColor::Blue),
        });
        let value = to_value(&event);

        assert_eq!(value["event"], "subsystem");
        assert_eq!(value["subsystem"], "udp_listener");
        assert_eq!(value["label"], "UDP Listener: Active");
        assert_eq!(value["color"], "blue");
    }

    #[test]
    fn test_message_keeps_embedded_newlines() {
        let mut log = MessageLog::new();
        log.push("line one\nline two");
        let entry = log.latest().cloned().unwrap();

        let value = to_value(&HeadlessEvent::from_engine_event(
            &EngineEvent::MessageReceived { entry },
        ));

        assert_eq!(value["event"], "message");
        assert_eq!(value["seq"], 0);
        assert_eq!(value["text"], "line one\nline two");
    }

    #[test]
    fn test_banner_cleared_is_null() {
        let value = to_value(&HeadlessEvent::from_engine_event(&EngineEvent::ErrorBanner {
            text: None,
        }));
        assert_eq!(value["event"], "error_banner");
        assert!(value["message"].is_null());
    }

    #[test]
    fn test_notification_level_lowercase() {
        let value = to_value(&HeadlessEvent::from_engine_event(
            &EngineEvent::Notification {
                notification: Notification::error("Error loading configuration: timeout"),
            },
        ));
        assert_eq!(value["event"], "notification");
        assert_eq!(value["level"], "error");
    }

    #[test]
    fn test_reset_and_shutdown_tags() {
        let reset = to_value(&HeadlessEvent::from_engine_event(&EngineEvent::DashboardReset));
        let shutdown = to_value(&HeadlessEvent::from_engine_event(&EngineEvent::Shutdown));
        assert_eq!(reset["event"], "reset");
        assert_eq!(shutdown["event"], "shutdown");
    }
}
