//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON; any
//! other observer can subscribe the same way.

use aprsmon_channel::ConnectionState;
use aprsmon_core::{MessageEntry, Notification, Subsystem, SubsystemState};

/// Domain events emitted by the Engine.
///
/// Subscribers see state changes, never raw channel traffic: a duplicate
/// status event that changes nothing emits nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The push-channel connection state changed
    ConnectionChanged { state: ConnectionState },

    /// A subsystem's rendered state changed
    SubsystemChanged {
        subsystem: Subsystem,
        state: SubsystemState,
    },

    /// The system error banner was shown, replaced or cleared
    ErrorBanner { text: Option<String> },

    /// A message was appended to the message log
    MessageReceived { entry: MessageEntry },

    /// A notification toast was raised
    Notification { notification: Notification },

    /// The dashboard was reset after a configuration update
    DashboardReset,

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ConnectionChanged { .. } => "connection_changed",
            Self::SubsystemChanged { .. } => "subsystem_changed",
            Self::ErrorBanner { .. } => "error_banner",
            Self::MessageReceived { .. } => "message_received",
            Self::Notification { .. } => "notification",
            Self::DashboardReset => "dashboard_reset",
            Self::Shutdown => "shutdown",
        }
    }
}
