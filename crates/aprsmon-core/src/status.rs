//! Status projection: push-channel events to rendered subsystem states
//!
//! [`project`] is a pure, table-driven mapping. It looks only at the event in
//! hand, so applying the same event twice (a duplicate delivery after a
//! reconnect) yields the same instruction, and the latest event for a
//! subsystem fully determines what is shown for it.

use serde::Serialize;

use crate::events::{EventKind, StatusEvent};

// ─────────────────────────────────────────────────────────
// Subsystems
// ─────────────────────────────────────────────────────────

/// One of the six independently rendered operational facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Transmission,
    Reception,
    UdpListener,
    Carrier,
    WavGeneration,
    System,
}

impl Subsystem {
    /// All subsystems in display order.
    pub const ALL: [Subsystem; 6] = [
        Subsystem::System,
        Subsystem::Transmission,
        Subsystem::Reception,
        Subsystem::UdpListener,
        Subsystem::Carrier,
        Subsystem::WavGeneration,
    ];

    /// Position in [`Subsystem::ALL`].
    pub fn index(self) -> usize {
        match self {
            Subsystem::System => 0,
            Subsystem::Transmission => 1,
            Subsystem::Reception => 2,
            Subsystem::UdpListener => 3,
            Subsystem::Carrier => 4,
            Subsystem::WavGeneration => 5,
        }
    }

    /// The subsystem an event kind renders into, if any.
    pub fn for_kind(kind: &EventKind) -> Option<Subsystem> {
        match kind {
            EventKind::Transmission => Some(Subsystem::Transmission),
            EventKind::Reception => Some(Subsystem::Reception),
            EventKind::UdpListener => Some(Subsystem::UdpListener),
            EventKind::Carrier => Some(Subsystem::Carrier),
            EventKind::WavGeneration => Some(Subsystem::WavGeneration),
            EventKind::System => Some(Subsystem::System),
            _ => None,
        }
    }
}

/// Color tag attached to a rendered subsystem label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Red,
    Green,
    Blue,
    Gray,
    Orange,
    Purple,
}

/// Rendered state of one subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsystemState {
    pub label: String,
    pub color: StatusColor,
}

impl SubsystemState {
    pub fn new(label: impl Into<String>, color: StatusColor) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }

    /// The "idle" entry a subsystem falls back to for unrecognized statuses.
    pub fn idle(subsystem: Subsystem) -> Self {
        match subsystem {
            Subsystem::Transmission => Self::new("Transmission: Idle", StatusColor::Green),
            Subsystem::Reception => Self::new("Reception: Idle", StatusColor::Green),
            Subsystem::UdpListener => Self::new("UDP Listener: Idle", StatusColor::Green),
            Subsystem::Carrier => Self::new("Carrier Transmission: Idle", StatusColor::Green),
            Subsystem::WavGeneration => Self::new("WAV Generation: Idle", StatusColor::Green),
            Subsystem::System => Self::system(None),
        }
    }

    /// State shown before any event arrives.
    pub fn initial(subsystem: Subsystem) -> Self {
        Self::idle(subsystem)
    }

    fn system(status: Option<&str>) -> Self {
        match status {
            Some("running") => Self::new("System Status: running", StatusColor::Green),
            Some(other) => Self::new(format!("System Status: {}", other), StatusColor::Gray),
            None => Self::new("System Status: unknown", StatusColor::Gray),
        }
    }
}

// ─────────────────────────────────────────────────────────
// Notifications
// ─────────────────────────────────────────────────────────

/// Severity of a one-shot notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Informational, shown briefly
    Info,
    /// Operator-facing alert
    Alert,
    /// A failed operation
    Error,
}

/// Fire-and-forget message for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            text: text.into(),
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Alert,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: text.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────
// Projection
// ─────────────────────────────────────────────────────────

/// What the render sink should do in response to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "instruction", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Overwrite a subsystem's rendered state
    SetSubsystem {
        subsystem: Subsystem,
        state: SubsystemState,
    },
    /// Show (or replace) the persistent error banner
    ShowErrorBanner { text: String },
    /// Show a one-shot notification
    Notify(Notification),
    /// Nothing to render
    Ignore,
}

/// Map one event to a render instruction.
pub fn project(event: &StatusEvent) -> RenderInstruction {
    if let Some(subsystem) = Subsystem::for_kind(&event.kind) {
        return RenderInstruction::SetSubsystem {
            subsystem,
            state: project_subsystem(subsystem, event.status()),
        };
    }

    match &event.kind {
        EventKind::SystemError => {
            let message = event.message().unwrap_or("unknown error");
            RenderInstruction::ShowErrorBanner {
                text: format!("System Error: {}", message),
            }
        }
        EventKind::Unknown(topic) => {
            tracing::warn!("Ignoring event with unknown topic '{}'", topic);
            RenderInstruction::Ignore
        }
        // Routed to the message log, not projected
        EventKind::AprsMessage => RenderInstruction::Ignore,
        kind => match notification_for(kind, event) {
            Some(notification) => RenderInstruction::Notify(notification),
            None => {
                tracing::debug!(
                    "No notification for {} with status {:?}",
                    kind,
                    event.status()
                );
                RenderInstruction::Ignore
            }
        },
    }
}

/// Subsystem lookup table. Unrecognized or missing statuses fall back to the
/// subsystem's idle entry.
pub fn project_subsystem(subsystem: Subsystem, status: Option<&str>) -> SubsystemState {
    use StatusColor::*;

    match (subsystem, status) {
        (Subsystem::Transmission, Some("active")) => {
            SubsystemState::new("Transmission: Active", Red)
        }
        (Subsystem::Reception, Some("active")) => SubsystemState::new("Reception: Active", Blue),
        (Subsystem::Reception, Some("stopped")) => SubsystemState::new("Reception: Stopped", Gray),
        (Subsystem::UdpListener, Some("active")) => {
            SubsystemState::new("UDP Listener: Active", Orange)
        }
        (Subsystem::UdpListener, Some("stopped")) => {
            SubsystemState::new("UDP Listener: Stopped", Gray)
        }
        (Subsystem::Carrier, Some("active")) => {
            SubsystemState::new("Carrier Transmission: Active", Purple)
        }
        (Subsystem::Carrier, Some("stopped")) => {
            SubsystemState::new("Carrier Transmission: Stopped", Gray)
        }
        (Subsystem::WavGeneration, Some("completed")) => {
            SubsystemState::new("WAV Generation: Completed", Green)
        }
        (Subsystem::WavGeneration, Some("started")) => {
            SubsystemState::new("WAV Generation: In Progress", Blue)
        }
        (Subsystem::System, status) => SubsystemState::system(status),
        (subsystem, _) => SubsystemState::idle(subsystem),
    }
}

fn notification_for(kind: &EventKind, event: &StatusEvent) -> Option<Notification> {
    let status = event.status();
    match kind {
        EventKind::SystemShutdown => match status? {
            "initiating" => Some(Notification::alert("System is shutting down...")),
            "in_progress" => Some(Notification::info("Shutdown in progress...")),
            "completed" => Some(Notification::alert("System shutdown completed.")),
            _ => None,
        },
        EventKind::AprsQueueSet => match status? {
            "set" => Some(Notification::info("APRS message queue has been set.")),
            _ => None,
        },
        EventKind::CarrierOnlyMode => match status? {
            "enabled" => Some(Notification::alert("Carrier-only mode has been enabled.")),
            "disabled" => Some(Notification::alert("Carrier-only mode has been disabled.")),
            _ => None,
        },
        EventKind::ConfigApplied => match status? {
            "success" => Some(Notification::alert(
                "Configuration has been successfully applied.",
            )),
            _ => None,
        },
        EventKind::BackendRestarted => event.message().map(Notification::alert),
        EventKind::FrequencyUpdated => Some(Notification::info(format!(
            "Frequency updated to {} Hz.",
            event.display_field("frequency_hz")
        ))),
        EventKind::DeviceIndexUpdated => Some(Notification::info(format!(
            "Device index updated to {}.",
            event.display_field("device_index")
        ))),
        EventKind::UdpListenerConfigUpdated => Some(Notification::info(format!(
            "UDP Listener updated: IP={}, Port={}",
            event.display_field("send_ip"),
            event.display_field("send_port")
        ))),
        EventKind::GainUpdated => Some(Notification::info(format!(
            "Gain updated to {}.",
            event.display_field("gain")
        ))),
        EventKind::IfGainUpdated => Some(Notification::info(format!(
            "IF Gain updated to {}.",
            event.display_field("if_gain")
        ))),
        EventKind::CarrierOnlyUpdated => Some(Notification::info(format!(
            "Carrier Only setting updated to {}.",
            event.display_field("carrier_only")
        ))),
        EventKind::OtherConfigUpdated => Some(Notification::info(format!(
            "Other configuration parameters updated: {}",
            event.display_field("updated_params")
        ))),
        _ => None,
    }
}
