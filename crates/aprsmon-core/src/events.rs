//! Push-channel event definitions
//!
//! Every event the backend pushes is a named topic plus a JSON payload. The
//! topic name is decoded into an [`EventKind`] once, at the channel boundary,
//! so the rest of the application matches on an enum instead of strings.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config_record::format_number;

// ─────────────────────────────────────────────────────────
// EventKind
// ─────────────────────────────────────────────────────────

/// Which backend topic an event was published on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    // Subsystem status topics (persistent rendered state)
    Transmission,
    Reception,
    UdpListener,
    Carrier,
    WavGeneration,
    System,
    SystemError,

    // Received APRS traffic
    AprsMessage,

    // One-shot notification topics
    SystemShutdown,
    AprsQueueSet,
    CarrierOnlyMode,
    ConfigApplied,
    BackendRestarted,

    // Field-update notifications
    FrequencyUpdated,
    DeviceIndexUpdated,
    UdpListenerConfigUpdated,
    GainUpdated,
    IfGainUpdated,
    CarrierOnlyUpdated,
    OtherConfigUpdated,

    /// A topic this client does not know about
    Unknown(String),
}

impl EventKind {
    /// Every topic the client subscribes to on connect.
    pub const KNOWN: &'static [EventKind] = &[
        EventKind::Transmission,
        EventKind::Reception,
        EventKind::UdpListener,
        EventKind::Carrier,
        EventKind::WavGeneration,
        EventKind::System,
        EventKind::SystemError,
        EventKind::AprsMessage,
        EventKind::SystemShutdown,
        EventKind::AprsQueueSet,
        EventKind::CarrierOnlyMode,
        EventKind::ConfigApplied,
        EventKind::BackendRestarted,
        EventKind::FrequencyUpdated,
        EventKind::DeviceIndexUpdated,
        EventKind::UdpListenerConfigUpdated,
        EventKind::GainUpdated,
        EventKind::IfGainUpdated,
        EventKind::CarrierOnlyUpdated,
        EventKind::OtherConfigUpdated,
    ];

    /// Decode a wire topic name.
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "transmission_status" => EventKind::Transmission,
            "reception_status" => EventKind::Reception,
            "udp_listener_status" => EventKind::UdpListener,
            "carrier_status" => EventKind::Carrier,
            "wav_generation" => EventKind::WavGeneration,
            "system_status" => EventKind::System,
            "system_error" => EventKind::SystemError,
            "aprs_message" => EventKind::AprsMessage,
            "system_shutdown" => EventKind::SystemShutdown,
            "aprs_queue_set" => EventKind::AprsQueueSet,
            "carrier_only_mode" => EventKind::CarrierOnlyMode,
            "config_applied" => EventKind::ConfigApplied,
            "backend_restarted" => EventKind::BackendRestarted,
            "frequency_updated" => EventKind::FrequencyUpdated,
            "device_index_updated" => EventKind::DeviceIndexUpdated,
            "udp_listener_config_updated" => EventKind::UdpListenerConfigUpdated,
            "gain_updated" => EventKind::GainUpdated,
            "if_gain_updated" => EventKind::IfGainUpdated,
            "carrier_only_updated" => EventKind::CarrierOnlyUpdated,
            "other_config_updated" => EventKind::OtherConfigUpdated,
            other => EventKind::Unknown(other.to_string()),
        }
    }

    /// The wire topic name for this kind.
    pub fn topic(&self) -> &str {
        match self {
            EventKind::Transmission => "transmission_status",
            EventKind::Reception => "reception_status",
            EventKind::UdpListener => "udp_listener_status",
            EventKind::Carrier => "carrier_status",
            EventKind::WavGeneration => "wav_generation",
            EventKind::System => "system_status",
            EventKind::SystemError => "system_error",
            EventKind::AprsMessage => "aprs_message",
            EventKind::SystemShutdown => "system_shutdown",
            EventKind::AprsQueueSet => "aprs_queue_set",
            EventKind::CarrierOnlyMode => "carrier_only_mode",
            EventKind::ConfigApplied => "config_applied",
            EventKind::BackendRestarted => "backend_restarted",
            EventKind::FrequencyUpdated => "frequency_updated",
            EventKind::DeviceIndexUpdated => "device_index_updated",
            EventKind::UdpListenerConfigUpdated => "udp_listener_config_updated",
            EventKind::GainUpdated => "gain_updated",
            EventKind::IfGainUpdated => "if_gain_updated",
            EventKind::CarrierOnlyUpdated => "carrier_only_updated",
            EventKind::OtherConfigUpdated => "other_config_updated",
            EventKind::Unknown(name) => name,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.topic())
    }
}

impl Serialize for EventKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.topic())
    }
}

// ─────────────────────────────────────────────────────────
// StatusEvent
// ─────────────────────────────────────────────────────────

/// A single event received on the push channel.
///
/// Events are transient: they are projected onto dashboard state and then
/// dropped. Payload accessors never fail; a missing or mistyped field is
/// reported as `None` so callers can fall back to a default rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEvent {
    pub kind: EventKind,
    pub payload: Map<String, Value>,
}

impl StatusEvent {
    /// Build an event from a decoded topic and its first argument.
    ///
    /// Non-object payloads are wrapped as `{"value": <payload>}` so that
    /// accessors behave uniformly.
    pub fn new(kind: EventKind, payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        Self { kind, payload }
    }

    /// Build an event from a wire topic name.
    pub fn from_topic(topic: &str, payload: Value) -> Self {
        Self::new(EventKind::from_topic(topic), payload)
    }

    /// The payload's `status` field, if it is a string.
    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    /// The payload's `message` field, if it is a string.
    pub fn message(&self) -> Option<&str> {
        self.str_field("message")
    }

    /// Raw payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// String payload field.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// Payload field rendered for display: strings verbatim, integral floats
    /// without a trailing `.0`, everything else as compact JSON. Missing
    /// fields render as `"unknown"`.
    pub fn display_field(&self, key: &str) -> String {
        match self.payload.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if n.is_f64() => format_number(f),
                _ => n.to_string(),
            },
            Some(Value::Null) | None => "unknown".to_string(),
            Some(other) => other.to_string(),
        }
    }
}
