//! Engine.IO v4 / Socket.IO v5 framing for the backend push channel.
//!
//! The backend speaks Socket.IO over a plain WebSocket transport. Each text
//! frame is one Engine.IO packet: a single type digit followed by an optional
//! payload. Engine.IO `message` packets (`4`) carry a Socket.IO packet, whose
//! own type digit follows immediately:
//!
//! ```text
//! 0{"sid":"..","pingInterval":25000,"pingTimeout":20000}   open
//! 2                                                        ping (reply "3")
//! 40{"sid":".."}                                           namespace connected
//! 42["reception_status",{"status":"active"}]               event
//! 42/admin,7["gain_updated",{"gain":20}]                   event with namespace and ack id
//! ```
//!
//! Protocol reference: <https://socket.io/docs/v4/socket-io-protocol/>

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use aprsmon_core::prelude::*;

// ---------------------------------------------------------------------------
// Wire constants
// ---------------------------------------------------------------------------

/// Engine.IO pong reply to a bare server ping.
pub const PONG: &str = "3";

/// The only Socket.IO namespace this client joins.
pub const DEFAULT_NAMESPACE: &str = "/";

/// Socket.IO CONNECT for the default namespace.
pub const CONNECT_DEFAULT_NAMESPACE: &str = "40";

/// Path the Socket.IO server is mounted on.
const SOCKET_IO_PATH: &str = "/socket.io/";

// ---------------------------------------------------------------------------
// Handshake
// ---------------------------------------------------------------------------

/// Payload of the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    /// Server ping period in milliseconds.
    #[serde(default = "default_ping_interval")]
    pub ping_interval: u64,
    /// Grace period after a missed ping in milliseconds.
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: u64,
}

fn default_ping_interval() -> u64 {
    25_000
}

fn default_ping_timeout() -> u64 {
    20_000
}

impl Handshake {
    /// How long the connection may stay silent before it is considered dead.
    pub fn liveness_window(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

// ---------------------------------------------------------------------------
// Decoded frames
// ---------------------------------------------------------------------------

/// One decoded text frame from the push channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelMessage {
    /// Engine.IO open handshake.
    Open(Handshake),
    /// Engine.IO ping; the payload must be echoed in the pong.
    Ping(String),
    /// Engine.IO pong (only sent by servers answering a client probe).
    Pong,
    /// Socket.IO namespace connection acknowledged.
    Connected { namespace: String },
    /// Socket.IO namespace connection refused.
    ConnectError { namespace: String, message: String },
    /// A named event with its first argument.
    Event {
        namespace: String,
        ack_id: Option<u64>,
        topic: String,
        payload: Value,
    },
    /// Server closed the Engine.IO session or the Socket.IO namespace.
    Disconnect,
    /// Engine.IO noop.
    Noop,
    /// Anything this client does not understand.
    Unknown(String),
}

impl ChannelMessage {
    /// Encode the pong reply for a ping payload.
    pub fn pong_for(payload: &str) -> String {
        format!("{PONG}{payload}")
    }

    /// Whether the message belongs to the default namespace. Engine.IO
    /// level messages carry no namespace and always do.
    pub fn is_default_namespace(&self) -> bool {
        match self {
            ChannelMessage::Connected { namespace }
            | ChannelMessage::ConnectError { namespace, .. }
            | ChannelMessage::Event { namespace, .. } => namespace == DEFAULT_NAMESPACE,
            _ => true,
        }
    }
}

/// Decode one WebSocket text frame.
///
/// Never fails: undecodable input is returned as [`ChannelMessage::Unknown`].
pub fn parse_frame(text: &str) -> ChannelMessage {
    let mut chars = text.chars();
    let Some(packet_type) = chars.next() else {
        return ChannelMessage::Unknown(String::new());
    };
    let body = chars.as_str();

    match packet_type {
        '0' => match serde_json::from_str::<Handshake>(body) {
            Ok(handshake) => ChannelMessage::Open(handshake),
            Err(_) => ChannelMessage::Unknown(text.to_string()),
        },
        '1' => ChannelMessage::Disconnect,
        '2' => ChannelMessage::Ping(body.to_string()),
        '3' => ChannelMessage::Pong,
        '4' => parse_socket_packet(body).unwrap_or_else(|| ChannelMessage::Unknown(text.to_string())),
        '6' => ChannelMessage::Noop,
        _ => ChannelMessage::Unknown(text.to_string()),
    }
}

/// Decode the Socket.IO packet carried by an Engine.IO message.
fn parse_socket_packet(packet: &str) -> Option<ChannelMessage> {
    let mut chars = packet.chars();
    let packet_type = chars.next()?;
    let (namespace, rest) = split_namespace(chars.as_str());

    match packet_type {
        '0' => Some(ChannelMessage::Connected { namespace }),
        '1' => Some(ChannelMessage::Disconnect),
        '2' => {
            let (ack_id, data) = split_ack_id(rest);
            let mut args = match serde_json::from_str::<Value>(data).ok()? {
                Value::Array(args) => args.into_iter(),
                _ => return None,
            };
            let topic = match args.next()? {
                Value::String(topic) => topic,
                _ => return None,
            };
            let payload = args.next().unwrap_or(Value::Null);
            Some(ChannelMessage::Event {
                namespace,
                ack_id,
                topic,
                payload,
            })
        }
        '4' => {
            let message = serde_json::from_str::<Value>(rest)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| rest.to_string());
            Some(ChannelMessage::ConnectError { namespace, message })
        }
        _ => None,
    }
}

/// Split an optional `/namespace,` prefix.
fn split_namespace(rest: &str) -> (String, &str) {
    if rest.starts_with('/') {
        match rest.find(',') {
            Some(idx) => (rest[..idx].to_string(), &rest[idx + 1..]),
            None => (rest.to_string(), ""),
        }
    } else {
        ("/".to_string(), rest)
    }
}

/// Split an optional numeric ack id.
fn split_ack_id(rest: &str) -> (Option<u64>, &str) {
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return (None, rest);
    }
    (rest[..digits].parse().ok(), &rest[digits..])
}

// ---------------------------------------------------------------------------
// URL handling
// ---------------------------------------------------------------------------

/// Build the WebSocket transport URL from the backend base URL.
///
/// `http://host:5000` becomes `ws://host:5000/socket.io/?EIO=4&transport=websocket`.
/// `ws`/`wss` bases are accepted as-is apart from the path and query.
pub fn socket_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| Error::invalid_url(base, e.to_string()))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(Error::invalid_url(
                base,
                format!("unsupported scheme '{}'", other),
            ))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| Error::invalid_url(base, "cannot change scheme"))?;
    url.set_path(SOCKET_IO_PATH);
    url.set_query(Some("EIO=4&transport=websocket"));
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- Engine.IO packets ---------------------------------------------------

    #[test]
    fn test_parse_open_handshake() {
        let msg = parse_frame(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":5000,"maxPayload":1000000}"#);
        match msg {
            ChannelMessage::Open(h) => {
                assert_eq!(h.sid, "abc");
                assert_eq!(h.ping_interval, 25_000);
                assert_eq!(h.liveness_window(), Duration::from_millis(30_000));
            }
            other => panic!("expected Open, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_open_without_timings_uses_defaults() {
        let ChannelMessage::Open(h) = parse_frame(r#"0{"sid":"x"}"#) else {
            panic!("expected Open");
        };
        assert_eq!(h.ping_interval, 25_000);
        assert_eq!(h.ping_timeout, 20_000);
    }

    #[test]
    fn test_parse_ping_and_pong_reply() {
        assert_eq!(parse_frame("2"), ChannelMessage::Ping(String::new()));
        assert_eq!(parse_frame("2probe"), ChannelMessage::Ping("probe".into()));
        assert_eq!(ChannelMessage::pong_for(""), "3");
        assert_eq!(ChannelMessage::pong_for("probe"), "3probe");
    }

    #[test]
    fn test_parse_close_and_noop() {
        assert_eq!(parse_frame("1"), ChannelMessage::Disconnect);
        assert_eq!(parse_frame("6"), ChannelMessage::Noop);
        assert_eq!(parse_frame("3"), ChannelMessage::Pong);
    }

    #[test]
    fn test_parse_empty_frame_is_unknown() {
        assert!(matches!(parse_frame(""), ChannelMessage::Unknown(_)));
    }

    // -- Socket.IO packets ---------------------------------------------------

    #[test]
    fn test_parse_namespace_connected() {
        assert_eq!(
            parse_frame(r#"40{"sid":"xyz"}"#),
            ChannelMessage::Connected {
                namespace: "/".into()
            }
        );
        assert_eq!(
            parse_frame("40/admin,"),
            ChannelMessage::Connected {
                namespace: "/admin".into()
            }
        );
    }

    #[test]
    fn test_parse_event() {
        let msg = parse_frame(r#"42["reception_status",{"status":"active"}]"#);
        assert_eq!(
            msg,
            ChannelMessage::Event {
                namespace: "/".into(),
                ack_id: None,
                topic: "reception_status".into(),
                payload: json!({"status": "active"}),
            }
        );
    }

    #[test]
    fn test_parse_event_with_namespace_and_ack_id() {
        let msg = parse_frame(r#"42/admin,7["gain_updated",{"gain":20}]"#);
        assert_eq!(
            msg,
            ChannelMessage::Event {
                namespace: "/admin".into(),
                ack_id: Some(7),
                topic: "gain_updated".into(),
                payload: json!({"gain": 20}),
            }
        );
    }

    #[test]
    fn test_default_namespace_filter() {
        assert!(parse_frame(r#"42["reception_status",{"status":"active"}]"#).is_default_namespace());
        assert!(parse_frame("40").is_default_namespace());
        assert!(parse_frame("2").is_default_namespace());
        assert!(!parse_frame(r#"42/admin,["reception_status",{"status":"active"}]"#)
            .is_default_namespace());
        assert!(!parse_frame("40/admin,").is_default_namespace());
    }

    #[test]
    fn test_parse_event_without_payload() {
        let ChannelMessage::Event { payload, .. } = parse_frame(r#"42["system_status"]"#) else {
            panic!("expected Event");
        };
        assert_eq!(payload, Value::Null);
    }

    #[test]
    fn test_parse_event_with_embedded_newline() {
        let ChannelMessage::Event { payload, .. } =
            parse_frame(r#"42["aprs_message",{"message":"a\nb"}]"#)
        else {
            panic!("expected Event");
        };
        assert_eq!(payload["message"], "a\nb");
    }

    #[test]
    fn test_parse_malformed_event_is_unknown() {
        assert!(matches!(parse_frame("42not json"), ChannelMessage::Unknown(_)));
        assert!(matches!(parse_frame(r#"42{"a":1}"#), ChannelMessage::Unknown(_)));
        assert!(matches!(parse_frame("42[1,2]"), ChannelMessage::Unknown(_)));
        assert!(matches!(parse_frame("42[]"), ChannelMessage::Unknown(_)));
    }

    #[test]
    fn test_parse_connect_error() {
        assert_eq!(
            parse_frame(r#"44{"message":"Not authorized"}"#),
            ChannelMessage::ConnectError {
                namespace: "/".into(),
                message: "Not authorized".into()
            }
        );
    }

    #[test]
    fn test_parse_namespace_disconnect() {
        assert_eq!(parse_frame("41"), ChannelMessage::Disconnect);
    }

    #[test]
    fn test_parse_binary_event_is_unknown() {
        assert!(matches!(
            parse_frame(r#"451-["file",{"_placeholder":true,"num":0}]"#),
            ChannelMessage::Unknown(_)
        ));
    }

    // -- socket_url ----------------------------------------------------------

    #[test]
    fn test_socket_url_from_http() {
        let url = socket_url("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            url.as_str(),
            "ws://127.0.0.1:5000/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_socket_url_from_https_with_path() {
        let url = socket_url("https://radio.local/dashboard/").unwrap();
        assert_eq!(
            url.as_str(),
            "wss://radio.local/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_socket_url_rejects_other_schemes() {
        let err = socket_url("ftp://radio.local").unwrap_err();
        assert!(err.is_fatal());
        assert!(socket_url("not a url").is_err());
    }
}
