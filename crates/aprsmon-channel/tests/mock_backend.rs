//! Integration tests against an in-process mock of the radio backend.
//!
//! The mock speaks just enough HTTP/1.1 for the three config endpoints and
//! just enough Engine.IO/Socket.IO to open a session and push events.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_test::{assert_err, assert_ok};
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;

use aprsmon_channel::{
    ApiOutcome, BackendClient, ChannelClient, ConfigApi, ConnectionState, ReconnectPolicy,
};
use aprsmon_core::{ConfigRecord, ConfigValue, EventKind, StatusEvent};

// ─────────────────────────────────────────────────────────
// Mock HTTP backend
// ─────────────────────────────────────────────────────────

struct MockHttp {
    base_url: String,
    posted: Arc<Mutex<Vec<Value>>>,
}

async fn spawn_http_backend(initial: Value, restart_ok: bool) -> MockHttp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Arc::new(Mutex::new(initial));
    let posted = Arc::new(Mutex::new(Vec::new()));

    let posted_clone = Arc::clone(&posted);
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let config = Arc::clone(&config);
            let posted = Arc::clone(&posted_clone);
            tokio::spawn(async move {
                serve_http(stream, config, posted, restart_ok).await;
            });
        }
    });

    MockHttp {
        base_url: format!("http://{}", addr),
        posted,
    }
}

async fn serve_http(
    mut stream: TcpStream,
    config: Arc<Mutex<Value>>,
    posted: Arc<Mutex<Vec<Value>>>,
    restart_ok: bool,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let request_line = head.lines().next().unwrap_or_default().to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = &buf[header_end..];

    let response = if request_line.starts_with("GET /api/config") {
        json!({"status": "success", "config": config.lock().unwrap().clone()})
    } else if request_line.starts_with("POST /api/config") {
        match serde_json::from_slice::<Value>(body) {
            Ok(new_config) => {
                posted.lock().unwrap().push(new_config.clone());
                *config.lock().unwrap() = new_config;
                json!({"status": "success", "message": "Configuration updated"})
            }
            Err(_) => json!({"status": "error", "message": "Invalid JSON"}),
        }
    } else if request_line.starts_with("POST /api/restart_reception") {
        if restart_ok {
            json!({"status": "success", "message": "Reception restarted"})
        } else {
            json!({"status": "error", "message": "HackRF not found"})
        }
    } else {
        json!({"status": "error", "message": "Not found"})
    };

    let payload = response.to_string();
    let reply = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        payload.len(),
        payload
    );
    let _ = stream.write_all(reply.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn full_config() -> Value {
    json!({
        "frequency_hz": 144390000,
        "gain": 14,
        "if_gain": 47,
        "callsign_source": "VE2FPD",
        "callsign_dest": "APRS",
        "flags_before": 10,
        "flags_after": 4,
        "send_ip": "127.0.0.1",
        "send_port": 14581,
        "carrier_only": false,
        "device_index": 0
    })
}

// ─────────────────────────────────────────────────────────
// Config API tests
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_config_populates_record() {
    let backend = spawn_http_backend(full_config(), true).await;
    let client = BackendClient::new(&backend.base_url).unwrap();

    let record = assert_ok!(client.fetch_config().await);
    assert_eq!(record.get("callsign_source"), Some(&ConfigValue::Text("VE2FPD".into())));
    assert_eq!(record.get("frequency_hz"), Some(&ConfigValue::Number(144390000.0)));
    assert_eq!(record.len(), 11);
}

#[tokio::test]
async fn test_post_then_get_round_trips_record() {
    let backend = spawn_http_backend(full_config(), true).await;
    let client = BackendClient::new(&backend.base_url).unwrap();

    let mut record = client.fetch_config().await.unwrap();
    record.set("gain", ConfigValue::Number(20.0)).unwrap();
    record.set("callsign_dest", ConfigValue::Text("APZ001".into())).unwrap();
    record.set("send_port", ConfigValue::Null).unwrap();
    record.set("carrier_only", ConfigValue::Bool(true)).unwrap();

    let outcome = client.submit_config(&record).await.unwrap();
    assert!(outcome.is_success());

    let fetched = client.fetch_config().await.unwrap();
    assert_eq!(fetched, record);

    let posted = backend.posted.lock().unwrap();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0]["gain"], json!(20));
    assert_eq!(posted[0]["flags_before"], json!(10));
    assert_eq!(posted[0]["device_index"], json!(0));
    assert!(posted[0]["device_index"].is_u64());
    assert_eq!(posted[0]["send_port"], Value::Null);
}

#[tokio::test]
async fn test_restart_reception_reports_backend_error() {
    let backend = spawn_http_backend(full_config(), false).await;
    let client = BackendClient::new(&backend.base_url).unwrap();

    let outcome = client.restart_reception().await.unwrap();
    assert_eq!(
        outcome,
        ApiOutcome::Rejected {
            message: "HackRF not found".into()
        }
    );
}

#[tokio::test]
async fn test_restart_reception_success() {
    let backend = spawn_http_backend(full_config(), true).await;
    let client = BackendClient::new(&backend.base_url).unwrap();
    let outcome = assert_ok!(client.restart_reception().await);
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        BackendClient::with_timeout(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = assert_err!(client.submit_config(&ConfigRecord::new()).await);
    assert!(err.is_recoverable());
}

// ─────────────────────────────────────────────────────────
// Mock Socket.IO backend
// ─────────────────────────────────────────────────────────

/// Accepts one WebSocket session, performs the handshake, then pushes `frames`.
async fn spawn_socketio_backend(frames: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(ws) = tokio_tungstenite::accept_async(stream).await else {
            return;
        };
        let (mut sink, mut stream) = ws.split();

        let open = r#"0{"sid":"mock","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;
        sink.send(WsMessage::Text(open.to_string().into())).await.unwrap();

        // Wait for the namespace CONNECT before acknowledging it.
        while let Some(Ok(msg)) = stream.next().await {
            if let WsMessage::Text(text) = msg {
                if text.as_str() == "40" {
                    break;
                }
            }
        }
        sink.send(WsMessage::Text(r#"40{"sid":"ns-mock"}"#.to_string().into()))
            .await
            .unwrap();

        // A ping must be answered before events flow.
        sink.send(WsMessage::Text("2".to_string().into())).await.unwrap();
        while let Some(Ok(msg)) = stream.next().await {
            if let WsMessage::Text(text) = msg {
                if text.as_str() == "3" {
                    break;
                }
            }
        }

        for frame in frames {
            sink.send(WsMessage::Text(frame.into())).await.unwrap();
        }

        // Keep the session open until the client leaves.
        while let Some(Ok(_)) = stream.next().await {}
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_events_reach_subscribers_in_order() {
    let frames = vec![
        r#"42["reception_status",{"status":"active"}]"#.to_string(),
        r#"42["aprs_message",{"message":"VE2FPD>APRS:>hello"}]"#.to_string(),
        r#"42["mystery_topic",{"x":1}]"#.to_string(),
        "garbage".to_string(),
        r#"42["reception_status",{"status":"stopped"}]"#.to_string(),
    ];
    let base = spawn_socketio_backend(frames).await;

    let client = ChannelClient::connect(&base).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<StatusEvent>();
    for kind in [EventKind::Reception, EventKind::AprsMessage] {
        let tx = tx.clone();
        client.subscribe(kind, move |event| {
            let _ = tx.send(event);
        });
    }

    let mut received = Vec::new();
    while received.len() < 3 {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed");
        received.push(event);
    }

    assert_eq!(received[0].kind, EventKind::Reception);
    assert_eq!(received[0].status(), Some("active"));
    assert_eq!(received[1].kind, EventKind::AprsMessage);
    assert_eq!(received[1].message(), Some("VE2FPD>APRS:>hello"));
    assert_eq!(received[2].status(), Some("stopped"));
    assert!(client.is_connected());

    client.disconnect().await;
}

#[tokio::test]
async fn test_events_outside_default_namespace_are_dropped() {
    let frames = vec![
        r#"42/admin,["reception_status",{"status":"active"}]"#.to_string(),
        r#"42["reception_status",{"status":"stopped"}]"#.to_string(),
        r#"42/admin,["aprs_message",{"message":"N0CALL>APRS:>elsewhere"}]"#.to_string(),
        r#"42["aprs_message",{"message":"VE2FPD>APRS:>done"}]"#.to_string(),
    ];
    let base = spawn_socketio_backend(frames).await;

    let client = ChannelClient::connect(&base).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel::<StatusEvent>();
    for kind in [EventKind::Reception, EventKind::AprsMessage] {
        let tx = tx.clone();
        client.subscribe(kind, move |event| {
            let _ = tx.send(event);
        });
    }

    let mut received = Vec::new();
    while received.len() < 2 {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed");
        received.push(event);
    }

    assert_eq!(received[0].status(), Some("stopped"));
    assert_eq!(received[1].message(), Some("VE2FPD>APRS:>done"));
    // Frames are dispatched in order, so anything from /admin would already be queued.
    assert!(rx.try_recv().is_err());

    client.disconnect().await;
}

#[tokio::test]
async fn test_state_reports_connected_after_handshake() {
    let base = spawn_socketio_backend(Vec::new()).await;
    let client = ChannelClient::connect(&base).unwrap();
    let mut state_rx = client.state_receiver();

    tokio::time::timeout(Duration::from_secs(5), async {
        while *state_rx.borrow_and_update() != ConnectionState::Connected {
            state_rx.changed().await.unwrap();
        }
    })
    .await
    .expect("never reached Connected");

    client.disconnect().await;

    tokio::time::timeout(Duration::from_secs(5), async {
        while *state_rx.borrow_and_update() != ConnectionState::Disconnected {
            if state_rx.changed().await.is_err() {
                break;
            }
        }
    })
    .await
    .expect("never reached Disconnected");
    assert_eq!(client.connection_state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_lost_session_triggers_reconnecting_state() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Accept one session and close it right after the open packet.
    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            if let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await {
                let open = r#"0{"sid":"gone","pingInterval":25000,"pingTimeout":20000}"#;
                let _ = ws.send(WsMessage::Text(open.to_string().into())).await;
                let _ = ws.send(WsMessage::Text("1".to_string().into())).await;
                let _ = ws.close(None).await;
            }
        }
    });

    let policy = ReconnectPolicy {
        initial_backoff: Duration::from_secs(10),
        max_backoff: Duration::from_secs(10),
        max_attempts: 1,
    };
    let client =
        ChannelClient::connect_with_policy(&format!("http://{}", addr), policy).unwrap();
    let mut state_rx = client.state_receiver();

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if matches!(
                *state_rx.borrow_and_update(),
                ConnectionState::Reconnecting { .. }
            ) {
                return;
            }
            state_rx.changed().await.unwrap();
        }
    })
    .await
    .expect("never started reconnecting");

    client.disconnect().await;
}
