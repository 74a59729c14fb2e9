//! Async Socket.IO client for the backend push channel.
//!
//! The [`ChannelClient`] owns one long-lived WebSocket connection to the
//! backend's Socket.IO endpoint. Incoming events are decoded into
//! [`StatusEvent`]s and handed to every handler registered for their kind.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       ChannelClient                          │
//! │                                                              │
//! │  ┌──────────────┐        ┌───────────────────────────────┐   │
//! │  │  Public API  │        │  Background Task              │   │
//! │  │              │        │                               │   │
//! │  │ subscribe() ─┼──reg──▶│  WebSocket read loop          │   │
//! │  │              │        │  ping → pong                  │   │
//! │  │ disconnect()─┼──cmd──▶│  event → handlers for kind    │   │
//! │  │              │        │                               │   │
//! │  │ state()    ◀─┼─watch─◀│  reconnect with backoff       │   │
//! │  └──────────────┘        └───────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers run on the background task and must not block; the intended
//! handler forwards the event into the application's message queue.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};
use url::Url;

use aprsmon_core::prelude::*;
use aprsmon_core::{EventKind, StatusEvent};

use super::protocol::{parse_frame, socket_url, ChannelMessage, CONNECT_DEFAULT_NAMESPACE};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Initial reconnection backoff duration.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Maximum reconnection backoff duration (cap).
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Maximum number of consecutive reconnection attempts before giving up.
pub const MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// Capacity of the command channel.
const CMD_CHANNEL_CAPACITY: usize = 8;

/// Silence allowed before the open handshake arrives.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(20);

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Current connection state of a [`ChannelClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    /// Not connected and not attempting to connect.
    Disconnected,
    /// Initial connection attempt in progress.
    Connecting,
    /// Connected and receiving events.
    Connected,
    /// Connection lost; background task is retrying.
    Reconnecting {
        /// The current reconnection attempt number (1-indexed).
        attempt: u32,
    },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Short label for status bars.
    pub fn label(&self) -> String {
        match self {
            ConnectionState::Disconnected => "Disconnected".to_string(),
            ConnectionState::Connecting => "Connecting".to_string(),
            ConnectionState::Connected => "Connected".to_string(),
            ConnectionState::Reconnecting { attempt } => format!("Reconnecting ({})", attempt),
        }
    }
}

/// Reconnection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Consecutive failed attempts before the client gives up.
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_backoff: INITIAL_BACKOFF,
            max_backoff: MAX_BACKOFF,
            max_attempts: MAX_RECONNECT_ATTEMPTS,
        }
    }
}

impl ReconnectPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Backoff before reconnection attempt `n`: `initial * 2^(n-1)`, capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let multiplier: u32 = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(multiplier)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

/// Callback invoked for each event of a subscribed kind.
pub type EventHandler = Arc<dyn Fn(StatusEvent) + Send + Sync>;

/// Handler registry shared between the public API and the background task.
#[derive(Clone, Default)]
struct Subscriptions {
    handlers: Arc<RwLock<HashMap<EventKind, Vec<EventHandler>>>>,
}

impl Subscriptions {
    fn add(&self, kind: EventKind, handler: EventHandler) {
        let mut guard = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        guard.entry(kind).or_default().push(handler);
    }

    fn kinds(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Hand `event` to every handler registered for its kind.
    ///
    /// Returns the number of handlers called.
    fn dispatch(&self, event: StatusEvent) -> usize {
        let handlers = {
            let guard = self.handlers.read().unwrap_or_else(|e| e.into_inner());
            match guard.get(&event.kind) {
                Some(list) => list.clone(),
                None => return 0,
            }
        };
        let count = handlers.len();
        if let Some((last, rest)) = handlers.split_last() {
            for handler in rest {
                handler(event.clone());
            }
            last(event);
        }
        count
    }
}

// ---------------------------------------------------------------------------
// Internal command type
// ---------------------------------------------------------------------------

/// Internal messages sent from the public API to the background task.
enum ClientCommand {
    /// Gracefully close the WebSocket connection and stop the background task.
    Disconnect,
}

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;
type WsSink = SplitSink<WsStream, WsMessage>;

// ---------------------------------------------------------------------------
// ChannelClient
// ---------------------------------------------------------------------------

/// Push-channel client.
///
/// Create with [`ChannelClient::connect`], register handlers with
/// [`subscribe`](Self::subscribe) and watch [`state_receiver`](Self::state_receiver)
/// for connection changes. Dropping the client stops the background task.
pub struct ChannelClient {
    url: Url,
    cmd_tx: mpsc::Sender<ClientCommand>,
    state_rx: watch::Receiver<ConnectionState>,
    subscriptions: Subscriptions,
}

impl std::fmt::Debug for ChannelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelClient")
            .field("url", &self.url.as_str())
            .field("connection_state", &*self.state_rx.borrow())
            .field("subscribed_kinds", &self.subscriptions.kinds())
            .finish()
    }
}

impl ChannelClient {
    /// Start connecting to the backend at `base_url` with the default policy.
    ///
    /// See [`connect_with_policy`](Self::connect_with_policy).
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::connect_with_policy(base_url, ReconnectPolicy::default())
    }

    /// Start connecting to the backend at `base_url`.
    ///
    /// Spawns the background task and returns immediately; the connection is
    /// established asynchronously and retried with exponential backoff. Must
    /// be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` cannot be turned into a
    /// Socket.IO WebSocket URL.
    pub fn connect_with_policy(base_url: &str, policy: ReconnectPolicy) -> Result<Self> {
        let url = socket_url(base_url)?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>(CMD_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let subscriptions = Subscriptions::default();

        info!("Connecting to push channel at {}", url);
        tokio::spawn(run_client_task(
            url.clone(),
            policy,
            cmd_rx,
            state_tx,
            subscriptions.clone(),
        ));

        Ok(Self {
            url,
            cmd_tx,
            state_rx,
            subscriptions,
        })
    }

    /// Register `handler` for every event of `kind`.
    ///
    /// Several handlers may share a kind; they run in registration order.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(StatusEvent) + Send + Sync + 'static,
    {
        trace!("Subscribing to '{}'", kind);
        self.subscriptions.add(kind, Arc::new(handler));
    }

    /// The WebSocket URL this client connects to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Return the current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state_rx.borrow().clone()
    }

    /// A receiver that observes every connection state change.
    pub fn state_receiver(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Return `true` if the client is currently connected.
    pub fn is_connected(&self) -> bool {
        self.state_rx.borrow().is_connected()
    }

    /// Gracefully close the connection and stop reconnecting.
    pub async fn disconnect(&self) {
        // The task may already have exited.
        let _ = self.cmd_tx.send(ClientCommand::Disconnect).await;
    }
}

// ---------------------------------------------------------------------------
// Background task
// ---------------------------------------------------------------------------

/// Why a single connection ended.
#[derive(Debug, PartialEq, Eq)]
enum LoopExit {
    /// Connection lost unexpectedly; reconnect.
    Lost,
    /// Disconnect requested or client dropped.
    Shutdown,
}

/// Entry point for the background WebSocket task.
async fn run_client_task(
    url: Url,
    policy: ReconnectPolicy,
    mut cmd_rx: mpsc::Receiver<ClientCommand>,
    state_tx: watch::Sender<ConnectionState>,
    subscriptions: Subscriptions,
) {
    let mut attempt: u32 = 0;

    loop {
        if attempt > 0 {
            if attempt > policy.max_attempts {
                error!(
                    "Push channel: exceeded {} reconnection attempts, giving up",
                    policy.max_attempts
                );
                break;
            }

            state_tx.send_replace(ConnectionState::Reconnecting { attempt });
            let backoff = policy.backoff(attempt);
            warn!(
                "Push channel: retrying in {:?} (attempt {}/{})",
                backoff, attempt, policy.max_attempts
            );

            tokio::select! {
                _ = tokio::time::sleep(backoff) => {}
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(ClientCommand::Disconnect) | None => break,
                    }
                }
            }
        }

        match connect_ws(&url).await {
            Ok(ws_stream) => {
                debug!("Push channel: WebSocket open");
                let exit = run_io_loop(ws_stream, &mut cmd_rx, &state_tx, &subscriptions).await;
                if exit == LoopExit::Shutdown {
                    break;
                }
                // A successful connect resets the counter.
                attempt = 1;
            }
            Err(err) => {
                warn!("Push channel: connection attempt failed: {}", err);
                attempt += 1;
            }
        }
    }

    state_tx.send_replace(ConnectionState::Disconnected);
    debug!("Push channel background task exiting");
}

/// Run one connection's read/write select loop.
async fn run_io_loop(
    ws_stream: WsStream,
    cmd_rx: &mut mpsc::Receiver<ClientCommand>,
    state_tx: &watch::Sender<ConnectionState>,
    subscriptions: &Subscriptions,
) -> LoopExit {
    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    let mut liveness = HANDSHAKE_TIMEOUT;
    let deadline = tokio::time::sleep(liveness);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            frame = ws_stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        deadline.as_mut().reset(Instant::now() + liveness);
                        match handle_ws_text(text.as_str(), &mut ws_sink, state_tx, subscriptions).await {
                            FrameOutcome::Continue => {}
                            FrameOutcome::Liveness(window) => {
                                liveness = window;
                                deadline.as_mut().reset(Instant::now() + liveness);
                            }
                            FrameOutcome::Closed => return LoopExit::Lost,
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) => {
                        debug!("Push channel: received Close frame");
                        return LoopExit::Lost;
                    }
                    Some(Ok(_)) => {
                        // Ping/Pong/Binary frames carry nothing we use
                    }
                    Some(Err(err)) => {
                        warn!("Push channel: WebSocket read error: {}", err);
                        return LoopExit::Lost;
                    }
                    None => {
                        debug!("Push channel: WebSocket stream ended");
                        return LoopExit::Lost;
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(ClientCommand::Disconnect) => {
                        send_close(&mut ws_sink).await;
                        return LoopExit::Shutdown;
                    }
                    None => {
                        debug!("Push channel: command channel closed, shutting down");
                        send_close(&mut ws_sink).await;
                        return LoopExit::Shutdown;
                    }
                }
            }

            _ = &mut deadline => {
                warn!("Push channel: no traffic for {:?}, assuming connection lost", liveness);
                return LoopExit::Lost;
            }
        }
    }
}

/// Result of handling one text frame.
enum FrameOutcome {
    Continue,
    /// Handshake received; use this silence window from now on.
    Liveness(Duration),
    /// Server closed the session.
    Closed,
}

/// Establish a new WebSocket connection to `url`.
async fn connect_ws(url: &Url) -> Result<WsStream> {
    let (ws_stream, _response) = connect_async(url.as_str())
        .await
        .map_err(|err| Error::channel(format!("Failed to connect to push channel: {err}")))?;
    Ok(ws_stream)
}

/// React to one decoded frame.
async fn handle_ws_text(
    text: &str,
    ws_sink: &mut WsSink,
    state_tx: &watch::Sender<ConnectionState>,
    subscriptions: &Subscriptions,
) -> FrameOutcome {
    let message = parse_frame(text);
    if !message.is_default_namespace() {
        debug!("Push channel: ignoring frame outside the default namespace: {}", text);
        return FrameOutcome::Continue;
    }

    match message {
        ChannelMessage::Open(handshake) => {
            debug!("Push channel: session {} opened", handshake.sid);
            send_text(ws_sink, CONNECT_DEFAULT_NAMESPACE).await;
            FrameOutcome::Liveness(handshake.liveness_window())
        }
        ChannelMessage::Ping(payload) => {
            send_text(ws_sink, &ChannelMessage::pong_for(&payload)).await;
            FrameOutcome::Continue
        }
        ChannelMessage::Connected { namespace } => {
            info!("Push channel: connected to namespace {}", namespace);
            state_tx.send_replace(ConnectionState::Connected);
            FrameOutcome::Continue
        }
        ChannelMessage::ConnectError { namespace, message } => {
            warn!("Push channel: namespace {} refused: {}", namespace, message);
            FrameOutcome::Closed
        }
        ChannelMessage::Event {
            topic, payload, ..
        } => {
            let event = StatusEvent::from_topic(&topic, payload);
            if matches!(event.kind, EventKind::Unknown(_)) {
                debug!("Push channel: unrecognized topic '{}'", topic);
            }
            if subscriptions.dispatch(event) == 0 {
                trace!("Push channel: no subscriber for '{}', dropping", topic);
            }
            FrameOutcome::Continue
        }
        ChannelMessage::Disconnect => {
            debug!("Push channel: server closed the session");
            FrameOutcome::Closed
        }
        ChannelMessage::Pong | ChannelMessage::Noop => FrameOutcome::Continue,
        ChannelMessage::Unknown(raw) => {
            debug!(
                "Push channel: ignoring unknown frame: {}",
                raw.chars().take(120).collect::<String>()
            );
            FrameOutcome::Continue
        }
    }
}

/// Send a text frame, logging write errors.
async fn send_text(ws_sink: &mut WsSink, text: &str) {
    if let Err(err) = ws_sink.send(WsMessage::Text(text.to_string().into())).await {
        warn!("Push channel: failed to send '{}': {}", text, err);
    }
}

/// Send a WebSocket Close frame, ignoring any write errors.
async fn send_close(ws_sink: &mut WsSink) {
    let _ = ws_sink.send(WsMessage::Text("41".to_string().into())).await;
    let _ = ws_sink.send(WsMessage::Close(None)).await;
    let _ = ws_sink.close().await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // -- ConnectionState -----------------------------------------------------

    #[test]
    fn test_connection_state_eq() {
        assert_eq!(ConnectionState::Disconnected, ConnectionState::Disconnected);
        assert_ne!(ConnectionState::Connected, ConnectionState::Disconnected);
        assert_eq!(
            ConnectionState::Reconnecting { attempt: 1 },
            ConnectionState::Reconnecting { attempt: 1 }
        );
        assert_ne!(
            ConnectionState::Reconnecting { attempt: 1 },
            ConnectionState::Reconnecting { attempt: 2 }
        );
    }

    #[test]
    fn test_connection_state_label() {
        assert_eq!(ConnectionState::Connected.label(), "Connected");
        assert_eq!(
            ConnectionState::Reconnecting { attempt: 3 }.label(),
            "Reconnecting (3)"
        );
    }

    #[test]
    fn test_connection_state_serializes_tagged() {
        let json = serde_json::to_value(ConnectionState::Reconnecting { attempt: 2 }).unwrap();
        assert_eq!(json, json!({"state": "reconnecting", "attempt": 2}));
    }

    // -- ReconnectPolicy::backoff --------------------------------------------

    #[test]
    fn test_reconnection_backoff_doubles() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
        assert_eq!(policy.backoff(4), Duration::from_secs(8));
        assert_eq!(policy.backoff(5), Duration::from_secs(16));
    }

    #[test]
    fn test_reconnection_backoff_capped_at_max() {
        let policy = ReconnectPolicy::default();
        // 1s * 2^5 = 32s → capped at 30s
        assert_eq!(policy.backoff(6), MAX_BACKOFF);
        assert_eq!(policy.backoff(MAX_RECONNECT_ATTEMPTS), MAX_BACKOFF);
    }

    #[test]
    fn test_reconnection_backoff_large_attempt_does_not_overflow() {
        assert_eq!(ReconnectPolicy::default().backoff(u32::MAX), MAX_BACKOFF);
    }

    // -- Subscriptions -------------------------------------------------------

    #[test]
    fn test_dispatch_reaches_every_handler_for_kind() {
        let subs = Subscriptions::default();
        let calls = Arc::new(AtomicUsize::new(0));
        for _ in 0..2 {
            let calls = Arc::clone(&calls);
            subs.add(
                EventKind::Reception,
                Arc::new(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        let event = StatusEvent::new(EventKind::Reception, json!({"status": "active"}));
        assert_eq!(subs.dispatch(event), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dispatch_without_subscriber_drops_event() {
        let subs = Subscriptions::default();
        subs.add(EventKind::Carrier, Arc::new(|_| {}));
        let event = StatusEvent::new(EventKind::Reception, json!({}));
        assert_eq!(subs.dispatch(event), 0);
    }

    #[test]
    fn test_dispatch_preserves_payload() {
        let subs = Subscriptions::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        subs.add(
            EventKind::AprsMessage,
            Arc::new(move |event: StatusEvent| {
                sink.lock().unwrap().push(event.message().unwrap_or_default().to_string());
            }),
        );

        subs.dispatch(StatusEvent::new(EventKind::AprsMessage, json!({"message": "m0"})));
        subs.dispatch(StatusEvent::new(EventKind::AprsMessage, json!({"message": "m1"})));
        assert_eq!(*seen.lock().unwrap(), vec!["m0", "m1"]);
    }

    // -- ChannelClient -------------------------------------------------------

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let err = ChannelClient::connect("ftp://radio.local").unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_unreachable_backend_gives_up_after_max_attempts() {
        let policy = ReconnectPolicy {
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
            max_attempts: 2,
        };
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let client = ChannelClient::connect_with_policy("http://127.0.0.1:9", policy).unwrap();
        let mut state_rx = client.state_receiver();

        let final_state = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if *state_rx.borrow_and_update() == ConnectionState::Disconnected {
                    return ConnectionState::Disconnected;
                }
                if state_rx.changed().await.is_err() {
                    return state_rx.borrow().clone();
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(final_state, ConnectionState::Disconnected);
    }

    #[test]
    fn test_client_is_debug() {
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_debug::<ChannelClient>();
    }
}
