//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the dashboard state, the message channel, the shutdown
//! signal and both backend clients. Frontends only feed it messages and
//! read its state (or subscribe to its events).

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use aprsmon_channel::{BackendClient, ChannelClient, ConnectionState, ReconnectPolicy};
use aprsmon_core::prelude::*;
use aprsmon_core::{EventKind, StatusEvent, Subsystem, SubsystemState};

use crate::actions::handle_action;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::DashboardState;
use crate::UpdateAction;

/// Capacity of the engine event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    connection: ConnectionState,
    subsystems: [SubsystemState; 6],
    error_banner: Option<String>,
    last_seq: Option<u64>,
    notifications_pushed: u64,
    reset_count: u64,
}

impl StateSnapshot {
    fn capture(state: &DashboardState) -> Self {
        Self {
            connection: state.connection.clone(),
            subsystems: state.subsystems.clone(),
            error_banner: state.error_banner.clone(),
            last_seq: state.message_log.latest().map(|e| e.seq),
            notifications_pushed: state.notifications.total_pushed(),
            reset_count: state.reset_count,
        }
    }
}

/// Orchestration engine for the APRS monitor.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: DashboardState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, stdin, terminal).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    /// Loaded settings
    pub settings: Settings,

    /// Config API client
    api: BackendClient,

    /// Push-channel client; dropping it stops the connection task
    channel: ChannelClient,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create a new Engine connected to `settings.backend.url`.
    ///
    /// Performs all shared initialization:
    /// - Creates the dashboard state and message channel
    /// - Spawns the signal handler
    /// - Opens the push channel and subscribes every known topic
    /// - Forwards push-channel events into the message channel in order
    /// - Bridges connection state changes into the message channel
    /// - Starts the initial configuration fetch
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails only when the backend URL is unusable.
    pub fn new(settings: Settings) -> Result<Self> {
        let base_url = settings.backend.url.clone();

        let api = BackendClient::with_timeout(
            &base_url,
            Duration::from_millis(settings.backend.request_timeout_ms),
        )?;

        let state = DashboardState::with_settings(settings.clone());

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(settings.channel.event_buffer.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());

        let policy =
            ReconnectPolicy::default().with_max_attempts(settings.channel.max_reconnect_attempts);
        let channel = ChannelClient::connect_with_policy(&base_url, policy)?;
        let (channel_tx, channel_rx) = mpsc::unbounded_channel();
        Self::subscribe_all(&channel, &channel_tx);
        Self::spawn_event_forwarder(channel_rx, msg_tx.clone(), shutdown_rx.clone());
        Self::spawn_connection_bridge(
            channel.state_receiver(),
            msg_tx.clone(),
            shutdown_rx.clone(),
        );

        // Same as the dashboard's first load
        handle_action(UpdateAction::FetchConfig, msg_tx.clone(), api.clone());

        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        info!("Engine started for backend {}", base_url);

        Ok(Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            settings,
            api,
            channel,
            event_tx,
        })
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// EngineEvents for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, msg, &self.msg_tx, &self.api);

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. Used by the TUI runner
    /// which drains everything pending before rendering.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// The push-channel client.
    pub fn channel(&self) -> &ChannelClient {
        &self.channel
    }

    /// Initiate shutdown: notify subscribers, stop background tasks and
    /// close the push channel.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);
        let _ = self.shutdown_tx.send(true);
        self.channel.disconnect().await;
        info!("Engine shut down");
    }

    /// Route every known topic into `channel_tx`.
    ///
    /// Handlers run on the connection task and must not block, so they push
    /// into an unbounded queue that [`Self::spawn_event_forwarder`] drains.
    fn subscribe_all(channel: &ChannelClient, channel_tx: &mpsc::UnboundedSender<StatusEvent>) {
        for kind in EventKind::KNOWN {
            let tx = channel_tx.clone();
            channel.subscribe(kind.clone(), move |event| {
                if tx.send(event).is_err() {
                    debug!("Event forwarder stopped, dropping push-channel event");
                }
            });
        }
    }

    /// Move push-channel events into the message channel in arrival order.
    ///
    /// `send().await` waits while the message channel is full, so a burst
    /// larger than `event_buffer` is delayed rather than dropped.
    fn spawn_event_forwarder(
        mut channel_rx: mpsc::UnboundedReceiver<StatusEvent>,
        msg_tx: mpsc::Sender<Message>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = channel_rx.recv() => {
                        let Some(event) = event else { break };
                        if msg_tx.send(Message::Channel(event)).await.is_err() {
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("Event forwarder stopped");
        })
    }

    /// Forward connection state changes as messages until shutdown.
    fn spawn_connection_bridge(
        mut state_rx: watch::Receiver<ConnectionState>,
        msg_tx: mpsc::Sender<Message>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = state_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let state = state_rx.borrow_and_update().clone();
                        if msg_tx.send(Message::ConnectionChanged(state)).await.is_err() {
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("Connection bridge stopped");
        });
    }

    /// Compare pre/post snapshots and emit an event for each change.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if post.reset_count != pre.reset_count {
            self.emit(EngineEvent::DashboardReset);
        }

        if post.connection != pre.connection {
            self.emit(EngineEvent::ConnectionChanged {
                state: post.connection.clone(),
            });
        }

        for subsystem in Subsystem::ALL {
            let index = subsystem.index();
            if post.subsystems[index] != pre.subsystems[index] {
                self.emit(EngineEvent::SubsystemChanged {
                    subsystem,
                    state: post.subsystems[index].clone(),
                });
            }
        }

        if post.error_banner != pre.error_banner {
            self.emit(EngineEvent::ErrorBanner {
                text: post.error_banner.clone(),
            });
        }

        if post.last_seq != pre.last_seq {
            for entry in self
                .state
                .message_log
                .iter()
                .filter(|e| Some(e.seq) > pre.last_seq)
            {
                self.emit(EngineEvent::MessageReceived {
                    entry: entry.clone(),
                });
            }
        }

        let new_notifications = post.notifications_pushed - pre.notifications_pushed;
        if new_notifications > 0 {
            let queued = self.state.notifications.len();
            let fresh = (new_notifications as usize).min(queued);
            for toast in self.state.notifications.iter().skip(queued - fresh) {
                self.emit(EngineEvent::Notification {
                    notification: toast.notification.clone(),
                });
            }
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
