//! # aprsmon-channel - Backend Connectivity
//!
//! Talks to the APRS backend over its two interfaces:
//!
//! - the **push channel**, a Socket.IO session over WebSocket that streams
//!   named status events ([`ChannelClient`]);
//! - the **config API**, plain HTTP/JSON for fetching and submitting device
//!   configuration and restarting reception ([`BackendClient`]).
//!
//! Depends on [`aprsmon_core`] for event types and error handling.
//!
//! ## Public API
//!
//! ### Push Channel
//! - [`ChannelClient`] - Connect, `subscribe(kind, handler)`, observe state
//! - [`ConnectionState`] - Connecting / Connected / Reconnecting / Disconnected
//! - [`ReconnectPolicy`] - Exponential backoff settings
//! - [`parse_frame()`] - Decode one Engine.IO / Socket.IO text frame
//!
//! ### Config API
//! - [`ConfigApi`] - Async trait for the three config endpoints
//! - [`BackendClient`] - `reqwest` implementation
//! - [`ApiOutcome`] - Backend verdict on a submitted command

pub mod client;
pub mod http;
pub mod protocol;

pub use client::{
    ChannelClient, ConnectionState, EventHandler, ReconnectPolicy, MAX_RECONNECT_ATTEMPTS,
};
pub use http::{ApiOutcome, BackendClient, ConfigApi, LocalConfigApi, DEFAULT_REQUEST_TIMEOUT};
pub use protocol::{parse_frame, socket_url, ChannelMessage, Handshake};
