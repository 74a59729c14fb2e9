//! aprsmon-app - Application state and orchestration for the APRS monitor
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! dashboard: `DashboardState` is the model, `Message` the input, and
//! `handler::update` the only place state changes. The `Engine` wires the
//! push channel and config API into the message queue for both frontends.

pub mod actions;
pub mod config;
pub mod config_form;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod log_view_state;
pub mod message;
pub mod notifications;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use config_form::{ConfigForm, FormField, FormStatus};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{update, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use log_view_state::LogViewState;
pub use message::Message;
pub use notifications::{Notifications, Toast};
pub use state::{AppPhase, DashboardState, UiMode};

// Re-export channel types for frontends
pub use aprsmon_channel::{ApiOutcome, ConnectionState};
