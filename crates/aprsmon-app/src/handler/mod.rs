//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `channel`: Push-channel event routing
//! - `config`: Config editor, submit and restart handlers
//! - `keys`: Key event handlers for UI modes
//! - `scroll`: Message log scroll handlers

pub(crate) mod channel;
pub(crate) mod config;
pub(crate) mod keys;
pub(crate) mod scroll;
pub(crate) mod update;


use aprsmon_core::ConfigRecord;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// `GET /api/config` in the background
    FetchConfig,

    /// `POST /api/config` in the background
    SubmitConfig(ConfigRecord),

    /// `POST /api/restart_reception` in the background
    RestartReception,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
