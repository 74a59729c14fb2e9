//! Message types for the application (TEA pattern)

use aprsmon_channel::{ApiOutcome, ConnectionState};
use aprsmon_core::{ConfigRecord, StatusEvent};

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (toast expiry)
    Tick,

    /// Quit the monitor (q, Ctrl+C, signal handler, stdin in headless mode)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Push Channel
    // ─────────────────────────────────────────────────────────
    /// Status event delivered by the push channel
    Channel(StatusEvent),

    /// Push-channel connection state changed
    ConnectionChanged(ConnectionState),

    // ─────────────────────────────────────────────────────────
    // Message Log Scrolling
    // ─────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────
    // Banner and Toasts
    // ─────────────────────────────────────────────────────────
    /// Hide the system error banner
    DismissErrorBanner,

    /// Hide the newest notification toast
    DismissNotification,

    // ─────────────────────────────────────────────────────────
    // Config Editor
    // ─────────────────────────────────────────────────────────
    /// Open the editor and fetch the current configuration
    OpenConfigEditor,
    CloseConfigEditor,

    /// Fetch the configuration again
    ReloadConfig,

    /// `GET /api/config` succeeded
    ConfigLoaded(ConfigRecord),

    /// `GET /api/config` failed (transport or backend error)
    ConfigLoadFailed { error: String },

    FormNext,
    FormPrev,
    FormInput(char),
    FormBackspace,
    FormToggle,

    /// Validate the form and `POST /api/config`
    SubmitConfig,

    /// The backend answered the submit
    ConfigSubmitted(ApiOutcome),

    /// The submit never got an answer
    ConfigSubmitFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Restart Reception
    // ─────────────────────────────────────────────────────────
    /// Restart requested (asks first when confirmation is enabled)
    RequestRestartReception,
    ConfirmRestart,
    CancelRestart,

    /// The backend answered the restart
    RestartCompleted(ApiOutcome),

    /// The restart never got an answer
    RestartFailed { error: String },
}
