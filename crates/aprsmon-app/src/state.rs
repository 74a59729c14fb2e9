//! Application state (Model in TEA pattern)

use std::time::Duration;

use aprsmon_channel::ConnectionState;
use aprsmon_core::{MessageLog, Notification, RenderInstruction, Subsystem, SubsystemState};

use crate::config::Settings;
use crate::config_form::ConfigForm;
use crate::log_view_state::LogViewState;
use crate::notifications::Notifications;

/// Lifecycle phase of the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Dashboard: status panel and message log
    #[default]
    Normal,

    /// Config editor modal over the dashboard
    ConfigEditor,

    /// Restart-reception confirmation dialog
    ConfirmRestart,
}

/// Everything the render sink draws
#[derive(Debug)]
pub struct DashboardState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,

    /// Backend base URL, shown in the header
    pub backend_url: String,

    /// Push-channel connection state
    pub connection: ConnectionState,

    /// Rendered subsystem states, indexed by [`Subsystem::index`]
    pub subsystems: [SubsystemState; 6],

    /// Persistent system error banner
    pub error_banner: Option<String>,

    /// Received APRS messages
    pub message_log: MessageLog,
    pub log_view_state: LogViewState,

    pub notifications: Notifications,
    pub config_form: ConfigForm,

    /// A restart request is waiting for the backend
    pub restart_in_flight: bool,

    /// Full resets since startup
    pub reset_count: u64,

    /// Application settings from config file
    pub settings: Settings,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl DashboardState {
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            backend_url: settings.backend.url.clone(),
            connection: ConnectionState::Connecting,
            subsystems: Subsystem::ALL.map(SubsystemState::initial),
            error_banner: None,
            message_log: MessageLog::new(),
            log_view_state: LogViewState::new(),
            notifications: Notifications::new(Duration::from_millis(
                settings.ui.notification_ms,
            )),
            config_form: ConfigForm::new(),
            restart_in_flight: false,
            reset_count: 0,
            settings,
        }
    }

    pub fn subsystem(&self, subsystem: Subsystem) -> &SubsystemState {
        &self.subsystems[subsystem.index()]
    }

    /// Apply one projected instruction.
    pub fn apply(&mut self, instruction: RenderInstruction) {
        match instruction {
            RenderInstruction::SetSubsystem { subsystem, state } => {
                self.subsystems[subsystem.index()] = state;
            }
            RenderInstruction::ShowErrorBanner { text } => {
                self.error_banner = Some(text);
            }
            RenderInstruction::Notify(notification) => self.notify(notification),
            RenderInstruction::Ignore => {}
        }
    }

    /// Append a received message, keeping a scrolled-back view anchored.
    pub fn push_message(&mut self, text: impl Into<String>) {
        let evicted_lines = if self.message_log.len() == self.message_log.capacity() {
            self.message_log.get(0).map(|e| e.line_count()).unwrap_or(0)
        } else {
            0
        };
        self.message_log.push(text);
        self.log_view_state.lines_evicted(evicted_lines);
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Return the dashboard to its freshly-loaded state.
    ///
    /// Subsystems, banner, message log and the editor are cleared.
    /// Connection state and pending toasts survive.
    pub fn reset(&mut self) {
        self.ui_mode = UiMode::Normal;
        self.subsystems = Subsystem::ALL.map(SubsystemState::initial);
        self.error_banner = None;
        self.message_log.clear();
        self.log_view_state.reset();
        self.config_form = ConfigForm::new();
        self.restart_in_flight = false;
        self.reset_count += 1;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}
