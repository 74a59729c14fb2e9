//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use aprsmon_core::prelude::*;

use crate::message::Message;
use crate::state::{AppPhase, DashboardState};

use super::{channel, config, keys::handle_key, scroll, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut DashboardState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            let expired = state.notifications.prune(Instant::now());
            if expired > 0 {
                trace!("Expired {} notification(s)", expired);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Push Channel
        // ─────────────────────────────────────────────────────────
        Message::Channel(event) => channel::handle_status_event(state, event),

        Message::ConnectionChanged(connection) => {
            if connection != state.connection {
                info!("Push channel: {}", connection.label());
                state.connection = connection;
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Scroll Messages
        // ─────────────────────────────────────────────────────────
        Message::ScrollUp => scroll::handle_scroll_up(state),
        Message::ScrollDown => scroll::handle_scroll_down(state),
        Message::ScrollToTop => scroll::handle_scroll_to_top(state),
        Message::ScrollToBottom => scroll::handle_scroll_to_bottom(state),
        Message::PageUp => scroll::handle_page_up(state),
        Message::PageDown => scroll::handle_page_down(state),

        // ─────────────────────────────────────────────────────────
        // Banner and Toasts
        // ─────────────────────────────────────────────────────────
        Message::DismissErrorBanner => {
            state.error_banner = None;
            UpdateResult::none()
        }

        Message::DismissNotification => {
            state.notifications.dismiss_latest();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Config Editor
        // ─────────────────────────────────────────────────────────
        Message::OpenConfigEditor => config::handle_open_editor(state),
        Message::CloseConfigEditor => config::handle_close_editor(state),
        Message::ReloadConfig => config::handle_reload(state),
        Message::ConfigLoaded(record) => config::handle_config_loaded(state, record),
        Message::ConfigLoadFailed { error } => config::handle_config_load_failed(state, error),
        Message::FormNext => {
            state.config_form.select_next();
            UpdateResult::none()
        }
        Message::FormPrev => {
            state.config_form.select_prev();
            UpdateResult::none()
        }
        Message::FormInput(c) => {
            state.config_form.insert_char(c);
            UpdateResult::none()
        }
        Message::FormBackspace => {
            state.config_form.backspace();
            UpdateResult::none()
        }
        Message::FormToggle => {
            state.config_form.toggle();
            UpdateResult::none()
        }
        Message::SubmitConfig => config::handle_submit(state),
        Message::ConfigSubmitted(outcome) => config::handle_submitted(state, outcome),
        Message::ConfigSubmitFailed { error } => config::handle_submit_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Restart Reception
        // ─────────────────────────────────────────────────────────
        Message::RequestRestartReception => config::handle_request_restart(state),
        Message::ConfirmRestart => config::handle_confirm_restart(state),
        Message::CancelRestart => config::handle_cancel_restart(state),
        Message::RestartCompleted(outcome) => config::handle_restart_completed(state, outcome),
        Message::RestartFailed { error } => config::handle_restart_failed(state, error),
    }
}
