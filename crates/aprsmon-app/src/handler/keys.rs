//! Key event handlers for UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{DashboardState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &DashboardState, key: InputKey) -> Option<Message> {
    if key.is_force_quit() {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Normal => handle_key_normal(key),
        UiMode::ConfigEditor => handle_key_config_editor(state, key),
        UiMode::ConfirmRestart => handle_key_confirm_restart(key),
    }
}

fn handle_key_normal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::Quit),

        // Message log
        InputKey::Char('j') | InputKey::Down => Some(Message::ScrollDown),
        InputKey::Char('k') | InputKey::Up => Some(Message::ScrollUp),
        InputKey::Char('g') | InputKey::Home => Some(Message::ScrollToTop),
        InputKey::Char('G') | InputKey::End => Some(Message::ScrollToBottom),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),

        // Backend commands
        InputKey::Char('c') => Some(Message::OpenConfigEditor),
        InputKey::Char('r') => Some(Message::RequestRestartReception),

        InputKey::Char('x') => Some(Message::DismissErrorBanner),
        InputKey::Esc => Some(Message::DismissNotification),

        _ => None,
    }
}

fn handle_key_config_editor(state: &DashboardState, key: InputKey) -> Option<Message> {
    let on_boolean = state
        .config_form
        .selected_field()
        .is_some_and(|f| f.is_boolean());

    match key {
        InputKey::Esc => Some(Message::CloseConfigEditor),
        InputKey::CharCtrl('s') => Some(Message::SubmitConfig),
        InputKey::CharCtrl('r') => Some(Message::ReloadConfig),

        InputKey::Tab | InputKey::Down => Some(Message::FormNext),
        InputKey::BackTab | InputKey::Up => Some(Message::FormPrev),

        InputKey::Enter if on_boolean => Some(Message::FormToggle),
        InputKey::Enter => Some(Message::FormNext),

        InputKey::Backspace => Some(Message::FormBackspace),
        InputKey::Char(c) => Some(Message::FormInput(c)),

        _ => None,
    }
}

fn handle_key_confirm_restart(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y') | InputKey::Char('Y') | InputKey::Enter => {
            Some(Message::ConfirmRestart)
        }
        InputKey::Char('n') | InputKey::Char('N') | InputKey::Esc => Some(Message::CancelRestart),
        _ => None,
    }
}
