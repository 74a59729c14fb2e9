//! Config exchange handlers: editor lifecycle, submit, restart reception

use aprsmon_channel::ApiOutcome;
use aprsmon_core::prelude::*;
use aprsmon_core::{ConfigRecord, Notification};

use crate::config_form::FormStatus;
use crate::message::Message;
use crate::state::{DashboardState, UiMode};

use super::{UpdateAction, UpdateResult};

// ─────────────────────────────────────────────────────────
// Editor
// ─────────────────────────────────────────────────────────

pub fn handle_open_editor(state: &mut DashboardState) -> UpdateResult {
    state.ui_mode = UiMode::ConfigEditor;
    match state.config_form.status {
        FormStatus::Ready | FormStatus::Submitting | FormStatus::Loading => UpdateResult::none(),
        FormStatus::LoadFailed => handle_reload(state),
    }
}

pub fn handle_close_editor(state: &mut DashboardState) -> UpdateResult {
    if state.ui_mode == UiMode::ConfigEditor {
        state.ui_mode = UiMode::Normal;
    }
    UpdateResult::none()
}

pub fn handle_reload(state: &mut DashboardState) -> UpdateResult {
    if state.config_form.status == FormStatus::Submitting {
        return UpdateResult::none();
    }
    state.config_form.status = FormStatus::Loading;
    UpdateResult::action(UpdateAction::FetchConfig)
}

pub fn handle_config_loaded(state: &mut DashboardState, record: ConfigRecord) -> UpdateResult {
    debug!("Loaded configuration ({} fields)", record.len());
    state.config_form.populate(&record);
    UpdateResult::none()
}

pub fn handle_config_load_failed(state: &mut DashboardState, error: String) -> UpdateResult {
    warn!("Failed to load configuration: {}", error);
    state.config_form.status = FormStatus::LoadFailed;
    state.notify(Notification::error(format!(
        "Error loading configuration: {}",
        error
    )));
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Submit
// ─────────────────────────────────────────────────────────

pub fn handle_submit(state: &mut DashboardState) -> UpdateResult {
    if !state.config_form.is_editable() {
        debug!(
            "Ignoring submit while form is {:?}",
            state.config_form.status
        );
        return UpdateResult::none();
    }

    match state.config_form.build_record() {
        Some(record) => {
            state.config_form.status = FormStatus::Submitting;
            UpdateResult::action(UpdateAction::SubmitConfig(record))
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_submitted(state: &mut DashboardState, outcome: ApiOutcome) -> UpdateResult {
    match outcome {
        ApiOutcome::Success { .. } => {
            info!("Configuration updated, resetting dashboard");
            state.notify(Notification::alert("Configuration updated successfully."));
            state.reset();
            UpdateResult::action(UpdateAction::FetchConfig)
        }
        ApiOutcome::Rejected { message } => {
            warn!("Backend rejected configuration: {}", message);
            state.config_form.status = FormStatus::Ready;
            state.notify(Notification::alert(format!(
                "Error updating configuration: {}",
                message
            )));
            UpdateResult::none()
        }
    }
}

pub fn handle_submit_failed(state: &mut DashboardState, error: String) -> UpdateResult {
    error!("Failed to submit configuration: {}", error);
    state.config_form.status = FormStatus::Ready;
    state.notify(Notification::error(
        "An error occurred while saving the configuration.",
    ));
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Restart Reception
// ─────────────────────────────────────────────────────────

pub fn handle_request_restart(state: &mut DashboardState) -> UpdateResult {
    if state.restart_in_flight {
        debug!("Restart already in flight");
        return UpdateResult::none();
    }
    if state.settings.ui.confirm_restart {
        state.ui_mode = UiMode::ConfirmRestart;
        UpdateResult::none()
    } else {
        UpdateResult::message(Message::ConfirmRestart)
    }
}

pub fn handle_confirm_restart(state: &mut DashboardState) -> UpdateResult {
    if state.ui_mode == UiMode::ConfirmRestart {
        state.ui_mode = UiMode::Normal;
    }
    if state.restart_in_flight {
        return UpdateResult::none();
    }
    state.restart_in_flight = true;
    UpdateResult::action(UpdateAction::RestartReception)
}

pub fn handle_cancel_restart(state: &mut DashboardState) -> UpdateResult {
    if state.ui_mode == UiMode::ConfirmRestart {
        state.ui_mode = UiMode::Normal;
    }
    UpdateResult::none()
}

pub fn handle_restart_completed(state: &mut DashboardState, outcome: ApiOutcome) -> UpdateResult {
    state.restart_in_flight = false;
    let notification = match outcome {
        ApiOutcome::Success { .. } => Notification::alert("Reception restarted successfully."),
        ApiOutcome::Rejected { message } => {
            warn!("Backend rejected restart: {}", message);
            Notification::alert(format!("Error restarting reception: {}", message))
        }
    };
    state.notify(notification);
    UpdateResult::none()
}

pub fn handle_restart_failed(state: &mut DashboardState, error: String) -> UpdateResult {
    error!("Failed to restart reception: {}", error);
    state.restart_in_flight = false;
    state.notify(Notification::error(
        "An error occurred while restarting reception.",
    ));
    UpdateResult::none()
}
