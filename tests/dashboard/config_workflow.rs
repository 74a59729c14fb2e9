//! Config editor submit and reception restart flows

use aprsmon_app::{ApiOutcome, DashboardState, FormStatus, Message, UiMode, UpdateAction};
use aprsmon_core::{ConfigRecord, ConfigValue, NotificationLevel, Subsystem};
use serde_json::json;

use crate::{deliver, run};

fn record() -> ConfigRecord {
    ConfigRecord::from_json(&json!({
        "frequency_hz": 144390000,
        "gain": 20,
        "callsign_source": "N0CALL",
        "carrier_only": false
    }))
    .unwrap()
}

fn latest_toast(state: &DashboardState) -> String {
    state
        .notifications
        .latest()
        .map(|t| t.notification.text.clone())
        .unwrap_or_default()
}

#[test]
fn test_submit_success_resets_and_refetches() {
    let mut state = DashboardState::default();
    run(&mut state, Message::ConfigLoaded(record()));
    deliver(&mut state, "reception_status", json!({"status": "active"}));
    deliver(&mut state, "aprs_message", json!({"message": "m1"}));

    run(&mut state, Message::OpenConfigEditor);
    assert_eq!(state.ui_mode, UiMode::ConfigEditor);

    let actions = run(&mut state, Message::SubmitConfig);
    let [UpdateAction::SubmitConfig(submitted)] = actions.as_slice() else {
        panic!("expected a submit action, got {actions:?}");
    };
    assert_eq!(
        submitted.get("frequency_hz"),
        Some(&ConfigValue::Number(144390000.0))
    );
    assert_eq!(state.config_form.status, FormStatus::Submitting);

    let actions = run(
        &mut state,
        Message::ConfigSubmitted(ApiOutcome::Success { message: None }),
    );

    assert_eq!(actions, vec![UpdateAction::FetchConfig]);
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.message_log.is_empty());
    assert_eq!(state.subsystem(Subsystem::Reception).label, "Reception: Idle");
    assert_eq!(latest_toast(&state), "Configuration updated successfully.");
}

#[test]
fn test_submit_rejected_keeps_dashboard() {
    let mut state = DashboardState::default();
    run(&mut state, Message::ConfigLoaded(record()));
    deliver(&mut state, "aprs_message", json!({"message": "m1"}));
    run(&mut state, Message::OpenConfigEditor);
    run(&mut state, Message::SubmitConfig);

    let actions = run(
        &mut state,
        Message::ConfigSubmitted(ApiOutcome::Rejected {
            message: "invalid gain".into(),
        }),
    );

    assert!(actions.is_empty());
    assert_eq!(state.message_log.len(), 1);
    assert_eq!(state.ui_mode, UiMode::ConfigEditor);
    assert_eq!(
        latest_toast(&state),
        "Error updating configuration: invalid gain"
    );
}

#[test]
fn test_restart_reception_after_confirmation() {
    let mut state = DashboardState::default();

    let actions = run(&mut state, Message::RequestRestartReception);
    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::ConfirmRestart);

    let actions = run(&mut state, Message::ConfirmRestart);
    assert_eq!(actions, vec![UpdateAction::RestartReception]);

    run(
        &mut state,
        Message::RestartCompleted(ApiOutcome::Success { message: None }),
    );
    assert_eq!(latest_toast(&state), "Reception restarted successfully.");
    assert!(!state.restart_in_flight);
}

#[test]
fn test_load_failure_reported_as_error() {
    let mut state = DashboardState::default();

    run(
        &mut state,
        Message::ConfigLoadFailed {
            error: "connection refused".into(),
        },
    );

    let toast = state.notifications.latest().unwrap();
    assert_eq!(toast.notification.level, NotificationLevel::Error);
    assert_eq!(state.config_form.status, FormStatus::LoadFailed);
}
