//! Subsystem status and error banner behavior

use aprsmon_app::DashboardState;
use aprsmon_core::{StatusColor, Subsystem, SubsystemState};
use serde_json::json;

use crate::deliver;

#[test]
fn test_last_reception_event_wins() {
    let mut state = DashboardState::default();

    deliver(&mut state, "reception_status", json!({"status": "active"}));
    deliver(&mut state, "reception_status", json!({"status": "stopped"}));
    deliver(&mut state, "reception_status", json!({"status": "active"}));

    assert_eq!(
        state.subsystem(Subsystem::Reception),
        &SubsystemState::new("Reception: Active", StatusColor::Blue)
    );
}

#[test]
fn test_active_then_stopped_renders_stopped() {
    let mut state = DashboardState::default();

    deliver(&mut state, "reception_status", json!({"status": "active"}));
    deliver(&mut state, "reception_status", json!({"status": "stopped"}));

    assert_eq!(
        state.subsystem(Subsystem::Reception),
        &SubsystemState::new("Reception: Stopped", StatusColor::Gray)
    );
}

#[test]
fn test_duplicate_delivery_changes_nothing() {
    let mut once = DashboardState::default();
    deliver(&mut once, "udp_listener_status", json!({"status": "active"}));

    let mut twice = DashboardState::default();
    deliver(&mut twice, "udp_listener_status", json!({"status": "active"}));
    deliver(&mut twice, "udp_listener_status", json!({"status": "active"}));

    assert_eq!(once.subsystems, twice.subsystems);
}

#[test]
fn test_subsystems_are_independent() {
    let mut state = DashboardState::default();

    deliver(&mut state, "transmission_status", json!({"status": "active"}));
    deliver(&mut state, "carrier_status", json!({"status": "active"}));

    assert_eq!(
        state.subsystem(Subsystem::Transmission).label,
        "Transmission: Active"
    );
    assert_eq!(
        state.subsystem(Subsystem::Carrier).color,
        StatusColor::Purple
    );
    assert_eq!(state.subsystem(Subsystem::Reception).label, "Reception: Idle");
}

#[test]
fn test_unrecognized_status_falls_back_to_idle() {
    let mut state = DashboardState::default();

    deliver(&mut state, "wav_generation", json!({"status": "started"}));
    deliver(&mut state, "wav_generation", json!({"status": "exploded"}));

    assert_eq!(
        state.subsystem(Subsystem::WavGeneration),
        &SubsystemState::new("WAV Generation: Idle", StatusColor::Green)
    );
}

#[test]
fn test_banner_persists_after_other_events() {
    let mut state = DashboardState::default();

    deliver(
        &mut state,
        "system_error",
        json!({"message": "device disconnected"}),
    );
    deliver(&mut state, "carrier_status", json!({"status": "active"}));
    deliver(&mut state, "system_status", json!({"status": "running"}));

    assert_eq!(
        state.error_banner.as_deref(),
        Some("System Error: device disconnected")
    );
    assert_eq!(
        state.subsystem(Subsystem::Carrier).label,
        "Carrier Transmission: Active"
    );
}

#[test]
fn test_unknown_topic_is_ignored() {
    let mut state = DashboardState::default();
    let before = state.subsystems.clone();

    deliver(&mut state, "telemetry_v2", json!({"status": "active"}));

    assert_eq!(state.subsystems, before);
    assert!(state.error_banner.is_none());
    assert!(state.notifications.is_empty());
}
