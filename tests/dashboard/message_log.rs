//! Message log retention and ordering

use aprsmon_app::DashboardState;
use serde_json::json;

use crate::deliver;

#[test]
fn test_log_keeps_newest_thousand() {
    let mut state = DashboardState::default();

    for i in 0..=1000 {
        deliver(&mut state, "aprs_message", json!({"message": format!("m{i}")}));
    }

    let texts = state.message_log.texts();
    let expected: Vec<String> = (1..=1000).map(|i| format!("m{i}")).collect();
    assert_eq!(texts, expected);
}

#[test]
fn test_short_log_keeps_everything() {
    let mut state = DashboardState::default();

    for i in 0..10 {
        deliver(&mut state, "aprs_message", json!({"message": format!("m{i}")}));
    }

    assert_eq!(state.message_log.len(), 10);
    assert_eq!(state.message_log.texts()[0], "m0");
}

#[test]
fn test_one_entry_per_delivery() {
    let mut state = DashboardState::default();

    deliver(&mut state, "aprs_message", json!({"message": "first\r\n"}));
    deliver(
        &mut state,
        "aprs_message",
        json!({"message": "second\nwith a body"}),
    );

    assert_eq!(
        state.message_log.texts(),
        vec!["first", "second\nwith a body"]
    );
    assert_eq!(state.message_log.total_lines(), 3);
}

#[test]
fn test_message_without_text_is_dropped() {
    let mut state = DashboardState::default();

    deliver(&mut state, "aprs_message", json!({"status": "noise"}));

    assert!(state.message_log.is_empty());
}

#[test]
fn test_messages_do_not_touch_status() {
    let mut state = DashboardState::default();
    let before = state.subsystems.clone();

    deliver(&mut state, "aprs_message", json!({"message": "N0CALL>APRS:>hi"}));

    assert_eq!(state.subsystems, before);
    assert_eq!(state.message_log.len(), 1);
}
