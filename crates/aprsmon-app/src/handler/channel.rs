//! Push-channel event routing
//!
//! `aprs_message` events feed the message log; everything else goes through
//! the status projector.

use aprsmon_core::prelude::*;
use aprsmon_core::{project, EventKind, StatusEvent};

use crate::state::DashboardState;

use super::UpdateResult;

pub fn handle_status_event(state: &mut DashboardState, event: StatusEvent) -> UpdateResult {
    match event.kind {
        EventKind::AprsMessage => match event.message() {
            Some(text) => state.push_message(text),
            None => debug!("aprs_message without a message field: {:?}", event.payload),
        },
        _ => state.apply(project(&event)),
    }
    UpdateResult::none()
}
