//! Message log scroll handlers

use crate::state::DashboardState;

use super::UpdateResult;

pub fn handle_scroll_up(state: &mut DashboardState) -> UpdateResult {
    state.log_view_state.scroll_up(1);
    UpdateResult::none()
}

pub fn handle_scroll_down(state: &mut DashboardState) -> UpdateResult {
    state.log_view_state.scroll_down(1);
    UpdateResult::none()
}

pub fn handle_scroll_to_top(state: &mut DashboardState) -> UpdateResult {
    state.log_view_state.scroll_to_top();
    UpdateResult::none()
}

pub fn handle_scroll_to_bottom(state: &mut DashboardState) -> UpdateResult {
    state.log_view_state.scroll_to_bottom();
    UpdateResult::none()
}

pub fn handle_page_up(state: &mut DashboardState) -> UpdateResult {
    state.log_view_state.page_up();
    UpdateResult::none()
}

pub fn handle_page_down(state: &mut DashboardState) -> UpdateResult {
    state.log_view_state.page_down();
    UpdateResult::none()
}
