//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use aprsmon_app::{DashboardState, UiMode};

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI
///
/// Only the log view's scroll bookkeeping is written back into `state`.
pub fn view(frame: &mut Frame, state: &mut DashboardState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area, state.error_banner.is_some());

    frame.render_widget(
        widgets::MainHeader::new(&state.backend_url, &state.connection),
        areas.header,
    );
    frame.render_widget(widgets::StatusPanel::new(&state.subsystems), areas.status);

    if let (Some(text), Some(banner_area)) = (&state.error_banner, areas.banner) {
        frame.render_widget(widgets::ErrorBanner::new(text), banner_area);
    }

    let log_view = widgets::MessageLogView::new(&state.message_log)
        .show_timestamps(state.settings.ui.show_timestamps);
    frame.render_stateful_widget(log_view, areas.logs, &mut state.log_view_state);

    match state.ui_mode {
        UiMode::Normal => {}
        UiMode::ConfigEditor => {
            frame.render_widget(widgets::ConfigEditor::new(&state.config_form), area);
        }
        UiMode::ConfirmRestart => {
            frame.render_widget(widgets::ConfirmDialog, area);
        }
    }

    // Toasts stay on top of any modal
    if !state.notifications.is_empty() {
        frame.render_widget(widgets::Toasts::new(&state.notifications), area);
    }
}
