//! Screen layout definitions for the TUI
//!
//! Header on top, the subsystem status panel below it, an optional error
//! banner row, and the message log filling the rest.

use ratatui::layout::{Constraint, Layout, Rect};

/// Header height: top border + title row + bottom border
pub const HEADER_HEIGHT: u16 = 3;

/// Status panel height: six subsystem rows + borders
pub const STATUS_HEIGHT: u16 = 8;

/// Error banner height (single row, no border)
pub const BANNER_HEIGHT: u16 = 1;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    pub header: Rect,
    pub status: Rect,
    /// Present only while a system error banner is shown
    pub banner: Option<Rect>,
    pub logs: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect, show_banner: bool) -> ScreenAreas {
    let banner_height = if show_banner { BANNER_HEIGHT } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(STATUS_HEIGHT),
        Constraint::Length(banner_height),
        Constraint::Min(3),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        status: chunks[1],
        banner: show_banner.then_some(chunks[2]),
        logs: chunks[3],
    }
}
