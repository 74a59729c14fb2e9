//! Semantic style builders for the dashboard.

use aprsmon_app::ConnectionState;
use aprsmon_core::{NotificationLevel, StatusColor};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn text_bright() -> Style {
    Style::default()
        .fg(palette::TEXT_BRIGHT)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - the selected row of a list or form
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Domain colors ---

/// Terminal color for a subsystem status tag
pub fn status_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Red => palette::STATUS_RED,
        StatusColor::Green => palette::STATUS_GREEN,
        StatusColor::Blue => palette::STATUS_BLUE,
        StatusColor::Gray => palette::STATUS_GRAY,
        StatusColor::Orange => palette::STATUS_ORANGE,
        StatusColor::Purple => palette::STATUS_PURPLE,
    }
}

/// Indicator color for the push channel connection
pub fn connection_color(state: &ConnectionState) -> Color {
    match state {
        ConnectionState::Connected => palette::STATUS_GREEN,
        ConnectionState::Connecting | ConnectionState::Reconnecting { .. } => {
            palette::STATUS_YELLOW
        }
        ConnectionState::Disconnected => palette::STATUS_RED,
    }
}

/// Border/title color of a toast
pub fn notification_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => palette::STATUS_BLUE,
        NotificationLevel::Alert => palette::STATUS_YELLOW,
        NotificationLevel::Error => palette::STATUS_RED,
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}
