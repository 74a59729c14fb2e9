//! Transient notification toasts, stacked in the top-right corner

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use aprsmon_app::notifications::MAX_VISIBLE_TOASTS;
use aprsmon_app::Notifications;
use aprsmon_core::NotificationLevel;

use crate::theme::{palette, styles};

const MAX_TOAST_WIDTH: u16 = 50;
const TOAST_HEIGHT: u16 = 3;

pub struct Toasts<'a> {
    notifications: &'a Notifications,
}

impl<'a> Toasts<'a> {
    pub fn new(notifications: &'a Notifications) -> Self {
        Self { notifications }
    }
}

fn level_title(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => " Info ",
        NotificationLevel::Alert => " Alert ",
        NotificationLevel::Error => " Error ",
    }
}

impl Widget for Toasts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y + 1;

        // Newest on top
        for toast in self.notifications.iter().rev().take(MAX_VISIBLE_TOASTS) {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }

            let notification = &toast.notification;
            let text = notification.text.replace(['\r', '\n'], " ");
            let width = (text.width() as u16 + 4)
                .clamp(16, MAX_TOAST_WIDTH)
                .min(area.width);
            let x = area.x + area.width - width;
            let rect = Rect::new(x, y, width, TOAST_HEIGHT);

            let color = styles::notification_color(notification.level);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .title(Span::styled(level_title(notification.level), Style::default().fg(color)))
                .style(Style::default().bg(palette::POPUP_BG));

            Clear.render(rect, buf);
            Paragraph::new(Line::from(Span::styled(format!(" {text}"), styles::text_primary())))
                .block(block)
                .render(rect, buf);

            y += TOAST_HEIGHT;
        }
    }
}
