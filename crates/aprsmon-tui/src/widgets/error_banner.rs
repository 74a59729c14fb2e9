//! Single-row system error banner

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::palette;

pub struct ErrorBanner<'a> {
    text: &'a str,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = Style::default().fg(palette::BANNER_FG).bg(palette::BANNER_BG);
        let hint = Line::from(vec![
            Span::styled("[x]", base.fg(palette::STATUS_YELLOW)),
            Span::styled(" dismiss ", base),
        ]);
        let hint_width = hint.width() as u16;

        // Collapse embedded newlines so the banner stays one row
        let text = self.text.replace(['\r', '\n'], " ");
        let message = Line::from(vec![
            Span::styled(" ✖ ", base.add_modifier(Modifier::BOLD)),
            Span::styled(text, base),
        ]);

        Paragraph::new(message).style(base).render(area, buf);

        if area.width > hint_width + 10 {
            let x = area.x + area.width - hint_width;
            buf.set_line(x, area.y, &hint, hint_width);
        }
    }
}
