//! Header bar
//!
//! Application title, backend URL, key hints and the push channel
//! connection indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use aprsmon_app::ConnectionState;

use crate::theme::{palette, styles};

/// Main header: `● APRS Monitor / <url>   [c] Config ...   Connected`
pub struct MainHeader<'a> {
    backend_url: &'a str,
    connection: &'a ConnectionState,
}

impl<'a> MainHeader<'a> {
    pub fn new(backend_url: &'a str, connection: &'a ConnectionState) -> Self {
        Self {
            backend_url,
            connection,
        }
    }

    fn title_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::raw(" "),
            Span::styled("●", Style::default().fg(styles::connection_color(self.connection))),
            Span::raw(" "),
            Span::styled(
                "APRS Monitor",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(self.backend_url, styles::text_secondary()),
        ])
    }

    fn connection_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                self.connection.label(),
                Style::default().fg(styles::connection_color(self.connection)),
            ),
            Span::raw(" "),
        ])
    }
}

fn shortcut_hints() -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, label)) in [("c", "Config"), ("r", "Restart"), ("q", "Quit")]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("[", styles::text_muted()));
        spans.push(Span::styled(key, styles::keybinding()));
        spans.push(Span::styled(format!("] {label}"), styles::text_muted()));
    }
    Line::from(spans)
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = self.title_line();
        let title_width = title.width() as u16;
        let connection = self.connection_line();
        let connection_width = connection.width() as u16;
        let hints = shortcut_hints();
        let hints_width = hints.width() as u16;

        buf.set_line(inner.x, inner.y, &title, inner.width);

        // The connection state always wins over the hints when space is short
        if title_width + connection_width + 2 <= inner.width {
            let connection_x = inner.x + inner.width - connection_width;
            buf.set_line(connection_x, inner.y, &connection, connection_width);

            if title_width + hints_width + connection_width + 4 <= inner.width {
                let hints_x = inner.x + title_width + 2;
                buf.set_line(hints_x, inner.y, &hints, hints_width);
            }
        }
    }
}
