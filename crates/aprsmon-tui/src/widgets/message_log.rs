//! Message log view widget
//!
//! Renders received APRS messages oldest first. Multi-line messages occupy
//! one row per line; continuation rows are indented under the first.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

use aprsmon_app::LogViewState;
use aprsmon_core::{MessageEntry, MessageLog};

use crate::theme::{palette, styles};

/// Width of the `HH:MM:SS ` prefix
const TIMESTAMP_WIDTH: usize = 9;

pub struct MessageLogView<'a> {
    log: &'a MessageLog,
    show_timestamps: bool,
}

impl<'a> MessageLogView<'a> {
    pub fn new(log: &'a MessageLog) -> Self {
        Self {
            log,
            show_timestamps: true,
        }
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    fn block(&self, auto_scroll: bool) -> ratatui::widgets::Block<'static> {
        let mode = if auto_scroll {
            Span::styled("● LIVE", Style::default().fg(palette::STATUS_GREEN))
        } else {
            Span::styled("⏸ SCROLLED", Style::default().fg(palette::STATUS_YELLOW))
        };
        let footer = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{}/{}", self.log.len(), self.log.capacity()),
                styles::text_secondary(),
            ),
            Span::styled(" · ", styles::text_muted()),
            mode,
            Span::raw(" "),
        ])
        .right_aligned();

        styles::glass_block(true)
            .title(Line::from(Span::styled(" Messages ", styles::accent_bold())))
            .title_bottom(footer)
            .style(Style::default().bg(palette::CARD_BG))
    }

    /// Display rows for one entry
    fn format_entry(&self, entry: &'a MessageEntry) -> impl Iterator<Item = Line<'a>> + '_ {
        let prefix = self
            .show_timestamps
            .then(|| entry.received_at.format("%H:%M:%S ").to_string());

        entry.text.split('\n').enumerate().map(move |(i, row)| {
            let mut spans = Vec::with_capacity(3);
            match (&prefix, i) {
                (Some(ts), 0) => spans.push(Span::styled(ts.clone(), styles::text_muted())),
                (Some(_), _) => spans.push(Span::raw(" ".repeat(TIMESTAMP_WIDTH))),
                (None, _) => {}
            }
            if i > 0 {
                spans.push(Span::styled("  ", styles::text_muted()));
            }
            spans.push(Span::styled(row, styles::text_primary()));
            Line::from(spans)
        })
    }

    fn render_empty(&self, inner: Rect, buf: &mut Buffer) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No messages yet",
                styles::text_muted().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Waiting for APRS traffic from the backend",
                styles::text_muted(),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

impl<'a> StatefulWidget for MessageLogView<'a> {
    type State = LogViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = self.block(state.auto_scroll);
        let inner = block.inner(area);
        block.render(area, buf);

        let total_lines = self.log.total_lines();
        let visible_lines = inner.height as usize;
        state.update_content_size(total_lines, visible_lines);

        if self.log.is_empty() {
            self.render_empty(inner, buf);
            return;
        }

        let (start, end) = state.visible_range();
        let mut lines: Vec<Line> = Vec::with_capacity(end - start);
        let mut line_index = 0;

        for entry in self.log.iter() {
            if line_index >= end {
                break;
            }
            let count = entry.line_count();
            if line_index + count <= start {
                line_index += count;
                continue;
            }
            for line in self.format_entry(entry) {
                if line_index >= start && line_index < end {
                    lines.push(line);
                }
                line_index += 1;
            }
        }

        Paragraph::new(lines).render(inner, buf);

        if total_lines > visible_lines {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            let mut scrollbar_state = ScrollbarState::new(total_lines).position(state.offset);
            scrollbar.render(area, buf, &mut scrollbar_state);
        }
    }
}
