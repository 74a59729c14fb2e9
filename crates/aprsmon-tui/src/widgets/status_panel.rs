//! Subsystem status panel
//!
//! One row per subsystem, in display order, each with a colored marker.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use aprsmon_core::SubsystemState;

use crate::theme::{palette, styles};

pub struct StatusPanel<'a> {
    subsystems: &'a [SubsystemState],
}

impl<'a> StatusPanel<'a> {
    pub fn new(subsystems: &'a [SubsystemState]) -> Self {
        Self { subsystems }
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false)
            .title(" Status ")
            .style(Style::default().bg(palette::CARD_BG));

        let lines: Vec<Line> = self
            .subsystems
            .iter()
            .map(|s| {
                let color = styles::status_color(s.color);
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled("●", Style::default().fg(color)),
                    Span::raw(" "),
                    Span::styled(s.label.as_str(), Style::default().fg(color)),
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
