//! Restart reception confirmation dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay;
use crate::theme::styles;

pub struct ConfirmDialog;

impl Widget for ConfirmDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::centered_rect(48, 7, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Restart the reception pipeline?",
                styles::text_bright(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y]", styles::keybinding()),
                Span::styled(" Restart    ", styles::text_secondary()),
                Span::styled("[n]", styles::keybinding()),
                Span::styled(" Cancel", styles::text_secondary()),
            ]),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(styles::modal_block(" Restart Reception "))
            .render(modal, buf);
    }
}
