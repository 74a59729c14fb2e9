//! Device configuration editor modal

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use aprsmon_app::{ConfigForm, FormField, FormStatus};

use super::modal_overlay;
use crate::theme::{palette, styles};

const MODAL_WIDTH: u16 = 76;
const LABEL_WIDTH: usize = 22;
const INPUT_WIDTH: usize = 22;

pub struct ConfigEditor<'a> {
    form: &'a ConfigForm,
}

impl<'a> ConfigEditor<'a> {
    pub fn new(form: &'a ConfigForm) -> Self {
        Self { form }
    }

    fn field_line(field: &'a FormField, selected: bool) -> Line<'a> {
        let marker = if selected { "▶ " } else { "  " };
        let label = format!("{marker}{:<width$}", field.spec.label, width = LABEL_WIDTH);
        let label_style = if selected {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };

        let input_bg = if selected {
            palette::INPUT_ACTIVE_BG
        } else {
            palette::INPUT_INACTIVE_BG
        };

        let value = if field.is_boolean() {
            let checkbox = if field.checked() { "[x]" } else { "[ ]" };
            format!("{checkbox:<INPUT_WIDTH$}")
        } else {
            // Keep the tail visible while typing past the box width
            let text = field.input.as_str();
            let cursor = if selected { "▏" } else { " " };
            let shown = tail(text, INPUT_WIDTH - 1);
            format!(
                "{shown}{cursor}{}",
                " ".repeat(INPUT_WIDTH - 1 - shown.width())
            )
        };

        let mut spans = vec![
            Span::styled(label, label_style),
            Span::styled(value, styles::text_primary().bg(input_bg)),
        ];
        if let Some(error) = &field.error {
            spans.push(Span::styled(format!(" ✖ {error}"), styles::status_red()));
        }
        Line::from(spans)
    }

    fn status_line(&self) -> Line<'static> {
        match self.form.status {
            FormStatus::Loading => Line::from(Span::styled(
                "Loading configuration…",
                Style::default().fg(palette::STATUS_YELLOW),
            )),
            FormStatus::LoadFailed => Line::from(vec![
                Span::styled("Could not load configuration. ", styles::status_red()),
                Span::styled("Ctrl+R", styles::keybinding()),
                Span::styled(" to retry", styles::text_muted()),
            ]),
            FormStatus::Submitting => Line::from(Span::styled(
                "Saving configuration…",
                Style::default().fg(palette::STATUS_YELLOW),
            )),
            FormStatus::Ready if self.form.has_errors() => Line::from(Span::styled(
                "Fix the highlighted fields and save again",
                styles::status_red(),
            )),
            FormStatus::Ready => Line::from(Span::styled("", styles::text_muted())),
        }
    }

    fn hints_line() -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (key, label)) in [
            ("Tab", "next"),
            ("Space", "toggle"),
            ("Ctrl+S", "save"),
            ("Ctrl+R", "reload"),
            ("Esc", "close"),
        ]
        .into_iter()
        .enumerate()
        {
            if i > 0 {
                spans.push(Span::styled(" · ", styles::text_muted()));
            }
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {label}"), styles::text_muted()));
        }
        Line::from(spans)
    }
}

/// Last `max` columns of `text`
fn tail(text: &str, max: usize) -> &str {
    if text.width() <= max {
        return text;
    }
    let mut start = text.len();
    let mut width = 0;
    for (i, c) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        start = i;
    }
    &text[start..]
}

impl Widget for ConfigEditor<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.form.fields.len() as u16 + 5;
        let modal = modal_overlay::centered_rect(MODAL_WIDTH, height, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let block = styles::modal_block(" Device Configuration ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let chunks = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let lines: Vec<Line> = self
            .form
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| Self::field_line(field, i == self.form.selected))
            .collect();

        // Keep the selected field on screen when the modal is clipped
        let rows = chunks[0].height as usize;
        let scroll = self.form.selected.saturating_sub(rows.saturating_sub(1));
        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .render(chunks[0], buf);

        Paragraph::new(self.status_line()).render(chunks[2], buf);
        Paragraph::new(Self::hints_line()).render(chunks[3], buf);
    }
}
