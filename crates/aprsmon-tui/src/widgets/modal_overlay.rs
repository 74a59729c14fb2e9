//! Shared modal overlay utilities.
//!
//! Centering, background dimming and drop shadows for the config editor
//! and the restart confirmation dialog.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// Center a fixed-size rect within an area, clamped to the area.
///
/// ```
/// use ratatui::layout::Rect;
/// use aprsmon_tui::widgets::modal_overlay::centered_rect;
///
/// let modal = centered_rect(40, 10, Rect::new(0, 0, 80, 24));
/// assert_eq!(modal, Rect::new(20, 7, 40, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim every cell in `area` so the modal on top stands out.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    let y_end = area.y.saturating_add(area.height);
    let x_end = area.x.saturating_add(area.width);
    for y in area.y..y_end {
        for x in area.x..x_end {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// Render a 1-cell shadow to the right of and below `modal_rect`.
pub fn render_shadow(buf: &mut Buffer, modal_rect: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    let right_x = modal_rect.x.saturating_add(modal_rect.width);
    let bottom_y = modal_rect.y.saturating_add(modal_rect.height);

    for y in modal_rect.y.saturating_add(1)..bottom_y.saturating_add(1) {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }

    for x in modal_rect.x.saturating_add(1)..right_x.saturating_add(1) {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

/// Dim the screen, then clear and shadow `modal` so a dialog can draw on it.
pub fn prepare_modal(buf: &mut Buffer, screen: Rect, modal: Rect) {
    dim_background(buf, screen);
    render_shadow(buf, modal);
    Clear.render(modal, buf);
}
