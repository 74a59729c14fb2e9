//! Color palette for the dashboard.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const CARD_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
pub const TEXT_BRIGHT: Color = Color::White;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;
pub const STATUS_GRAY: Color = Color::Gray;
pub const STATUS_ORANGE: Color = Color::Rgb(255, 165, 0);
pub const STATUS_PURPLE: Color = Color::Magenta;

// --- Effects ---
pub const SHADOW: Color = Color::Rgb(5, 6, 8);

// --- Error banner ---
pub const BANNER_BG: Color = Color::Rgb(90, 20, 30);
pub const BANNER_FG: Color = Color::White;

// --- Form inputs ---
pub const INPUT_ACTIVE_BG: Color = Color::Rgb(60, 60, 80);
pub const INPUT_INACTIVE_BG: Color = Color::Rgb(40, 40, 50);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_layers_are_rgb() {
        for color in [POPUP_BG, SHADOW, BANNER_BG, INPUT_ACTIVE_BG] {
            assert!(matches!(color, Color::Rgb(_, _, _)), "{color:?}");
        }
    }

    #[test]
    fn test_status_colors_distinct() {
        let colors = [
            STATUS_GREEN,
            STATUS_RED,
            STATUS_BLUE,
            STATUS_GRAY,
            STATUS_ORANGE,
            STATUS_PURPLE,
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
