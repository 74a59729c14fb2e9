//! Terminal-independent key events
//!
//! Keys are converted from crossterm at the TUI boundary so the handler layer
//! (and its tests) never depend on a terminal library.

/// Abstract key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held (Ctrl+c, Ctrl+r, ...)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing and actions
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
}

impl InputKey {
    /// Keys that quit from anywhere.
    pub fn is_force_quit(self) -> bool {
        matches!(self, InputKey::CharCtrl('c'))
    }
}
