//! Test utilities for TUI rendering verification
//!
//! Wraps ratatui's TestBackend so widgets and full-screen renders can be
//! asserted on as plain text.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui::Frame;
use ratatui::Terminal;

use aprsmon_app::config::Settings;
use aprsmon_app::DashboardState;

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Test utility wrapper around ratatui's TestBackend terminal.
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a new test terminal with standard dimensions (80x24)
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    /// Get the full terminal area
    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    pub fn render_stateful_widget<W, S>(&mut self, widget: W, area: Rect, state: &mut S)
    where
        W: StatefulWidget<State = S>,
    {
        self.terminal
            .draw(|frame| frame.render_stateful_widget(widget, area, state))
            .expect("Failed to render stateful widget");
    }

    /// Draw a full frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// Index of the first row containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        let height = self.buffer().area.height;
        (0..height).find(|&y| self.line_contains(y, text))
    }

    /// Get all content as a string
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

/// Dashboard state pointed at a fixed backend URL
pub fn create_test_state() -> DashboardState {
    let mut settings = Settings::default();
    settings.backend.url = "http://radio.local:5000".to_string();
    DashboardState::with_settings(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_terminal_creation() {
        let term = TestTerminal::new();
        assert_eq!(term.area().width, TEST_WIDTH);
        assert_eq!(term.area().height, TEST_HEIGHT);
    }

    #[test]
    fn test_buffer_contains_and_find_line() {
        let mut term = TestTerminal::with_size(20, 5);
        term.render_widget(Paragraph::new("\n\nHello World"), term.area());

        assert!(term.buffer_contains("Hello World"));
        assert!(!term.buffer_contains("Goodbye"));
        assert_eq!(term.find_line("Hello"), Some(2));
        assert!(term.line_contains(2, "World"));
    }

    #[test]
    fn test_create_test_state_uses_url() {
        let state = create_test_state();
        assert_eq!(state.backend_url, "http://radio.local:5000");
    }
}
