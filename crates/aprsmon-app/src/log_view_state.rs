//! Scroll state for the message log view
//!
//! Shared by the handler layer (scroll commands) and the TUI (which reports
//! content and viewport sizes during render).

/// Scroll position and follow mode of the message log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogViewState {
    /// First visible line
    pub offset: usize,
    /// Follow new messages as they arrive
    pub auto_scroll: bool,
    /// Total display lines (set during render)
    pub total_lines: usize,
    /// Viewport height (set during render)
    pub visible_lines: usize,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl LogViewState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
            total_lines: 0,
            visible_lines: 0,
        }
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines)
    }

    /// Range of line indices to render, end exclusive
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.min(self.max_offset());
        let end = (start + self.visible_lines).min(self.total_lines);
        (start, end)
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
        self.auto_scroll = false;
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: usize) {
        let max_offset = self.max_offset();
        self.offset = (self.offset + n).min(max_offset);

        // Re-enable auto-scroll if at bottom
        if self.offset >= max_offset {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_scroll = false;
    }

    /// Scroll to bottom and follow new messages
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_scroll = true;
    }

    pub fn page_up(&mut self) {
        let page = self.visible_lines.saturating_sub(2).max(1);
        self.scroll_up(page);
    }

    pub fn page_down(&mut self) {
        let page = self.visible_lines.saturating_sub(2).max(1);
        self.scroll_down(page);
    }

    /// Update with new content size
    pub fn update_content_size(&mut self, total: usize, visible: usize) {
        self.total_lines = total;
        self.visible_lines = visible;

        if self.auto_scroll {
            self.offset = total.saturating_sub(visible);
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Keep a scrolled-back view on the same lines after the oldest
    /// entries were evicted from the log.
    pub fn lines_evicted(&mut self, lines: usize) {
        if !self.auto_scroll {
            self.offset = self.offset.saturating_sub(lines);
        }
    }

    /// Back to the initial following state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
