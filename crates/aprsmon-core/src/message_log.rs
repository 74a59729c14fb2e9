//! Bounded log of received APRS messages
//!
//! The log keeps at most [`MAX_ENTRIES`] entries in arrival order. Every push
//! past capacity evicts the oldest entry, so the newest `MAX_ENTRIES` messages
//! are always retained.
//!
//! One pushed message is one entry. Trailing line terminators are stripped,
//! but embedded newlines stay inside the entry; the log view renders them as
//! continuation lines.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::ring_buffer::RingBuffer;

/// Maximum number of retained messages.
pub const MAX_ENTRIES: usize = 1000;

/// A single received message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEntry {
    /// Arrival sequence number, unique for the lifetime of the log
    pub seq: u64,
    /// Arrival time
    pub received_at: DateTime<Local>,
    /// Message text
    pub text: String,
}

impl MessageEntry {
    /// Number of display lines this entry occupies.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

/// Ordered, size-bounded message log.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: RingBuffer<MessageEntry>,
    next_seq: u64,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLog {
    /// Create an empty log holding up to [`MAX_ENTRIES`] messages.
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTRIES)
    }

    /// Create an empty log with a custom bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RingBuffer::new(capacity),
            next_seq: 0,
        }
    }

    /// Append a message, evicting the oldest entry when full.
    ///
    /// Returns the sequence number assigned to the new entry.
    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        let mut text = message.into();
        let trimmed_len = text.trim_end_matches(['\r', '\n']).len();
        text.truncate(trimmed_len);

        let seq = self.next_seq;
        let entry = MessageEntry {
            seq,
            received_at: Local::now(),
            text,
        };
        self.next_seq += 1;

        if let Some(evicted) = self.entries.push(entry) {
            tracing::trace!("Message log full, evicted entry #{}", evicted.seq);
        }
        seq
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MessageEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&MessageEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&MessageEntry> {
        self.entries.latest()
    }

    /// Message texts, oldest first.
    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }

    /// Total display lines across all entries.
    pub fn total_lines(&self) -> usize {
        self.entries.iter().map(MessageEntry::line_count).sum()
    }

    /// Drop every entry. Sequence numbers keep increasing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
