//! Fixed-capacity FIFO buffer

use std::collections::VecDeque;

/// A fixed-capacity circular buffer that drops the oldest entries when full.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer with the given capacity.
    ///
    /// A capacity of zero is bumped to one so `push` always retains the
    /// latest value.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a value, evicting the oldest if at capacity.
    ///
    /// Returns the evicted value, if any.
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.buf.len() == self.capacity {
            self.buf.pop_front()
        } else {
            None
        };
        self.buf.push_back(value);
        evicted
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Maximum capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over items from oldest to newest.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.buf.iter()
    }

    /// Item at `index`, counting from the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    /// Get the most recently pushed item.
    pub fn latest(&self) -> Option<&T> {
        self.buf.back()
    }

    /// Get the oldest item.
    pub fn oldest(&self) -> Option<&T> {
        self.buf.front()
    }

    /// Clear all items.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
