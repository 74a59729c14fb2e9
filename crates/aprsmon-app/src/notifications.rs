//! Transient notification toasts
//!
//! Toasts are fire-and-forget: they are queued on arrival, expire after a
//! fixed time-to-live, and never touch any other dashboard state.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use aprsmon_core::Notification;

/// Toasts beyond this count push the oldest one out.
pub const MAX_VISIBLE_TOASTS: usize = 5;

/// A queued notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub notification: Notification,
    pub created_at: Instant,
}

impl Toast {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Ordered toast queue, oldest first
#[derive(Debug, Clone)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
    ttl: Duration,
    pushed: u64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_millis(4000))
    }
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::with_capacity(MAX_VISIBLE_TOASTS),
            ttl,
            pushed: 0,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        if self.toasts.len() == MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            notification,
            created_at: now,
        });
        self.pushed += 1;
    }

    /// Notifications pushed over the queue's lifetime, expired ones included.
    pub fn total_pushed(&self) -> u64 {
        self.pushed
    }

    /// Drop expired toasts. Returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        let ttl = self.ttl;
        self.toasts.retain(|toast| !toast.is_expired(now, ttl));
        before - self.toasts.len()
    }

    /// Dismiss the newest toast.
    pub fn dismiss_latest(&mut self) -> Option<Toast> {
        self.toasts.pop_back()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
