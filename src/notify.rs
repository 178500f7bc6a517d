//! Transient, auto-dismissing notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            created_at: Instant::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Queue of live notifications; the newest one is shown.
#[derive(Debug, Clone)]
pub struct Notifications {
    items: VecDeque<Notification>,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_millis(6000))
    }
}

impl Notifications {
    const MAX_QUEUED: usize = 8;

    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        if self.items.len() == Self::MAX_QUEUED {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn dismiss(&mut self) {
        self.items.pop_back();
    }

    /// Drop everything older than the time-to-live as of `now`.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}
