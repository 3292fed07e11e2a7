//! Transient user-visible messages (toasts).

use crate::constants::{MAX_NOTICES, NOTICE_TTL_SECONDS};
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    /// Something failed in the background; play continues
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded queue of recent notices. Oldest entries fall off the front.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    entries: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>) {
        if self.entries.len() >= MAX_NOTICES {
            self.entries.pop_front();
        }
        self.entries.push_back(Notice {
            level,
            text: text.into(),
            created_at: Utc::now(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_level(&self, level: NoticeLevel) -> bool {
        self.entries.iter().any(|n| n.level == level)
    }

    /// Drop notices older than the display lifetime.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        let ttl = Duration::seconds(NOTICE_TTL_SECONDS);
        self.entries.retain(|n| now - n.created_at < ttl);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = NoticeQueue::new();
        for i in 0..(MAX_NOTICES + 3) {
            queue.info(format!("notice {}", i));
        }
        assert_eq!(queue.len(), MAX_NOTICES);
        assert_eq!(
            queue.latest().map(|n| n.text.as_str()),
            Some(format!("notice {}", MAX_NOTICES + 2).as_str())
        );
    }

    #[test]
    fn test_expire_drops_old_notices() {
        let mut queue = NoticeQueue::new();
        queue.warning("Failed to sync with server");
        assert!(queue.has_level(NoticeLevel::Warning));

        queue.expire(Utc::now() + Duration::seconds(NOTICE_TTL_SECONDS + 1));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_expire_keeps_fresh_notices() {
        let mut queue = NoticeQueue::new();
        queue.success("Correct!");
        queue.expire(Utc::now());
        assert_eq!(queue.len(), 1);
    }
}
