//! Transient success/error notifications
//!
//! The app owns one `NotificationCenter` and hands it to whatever needs to
//! report an outcome. The grid never touches it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub created: Instant,
    /// `None` keeps the notification until dismissed
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.duration {
            Some(duration) => now.saturating_duration_since(self.created) >= duration,
            None => false,
        }
    }
}

/// Queue of visible notifications, oldest first
#[derive(Debug)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
    default_duration: Duration,
    next_id: u64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}

impl NotificationCenter {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            notifications: Vec::new(),
            default_duration,
            next_id: 1,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> Option<u64> {
        self.push(message.into(), NotificationKind::Success, Some(self.default_duration))
    }

    pub fn error(&mut self, message: impl Into<String>) -> Option<u64> {
        self.push(message.into(), NotificationKind::Error, Some(self.default_duration))
    }

    /// Add a notification; empty messages are dropped
    pub fn push(
        &mut self,
        message: String,
        kind: NotificationKind,
        duration: Option<Duration>,
    ) -> Option<u64> {
        if message.is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.notifications.push(Notification {
            id,
            message,
            kind,
            created: Instant::now(),
            duration,
        });
        Some(id)
    }

    pub fn dismiss_latest(&mut self) -> bool {
        self.notifications.pop().is_some()
    }

    /// Remove notifications whose duration has elapsed at `now`
    pub fn expire(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired(now));
    }

    pub fn visible(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_messages_are_ignored() {
        let mut center = NotificationCenter::default();
        assert_eq!(center.success(""), None);
        assert!(center.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut center = NotificationCenter::default();
        let a = center.success("saved").unwrap();
        let b = center.error("failed").unwrap();
        assert_ne!(a, b);
        assert_eq!(center.visible().len(), 2);
        assert_eq!(center.visible()[1].kind, NotificationKind::Error);
    }

    #[test]
    fn test_expire_after_duration() {
        let mut center = NotificationCenter::new(Duration::from_millis(50));
        center.success("saved");
        center.push("sticky".to_string(), NotificationKind::Error, None);

        let created = center.visible()[0].created;
        center.expire(created + Duration::from_millis(10));
        assert_eq!(center.visible().len(), 2);

        center.expire(created + Duration::from_millis(60));
        assert_eq!(center.visible().len(), 1);
        assert_eq!(center.visible()[0].message, "sticky");
    }

    #[test]
    fn test_dismiss_latest() {
        let mut center = NotificationCenter::default();
        center.success("one");
        center.error("two");

        assert!(center.dismiss_latest());
        assert_eq!(center.visible().len(), 1);
        assert_eq!(center.visible()[0].message, "one");
        assert!(center.dismiss_latest());
        assert!(!center.dismiss_latest());
    }
}
