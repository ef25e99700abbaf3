//! User notification capability.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

impl fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyKind::Success => write!(f, "success"),
            NotifyKind::Error => write!(f, "error"),
        }
    }
}

/// A notification as delivered to a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub description: String,
    pub kind: NotifyKind,
}

/// Presents mutation outcomes to the user. How is up to the implementor.
pub trait Notifier: Send + Sync {
    fn notify(&self, description: &str, kind: NotifyKind);
}

/// Notifier that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, description: &str, kind: NotifyKind) {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Notification {
                description: description.to_string(),
                kind,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first", NotifyKind::Success);
        notifier.notify("second", NotifyKind::Error);

        let all = notifier.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].description, "first");
        assert_eq!(
            notifier.last(),
            Some(Notification {
                description: "second".to_string(),
                kind: NotifyKind::Error,
            })
        );
    }
}
