//! Recording notifier for testing.

use std::sync::{Arc, Mutex};

use crate::session::notifications::NotificationKind;
use crate::traits::{NotificationLevel, Notifier};

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNotification {
    pub kind: NotificationKind,
    pub level: NotificationLevel,
    pub message: String,
}

/// Notifier that records every delivery for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    recorded: Arc<Mutex<Vec<RecordedNotification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications delivered so far, in order.
    pub fn recorded(&self) -> Vec<RecordedNotification> {
        self.recorded.lock().unwrap().clone()
    }

    /// Number of notifications delivered with the given kind.
    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }

    /// Clear all recorded notifications.
    pub fn clear(&self) {
        self.recorded.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, level: NotificationLevel, message: &str) {
        self.recorded.lock().unwrap().push(RecordedNotification {
            kind,
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(
            NotificationKind::LoginSuccess,
            NotificationLevel::Success,
            "Welcome back!",
        );
        notifier.notify(
            NotificationKind::SessionExpired,
            NotificationLevel::Error,
            "Your session has expired. Please login again.",
        );

        let recorded = notifier.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].kind, NotificationKind::LoginSuccess);
        assert_eq!(recorded[1].level, NotificationLevel::Error);
    }

    #[test]
    fn test_count_of_filters_by_kind() {
        let notifier = RecordingNotifier::new();
        notifier.notify(
            NotificationKind::SessionExpired,
            NotificationLevel::Error,
            "x",
        );
        notifier.notify(
            NotificationKind::SessionExpired,
            NotificationLevel::Error,
            "y",
        );
        notifier.notify(
            NotificationKind::LogoutSuccess,
            NotificationLevel::Success,
            "z",
        );

        assert_eq!(notifier.count_of(NotificationKind::SessionExpired), 2);
        assert_eq!(notifier.count_of(NotificationKind::LogoutSuccess), 1);
        assert_eq!(notifier.count_of(NotificationKind::LoginSuccess), 0);
    }
}
