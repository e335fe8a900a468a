//! Notification sink trait.
//!
//! User-facing alerts go through this seam so the session layer stays
//! independent of any particular toast/terminal presentation. Deduplication
//! happens upstream in `session::notifications`; implementations only
//! deliver.

use crate::session::notifications::NotificationKind;

/// Visual level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Trait for delivering user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Deliver a notification. Implementations must not block.
    fn notify(&self, kind: NotificationKind, level: NotificationLevel, message: &str);
}
