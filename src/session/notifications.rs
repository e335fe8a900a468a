//! User-facing auth notifications with duplicate suppression.
//!
//! Several independent triggers can detect the same session loss within
//! milliseconds of each other. The deduplicator keeps a per-kind expiring
//! window so each condition surfaces at most once per episode, regardless
//! of how many triggers requested it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::time::{Duration, Instant};

use crate::traits::{Notifier, NotificationLevel};

/// How long an emitted notification suppresses repeats of the same kind.
pub const NOTIFICATION_SUPPRESS_WINDOW: Duration = Duration::from_secs(1);

/// Identity of a user-facing auth notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    SessionExpired,
    UnauthorizedAccess,
    AuthenticationFailed,
    LoginSuccess,
    RegistrationSuccess,
    LogoutSuccess,
}

impl NotificationKind {
    /// Stable identifier, useful for logs and delivery backends.
    pub fn key(self) -> &'static str {
        match self {
            NotificationKind::SessionExpired => "session-expired",
            NotificationKind::UnauthorizedAccess => "unauthorized-access",
            NotificationKind::AuthenticationFailed => "auth-failed",
            NotificationKind::LoginSuccess => "login-success",
            NotificationKind::RegistrationSuccess => "registration-success",
            NotificationKind::LogoutSuccess => "logout-success",
        }
    }

    fn level(self) -> NotificationLevel {
        match self {
            NotificationKind::SessionExpired
            | NotificationKind::UnauthorizedAccess
            | NotificationKind::AuthenticationFailed => NotificationLevel::Error,
            NotificationKind::LoginSuccess
            | NotificationKind::RegistrationSuccess
            | NotificationKind::LogoutSuccess => NotificationLevel::Success,
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            NotificationKind::SessionExpired => "Your session has expired, please login again",
            NotificationKind::UnauthorizedAccess => "Please login to access this page",
            NotificationKind::AuthenticationFailed => "Authentication failed",
            NotificationKind::LoginSuccess => "Login successful!",
            NotificationKind::RegistrationSuccess => "Registration successful!",
            NotificationKind::LogoutSuccess => "Logged out successfully",
        }
    }
}

/// Suppresses duplicate notifications of the same kind within a window.
///
/// Each kind expires independently. The set is swept lazily on access.
pub struct NotificationDeduplicator {
    active: Mutex<HashMap<NotificationKind, Instant>>,
    window: Duration,
}

impl NotificationDeduplicator {
    /// Create a deduplicator with the default 1 second window.
    pub fn new() -> Self {
        Self::with_window(NOTIFICATION_SUPPRESS_WINDOW)
    }

    /// Create a deduplicator with a custom suppression window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            active: Mutex::new(HashMap::new()),
            window,
        }
    }

    /// Whether a notification of this kind may be emitted right now.
    pub fn should_emit(&self, kind: NotificationKind) -> bool {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        let window = self.window;
        active.retain(|_, emitted| emitted.elapsed() < window);
        !active.contains_key(&kind)
    }

    /// Record that a notification of this kind was just emitted.
    pub fn mark_emitted(&self, kind: NotificationKind) {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.insert(kind, Instant::now());
    }

    /// Drop all suppression state.
    pub fn clear(&self) {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Default for NotificationDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicated auth notifications, delivered through the injected sink.
#[derive(Clone)]
pub struct AuthNotifications {
    dedup: Arc<NotificationDeduplicator>,
    sink: Arc<dyn Notifier>,
}

impl AuthNotifications {
    pub fn new(sink: Arc<dyn Notifier>) -> Self {
        Self {
            dedup: Arc::new(NotificationDeduplicator::new()),
            sink,
        }
    }

    /// Emit a notification unless an identical kind is already active.
    pub fn emit(&self, kind: NotificationKind) {
        self.emit_message(kind, kind.default_message());
    }

    /// Emit a notification with a custom message, subject to deduplication.
    pub fn emit_message(&self, kind: NotificationKind, message: &str) {
        if !self.dedup.should_emit(kind) {
            return;
        }
        self.dedup.mark_emitted(kind);
        self.sink.notify(kind, kind.level(), message);
    }

    pub fn session_expired(&self) {
        self.emit(NotificationKind::SessionExpired);
    }

    pub fn unauthorized_access(&self) {
        self.emit(NotificationKind::UnauthorizedAccess);
    }

    pub fn authentication_failed(&self, message: &str) {
        self.emit_message(NotificationKind::AuthenticationFailed, message);
    }

    pub fn login_success(&self) {
        self.emit(NotificationKind::LoginSuccess);
    }

    pub fn registration_success(&self) {
        self.emit(NotificationKind::RegistrationSuccess);
    }

    pub fn logout_success(&self) {
        self.emit(NotificationKind::LogoutSuccess);
    }
}
