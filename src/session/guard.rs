//! The route guard: decides whether a protected view renders, waits, or
//! redirects.
//!
//! While a verification is in flight the guard always answers `Loading`,
//! never a redirect, so a legitimate check cannot cause redirect flicker.
//! On redirect it emits at most one notification per unauthenticated-access
//! episode: a local latch arms on the first denial and resets only when the
//! store transitions back to authenticated.

use crate::session::notifications::AuthNotifications;
use crate::session::store::SessionStore;

/// What the caller should render for a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Verification settled and the user is authenticated.
    Render,
    /// A verification is in flight; show a loading indicator.
    Loading,
    /// Not authenticated; navigate to the login route.
    RedirectToLogin,
}

/// Per-view gatekeeper over the session store.
pub struct RouteGuard {
    notifications: AuthNotifications,
    has_notified: bool,
}

impl RouteGuard {
    pub fn new(notifications: AuthNotifications) -> Self {
        Self {
            notifications,
            has_notified: false,
        }
    }

    /// Evaluate the guard against the current session state.
    ///
    /// Notification policy on denial: the message depends on the cause
    /// (a held token implies expiry; no token at all is plain unauthorized
    /// access), and it is suppressed entirely during a logout or within the
    /// logout grace period.
    pub fn evaluate(&mut self, store: &SessionStore) -> GuardDecision {
        let state = store.snapshot();

        if state.is_authenticated {
            // Episode over; re-arm for the next unauthenticated access.
            self.has_notified = false;
            if state.is_loading {
                return GuardDecision::Loading;
            }
            return GuardDecision::Render;
        }

        if state.is_loading {
            return GuardDecision::Loading;
        }

        let suppress = state.is_logging_out || store.recently_logged_out();
        if !self.has_notified && !suppress {
            self.has_notified = true;
            if state.token.is_some() {
                self.notifications.session_expired();
            } else {
                self.notifications.unauthorized_access();
            }
        }

        GuardDecision::RedirectToLogin
    }
}
