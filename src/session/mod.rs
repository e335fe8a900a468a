//! Session and authentication-freshness management.
//!
//! This module is the single source of truth for authentication state:
//! - [`store`] - the session store (state, subscriptions, persistence)
//! - [`notifications`] - user-facing alerts with duplicate suppression
//! - [`controller`] - login/logout operations and the freshness triggers
//! - [`guard`] - the route guard gating protected views

pub mod controller;
pub mod guard;
pub mod notifications;
pub mod store;

pub use controller::{InterceptOutcome, RouteContext, SessionController, VerifyOutcome};
pub use guard::{GuardDecision, RouteGuard};
pub use notifications::{AuthNotifications, NotificationDeduplicator, NotificationKind};
pub use store::{PersistedSession, SessionState, SessionStore, LOGOUT_GRACE_PERIOD};
