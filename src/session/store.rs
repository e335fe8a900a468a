//! The session store: single source of truth for authentication state.
//!
//! The store is an explicitly injected, cloneable handle. Consumers observe
//! it either by taking a [`SessionState`] snapshot or by subscribing to the
//! watch channel, which publishes a fresh snapshot after every mutation.
//!
//! Invariants:
//! - `is_authenticated == true` implies both `user` and `token` are present.
//! - `is_logging_out` is transient and never persisted.
//! - Only `{token, user, is_authenticated}` survive a restart.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::{Duration, Instant};
use tracing::warn;

use crate::models::User;
use crate::traits::SessionPersist;

/// Window after logout begins during which unauthenticated-access
/// evaluations are treated as a side effect of the logout itself.
pub const LOGOUT_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// The full in-memory session record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub is_logging_out: bool,
    pub last_error: Option<String>,
}

impl SessionState {
    /// Whether a token is held, regardless of verification status.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

/// The durable subset of the session, written through [`SessionPersist`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_authenticated: bool,
}

struct Inner {
    state: Mutex<SessionState>,
    tx: watch::Sender<SessionState>,
    persist: Arc<dyn SessionPersist>,
    /// When the most recent logout began. Read by the grace-period check.
    logout_started: Mutex<Option<Instant>>,
}

/// Cloneable handle to the shared session state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Create an empty store backed by the given persistence adapter.
    pub fn new(persist: Arc<dyn SessionPersist>) -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SessionState::default()),
                tx,
                persist,
                logout_started: Mutex::new(None),
            }),
        }
    }

    /// Restore the persisted `{token, user, is_authenticated}` subset.
    ///
    /// Loading/error/logout flags always start fresh. Load failures are
    /// logged and leave the store empty.
    pub fn load_persisted(&self) {
        match self.inner.persist.load() {
            Ok(Some(persisted)) => {
                let mut state = self.lock();
                state.token = persisted.token;
                state.user = persisted.user;
                state.is_authenticated = persisted.is_authenticated;
                self.publish(&state);
            }
            Ok(None) => {}
            Err(err) => warn!("Failed to load persisted session: {}", err),
        }
    }

    /// Take a snapshot of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Subscribe to state snapshots. The receiver sees the value current at
    /// subscription time plus every subsequent mutation.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.tx.subscribe()
    }

    /// The current token, if any.
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Whether a logout sequence is currently in progress.
    pub fn is_logging_out(&self) -> bool {
        self.lock().is_logging_out
    }

    /// Whether a logout is in progress or completed within the grace period.
    pub fn recently_logged_out(&self) -> bool {
        if self.is_logging_out() {
            return true;
        }
        self.inner
            .logout_started
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .map(|started| started.elapsed() < LOGOUT_GRACE_PERIOD)
            .unwrap_or(false)
    }

    /// Set or clear the loading flag.
    pub fn set_loading(&self, loading: bool) {
        let mut state = self.lock();
        state.is_loading = loading;
        self.publish(&state);
    }

    /// Record an error message.
    pub fn record_error(&self, message: impl Into<String>) {
        let mut state = self.lock();
        state.last_error = Some(message.into());
        self.publish(&state);
    }

    /// Clear the last error.
    pub fn clear_error(&self) {
        let mut state = self.lock();
        state.last_error = None;
        self.publish(&state);
    }

    /// Enter the authenticated state after a successful login/registration.
    pub fn set_authenticated(&self, user: User, token: String) {
        let mut state = self.lock();
        state.token = Some(token);
        state.user = Some(user);
        state.is_authenticated = true;
        state.is_loading = false;
        state.last_error = None;
        self.save_persisted(&state);
        self.publish(&state);
    }

    /// Replace the user profile without touching authentication flags.
    /// Used by the best-effort profile refresh.
    pub fn set_user(&self, user: User) {
        let mut state = self.lock();
        state.user = Some(user);
        self.save_persisted(&state);
        self.publish(&state);
    }

    /// Commit a verification result, but only if it is still relevant:
    /// the token must be unchanged since the verification started and no
    /// logout may be in progress. Returns whether the result was applied.
    pub fn commit_verification(&self, user: User, expected_token: &str) -> bool {
        let mut state = self.lock();
        if state.is_logging_out {
            return false;
        }
        if state.token.as_deref() != Some(expected_token) {
            return false;
        }
        state.user = Some(user);
        state.is_authenticated = true;
        state.is_loading = false;
        state.last_error = None;
        self.save_persisted(&state);
        self.publish(&state);
        true
    }

    /// Record a failed login/registration attempt.
    pub fn record_auth_failure(&self, message: impl Into<String>) {
        let mut state = self.lock();
        state.token = None;
        state.user = None;
        state.is_authenticated = false;
        state.is_loading = false;
        state.last_error = Some(message.into());
        self.clear_persisted();
        self.publish(&state);
    }

    /// Begin the logout sequence: raise the transient flags and start the
    /// grace period.
    pub fn begin_logout(&self) {
        let mut state = self.lock();
        state.is_loading = true;
        state.is_logging_out = true;
        *self
            .inner
            .logout_started
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
        self.publish(&state);
    }

    /// Commit the logout: clear everything, including `is_logging_out`.
    /// The grace period keeps running from `begin_logout`.
    pub fn complete_logout(&self) {
        let mut state = self.lock();
        state.token = None;
        state.user = None;
        state.is_authenticated = false;
        state.is_loading = false;
        state.is_logging_out = false;
        state.last_error = None;
        self.clear_persisted();
        self.publish(&state);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, state: &SessionState) {
        self.inner.tx.send_replace(state.clone());
    }

    fn save_persisted(&self, state: &SessionState) {
        let persisted = PersistedSession {
            token: state.token.clone(),
            user: state.user.clone(),
            is_authenticated: state.is_authenticated,
        };
        if let Err(err) = self.inner.persist.save(&persisted) {
            warn!("Failed to persist session: {}", err);
        }
    }

    fn clear_persisted(&self) {
        if let Err(err) = self.inner.persist.clear() {
            warn!("Failed to clear persisted session: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemorySessionStore;

    fn test_user() -> User {
        User {
            id: "user-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: None,
        }
    }

    fn new_store() -> (SessionStore, Arc<InMemorySessionStore>) {
        let persist = Arc::new(InMemorySessionStore::new());
        (SessionStore::new(persist.clone()), persist)
    }

    #[test]
    fn test_starts_empty() {
        let (store, _) = new_store();
        let state = store.snapshot();
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_set_authenticated_upholds_invariant() {
        let (store, _) = new_store();
        store.set_authenticated(test_user(), "tok-1".to_string());

        let state = store.snapshot();
        assert!(state.is_authenticated);
        assert!(state.token.is_some());
        assert!(state.user.is_some());
        assert!(!state.is_loading);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_persists_only_durable_subset() {
        let (store, persist) = new_store();
        store.set_authenticated(test_user(), "tok-1".to_string());
        store.set_loading(true);
        store.record_error("boom");

        let saved = persist.load().unwrap().unwrap();
        assert_eq!(saved.token, Some("tok-1".to_string()));
        assert!(saved.is_authenticated);
        // Loading and error flags never reach persistence.
    }

    #[test]
    fn test_load_persisted_restores_subset_only() {
        let persist = Arc::new(InMemorySessionStore::new());
        persist
            .save(&PersistedSession {
                token: Some("tok-1".to_string()),
                user: Some(test_user()),
                is_authenticated: true,
            })
            .unwrap();

        let store = SessionStore::new(persist);
        store.load_persisted();

        let state = store.snapshot();
        assert_eq!(state.token, Some("tok-1".to_string()));
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert!(!state.is_logging_out);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_commit_verification_applies_when_relevant() {
        let (store, _) = new_store();
        store.set_authenticated(test_user(), "tok-1".to_string());

        assert!(store.commit_verification(test_user(), "tok-1"));
        assert!(store.snapshot().is_authenticated);
    }

    #[test]
    fn test_commit_verification_rejected_after_logout() {
        let (store, _) = new_store();
        store.set_authenticated(test_user(), "tok-1".to_string());
        store.begin_logout();
        store.complete_logout();

        // A verification that resolves late must not resurrect the session.
        assert!(!store.commit_verification(test_user(), "tok-1"));
        assert!(!store.snapshot().is_authenticated);
        assert!(store.snapshot().token.is_none());
    }

    #[test]
    fn test_commit_verification_rejected_while_logging_out() {
        let (store, _) = new_store();
        store.set_authenticated(test_user(), "tok-1".to_string());
        store.begin_logout();

        assert!(!store.commit_verification(test_user(), "tok-1"));
    }

    #[test]
    fn test_commit_verification_rejected_for_stale_token() {
        let (store, _) = new_store();
        store.set_authenticated(test_user(), "tok-2".to_string());

        assert!(!store.commit_verification(test_user(), "tok-1"));
    }

    #[test]
    fn test_logout_sequence_clears_everything() {
        let (store, persist) = new_store();
        store.set_authenticated(test_user(), "tok-1".to_string());
        store.begin_logout();
        assert!(store.snapshot().is_logging_out);
        assert!(store.snapshot().is_loading);

        store.complete_logout();
        let state = store.snapshot();
        assert!(state.token.is_none());
        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
        assert!(!state.is_logging_out);
        assert!(persist.load().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_grace_period_expires() {
        let (store, _) = new_store();
        store.begin_logout();
        store.complete_logout();
        assert!(store.recently_logged_out());

        tokio::time::advance(LOGOUT_GRACE_PERIOD + Duration::from_millis(10)).await;
        assert!(!store.recently_logged_out());
    }

    #[test]
    fn test_record_auth_failure() {
        let (store, persist) = new_store();
        store.set_authenticated(test_user(), "tok-1".to_string());
        store.record_auth_failure("Invalid email or password");

        let state = store.snapshot();
        assert!(!state.is_authenticated);
        assert!(state.token.is_none());
        assert_eq!(
            state.last_error,
            Some("Invalid email or password".to_string())
        );
        assert!(persist.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_subscription_sees_mutations() {
        let (store, _) = new_store();
        let mut rx = store.subscribe();

        store.set_authenticated(test_user(), "tok-1".to_string());
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_authenticated);
    }
}
