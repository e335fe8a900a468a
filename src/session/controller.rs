//! Session operations and the authentication-freshness triggers.
//!
//! Three independent initiators can discover that a held token is no longer
//! valid: the startup check, the visibility-regain check, and the global 401
//! interceptor. All three funnel into one idempotent pair of functions,
//! [`SessionController::verify_session`] and
//! [`SessionController::handle_session_loss`], so their arbitrary
//! interleaving produces at most one user-visible "session expired" message
//! per actual session loss. The deduplicator and the logout grace period are
//! the only coordination mechanisms; every path tolerates running after
//! another path already tore the session down.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::session::notifications::AuthNotifications;
use crate::session::store::SessionStore;
use crate::traits::HttpClient;

/// The caller's current navigation position, passed explicitly so the
/// session layer never reads global location state.
#[derive(Debug, Clone)]
pub struct RouteContext {
    path: String,
}

impl RouteContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the current route is an unauthenticated entry point where a
    /// "session expired" message would be noise.
    pub fn is_entry_route(&self) -> bool {
        matches!(self.path.as_str(), "/login" | "/register")
    }
}

/// Result of one freshness-trigger invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// No token was held (or the check was already performed); no network
    /// call was made.
    Idle,
    /// The token verified successfully; the store holds a fresh profile.
    Fresh,
    /// The token was rejected or unverifiable; the session was torn down.
    Stale,
}

/// Result of routing a response through the 401 interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptOutcome {
    /// The response carried no authentication failure.
    Passed,
    /// Session loss was detected and handled; the caller should navigate
    /// to the login route.
    SessionLost,
    /// Authentication failure observed, but handling was suppressed
    /// (entry route, or a logout already owns the teardown).
    Suppressed,
}

/// Coordinates the session store, the auth API, and user notifications.
pub struct SessionController<C: HttpClient> {
    store: SessionStore,
    api: ApiClient<C>,
    notifications: AuthNotifications,
    startup_checked: AtomicBool,
}

impl<C: HttpClient> SessionController<C> {
    pub fn new(store: SessionStore, api: ApiClient<C>, notifications: AuthNotifications) -> Self {
        Self {
            store,
            api,
            notifications,
            startup_checked: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    pub fn notifications(&self) -> &AuthNotifications {
        &self.notifications
    }

    /// Log in with the given credentials.
    ///
    /// On success the store becomes authenticated and a success toast fires.
    /// On failure the store records the error and the error propagates so
    /// the caller can keep its form open.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] from the login endpoint.
    pub async fn login(&self, credentials: LoginRequest) -> Result<(), ApiError> {
        self.store.set_loading(true);
        self.store.clear_error();

        match self.api.login(&credentials).await {
            Ok(auth) => {
                info!(user = %auth.user.email, "Login successful");
                self.store.set_authenticated(auth.user, auth.token);
                self.notifications.login_success();
                Ok(())
            }
            Err(err) => {
                warn!("Login failed: {}", err);
                self.store.record_auth_failure(err.user_message());
                self.notifications.authentication_failed(err.user_message());
                Err(err)
            }
        }
    }

    /// Register a new account. Same contract shape as [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] from the registration endpoint.
    pub async fn register(&self, user_data: RegisterRequest) -> Result<(), ApiError> {
        self.store.set_loading(true);
        self.store.clear_error();

        match self.api.register(&user_data).await {
            Ok(auth) => {
                info!(user = %auth.user.email, "Registration successful");
                self.store.set_authenticated(auth.user, auth.token);
                self.notifications.registration_success();
                Ok(())
            }
            Err(err) => {
                warn!("Registration failed: {}", err);
                self.store.record_auth_failure(err.user_message());
                self.notifications.authentication_failed(err.user_message());
                Err(err)
            }
        }
    }

    /// Log out. Never fails observably: the server call is best effort and
    /// local state always clears.
    ///
    /// Ordering is explicit rather than timer based: the success toast is
    /// emitted while `is_logging_out` is still observably true, and state
    /// clears only in the final commit. The grace period started by
    /// `begin_logout` suppresses session-loss side effects from competing
    /// triggers.
    pub async fn logout(&self) {
        self.teardown(true).await;
    }

    /// Best-effort re-fetch of the user profile. Failures are logged and do
    /// not alter authentication state.
    pub async fn refresh_user(&self) {
        if self.store.token().is_none() {
            return;
        }
        match self.api.current_user().await {
            Ok(user) => self.store.set_user(user),
            Err(err) => warn!("Failed to refresh user info: {}", err),
        }
    }

    /// Startup freshness check. Runs at most once per controller lifetime.
    pub async fn check_on_startup(&self, route: &RouteContext) -> VerifyOutcome {
        if self.startup_checked.swap(true, Ordering::SeqCst) {
            return VerifyOutcome::Idle;
        }
        self.verify_session(route).await
    }

    /// Freshness check for every hidden-to-visible transition.
    pub async fn check_on_visibility_regain(&self, route: &RouteContext) -> VerifyOutcome {
        self.verify_session(route).await
    }

    /// Verify the held token by fetching the current user.
    ///
    /// No token means no network call. A rejected or unreachable
    /// verification tears the session down through
    /// [`Self::handle_session_loss`]. A verification that resolves after a
    /// competing logout cleared the state is discarded.
    pub async fn verify_session(&self, route: &RouteContext) -> VerifyOutcome {
        let Some(token) = self.store.token() else {
            return VerifyOutcome::Idle;
        };

        self.store.set_loading(true);
        match self.api.current_user().await {
            Ok(user) => {
                if self.store.commit_verification(user, &token) {
                    debug!("Session verified");
                    VerifyOutcome::Fresh
                } else {
                    // The session changed while we were waiting; whoever
                    // changed it owns the consequences.
                    debug!("Discarding stale verification result");
                    self.store.set_loading(false);
                    VerifyOutcome::Stale
                }
            }
            Err(err) => {
                warn!("Token validation failed: {}", err);
                self.handle_session_loss(route).await;
                VerifyOutcome::Stale
            }
        }
    }

    /// Route an API result through the global 401 interceptor.
    ///
    /// Any [`ApiError::Authentication`] triggers session-loss handling; the
    /// original error always propagates unchanged.
    ///
    /// # Errors
    ///
    /// Returns the original error from `result`.
    pub async fn intercept<T>(
        &self,
        result: Result<T, ApiError>,
        route: &RouteContext,
    ) -> Result<T, ApiError> {
        if let Err(err) = &result {
            if err.is_authentication() {
                self.handle_unauthorized(route).await;
            }
        }
        result
    }

    /// Handle an authentication-failure response observed by any API call.
    pub async fn handle_unauthorized(&self, route: &RouteContext) -> InterceptOutcome {
        if route.is_entry_route() {
            debug!(path = route.path(), "401 on entry route, no teardown");
            return InterceptOutcome::Suppressed;
        }
        if self.store.recently_logged_out() {
            debug!("401 during logout grace period, suppressed");
            return InterceptOutcome::Suppressed;
        }
        self.handle_session_loss(route).await;
        InterceptOutcome::SessionLost
    }

    /// Unified session-loss handler shared by all freshness triggers.
    ///
    /// Idempotent: with the session already cleared this is a no-op, and the
    /// notification request is subject to both the logout grace period and
    /// the deduplicator, so trigger storms surface at most one message.
    pub async fn handle_session_loss(&self, route: &RouteContext) {
        let state = self.store.snapshot();
        if state.token.is_none() && !state.is_authenticated {
            self.store.set_loading(false);
            return;
        }

        if !route.is_entry_route() && !self.store.recently_logged_out() {
            self.notifications.session_expired();
        }
        self.teardown(false).await;
    }

    /// The logout sequencer. `announce` distinguishes a user-initiated
    /// logout (success toast) from a forced teardown after session loss.
    async fn teardown(&self, announce: bool) {
        self.store.begin_logout();

        // Best effort: local logout must succeed even if the server is
        // unreachable or already rejected the token.
        if let Err(err) = self.api.logout().await {
            warn!("Logout request failed: {}", err);
        }

        if announce {
            // Emitted before the commit so observers still see
            // `is_logging_out == true` during the notification.
            self.notifications.logout_success();
        }

        self.store.complete_logout();
        info!("Session cleared");
    }
}
