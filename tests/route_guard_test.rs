//! Integration tests for the route guard across whole session episodes.

mod common;

use common::{harness, harness_with, me_rejected, me_url, persisted_session};

use fintrack::session::{
    GuardDecision, NotificationKind, RouteContext, RouteGuard, LOGOUT_GRACE_PERIOD,
};

#[tokio::test]
async fn test_guard_redirects_and_notifies_once_without_session() {
    let h = harness();
    let mut guard = RouteGuard::new(h.controller.notifications().clone());

    // Repeated evaluations of the same denial notify once.
    for _ in 0..3 {
        assert_eq!(guard.evaluate(&h.store), GuardDecision::RedirectToLogin);
    }
    assert_eq!(h.sink.count_of(NotificationKind::UnauthorizedAccess), 1);
}

#[tokio::test]
async fn test_guard_waits_during_verification() {
    let h = harness_with(Some(persisted_session("tok-1")));
    let mut guard = RouteGuard::new(h.controller.notifications().clone());

    h.store.set_loading(true);

    // A pending check never downgrades to a redirect.
    assert_eq!(guard.evaluate(&h.store), GuardDecision::Loading);
    assert!(h.sink.recorded().is_empty());
}

#[tokio::test]
async fn test_guard_renders_verified_session() {
    let h = harness_with(Some(persisted_session("tok-1")));
    h.http.set_response(&me_url(), common::me_success());
    h.controller
        .check_on_startup(&RouteContext::new("/dashboard"))
        .await;

    let mut guard = RouteGuard::new(h.controller.notifications().clone());
    assert_eq!(guard.evaluate(&h.store), GuardDecision::Render);
    assert!(h.sink.recorded().is_empty());
}

#[tokio::test]
async fn test_guard_reports_expiry_after_failed_verification() {
    let h = harness_with(Some(persisted_session("tok-1")));
    h.http.set_response(&me_url(), me_rejected());
    let route = RouteContext::new("/dashboard");

    h.controller.check_on_startup(&route).await;

    // The controller already announced the expiry; the guard's own message
    // is deduplicated away inside the suppression window, leaving exactly
    // one user-visible message for the whole episode.
    let mut guard = RouteGuard::new(h.controller.notifications().clone());
    assert_eq!(guard.evaluate(&h.store), GuardDecision::RedirectToLogin);
    assert_eq!(h.sink.count_of(NotificationKind::SessionExpired), 1);
    assert_eq!(h.sink.count_of(NotificationKind::UnauthorizedAccess), 0);
}

#[tokio::test(start_paused = true)]
async fn test_guard_is_silent_within_logout_grace_period() {
    let h = harness_with(Some(persisted_session("tok-1")));

    h.controller.logout().await;

    let mut guard = RouteGuard::new(h.controller.notifications().clone());
    assert_eq!(guard.evaluate(&h.store), GuardDecision::RedirectToLogin);
    assert_eq!(h.sink.count_of(NotificationKind::UnauthorizedAccess), 0);
    assert_eq!(h.sink.count_of(NotificationKind::SessionExpired), 0);

    // Once the grace period lapses, an unauthenticated visit is a real
    // unauthorized access again.
    tokio::time::advance(LOGOUT_GRACE_PERIOD + tokio::time::Duration::from_millis(10)).await;
    let mut late_guard = RouteGuard::new(h.controller.notifications().clone());
    assert_eq!(late_guard.evaluate(&h.store), GuardDecision::RedirectToLogin);
    assert_eq!(h.sink.count_of(NotificationKind::UnauthorizedAccess), 1);
}

#[tokio::test]
async fn test_guard_rearms_after_reauthentication() {
    let h = harness();
    let mut guard = RouteGuard::new(h.controller.notifications().clone());

    assert_eq!(guard.evaluate(&h.store), GuardDecision::RedirectToLogin);
    assert_eq!(h.sink.count_of(NotificationKind::UnauthorizedAccess), 1);

    h.store
        .set_authenticated(common::test_user(), "tok-1".to_string());
    assert_eq!(guard.evaluate(&h.store), GuardDecision::Render);

    h.store.begin_logout();
    h.store.complete_logout();
    h.sink.clear();

    // A fresh denial after re-authentication is a new episode. The logout
    // grace period still suppresses it at first.
    assert_eq!(guard.evaluate(&h.store), GuardDecision::RedirectToLogin);
    assert_eq!(h.sink.count_of(NotificationKind::UnauthorizedAccess), 0);
}
