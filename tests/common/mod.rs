//! Shared fixtures for the session integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;

use fintrack::adapters::mock::{
    InMemorySessionStore, MockHttpClient, MockResponse, RecordingNotifier,
};
use fintrack::api::ApiClient;
use fintrack::config::ApiConfig;
use fintrack::models::User;
use fintrack::session::{
    AuthNotifications, PersistedSession, SessionController, SessionStore,
};
use fintrack::traits::Response;

pub const BASE_URL: &str = "http://api.test";

/// A fully wired controller over recording test doubles.
pub struct Harness {
    pub controller: SessionController<MockHttpClient>,
    pub http: Arc<MockHttpClient>,
    pub sink: Arc<RecordingNotifier>,
    pub persist: Arc<InMemorySessionStore>,
    pub store: SessionStore,
}

/// Build a harness with an empty session.
pub fn harness() -> Harness {
    harness_with(None)
}

/// Build a harness, optionally seeding the persisted session that
/// `load_persisted` restores on startup.
pub fn harness_with(persisted: Option<PersistedSession>) -> Harness {
    let persist = Arc::new(match persisted {
        Some(session) => InMemorySessionStore::with_session(session),
        None => InMemorySessionStore::new(),
    });
    let store = SessionStore::new(persist.clone());
    store.load_persisted();

    let http = Arc::new(MockHttpClient::new());
    // Teardown always POSTs /auth/logout; most tests don't care about it.
    http.set_response(
        &format!("{}/auth/logout", BASE_URL),
        MockResponse::Success(Response::new(200, Bytes::new())),
    );

    let api = ApiClient::new(
        &ApiConfig::with_base_url(BASE_URL),
        http.clone(),
        store.clone(),
    );
    let sink = Arc::new(RecordingNotifier::new());
    let notifications = AuthNotifications::new(sink.clone());
    let controller = SessionController::new(store.clone(), api, notifications);

    Harness {
        controller,
        http,
        sink,
        persist,
        store,
    }
}

pub fn test_user() -> User {
    User {
        id: "user-1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        created_at: None,
    }
}

/// A persisted session holding a token the tests can accept or reject.
pub fn persisted_session(token: &str) -> PersistedSession {
    PersistedSession {
        token: Some(token.to_string()),
        user: Some(test_user()),
        is_authenticated: true,
    }
}

/// Successful GET /auth/me envelope for [`test_user`].
pub fn me_success() -> MockResponse {
    MockResponse::Success(Response::new(
        200,
        Bytes::from(
            r#"{"success":true,"data":{"id":"user-1","name":"Ada","email":"ada@example.com"}}"#,
        ),
    ))
}

/// Rejected-token envelope for GET /auth/me.
pub fn me_rejected() -> MockResponse {
    MockResponse::Success(Response::new(
        401,
        Bytes::from(r#"{"success":false,"error":{"message":"Token expired"}}"#),
    ))
}

pub fn me_url() -> String {
    format!("{}/auth/me", BASE_URL)
}
