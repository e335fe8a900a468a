//! HTTP client for the fintrack API: envelope handling, bearer auth, and
//! the authentication endpoints.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::session::store::SessionStore;
use crate::traits::{Headers, HttpClient, Response};

/// Structured error detail inside the response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// The server's uniform response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

impl<T> ApiEnvelope<T> {
    /// The server-supplied human message, preferring the structured error
    /// detail over the top-level message.
    fn detail(&self) -> Option<String> {
        self.error
            .as_ref()
            .and_then(|e| e.message.clone())
            .or_else(|| self.message.clone())
    }
}

/// Client for the fintrack REST API.
///
/// Cheap to clone pieces are shared: the HTTP client behind an `Arc` and
/// the session store handle, from which the bearer token is read per
/// request (so a token refreshed mid-session is picked up immediately).
pub struct ApiClient<C: HttpClient> {
    base_url: String,
    http: Arc<C>,
    store: SessionStore,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(config: &ApiConfig, http: Arc<C>, store: SessionStore) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self, authenticated: bool) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if authenticated {
            if let Some(token) = self.store.token() {
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            }
        }
        headers
    }

    /// Decode a response into the envelope's `data`, classifying any
    /// non-success status or malformed envelope into an [`ApiError`].
    fn decode<T: DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
        // Pull the server detail out of the envelope even on error statuses.
        let envelope: Option<ApiEnvelope<T>> = response.json().ok();

        if !response.is_success() {
            let detail = envelope.as_ref().and_then(ApiEnvelope::detail);
            return Err(ApiError::from_status(response.status, detail));
        }

        match envelope {
            Some(envelope) if envelope.success => envelope.data.ok_or_else(|| ApiError::Unknown {
                status: response.status,
                message: "Response envelope carried no data".to_string(),
            }),
            Some(envelope) => Err(ApiError::Unknown {
                status: response.status,
                message: envelope
                    .detail()
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            }),
            None => Err(ApiError::Unknown {
                status: response.status,
                message: "Invalid response format".to_string(),
            }),
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self
            .http
            .get(&self.url(path), &self.headers(true))
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        Self::decode(&response)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        debug!(path, "POST");
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::network(format!("Failed to encode request: {}", e)))?;
        let response = self
            .http
            .post(&self.url(path), &body, &self.headers(authenticated))
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        Self::decode(&response)
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "PUT");
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::network(format!("Failed to encode request: {}", e)))?;
        let response = self
            .http
            .put(&self.url(path), &body, &self.headers(true))
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        Self::decode(&response)
    }

    pub(crate) async fn delete_json(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let response = self
            .http
            .delete(&self.url(path), &self.headers(true))
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        if response.is_success() {
            return Ok(());
        }
        let envelope: Option<ApiEnvelope<serde_json::Value>> = response.json().ok();
        let detail = envelope.as_ref().and_then(ApiEnvelope::detail);
        Err(ApiError::from_status(response.status, detail))
    }

    /// Authenticate with email and password.
    ///
    /// POST /auth/login
    ///
    /// # Errors
    ///
    /// 401/404 mean rejected credentials; see [`ApiError`] for the taxonomy.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/login", credentials, false).await
    }

    /// Create an account and authenticate in one step.
    ///
    /// POST /auth/register
    ///
    /// # Errors
    ///
    /// 400 means the payload was rejected.
    pub async fn register(&self, user_data: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/register", user_data, false).await
    }

    /// Notify the server of a logout. The response body is irrelevant;
    /// callers treat any failure as ignorable.
    ///
    /// POST /auth/logout
    ///
    /// # Errors
    ///
    /// Network or server failures, which the logout sequencer swallows.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .post(&self.url("/auth/logout"), "{}", &self.headers(true))
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_status(response.status, None))
        }
    }

    /// Fetch the profile of the token's owner. This is the verification
    /// operation: a 401 here means the session is stale.
    ///
    /// GET /auth/me
    ///
    /// # Errors
    ///
    /// [`ApiError::Authentication`] on an invalid or expired token.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::adapters::mock::{InMemorySessionStore, MockHttpClient, MockResponse};

    fn fixture() -> (ApiClient<MockHttpClient>, Arc<MockHttpClient>, SessionStore) {
        let http = Arc::new(MockHttpClient::new());
        let store = SessionStore::new(Arc::new(InMemorySessionStore::new()));
        let config = ApiConfig::with_base_url("http://api.test");
        let client = ApiClient::new(&config, http.clone(), store.clone());
        (client, http, store)
    }

    fn ok_body(data: &str) -> Bytes {
        Bytes::from(format!(r#"{{"success":true,"data":{}}}"#, data))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = Arc::new(MockHttpClient::new());
        let store = SessionStore::new(Arc::new(InMemorySessionStore::new()));
        let config = ApiConfig::with_base_url("http://api.test/");
        let client = ApiClient::new(&config, http, store);
        assert_eq!(client.base_url(), "http://api.test");
    }

    #[tokio::test]
    async fn test_login_success_parses_auth_response() {
        let (client, http, _) = fixture();
        http.set_response(
            "http://api.test/auth/login",
            MockResponse::Success(Response::new(
                200,
                ok_body(
                    r#"{"user":{"id":"u1","name":"Ada","email":"ada@example.com"},"token":"tok-1"}"#,
                ),
            )),
        );

        let auth = client
            .login(&LoginRequest {
                email: "ada@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(auth.token, "tok-1");
        assert_eq!(auth.user.id, "u1");

        // Login is unauthenticated: no bearer header.
        let requests = http.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_login_401_surfaces_server_detail() {
        let (client, http, _) = fixture();
        http.set_response(
            "http://api.test/auth/login",
            MockResponse::Success(Response::new(
                401,
                Bytes::from(
                    r#"{"success":false,"error":{"message":"Invalid email or password"}}"#,
                ),
            )),
        );

        let err = client
            .login(&LoginRequest {
                email: "ada@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(err.is_authentication());
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_current_user_sends_bearer_token() {
        let (client, http, store) = fixture();
        store.set_authenticated(
            User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                created_at: None,
            },
            "tok-1".to_string(),
        );
        http.set_response(
            "http://api.test/auth/me",
            MockResponse::Success(Response::new(
                200,
                ok_body(r#"{"id":"u1","name":"Ada","email":"ada@example.com"}"#),
            )),
        );

        let user = client.current_user().await.unwrap();
        assert_eq!(user.id, "u1");

        let requests = http.recorded_requests();
        assert_eq!(
            requests[0].headers.get("Authorization"),
            Some(&"Bearer tok-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_envelope_without_data_is_unknown_error() {
        let (client, http, _) = fixture();
        http.set_response(
            "http://api.test/auth/me",
            MockResponse::Success(Response::new(200, Bytes::from(r#"{"success":true}"#))),
        );

        let err = client.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Unknown { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let (client, http, _) = fixture();
        http.set_default_response(MockResponse::Error(
            crate::traits::HttpError::ConnectionFailed("refused".to_string()),
        ));

        let err = client.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }));
    }

    #[tokio::test]
    async fn test_logout_ignores_body() {
        let (client, http, _) = fixture();
        http.set_response(
            "http://api.test/auth/logout",
            MockResponse::Success(Response::new(200, Bytes::new())),
        );
        assert!(client.logout().await.is_ok());
    }
}
