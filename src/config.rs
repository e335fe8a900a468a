//! Application configuration.
//!
//! Resolution order: explicit override, then environment, then the default
//! local development server.

/// Default API server URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable that overrides the API server URL.
pub const API_URL_ENV: &str = "FINTRACK_API_URL";

/// Configuration for talking to the API server.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the API server, without the `/api` prefix.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Create a config from the environment, falling back to the default URL.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self {
                base_url: url.trim().to_string(),
            },
            _ => Self::default(),
        }
    }

    /// Create a config with an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}
