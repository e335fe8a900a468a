//! API error taxonomy.
//!
//! Errors are classified by HTTP status. Message text prefers the
//! server-supplied detail from the response envelope, falling back to a
//! generic per-class message.

use thiserror::Error;

/// Classified failure of an API interaction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// No response was received at all.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server rejected the request payload (400/422).
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The credentials were missing, invalid, or expired (401).
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// The authenticated user may not access this resource (403).
    #[error("Authorization error: {message}")]
    Authorization { message: String },

    /// The requested resource does not exist (404).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The server failed or is overloaded (429/5xx).
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Anything that doesn't fit the categories above.
    #[error("Unexpected error ({status}): {message}")]
    Unknown { status: u16, message: String },
}

impl ApiError {
    /// Classify a non-success HTTP status into an error variant.
    ///
    /// `detail` is the server-supplied message extracted from the response
    /// envelope, if any.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let message = |fallback: &str| detail.clone().unwrap_or_else(|| fallback.to_string());
        match status {
            400 | 422 => ApiError::Validation {
                message: message("Request validation failed"),
            },
            401 => ApiError::Authentication {
                message: message("Unauthorized access, please login again"),
            },
            403 => ApiError::Authorization {
                message: message("Insufficient permissions for this resource"),
            },
            404 => ApiError::NotFound {
                message: message("Requested resource does not exist"),
            },
            429 => ApiError::Server {
                status,
                message: message("Too many requests, please try again later"),
            },
            500 | 502 | 503 | 504 => ApiError::Server {
                status,
                message: message("Service temporarily unavailable, please try again later"),
            },
            _ => ApiError::Unknown {
                status,
                message: message("Unknown error, please try again later"),
            },
        }
    }

    /// Build a network error from a failed connection attempt.
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    /// The HTTP status this error was classified from, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { .. } => None,
            ApiError::Validation { .. } => Some(400),
            ApiError::Authentication { .. } => Some(401),
            ApiError::Authorization { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } | ApiError::Unknown { status, .. } => Some(*status),
        }
    }

    /// Whether this failure means the session token is no longer valid.
    pub fn is_authentication(&self) -> bool {
        matches!(self, ApiError::Authentication { .. })
    }

    /// Whether retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network { .. } | ApiError::Server { .. })
    }

    /// A message suitable for direct display to the user.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Network { message }
            | ApiError::Validation { message }
            | ApiError::Authentication { message }
            | ApiError::Authorization { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. }
            | ApiError::Unknown { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_validation_statuses() {
        assert!(matches!(
            ApiError::from_status(400, None),
            ApiError::Validation { .. }
        ));
        assert!(matches!(
            ApiError::from_status(422, None),
            ApiError::Validation { .. }
        ));
    }

    #[test]
    fn test_classify_authentication() {
        let err = ApiError::from_status(401, None);
        assert!(err.is_authentication());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_classify_authorization_and_not_found() {
        assert!(matches!(
            ApiError::from_status(403, None),
            ApiError::Authorization { .. }
        ));
        assert!(matches!(
            ApiError::from_status(404, None),
            ApiError::NotFound { .. }
        ));
    }

    #[test]
    fn test_classify_server_statuses() {
        for status in [429, 500, 502, 503, 504] {
            let err = ApiError::from_status(status, None);
            assert!(matches!(err, ApiError::Server { .. }), "status {status}");
            assert!(err.is_retryable());
        }
    }

    #[test]
    fn test_classify_unknown_status() {
        let err = ApiError::from_status(418, None);
        assert!(matches!(err, ApiError::Unknown { status: 418, .. }));
    }

    #[test]
    fn test_server_detail_preferred_over_fallback() {
        let err = ApiError::from_status(401, Some("Invalid email or password".to_string()));
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[test]
    fn test_fallback_message_when_no_detail() {
        let err = ApiError::from_status(404, None);
        assert_eq!(err.user_message(), "Requested resource does not exist");
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.status(), None);
        assert!(err.is_retryable());
        assert!(!err.is_authentication());
    }

    #[test]
    fn test_display_includes_status_for_server_errors() {
        let err = ApiError::Server {
            status: 503,
            message: "down".to_string(),
        };
        assert!(err.to_string().contains("503"));
    }
}
