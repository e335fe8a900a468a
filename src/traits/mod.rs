//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP operations (GET, POST, PUT, DELETE)
//! - [`SessionPersist`] - persisted session storage and retrieval
//! - [`Notifier`] - sink for user-facing notifications

pub mod http;
pub mod notify;
pub mod session;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use notify::{Notifier, NotificationLevel};
pub use session::{PersistError, SessionPersist};
