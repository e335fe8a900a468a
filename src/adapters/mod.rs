//! Concrete implementations of trait abstractions.
//!
//! Production adapters implement the traits defined in `crate::traits`,
//! enabling dependency injection and testability.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSessionStore`] - file-based session persistence
//! - [`TerminalNotifier`] - notification delivery to the terminal
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - configurable HTTP responses
//! - [`mock::InMemorySessionStore`] - in-memory session persistence
//! - [`mock::RecordingNotifier`] - records delivered notifications

pub mod file_session;
pub mod mock;
pub mod reqwest_http;
pub mod terminal_notify;

pub use file_session::FileSessionStore;
pub use mock::{InMemorySessionStore, MockHttpClient, RecordingNotifier};
pub use reqwest_http::ReqwestHttpClient;
pub use terminal_notify::TerminalNotifier;
