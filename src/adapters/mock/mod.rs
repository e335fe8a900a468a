//! Test doubles for the trait abstractions.

pub mod http;
pub mod notify;
pub mod session;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use notify::{RecordedNotification, RecordingNotifier};
pub use session::InMemorySessionStore;
