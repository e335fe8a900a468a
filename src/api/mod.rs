//! REST API client for the fintrack server.
//!
//! [`ApiClient`] speaks the server's envelope protocol over the
//! [`HttpClient`](crate::traits::HttpClient) seam: every response body is
//! `{success, data, message, error}`, and every authenticated request
//! carries `Authorization: Bearer <token>` read from the session store at
//! request time.

mod client;
mod resources;

pub use client::{ApiClient, ApiEnvelope, ErrorBody};
