//! Error handling for the fintrack client.
//!
//! The central type is [`ApiError`], which classifies every failed API
//! interaction by HTTP status into the categories the UI layers care about:
//!
//! | Variant | Status | Surfaced to user |
//! |---------|--------|------------------|
//! | Network | no response | toast, retry hint |
//! | Validation | 400/422 | form-level message |
//! | Authentication | 401 | session-loss handling |
//! | Authorization | 403 | toast |
//! | NotFound | 404 | toast |
//! | Server | 429/5xx | toast, retry hint |
//! | Unknown | anything else | generic toast |

mod api;

pub use api::ApiError;
