//! Fintrack client - session management and REST access for the fintrack
//! personal finance API.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod traits;
