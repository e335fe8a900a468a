//! Persisted session storage trait.
//!
//! Only the durable subset of the session record crosses this boundary:
//! token, user profile, and the authenticated flag. Loading/error/logout
//! flags are ephemeral and never persisted.

use crate::session::store::PersistedSession;

/// Session persistence errors.
#[derive(Debug, Clone)]
pub enum PersistError {
    /// Failed to load the persisted session
    LoadFailed(String),
    /// Failed to save the persisted session
    SaveFailed(String),
    /// Failed to clear the persisted session
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::LoadFailed(msg) => write!(f, "Failed to load session: {}", msg),
            PersistError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            PersistError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            PersistError::Io(msg) => write!(f, "IO error: {}", msg),
            PersistError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for PersistError {}

/// Trait for storing the durable part of a session across restarts.
///
/// Implementations include the production file-backed store and an
/// in-memory store for testing.
pub trait SessionPersist: Send + Sync {
    /// Load the persisted session.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    fn load(&self) -> Result<Option<PersistedSession>, PersistError>;

    /// Save the persisted session, replacing any previous record.
    fn save(&self, session: &PersistedSession) -> Result<(), PersistError>;

    /// Remove the persisted session.
    fn clear(&self) -> Result<(), PersistError>;
}
