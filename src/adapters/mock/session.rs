//! In-memory session persistence for testing.

use std::sync::Mutex;

use crate::session::store::PersistedSession;
use crate::traits::{PersistError, SessionPersist};

/// In-memory implementation of [`SessionPersist`].
///
/// Starts empty unless seeded through [`with_session`](Self::with_session).
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Mutex<Option<PersistedSession>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a session.
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionPersist for InMemorySessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, PersistError> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), PersistError> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistError> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let store = InMemorySessionStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = InMemorySessionStore::new();
        let session = PersistedSession {
            token: Some("tok".to_string()),
            user: None,
            is_authenticated: true,
        };

        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));
    }

    #[test]
    fn test_clear() {
        let store = InMemorySessionStore::with_session(PersistedSession {
            token: Some("tok".to_string()),
            user: None,
            is_authenticated: true,
        });

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
