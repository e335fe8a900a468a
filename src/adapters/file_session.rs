//! File-based session persistence.
//!
//! Stores the durable session subset as JSON at `~/.fintrack/session.json`.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::session::store::PersistedSession;
use crate::traits::{PersistError, SessionPersist};

/// The session directory name.
const SESSION_DIR: &str = ".fintrack";

/// The session file name.
const SESSION_FILE: &str = "session.json";

/// File-backed implementation of [`SessionPersist`].
#[derive(Debug)]
pub struct FileSessionStore {
    session_path: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at the user's home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            session_path: home.join(SESSION_DIR).join(SESSION_FILE),
        })
    }

    /// Create a store with an explicit file path. Used in tests.
    pub fn with_path(session_path: PathBuf) -> Self {
        Self { session_path }
    }

    /// Path of the backing file.
    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }
}

impl SessionPersist for FileSessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, PersistError> {
        if !self.session_path.exists() {
            return Ok(None);
        }

        let file =
            File::open(&self.session_path).map_err(|e| PersistError::Io(e.to_string()))?;
        let reader = BufReader::new(file);
        let session = serde_json::from_reader(reader)
            .map_err(|e| PersistError::Serialization(e.to_string()))?;
        Ok(Some(session))
    }

    fn save(&self, session: &PersistedSession) -> Result<(), PersistError> {
        if let Some(parent) = self.session_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| PersistError::Io(e.to_string()))?;
            }
        }

        let file =
            File::create(&self.session_path).map_err(|e| PersistError::Io(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)
            .map_err(|e| PersistError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| PersistError::SaveFailed(e.to_string()))
    }

    fn clear(&self) -> Result<(), PersistError> {
        if !self.session_path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.session_path).map_err(|e| PersistError::ClearFailed(e.to_string()))
    }
}
