//! Durable storage of the current session record.
//!
//! The store holds at most one value: the serialized [`User`] of whoever is
//! signed in. Absence means logged out.
//!
//! [`User`]: crate::models::User

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::models::session::keys;

/// Synchronous key-value slot for the session record.
pub trait SessionStore: Send + Sync {
    /// Read the stored record, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the backing storage cannot be read,
    /// or `RepositoryError::DataCorruption` if it holds something that is
    /// not text.
    fn load(&self) -> Result<Option<String>, RepositoryError>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the record cannot be written.
    fn save(&self, record: &str) -> Result<(), RepositoryError>;

    /// Remove the stored record. Removing an absent record succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the record exists but cannot be
    /// removed.
    fn clear(&self) -> Result<(), RepositoryError>;
}

/// Stores the session as `<dir>/pharma_user.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("{}.json", keys::CURRENT_USER)),
        }
    }

    /// Path of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, RepositoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| RepositoryError::DataCorruption(format!("session record: {e}")))
    }

    fn save(&self, record: &str) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write the whole record aside, then swap it in.
        let temp = self.temp_path();
        let written = fs::File::create(&temp)
            .and_then(|mut file| {
                file.write_all(record.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&temp, &self.path));

        if let Err(e) = written {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), "Saved session record");
        Ok(())
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Cleared session record");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `record`.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
        }
    }

    /// Current contents, bypassing the trait.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.snapshot())
    }

    fn save(&self, record: &str) -> Result<(), RepositoryError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_path_uses_session_key() {
        let store = FileSessionStore::new("/tmp/portal");
        assert_eq!(store.path(), Path::new("/tmp/portal/pharma_user.json"));
    }

    #[test]
    fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested"));

        assert_eq!(store.load().unwrap(), None);

        store.save(r#"{"id":"1"}"#).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(r#"{"id":"1"}"#));
        assert!(!store.temp_path().exists());

        store.save(r#"{"id":"2"}"#).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(r#"{"id":"2"}"#));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_binary_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        fs::write(store.path(), [0xff, 0xfe, b'{']).unwrap();

        assert!(matches!(
            store.load(),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        // A non-empty directory in the record's place makes the rename fail.
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("keep"), "x").unwrap();

        assert!(matches!(store.save("{}"), Err(RepositoryError::Io(_))));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::with_record("stale");
        assert_eq!(store.load().unwrap().as_deref(), Some("stale"));

        store.save("fresh").unwrap();
        assert_eq!(store.snapshot().as_deref(), Some("fresh"));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
