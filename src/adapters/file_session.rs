//! File-based session store adapter.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use crate::auth::session::{Session, SessionFile};
use crate::error::SystemError;
use crate::traits::{SessionStore, SessionStoreError};

/// File-based session store.
///
/// Wraps [`SessionFile`] and implements [`SessionStore`]. The session is
/// stored in `~/.quill/session.json` unless a path is given.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    file: SessionFile,
}

impl FileSessionStore {
    /// Create a store at the default location.
    ///
    /// # Returns
    /// The store, or [`SystemError::NoHomeDirectory`] if the home directory
    /// cannot be determined.
    pub fn new() -> Result<Self, SystemError> {
        SessionFile::new()
            .map(|file| Self { file })
            .ok_or(SystemError::NoHomeDirectory)
    }

    /// Create a store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file: SessionFile::with_path(path),
        }
    }

    /// Create a store at `path` if given, else at the default location.
    pub fn at(path: Option<&Path>) -> Result<Self, SystemError> {
        match path {
            Some(path) => Ok(Self::with_path(path)),
            None => Self::new(),
        }
    }

    /// Get the path to the session file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        self.file.load().map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => SessionStoreError::Serialization(e.to_string()),
            _ => SessionStoreError::LoadFailed(e.to_string()),
        })
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        self.file
            .save(session)
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.file
            .clear()
            .map_err(|e| SessionStoreError::ClearFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_through_trait() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::with_path(temp_dir.path().join("session.json"));

        assert!(store.load().await.unwrap().is_none());

        let session = Session::new("a", "r", 99);
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_save_into_unwritable_location() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let store = FileSessionStore::with_path(blocker.join("session.json"));
        let result = store.save(&Session::new("a", "r", 1)).await;
        assert!(matches!(result, Err(SessionStoreError::SaveFailed(_))));
    }

    #[tokio::test]
    async fn test_incomplete_record_is_a_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::with_path(temp_dir.path().join("session.json"));
        std::fs::write(
            store.path(),
            r#"{"access_token": "stale-access", "refresh_token": "stale-refresh"}"#,
        )
        .unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(SessionStoreError::Serialization(_))));
    }

    #[test]
    fn test_at_prefers_explicit_path() {
        let store = FileSessionStore::at(Some(Path::new("/tmp/quill-test/session.json"))).unwrap();
        assert_eq!(store.path(), Path::new("/tmp/quill-test/session.json"));
    }
}
