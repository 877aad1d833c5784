//! Session store trait abstraction.
//!
//! The client keeps exactly one persisted record: the current [`Session`].
//! It is always written and removed as a whole, so readers never observe a
//! half-written token pair.

use async_trait::async_trait;

use crate::auth::Session;

/// Session store operation errors.
#[derive(Debug, Clone)]
pub enum SessionStoreError {
    /// Failed to load the session
    LoadFailed(String),
    /// Failed to save the session
    SaveFailed(String),
    /// Failed to clear the session
    ClearFailed(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreError::LoadFailed(msg) => write!(f, "Failed to load session: {}", msg),
            SessionStoreError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            SessionStoreError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            SessionStoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Trait for session persistence.
///
/// Implementations include the file-based store used by the binary and an
/// in-memory store for tests.
///
/// # Example
///
/// ```ignore
/// use quill::traits::SessionStore;
///
/// async fn is_logged_in<S: SessionStore>(store: &S, now: i64) -> bool {
///     matches!(store.load().await, Ok(Some(session)) if session.is_valid_at(now))
/// }
/// ```
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session.
    ///
    /// # Returns
    /// - `Ok(Some(session))` if a complete session record exists
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if the store could not be read or holds an incomplete
    ///   record
    async fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Replace the stored session with `session`.
    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the stored session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
