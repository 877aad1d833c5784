//! In-memory session store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::Session;
use crate::traits::{SessionStore, SessionStoreError};

/// In-memory session store for testing.
///
/// Holds at most one session and counts writes, so tests can check that a
/// login performs exactly one save and a failed login performs none.
///
/// # Example
///
/// ```ignore
/// use quill::adapters::mock::InMemorySessionStore;
/// use quill::auth::Session;
/// use quill::traits::SessionStore;
///
/// let store = InMemorySessionStore::new();
/// assert!(store.load().await?.is_none());
///
/// store.save(&Session::new("access", "refresh", 1_999_999_999)).await?;
/// assert!(store.load().await?.is_some());
///
/// store.clear().await?;
/// assert!(store.load().await?.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
    saves: Arc<Mutex<usize>>,
    clears: Arc<Mutex<usize>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `session`.
    pub fn with_session(session: Session) -> Self {
        let store = Self::default();
        *store.session.lock().unwrap() = Some(session);
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the stored session synchronously.
    pub fn current(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    /// Number of successful clears.
    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(SessionStoreError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(SessionStoreError::SaveFailed("Mock save failure".to_string()));
        }
        *self.session.lock().unwrap() = Some(session.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(SessionStoreError::ClearFailed(
                "Mock clear failure".to_string(),
            ));
        }
        *self.session.lock().unwrap() = None;
        *self.clears.lock().unwrap() += 1;
        Ok(())
    }
}
