//! Session lifecycle: restore on startup, establish on login, end on logout.
//!
//! All three operations go through an injected [`SessionStore`] so the same
//! logic drives the file-backed store in the binary and the in-memory store
//! in tests.

use crate::api::TokenPair;
use crate::auth::claims::{decode_claims, ClaimsError};
use crate::auth::session::Session;
use crate::traits::{SessionStore, SessionStoreError};

/// Message shown when a stored session has lapsed.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Whether the client currently holds a usable session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn(Session),
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthState::LoggedIn(_))
    }

    /// The access token, when logged in.
    pub fn access_token(&self) -> Option<&str> {
        match self {
            AuthState::LoggedIn(session) => Some(session.access_token.as_str()),
            AuthState::LoggedOut => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::LoggedIn(session) => Some(session),
            AuthState::LoggedOut => None,
        }
    }
}

/// Outcome of checking the stored session at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCheck {
    pub state: AuthState,
    /// A record was found but could not be used, so it was cleared. The UI
    /// shows [`SESSION_EXPIRED_MESSAGE`] once.
    pub expired: bool,
}

/// Errors from establishing or ending a session.
#[derive(Debug, Clone)]
pub enum SessionError {
    /// The access token could not be decoded; nothing was stored
    InvalidToken(ClaimsError),
    /// The store failed
    Store(SessionStoreError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidToken(e) => write!(f, "Invalid access token: {}", e),
            SessionError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ClaimsError> for SessionError {
    fn from(e: ClaimsError) -> Self {
        SessionError::InvalidToken(e)
    }
}

impl From<SessionStoreError> for SessionError {
    fn from(e: SessionStoreError) -> Self {
        SessionError::Store(e)
    }
}

/// Decide the auth state from whatever the store holds at `now` (Unix seconds).
///
/// A record with an empty token, or one at or past its expiry, is cleared and
/// reported as expired. An unreadable or incomplete record is treated the same
/// way. An empty store is simply logged out.
pub async fn restore_session<S>(store: &S, now: i64) -> SessionCheck
where
    S: SessionStore + ?Sized,
{
    let stored = match store.load().await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("Could not read stored session: {}", e);
            clear_quietly(store).await;
            return SessionCheck {
                state: AuthState::LoggedOut,
                expired: true,
            };
        }
    };

    match stored {
        Some(session) if session.is_valid_at(now) => {
            tracing::debug!(
                "Restored session, {}s remaining",
                session.seconds_remaining(now)
            );
            SessionCheck {
                state: AuthState::LoggedIn(session),
                expired: false,
            }
        }
        Some(session) => {
            tracing::info!("Stored session expired at {}", session.expires_at);
            clear_quietly(store).await;
            SessionCheck {
                state: AuthState::LoggedOut,
                expired: true,
            }
        }
        None => SessionCheck {
            state: AuthState::LoggedOut,
            expired: false,
        },
    }
}

/// Persist a freshly issued token pair and return the new session.
///
/// The expiry comes from the access token's `exp` claim. A token that cannot
/// be decoded is rejected before anything is written.
pub async fn establish_session<S>(store: &S, tokens: TokenPair) -> Result<Session, SessionError>
where
    S: SessionStore + ?Sized,
{
    let claims = decode_claims(&tokens.access)?;
    let session = Session::new(tokens.access, tokens.refresh, claims.exp);
    store.save(&session).await?;
    tracing::info!("Session established, expires at {}", session.expires_at);
    Ok(session)
}

/// Remove the stored session.
pub async fn end_session<S>(store: &S) -> Result<(), SessionError>
where
    S: SessionStore + ?Sized,
{
    store.clear().await?;
    tracing::info!("Session cleared");
    Ok(())
}

async fn clear_quietly<S>(store: &S)
where
    S: SessionStore + ?Sized,
{
    if let Err(e) = store.clear().await {
        tracing::warn!("Failed to clear stale session: {}", e);
    }
}
