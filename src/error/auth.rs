//! Authentication-related error types.

use std::fmt;

use crate::auth::{ClaimsError, SessionError};
use crate::traits::SessionStoreError;

/// Authentication-specific error variants.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// The backend refused the credentials.
    LoginRejected { message: String },

    /// The access token could not be decoded.
    InvalidToken { message: String },

    /// The session store failed.
    SessionStore { message: String },
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::LoginRejected { message } => format!("Login failed: {}", message),
            AuthError::InvalidToken { .. } => {
                "The backend issued a token this client cannot read.".to_string()
            }
            AuthError::SessionStore { message } => {
                format!("Could not access the saved session: {}", message)
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::LoginRejected { .. } => "AUTH_LOGIN_REJECTED",
            AuthError::InvalidToken { .. } => "AUTH_INVALID_TOKEN",
            AuthError::SessionStore { .. } => "AUTH_SESSION_STORE",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::LoginRejected { message } => write!(f, "Login rejected: {}", message),
            AuthError::InvalidToken { message } => write!(f, "Invalid token: {}", message),
            AuthError::SessionStore { message } => write!(f, "Session store error: {}", message),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<ClaimsError> for AuthError {
    fn from(err: ClaimsError) -> Self {
        AuthError::InvalidToken {
            message: err.to_string(),
        }
    }
}

impl From<SessionStoreError> for AuthError {
    fn from(err: SessionStoreError) -> Self {
        AuthError::SessionStore {
            message: err.to_string(),
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidToken(e) => e.into(),
            SessionError::Store(e) => e.into(),
        }
    }
}
