//! Unified error type for Quill.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::network::NetworkError;
use super::system::SystemError;
use crate::api::ApiError;
use crate::auth::SessionError;
use crate::traits::{HttpError, SessionStoreError};

/// Unified error type for Quill.
#[derive(Debug)]
pub enum QuillError {
    /// Talking to the backend failed.
    Network(NetworkError),

    /// Authentication or session problems.
    Auth(AuthError),

    /// Filesystem and terminal errors.
    System(SystemError),

    /// Invalid settings.
    Configuration { message: String },
}

impl QuillError {
    pub fn configuration(message: impl Into<String>) -> Self {
        QuillError::Configuration {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            QuillError::Network(err) if err.is_server_error() => ErrorCategory::Server,
            QuillError::Network(_) => ErrorCategory::Network,
            QuillError::Auth(AuthError::SessionStore { .. }) => ErrorCategory::System,
            QuillError::Auth(_) => ErrorCategory::Auth,
            QuillError::System(_) => ErrorCategory::System,
            QuillError::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// A message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            QuillError::Network(err) => err.user_message(),
            QuillError::Auth(err) => err.user_message(),
            QuillError::System(err) => err.user_message(),
            QuillError::Configuration { message } => format!("Configuration error: {}", message),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            QuillError::Network(err) => err.error_code(),
            QuillError::Auth(err) => err.error_code(),
            QuillError::System(err) => err.error_code(),
            QuillError::Configuration { .. } => "CONFIG_INVALID",
        }
    }

    /// What the user can do about it, shown under the error by the CLI.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for QuillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuillError::Network(err) => write!(f, "{}", err),
            QuillError::Auth(err) => write!(f, "{}", err),
            QuillError::System(err) => write!(f, "{}", err),
            QuillError::Configuration { message } => write!(f, "Configuration error: {}", message),
        }
    }
}

impl std::error::Error for QuillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuillError::Network(err) => Some(err),
            QuillError::Auth(err) => Some(err),
            QuillError::System(err) => Some(err),
            QuillError::Configuration { .. } => None,
        }
    }
}

impl From<NetworkError> for QuillError {
    fn from(err: NetworkError) -> Self {
        QuillError::Network(err)
    }
}

impl From<AuthError> for QuillError {
    fn from(err: AuthError) -> Self {
        QuillError::Auth(err)
    }
}

impl From<SystemError> for QuillError {
    fn from(err: SystemError) -> Self {
        QuillError::System(err)
    }
}

impl From<HttpError> for QuillError {
    fn from(err: HttpError) -> Self {
        QuillError::Network(err.into())
    }
}

impl From<ApiError> for QuillError {
    fn from(err: ApiError) -> Self {
        QuillError::Network(err.into())
    }
}

impl From<SessionError> for QuillError {
    fn from(err: SessionError) -> Self {
        QuillError::Auth(err.into())
    }
}

impl From<SessionStoreError> for QuillError {
    fn from(err: SessionStoreError) -> Self {
        QuillError::Auth(err.into())
    }
}

impl From<std::io::Error> for QuillError {
    fn from(err: std::io::Error) -> Self {
        QuillError::System(super::system::classify_io_error(err, None, "I/O operation"))
    }
}
