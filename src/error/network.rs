//! Network-related error types.

use std::fmt;

use crate::api::ApiError;
use crate::traits::HttpError;

/// Errors talking to the blog backend.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Could not connect.
    ConnectionFailed { message: String },

    /// The request took too long.
    Timeout { message: String },

    /// The body could not be decoded.
    InvalidResponse { status: u16, message: String },

    /// Anything else the transport reported.
    Other { message: String },
}

impl NetworkError {
    pub fn is_server_error(&self) -> bool {
        matches!(self, NetworkError::InvalidResponse { status, .. } if *status >= 500)
    }

    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Could not reach the blog backend.".to_string()
            }
            NetworkError::Timeout { .. } => "The blog backend did not answer in time.".to_string(),
            NetworkError::InvalidResponse { status, .. } => {
                format!("The backend sent a response that could not be read (status {}).", status)
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "NET_CONNECTION_FAILED",
            NetworkError::Timeout { .. } => "NET_TIMEOUT",
            NetworkError::InvalidResponse { .. } => "NET_INVALID_RESPONSE",
            NetworkError::Other { .. } => "NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { message } => {
                write!(f, "Connection failed: {}", message)
            }
            NetworkError::Timeout { message } => write!(f, "Request timed out: {}", message),
            NetworkError::InvalidResponse { status, message } => {
                write!(f, "Invalid response (HTTP {}): {}", status, message)
            }
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<HttpError> for NetworkError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed { message },
            HttpError::Timeout(message) => NetworkError::Timeout { message },
            HttpError::Io(message) | HttpError::InvalidUrl(message) | HttpError::Other(message) => {
                NetworkError::Other { message }
            }
        }
    }
}

impl From<ApiError> for NetworkError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(e) => e.into(),
            ApiError::Decode { status, message } => {
                NetworkError::InvalidResponse { status, message }
            }
        }
    }
}
