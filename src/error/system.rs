//! System-related error types.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// System-specific error variants.
#[derive(Debug, Clone)]
pub enum SystemError {
    /// File not found.
    FileNotFound { path: PathBuf },

    /// Permission denied for a file operation.
    PermissionDenied { path: PathBuf, operation: String },

    /// Generic I/O error.
    IoError {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// Could not determine the home directory.
    NoHomeDirectory,
}

impl SystemError {
    pub fn user_message(&self) -> String {
        match self {
            SystemError::FileNotFound { path } => {
                format!("File not found: '{}'", path.display())
            }
            SystemError::PermissionDenied { path, operation } => {
                format!("Permission denied: cannot {} '{}'", operation, path.display())
            }
            SystemError::IoError {
                operation, path, ..
            } => match path {
                Some(p) => format!("Failed to {} '{}'", operation, p.display()),
                None => format!("Failed to {}", operation),
            },
            SystemError::NoHomeDirectory => {
                "Could not determine your home directory. Set QUILL_SESSION_PATH instead."
                    .to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::FileNotFound { .. } => "SYS_FILE_NOT_FOUND",
            SystemError::PermissionDenied { .. } => "SYS_PERMISSION_DENIED",
            SystemError::IoError { .. } => "SYS_IO_ERROR",
            SystemError::NoHomeDirectory => "SYS_NO_HOME",
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            SystemError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied ({}): {}", operation, path.display())
            }
            SystemError::IoError {
                operation,
                path,
                message,
            } => match path {
                Some(p) => write!(f, "I/O error during {} on {}: {}", operation, p.display(), message),
                None => write!(f, "I/O error during {}: {}", operation, message),
            },
            SystemError::NoHomeDirectory => write!(f, "Could not determine home directory"),
        }
    }
}

impl std::error::Error for SystemError {}

/// Classify an I/O error into a [`SystemError`].
pub fn classify_io_error(err: io::Error, path: Option<&Path>, operation: &str) -> SystemError {
    match (err.kind(), path) {
        (io::ErrorKind::NotFound, Some(path)) => SystemError::FileNotFound {
            path: path.to_path_buf(),
        },
        (io::ErrorKind::PermissionDenied, Some(path)) => SystemError::PermissionDenied {
            path: path.to_path_buf(),
            operation: operation.to_string(),
        },
        _ => SystemError::IoError {
            operation: operation.to_string(),
            path: path.map(Path::to_path_buf),
            message: err.to_string(),
        },
    }
}
