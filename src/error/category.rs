//! Error category classification.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Backend unreachable, timed out, or returned garbage.
    Network,

    /// Rejected credentials or a token the client cannot read.
    Auth,

    /// Backend answered with a 5xx status.
    Server,

    /// Filesystem or OS errors.
    System,

    /// Bad settings such as an unparseable API URL.
    Configuration,
}

impl ErrorCategory {
    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested next step for the user.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the blog backend is running and reachable",
            ErrorCategory::Auth => "Run `quill login <username>` and try again",
            ErrorCategory::Server => "The backend reported an error; check its logs",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check QUILL_API_URL and the --api-url flag",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
