//! Client configuration.
//!
//! Settings come from, in order of precedence: command-line flags, the
//! `QUILL_*` environment variables, and built-in defaults.
//!
//! # Example
//!
//! ```ignore
//! use quill::config::ClientConfig;
//!
//! let config = ClientConfig::from_env().with_api_url("http://blog.internal:8000");
//! ```

use std::path::PathBuf;

use crate::api::DEFAULT_API_URL;
use crate::auth::session::SESSION_DIR;

/// Backend base URL.
pub const API_URL_ENV: &str = "QUILL_API_URL";
/// Session file location.
pub const SESSION_PATH_ENV: &str = "QUILL_SESSION_PATH";
/// Log filter directive, e.g. `quill=debug`.
pub const LOG_ENV: &str = "QUILL_LOG";

/// Log filter used when `QUILL_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "quill=info";

const LOG_FILE: &str = "quill.log";

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL
    pub api_url: String,
    /// Session file override; `None` uses `~/.quill/session.json`
    pub session_path: Option<PathBuf>,
    /// Log file override; `None` uses `~/.quill/quill.log`
    pub log_path: Option<PathBuf>,
    /// `tracing` filter directive
    pub log_filter: String,
    /// Whether `QUILL_LOG` was set explicitly
    pub log_requested: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: None,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_requested: false,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the session file path.
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Set the log file path.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Set the log filter directive.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self.log_requested = true;
        self
    }

    /// Build config from the `QUILL_*` environment variables.
    ///
    /// Empty values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty_var(API_URL_ENV) {
            config = config.with_api_url(url);
        }
        if let Some(path) = non_empty_var(SESSION_PATH_ENV) {
            config = config.with_session_path(path);
        }
        if let Some(filter) = non_empty_var(LOG_ENV) {
            config = config.with_log_filter(filter);
        }

        config
    }

    /// Apply a command-line `--api-url` override, if any.
    pub fn with_api_url_override(self, url: Option<&str>) -> Self {
        match url {
            Some(url) => self.with_api_url(url),
            None => self,
        }
    }

    /// Check that the API URL is usable.
    pub fn validate(&self) -> Result<(), String> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err("API URL is empty".to_string());
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!(
                "API URL must start with http:// or https://, got '{}'",
                url
            ));
        }
        Ok(())
    }

    /// Path of the log file.
    pub fn resolved_log_path(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| quill_dir().map(|dir| dir.join(LOG_FILE)))
    }
}

/// The `~/.quill` directory.
pub fn quill_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SESSION_DIR))
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
