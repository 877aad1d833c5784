//! Session record and its on-disk file.
//!
//! The session lives in `~/.quill/session.json` unless another path is
//! configured. The file is replaced in a single rename so a reader sees either
//! the old record or the new one.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The session directory name.
pub const SESSION_DIR: &str = ".quill";

/// The session file name.
pub const SESSION_FILE: &str = "session.json";

/// Authentication state held by the client after a successful login.
///
/// All three fields are required: a stored record missing any of them fails
/// to load and is cleared on the next startup check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Bearer token sent with authenticated requests.
    pub access_token: String,
    /// Refresh token issued alongside the access token. Stored, never used
    /// for renewal.
    pub refresh_token: String,
    /// Access token expiration as a Unix timestamp (seconds since epoch).
    pub expires_at: i64,
}

impl Session {
    /// Create a session from its parts.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
        }
    }

    /// Check if the session has a usable access token.
    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Check if the session is expired at `now` (Unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// Check if the session is valid at `now`: it has a token and `now` is
    /// strictly before the expiry.
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.has_token() && !self.is_expired_at(now)
    }

    /// Check if the session is valid right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(chrono::Utc::now().timestamp())
    }

    /// Seconds until expiry at `now`, clamped to zero.
    pub fn seconds_remaining(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    /// Path to the session file.
    path: PathBuf,
}

impl SessionFile {
    /// Create a `SessionFile` at the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::with_path(home.join(SESSION_DIR).join(SESSION_FILE)))
    }

    /// Create a `SessionFile` at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session from disk.
    ///
    /// Returns `Ok(None)` if the file doesn't exist. A file that exists but
    /// doesn't hold a complete session record is an `InvalidData` error.
    pub fn load(&self) -> io::Result<Option<Session>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Replace the session file with `session`.
    ///
    /// Creates the parent directory if it doesn't exist. The record is written
    /// to a sibling temp file first and renamed into place.
    pub fn save(&self, session: &Session) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, session)?;
            writer.flush()?;
        }

        fs::rename(&tmp_path, &self.path)
    }

    /// Remove the session file.
    ///
    /// Succeeds if the file didn't exist.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
