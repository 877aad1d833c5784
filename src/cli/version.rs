//! Version command for the quill CLI.

/// The current version of quill, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The line printed by `quill --version`.
pub fn version_line() -> String {
    format!("quill {}", VERSION)
}
