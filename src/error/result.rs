//! Result type alias for Quill operations.

use super::quill_error::QuillError;

/// Type alias for Results using [`QuillError`].
pub type QuillResult<T> = Result<T, QuillError>;
