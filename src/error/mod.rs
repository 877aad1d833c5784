//! Error handling for Quill.
//!
//! Leaf modules (API, session store, claims) keep their own small error
//! types. CLI commands and the binary convert them into [`QuillError`], which
//! carries a category, a stable error code and a user-facing message. Nothing
//! is retried: the category only picks the hint shown to the user.
//!
//! | Category | Description |
//! |----------|-------------|
//! | Network | Connection, timeout, unreadable response |
//! | Auth | Rejected credentials, unreadable token |
//! | Server | Backend 5xx |
//! | System | Filesystem, session store, home directory |
//! | Configuration | Bad settings |

mod auth;
mod category;
mod network;
mod quill_error;
mod result;
mod system;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use network::NetworkError;
pub use quill_error::QuillError;
pub use result::QuillResult;
pub use system::{classify_io_error, SystemError};
