//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, JSON POST, multipart POST)
//! - [`SessionStore`] - Session persistence

pub mod http;
pub mod session;

pub use http::{FilePart, Headers, HttpClient, HttpError, MultipartForm, Response};
pub use session::{SessionStore, SessionStoreError};
