//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemorySessionStore`] - In-memory session storage

pub mod http;
pub mod session;

pub use http::{MockHttpClient, MockResponse, RecordedBody, RecordedRequest};
pub use session::InMemorySessionStore;
