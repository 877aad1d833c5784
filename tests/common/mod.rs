//! Shared fixtures for integration tests.

#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};

use quill::api::BlogApiClient;
use quill::auth::Session;

/// A far-future expiry for sessions that must stay valid.
pub const FAR_FUTURE: i64 = 4_000_000_000;

/// Build an unsigned JWT-shaped token carrying `payload`.
pub fn test_token(payload: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.sig", header, body)
}

/// An access token expiring at `exp`.
pub fn access_token_expiring(exp: i64) -> String {
    test_token(json!({"token_type": "access", "exp": exp, "iat": exp - 300}))
}

/// The backend's answer to a successful login.
pub fn token_response(exp: i64) -> Value {
    json!({"access": access_token_expiring(exp), "refresh": "refresh-token"})
}

/// A post as the backend serializes it.
pub fn post_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("Body of {}", title),
        "image": null,
        "author": 1,
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": "2024-05-01T12:00:00Z"
    })
}

pub fn valid_session() -> Session {
    Session::new("access-token", "refresh-token", FAR_FUTURE)
}

/// A reqwest-backed client pointed at a mock server.
pub fn client_for(uri: &str) -> BlogApiClient {
    BlogApiClient::with_base_url(uri)
}
