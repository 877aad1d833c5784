//! Access-token claims decoding.
//!
//! Reads the payload segment of a JWT (`header.payload.signature`) without
//! verifying the signature: the client only needs the expiry to decide how
//! long the session lasts. The server remains the authority on validity.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use thiserror::Error;

/// Error type for claims decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// The token does not have three dot-separated segments
    #[error("Malformed token: expected 3 segments, found {0}")]
    Malformed(usize),

    /// The payload segment is not valid base64url
    #[error("Token payload is not valid base64url: {0}")]
    InvalidEncoding(String),

    /// The decoded payload is not a JSON object
    #[error("Token payload is not valid JSON: {0}")]
    InvalidJson(String),

    /// The payload has no numeric `exp` claim
    #[error("Token payload has no exp claim")]
    MissingExpiry,
}

/// Claims the client reads from an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Expiration time (Unix seconds).
    pub exp: i64,
    /// Issued-at time (Unix seconds), if present.
    pub iat: Option<i64>,
    /// Token type, e.g. `access`, if present.
    pub token_type: Option<String>,
}

#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
}

/// Decode the claims carried in an access token's payload segment.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(ClaimsError::Malformed(segments.len()));
    }

    // Some encoders leave padding on; the unpadded engine rejects it.
    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| ClaimsError::InvalidEncoding(e.to_string()))?;

    let raw: RawClaims =
        serde_json::from_slice(&payload).map_err(|e| ClaimsError::InvalidJson(e.to_string()))?;

    let exp = raw.exp.ok_or(ClaimsError::MissingExpiry)?;

    Ok(TokenClaims {
        exp,
        iat: raw.iat,
        token_type: raw.token_type,
    })
}

/// Build an unsigned token carrying `payload`. Test helper for code that only
/// reads claims.
#[cfg(test)]
pub(crate) fn encode_test_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_token() {
        let token = encode_test_token(&json!({
            "token_type": "access",
            "exp": 1999999999,
            "iat": 1999990000,
            "jti": "abc",
            "user_id": 3
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 1_999_999_999);
        assert_eq!(claims.iat, Some(1_999_990_000));
        assert_eq!(claims.token_type.as_deref(), Some("access"));
    }

    #[test]
    fn test_decode_only_exp() {
        let token = encode_test_token(&json!({"exp": 42}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 42);
        assert_eq!(claims.iat, None);
        assert_eq!(claims.token_type, None);
    }

    #[test]
    fn test_decode_padded_payload() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let body = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":7}"#);
        let token = format!("{}.{}.sig", header, body);
        assert_eq!(decode_claims(&token).unwrap().exp, 7);
    }

    #[test]
    fn test_decode_wrong_segment_count() {
        assert_eq!(decode_claims("not-a-jwt"), Err(ClaimsError::Malformed(1)));
        assert_eq!(decode_claims("a.b"), Err(ClaimsError::Malformed(2)));
        assert_eq!(decode_claims("a.b.c.d"), Err(ClaimsError::Malformed(4)));
    }

    #[test]
    fn test_decode_invalid_base64() {
        let result = decode_claims("header.!!!not-base64!!!.sig");
        assert!(matches!(result, Err(ClaimsError::InvalidEncoding(_))));
    }

    #[test]
    fn test_decode_non_json_payload() {
        let body = URL_SAFE_NO_PAD.encode("plain text");
        let result = decode_claims(&format!("h.{}.s", body));
        assert!(matches!(result, Err(ClaimsError::InvalidJson(_))));
    }

    #[test]
    fn test_decode_missing_exp() {
        let token = encode_test_token(&json!({"user_id": 1}));
        assert_eq!(decode_claims(&token), Err(ClaimsError::MissingExpiry));
    }

    #[test]
    fn test_claims_error_display() {
        assert_eq!(
            ClaimsError::Malformed(1).to_string(),
            "Malformed token: expected 3 segments, found 1"
        );
        assert_eq!(
            ClaimsError::MissingExpiry.to_string(),
            "Token payload has no exp claim"
        );
    }
}
