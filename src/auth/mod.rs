//! Authentication module for Quill.
//!
//! This module provides:
//! - The session record and its on-disk file
//! - Access-token claims decoding
//! - Session lifecycle (restore, establish, end)

pub mod claims;
pub mod lifecycle;
pub mod session;

pub use claims::{decode_claims, ClaimsError, TokenClaims};
pub use lifecycle::{
    end_session, establish_session, restore_session, AuthState, SessionCheck, SessionError,
    SESSION_EXPIRED_MESSAGE,
};
pub use session::{Session, SessionFile};
