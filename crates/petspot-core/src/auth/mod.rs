//! Authentication module for the client-side session.
//!
//! This module provides:
//! - `token`: Decoding of the claims carried in a session token
//! - `session`: Session validity checks against the stored token
//! - `actions`: Login, registration and logout
//!
//! Validity is decided from the token's own `exp` claim. Tokens that are
//! expired or malformed are removed from storage when detected.

pub mod actions;
pub mod session;
pub mod token;

pub use actions::{login, register_user, try_login, try_register_user};
pub use session::{
    check_session, get_token, is_authenticated, is_authenticated_at, logout, SessionError,
    SessionInfo,
};
pub use token::{decode_claims, Claims, DecodeError};
