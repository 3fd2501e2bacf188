//! Bearer token verification for the triage API

pub mod tokens;

pub use tokens::{JwtService, TokenClaims, TokenError};
