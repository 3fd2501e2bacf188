//! Common error handling utilities for ERCare Engine
//!
//! This module provides the error types, error codes and error context shared
//! by the ERCare Engine crates, so that the HTTP layer can report failures
//! from any crate in one consistent shape.
//!
//! # Error Categories
//!
//! - **Validation**: Malformed or unrecognized input (e.g. an unknown age group)
//! - **Authentication**: Missing, invalid or expired credentials
//! - **NotFound**: Requested record does not exist
//! - **Configuration**: Invalid or unreadable settings
//! - **Server / Network**: Listener and transport failures
//! - **Internal**: Anything else
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ErCareError, ErrorContext};
//!
//! fn parse_limit(raw: &str) -> error_common::Result<usize> {
//!     raw.parse()
//!         .map_err(|_| ErCareError::ValidationError(format!("limit must be a number, got '{raw}'")))
//! }
//!
//! let err = parse_limit("ten").unwrap_err();
//! assert_eq!(err.code(), codes::validation::INVALID_INPUT);
//!
//! let context = ErrorContext::new().with_request_id("req-42".to_string());
//! assert_eq!(context.request_id.as_deref(), Some("req-42"));
//! ```

pub mod codes;
pub mod context;
pub mod types;

pub use context::*;
pub use types::*;
