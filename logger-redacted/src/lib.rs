//! Structured logging with automatic PII redaction for ERCare Engine
//!
//! Free text such as injury mechanisms and "other symptoms" can carry names,
//! phone numbers or hospital identifiers. Anything logged through the
//! `redacted_*` macros passes through a [`PiiRedactor`] first.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: user@example.com → u***@e***
//! - **Phone Numbers**: (555) 123-4567 → (***) ***-****
//! - **SSN**: 123-45-6789 → ***-**-****
//! - **IP Addresses**: 192.168.1.1 → 192.***.***.1
//! - **Hospital Identifiers**: UHID 20231187, MRN-A1234 → ID[REDACTED]
//!
//! With `hash_for_correlation` (the default) values are replaced by a short
//! SHA-256 prefix instead so the same value can be followed across log lines.
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{LoggerConfig, LogFormat};
//!
//! let config = LoggerConfig {
//!     format: LogFormat::Json,
//!     ..LoggerConfig::default()
//! };
//! logger_redacted::init(&config).ok();
//!
//! logger_redacted::redacted_info!("Mechanism: fall, contact {}", "john.doe@example.com");
//! ```

pub mod config;
pub mod macros;
pub mod redactor;

pub use config::*;
pub use redactor::*;

#[doc(hidden)]
pub use tracing;

use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

lazy_static! {
    static ref GLOBAL_REDACTOR: PiiRedactor = PiiRedactor::default();
}

static REDACTION_ENABLED: AtomicBool = AtomicBool::new(true);

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install global subscriber: {0}")]
    InitFailed(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level` when set.
pub fn init(config: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| LoggerError::InvalidFilter {
            filter: config.log_level.clone(),
            reason: e.to_string(),
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init(),
    };
    installed.map_err(|e| LoggerError::InitFailed(e.to_string()))?;

    set_redaction_enabled(config.redaction_enabled);
    Ok(())
}

pub fn set_redaction_enabled(enabled: bool) {
    REDACTION_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn redaction_enabled() -> bool {
    REDACTION_ENABLED.load(Ordering::Relaxed)
}

/// Redact `text` with the default redactor, unless redaction was switched off.
pub fn redact(text: &str) -> String {
    if redaction_enabled() {
        GLOBAL_REDACTOR.redact(text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_uses_global_redactor() {
        let redacted = redact("caller 555-123-4567");
        assert!(redacted.starts_with("caller PHONE["));
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        // Only reached when RUST_LOG is unset, which is the normal test environment
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggerConfig {
            log_level: "ercare=loudest".to_string(),
            ..LoggerConfig::default()
        };
        assert!(matches!(init(&config), Err(LoggerError::InvalidFilter { .. })));
    }

    #[test]
    fn test_macros_expand() {
        redacted_info!("triage created for {}", "MRN-A12345");
        redacted_warn!("rejected age group {:?}", "senior");
    }
}
