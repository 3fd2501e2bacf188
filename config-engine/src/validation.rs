// Configuration validation
use crate::error::{ConfigError, Result};

/// Implemented by configuration structs that need checks beyond deserialization.
pub trait ConfigValidator {
    fn validate(&self) -> Result<()>;
}

pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn require_min_len(field: &str, value: &str, min: usize) -> Result<()> {
    if value.len() < min {
        return Err(ConfigError::ValidationError(format!(
            "{field} must be at least {min} bytes"
        )));
    }
    Ok(())
}

pub fn require_range<T>(field: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(ConfigError::ValidationError(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        assert!(require_non_empty("jwt.issuer", "ercare").is_ok());
        assert!(require_non_empty("jwt.issuer", "  ").is_err());
        assert!(require_min_len("jwt.secret", "short", 32).is_err());
        assert!(require_range("triage.list_limit", 1000, 1, 1000).is_ok());

        let err = require_range("triage.list_limit", 0, 1, 1000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration validation failed: triage.list_limit must be between 1 and 1000, got 0"
        );
    }
}
