//! Request validation utilities for consistent validation across handlers
//!
//! This module provides a `RequestValidation` trait and helper macros to
//! centralize validation logic and ensure consistent error messages.

use crate::error::ApiError;

/// Trait for validating request payloads
///
/// Implement this trait for request types that carry free text or lists so
/// oversized input is rejected before it reaches the classifier or the log.
pub trait RequestValidation {
    /// Returns `Ok(())` if validation passes, or `Err(ApiError)` with
    /// a validation error message if validation fails.
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```rust,ignore
/// validate_field!("mechanism", !self.mechanism.is_empty(), "Mechanism is required");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation_field($field, $message));
        }
    };
}

/// Macro for validating maximum string length in characters
///
/// # Usage
///
/// ```rust,ignore
/// validate_max_chars!("mechanism", self.mechanism, 1000);
/// ```
#[macro_export]
macro_rules! validate_max_chars {
    ($field:expr, $value:expr, $max:expr) => {
        $crate::validate_field!(
            $field,
            $value.chars().count() <= $max,
            format!("{} must be at most {} characters", $field, $max)
        );
    };
}

/// Macro for validating maximum collection size
///
/// # Usage
///
/// ```rust,ignore
/// validate_max_items!("symptoms.other_symptoms", self.symptoms.other_symptoms, 50);
/// ```
#[macro_export]
macro_rules! validate_max_items {
    ($field:expr, $value:expr, $max:expr) => {
        $crate::validate_field!(
            $field,
            $value.len() <= $max,
            format!("{} must contain at most {} entries", $field, $max)
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRequest {
        note: String,
        tags: Vec<String>,
    }

    impl RequestValidation for TestRequest {
        fn validate(&self) -> Result<(), ApiError> {
            validate_max_chars!("note", self.note, 5);
            validate_max_items!("tags", self.tags, 2);
            for tag in &self.tags {
                validate_max_chars!("tags", tag, 3);
            }
            Ok(())
        }
    }

    fn request(note: &str, tags: &[&str]) -> TestRequest {
        TestRequest {
            note: note.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("fall", &["a", "b"]).validate().is_ok());
        // Limits count characters, not bytes
        assert!(request("ñññññ", &[]).validate().is_ok());
    }

    #[test]
    fn test_too_long() {
        let err = request("fell off", &[]).validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: note must be at most 5 characters");
        assert_eq!(err.code(), "VALIDATION_1001");
    }

    #[test]
    fn test_too_many_items() {
        assert!(request("", &["a", "b", "c"]).validate().is_err());
        assert!(request("", &["long"]).validate().is_err());
    }
}
