use thiserror::Error;

use crate::codes;

/// Simplified error enum for common use cases
#[derive(Error, Debug)]
pub enum ErCareError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Server startup and runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ErCareError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ErCareError::ValidationError(_) => codes::validation::INVALID_INPUT,
            ErCareError::ConfigError(_) => codes::system::CONFIGURATION,
            ErCareError::NetworkError(_) => codes::system::NETWORK,
            ErCareError::ServerError(_) | ErCareError::Other(_) => codes::system::INTERNAL,
        }
    }

    /// Category name used in logs and error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ErCareError::ValidationError(_) => "validation_error",
            ErCareError::ConfigError(_) => "configuration_error",
            ErCareError::ServerError(_) => "server_error",
            ErCareError::NetworkError(_) => "network_error",
            ErCareError::Other(_) => "internal_error",
        }
    }
}

/// Result type alias for ERCare operations
pub type Result<T> = std::result::Result<T, ErCareError>;

/// Log an error with its code and category
pub fn log_error(context: &str, error: &ErCareError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error_type = error.error_type(),
        error = %error,
        "ERCare error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_types() {
        let err = ErCareError::ValidationError("bad".to_string());
        assert_eq!(err.code(), "VALIDATION_1001");
        assert_eq!(err.error_type(), "validation_error");
        assert_eq!(err.to_string(), "Validation error: bad");

        let err = ErCareError::NetworkError("bind refused".to_string());
        assert_eq!(err.code(), "SYSTEM_9003");
        assert_eq!(err.error_type(), "network_error");
    }

    #[test]
    fn test_anyhow_is_transparent() {
        let err: ErCareError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(err.error_type(), "internal_error");
    }
}
