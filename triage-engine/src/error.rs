use thiserror::Error;

/// Errors raised by the triage classifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    /// A required input could not be interpreted
    #[error("Invalid input for {field}: '{value}'")]
    InvalidInput { field: &'static str, value: String },
}

impl TriageError {
    pub fn invalid_age_group(value: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: "age_group",
            value: value.into(),
        }
    }

    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            TriageError::InvalidInput { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, TriageError>;
