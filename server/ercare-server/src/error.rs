use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::{codes, ErrorContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::error;
use triage_engine::TriageError;
use utoipa::ToSchema;
use uuid::Uuid;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type
    pub error_type: String,
    /// Stable error code, e.g. `VALIDATION_1004`
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-specific validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<HashMap<String, Vec<String>>>,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Request ID for correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Suggested actions for resolving the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Standard API success response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: &'static str,
        field_errors: Option<HashMap<String, Vec<String>>>,
    },

    #[error("Authentication error: {message}")]
    Authentication { message: String, code: &'static str },

    #[error("{resource_type} not found")]
    NotFound { resource_type: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    /// Any other error plus the request it happened in
    #[error("{source}")]
    WithContext {
        source: Box<ApiError>,
        context: ErrorContext,
    },
}

impl ApiError {
    /// Create a validation error for a single field
    pub fn validation_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let field_errors = HashMap::from([(field.to_string(), vec![message.clone()])]);
        Self::Validation {
            message,
            code: codes::validation::INVALID_INPUT,
            field_errors: Some(field_errors),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: codes::authentication::INVALID_CREDENTIALS,
        }
    }

    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: codes::authentication::MISSING_CREDENTIALS,
        }
    }

    pub fn token_expired() -> Self {
        Self::Authentication {
            message: "Token has expired".to_string(),
            code: codes::authentication::TOKEN_EXPIRED,
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Attach request context; it ends up in the response body and the error log
    pub fn with_context(self, context: ErrorContext) -> Self {
        match self {
            ApiError::WithContext { source, .. } => ApiError::WithContext { source, context },
            other => ApiError::WithContext {
                source: Box::new(other),
                context,
            },
        }
    }

    fn inner(&self) -> &ApiError {
        match self {
            ApiError::WithContext { source, .. } => source.inner(),
            other => other,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            ApiError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.inner() {
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } | ApiError::WithContext { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self.inner() {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Authentication { .. } => "authentication_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::BadRequest { .. } => "bad_request",
            ApiError::Internal { .. } | ApiError::WithContext { .. } => "internal_error",
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        match self.inner() {
            ApiError::Validation { code, .. } | ApiError::Authentication { code, .. } => *code,
            ApiError::NotFound { .. } => codes::resource::NOT_FOUND,
            ApiError::BadRequest { .. } => codes::validation::INVALID_FORMAT,
            ApiError::Internal { .. } | ApiError::WithContext { .. } => codes::system::INTERNAL,
        }
    }

    /// Get suggested actions for resolving the error
    pub fn suggestions(&self) -> Option<Vec<String>> {
        match self.inner() {
            ApiError::Validation { code, .. } if *code == codes::validation::INVALID_AGE_GROUP => Some(vec![
                "Use \"adult\" or \"pediatric\" for age_group".to_string(),
            ]),
            ApiError::Validation { .. } => Some(vec![
                "Check the request payload for invalid fields".to_string(),
                "Verify data types and formats match the API specification".to_string(),
            ]),
            ApiError::Authentication { .. } => Some(vec![
                "Verify your authentication credentials".to_string(),
                "Check if your token has expired".to_string(),
            ]),
            ApiError::NotFound { .. } => Some(vec![
                "Verify the resource ID is correct".to_string(),
            ]),
            ApiError::BadRequest { .. } => Some(vec![
                "Send a JSON body with Content-Type: application/json".to_string(),
            ]),
            _ => None,
        }
    }

    fn field_errors(&self) -> Option<HashMap<String, Vec<String>>> {
        match self.inner() {
            ApiError::Validation { field_errors, .. } => field_errors.clone(),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();
        let request_id = self.context().and_then(|c| c.request_id.clone());

        // Internal details stay in the log
        let message = match self.inner() {
            ApiError::Internal { .. } => "An internal error occurred".to_string(),
            inner => inner.to_string(),
        };

        error!(
            error_id = %error_id,
            error_type = %self.error_type(),
            error_code = %self.code(),
            status_code = %status_code.as_u16(),
            request_id = ?request_id,
            error = %self,
            "API error occurred"
        );

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            code: self.code().to_string(),
            message,
            field_errors: self.field_errors(),
            timestamp: chrono::Utc::now(),
            request_id,
            suggestions: self.suggestions(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        let field = err.field();
        let code = match field {
            "age_group" => codes::validation::INVALID_AGE_GROUP,
            _ => codes::validation::INVALID_INPUT,
        };
        let message = err.to_string();
        ApiError::Validation {
            field_errors: Some(HashMap::from([(field.to_string(), vec![message.clone()])])),
            message,
            code,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Convert anyhow errors to API errors
impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::internal(error.to_string())
    }
}

/// Helper function to create successful API responses
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse { success: true, data }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
