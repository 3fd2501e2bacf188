//! Authentication context extraction
//!
//! Handlers that take an [`AuthContext`] only run for requests carrying a valid
//! `Authorization: Bearer <JWT>` header.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use error_common::ErrorContext;

use crate::auth::{TokenClaims, TokenError};
use crate::error::ApiError;
use crate::middleware::REQUEST_ID_HEADER;
use crate::server::ErCareServer;

/// Authenticated clinician, extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Token subject
    pub clinician_id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    /// Correlation ID of the current request
    pub request_id: Option<String>,
}

impl AuthContext {
    pub fn from_claims(claims: TokenClaims, request_id: Option<String>) -> Self {
        Self {
            clinician_id: claims.sub,
            name: claims.name,
            role: claims.role,
            request_id,
        }
    }

    /// Context attached to errors raised while serving this request
    pub fn error_context(&self) -> ErrorContext {
        let context = ErrorContext::new().with_user_id(self.clinician_id.clone());
        match &self.request_id {
            Some(request_id) => context.with_request_id(request_id.clone()),
            None => context,
        }
    }

    /// Convert `err` into an API error that carries this request's context
    pub fn reject(&self, err: impl Into<ApiError>) -> ApiError {
        err.into().with_context(self.error_context())
    }
}

/// Extract the bearer token from the Authorization header
fn extract_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::missing_credentials("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::authentication("Invalid Authorization header format. Expected: Bearer <token>")
        })
}

#[async_trait]
impl FromRequestParts<ErCareServer> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        server: &ErCareServer,
    ) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        let with_request = |err: ApiError| match &request_id {
            Some(id) => err.with_context(ErrorContext::new().with_request_id(id.clone())),
            None => err,
        };

        let token = extract_token(parts).map_err(with_request)?;
        let claims = server
            .jwt
            .verify(token)
            .map_err(|e| match e {
                TokenError::Expired => ApiError::token_expired(),
                other => ApiError::authentication(other.to_string()),
            })
            .map_err(with_request)?;

        tracing::debug!(clinician_id = %claims.sub, "Bearer token verified");
        Ok(AuthContext::from_claims(claims, request_id))
    }
}
