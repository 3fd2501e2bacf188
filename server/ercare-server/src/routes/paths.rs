//! Centralized API route path constants
//!
//! Used both by the router and by the `#[utoipa::path(...)]` attributes so the
//! OpenAPI document and runtime routes cannot drift apart.

/// API base path
pub const API_V1: &str = "/api/v1";

/// Health check endpoints
pub mod health {
    pub const HEALTH: &str = "/health";
    pub const VERSION: &str = "/version";
}

/// Full paths under `/api/v1`, as documented
pub mod api_v1 {
    pub const TRIAGE: &str = "/api/v1/triage";
    pub const TRIAGE_CLASSIFY: &str = "/api/v1/triage/classify";
    pub const TRIAGE_RULES: &str = "/api/v1/triage/rules";
    pub const TRIAGE_BY_ID: &str = "/api/v1/triage/{id}";
}

/// Paths relative to `/api/v1`, as routed
pub mod triage {
    pub const TRIAGE: &str = "/triage";
    pub const CLASSIFY: &str = "/triage/classify";
    pub const RULES: &str = "/triage/rules";
    pub const BY_ID: &str = "/triage/:id";
}

/// Documentation endpoints
pub mod docs {
    pub const SWAGGER_UI: &str = "/docs";
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}
