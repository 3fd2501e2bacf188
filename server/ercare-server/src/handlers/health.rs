use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::server::ErCareServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Number of rules in the active triage protocol
    pub rule_count: usize,
    /// Assessments held in memory
    pub stored_assessments: usize,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
}

/// Health check handler
#[utoipa::path(
    get,
    path = crate::routes::paths::health::HEALTH,
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(server): State<ErCareServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: server.uptime_seconds(),
        rule_count: server.classifier.rules().len(),
        stored_assessments: server.repository.len(),
    })
}

/// Version information handler
#[utoipa::path(
    get,
    path = crate::routes::paths::health::VERSION,
    responses(
        (status = 200, description = "Build information", body = VersionResponse)
    ),
    tag = "health"
)]
pub async fn version_info() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
