pub mod paths;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{health, triage},
    openapi,
    server::ErCareServer,
};

/// Create health check routes
pub fn health_routes() -> Router<ErCareServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
}

/// Create triage routes
pub fn triage_routes() -> Router<ErCareServer> {
    Router::new()
        .route(
            paths::triage::TRIAGE,
            get(triage::list_triage).post(triage::create_triage),
        )
        .route(paths::triage::CLASSIFY, post(triage::classify_triage))
        .route(paths::triage::RULES, get(triage::list_rules))
        .route(paths::triage::BY_ID, get(triage::get_triage))
}

/// Create API v1 routes
pub fn api_v1_routes() -> Router<ErCareServer> {
    Router::new().merge(triage_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<ErCareServer> {
    Router::new()
        .merge(health_routes())
        .nest(paths::API_V1, api_v1_routes())
        .merge(openapi::create_docs_routes())
}
