//! ERCare Server - emergency department triage API
//!
//! Exposes the triage classifier over HTTP, records each assessment in an
//! in-process repository and serves the OpenAPI document for both.

pub mod auth;
pub mod error;
pub mod validation;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod settings;
pub mod storage;

// Re-export commonly used types
pub use error::*;
pub use server::ErCareServer;
pub use settings::ServerSettings;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: ErCareServer) -> Router {
    let cors = middleware::create_cors_layer(&server.settings.cors);

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(middleware::request_id_middleware))
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware))
                .layer(from_fn(middleware::audit_logging_middleware)),
        )
        .with_state(server)
}
