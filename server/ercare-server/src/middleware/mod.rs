pub mod auth_context;

pub use auth_context::AuthContext;

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, CorsLayer};
use uuid::Uuid;

use crate::settings::CorsSettings;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID middleware: keeps an incoming `x-request-id` or assigns one,
/// and echoes it on the response
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let header_name = HeaderName::from_static(REQUEST_ID_HEADER);
    let request_id = request
        .headers()
        .get(&header_name)
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

    if let Some(value) = &request_id {
        request.headers_mut().insert(header_name.clone(), value.clone());
    }

    let mut response = next.run(request).await;
    if let Some(value) = request_id {
        response.headers_mut().insert(header_name, value);
    }
    response
}

/// Request timing middleware
pub async fn request_timing_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        duration_ms = start.elapsed().as_millis(),
        status = response.status().as_u16(),
        "Request processed"
    );

    response
}

/// Audit logging middleware. Records who called what; bodies are never logged.
pub async fn audit_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("none")
        .to_string();
    let authenticated = request.headers().contains_key(header::AUTHORIZATION);

    let response = next.run(request).await;

    tracing::info!(
        target: "audit",
        method = %method,
        path = %path,
        request_id = %request_id,
        authenticated,
        status = response.status().as_u16(),
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "Audit log: Request completed"
    );

    response
}

/// Origin that opens the API to every origin
pub const ANY_ORIGIN: &str = "*";

/// Create CORS layer for the application. Origins were validated with the settings;
/// any that fail to parse here are skipped. A `*` entry allows any origin.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let allow_origin = if settings.allowed_origins.iter().any(|origin| origin.trim() == ANY_ORIGIN) {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = settings
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse::<HeaderValue>().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    async fn allowed_origin(origins: &[&str], origin: &str) -> Option<String> {
        let settings = CorsSettings {
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
        };
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .layer(create_cors_layer(&settings));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[tokio::test]
    async fn test_cors_wildcard_allows_any_origin() {
        let allowed = allowed_origin(&["*"], "https://ward.example.org").await;
        assert_eq!(allowed.as_deref(), Some("*"));

        // Mixed with concrete origins the wildcard still wins
        let allowed = allowed_origin(&["http://localhost:3000", "*"], "https://ward.example.org").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_cors_list_only_echoes_configured_origins() {
        let allowed = allowed_origin(&["http://localhost:3000"], "http://localhost:3000").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:3000"));

        let allowed = allowed_origin(&["http://localhost:3000"], "https://evil.example.com").await;
        assert_eq!(allowed, None);
    }
}
