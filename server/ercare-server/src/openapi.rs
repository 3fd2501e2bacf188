use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::paths;
use crate::server::ErCareServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,

        // Triage endpoints
        crate::handlers::triage::classify_triage,
        crate::handlers::triage::create_triage,
        crate::handlers::triage::list_triage,
        crate::handlers::triage::get_triage,
        crate::handlers::triage::list_rules,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,
            crate::handlers::triage::ClassifyRequest,
            crate::handlers::triage::CreateTriageRequest,
            crate::handlers::triage::ClassificationResponse,
            crate::handlers::triage::RuleSummary,
            crate::storage::TriageAssessment,
            crate::error::ApiErrorResponse,
            triage_engine::AgeGroup,
            triage_engine::VitalSigns,
            triage_engine::SymptomFlags,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "System health and version endpoints"),
        (name = "triage", description = "Emergency department triage classification and records"),
    ),
    info(
        title = "ERCare Engine API",
        version = "1.0.0",
        description = "Deterministic five-level emergency department triage: classify patients from vital signs and presenting symptoms and keep a record of each assessment.",
        contact(
            name = "ERCare Team",
            email = "api@ercare.dev",
            url = "https://ercare.dev"
        ),
        license(
            name = "AGPL-3.0-only",
            url = "https://www.gnu.org/licenses/agpl-3.0.html"
        ),
    ),
)]
pub struct ApiDoc;

/// Registers the bearer JWT scheme referenced by `security(("bearer_auth" = []))`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Swagger UI plus the raw OpenAPI document
pub fn create_docs_routes() -> Router<ErCareServer> {
    Router::new().merge(SwaggerUi::new(paths::docs::SWAGGER_UI).url(paths::docs::OPENAPI_JSON, ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_triage_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            paths::api_v1::TRIAGE,
            paths::api_v1::TRIAGE_CLASSIFY,
            paths::api_v1::TRIAGE_RULES,
            paths::api_v1::TRIAGE_BY_ID,
            paths::health::HEALTH,
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemes = doc.components.map(|c| c.security_schemes).unwrap_or_default();
        assert!(schemes.contains_key("bearer_auth"));
    }
}
