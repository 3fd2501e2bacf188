//! HTTP-level tests for the triage API
//!
//! Drives the full router (middleware included) in-process.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use ercare_server::settings::{JwtSettings, ServerSettings};
use ercare_server::auth::TokenClaims;
use ercare_server::{create_app, ErCareServer};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret-0123456789abcdef";

struct TestApp {
    router: Router,
    token: String,
    server: ErCareServer,
}

fn test_app() -> TestApp {
    test_app_with(ServerSettings::default())
}

fn test_app_with(base: ServerSettings) -> TestApp {
    let settings = ServerSettings {
        jwt: JwtSettings {
            secret: SECRET.to_string(),
            issuer: Some("ercare-tests".to_string()),
        },
        ..base
    };
    let server = ErCareServer::new(settings);
    let claims = TokenClaims::new("nurse-7", 3600)
        .with_name("Triage Nurse")
        .with_role("triage_nurse");
    let token = server.jwt.issue(&claims).unwrap();
    TestApp {
        router: create_app(server.clone()),
        token,
        server,
    }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn classify(app: &TestApp, body: Value) -> (StatusCode, Value) {
    let request = post_json("/api/v1/triage/classify", &app.token, &body);
    send(app, request).await
}

// =============================================================================
// Health and docs
// =============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app();
    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["rule_count"], 35);
    assert_eq!(body["stored_assessments"], 0);
}

#[tokio::test]
async fn test_version_and_openapi_document() {
    let app = test_app();
    let (status, body) = send(&app, get("/version", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "ercare-server");

    let (status, doc) = send(&app, get("/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/triage/classify"]["post"].is_object());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/v1/triage", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_type"], "authentication_error");
    assert_eq!(body["code"], "AUTH_2003");
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/v1/triage", Some("not-a-token"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_2001");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = test_app();
    let expired = app.server.jwt.issue(&TokenClaims::new("nurse-7", -3600)).unwrap();
    let (status, body) = send(&app, get("/api/v1/triage", Some(&expired))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_2002");
}

#[tokio::test]
async fn test_unauthenticated_classify_never_reaches_classifier() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/triage/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"age_group": "toddler"}).to_string()))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Classification scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_a_critical_spo2() {
    let app = test_app();
    let (status, body) = classify(
        &app,
        json!({"age_group": "adult", "vitals": {"oxygen_saturation": 85}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"],
        json!({
            "priority_level": 1,
            "priority_color": "red",
            "priority_name": "IMMEDIATE",
            "time_to_see": "0 min",
            "reasons": ["Critical SpO2: 85%"]
        })
    );
}

#[tokio::test]
async fn test_scenario_b_chest_pain_with_normal_map() {
    let app = test_app();
    let (status, body) = classify(
        &app,
        json!({
            "age_group": "adult",
            "vitals": {"systolic_bp": 100, "diastolic_bp": 70},
            "symptoms": {"chest_pain": true}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["priority_level"], 2);
    assert_eq!(body["data"]["priority_color"], "orange");
    assert_eq!(body["data"]["reasons"], json!(["Chest pain (possible ACS)"]));
}

#[tokio::test]
async fn test_scenario_c_minor_injury() {
    let app = test_app();
    let (_, body) = classify(
        &app,
        json!({"age_group": "adult", "symptoms": {"minor_injury": true}}),
    )
    .await;

    assert_eq!(body["data"]["priority_level"], 4);
    assert_eq!(body["data"]["priority_color"], "green");
    assert_eq!(body["data"]["reasons"], json!(["Minor injury"]));
}

#[tokio::test]
async fn test_scenario_d_pediatric_meningococcemia() {
    let app = test_app();
    let (_, body) = classify(
        &app,
        json!({
            "age_group": "pediatric",
            "symptoms": {"non_blanching_rash": true, "fever": true}
        }),
    )
    .await;

    assert_eq!(body["data"]["priority_level"], 1);
    assert_eq!(
        body["data"]["reasons"],
        json!(["Non-blanching rash with fever (suspected meningococcemia)"])
    );
}

#[tokio::test]
async fn test_scenario_e_invalid_age_group() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/triage/classify")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-request-id", "req-scenario-e")
        .body(Body::from(json!({"age_group": "toddler"}).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["code"], "VALIDATION_1004");
    assert_eq!(body["request_id"], "req-scenario-e");
    assert!(body["field_errors"]["age_group"].is_array());
}

#[tokio::test]
async fn test_routine_fallback_and_legacy_field_names() {
    let app = test_app();
    let (_, body) = classify(&app, json!({"age_group": "adult"})).await;
    assert_eq!(body["data"]["priority_level"], 5);
    assert_eq!(
        body["data"]["reasons"],
        json!(["Stable condition, routine assessment"])
    );

    let (_, body) = classify(&app, json!({"age_group": "adult", "vitals": {"spo2": 85}})).await;
    assert_eq!(body["data"]["reasons"], json!(["Critical SpO2: 85%"]));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/triage/classify")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"age_group\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");
    assert_eq!(body["code"], "VALIDATION_1003");
}

// =============================================================================
// Recorded assessments
// =============================================================================

#[tokio::test]
async fn test_create_get_and_list_assessments() {
    let app = test_app();

    let request = post_json(
        "/api/v1/triage",
        &app.token,
        &json!({
            "age_group": "adult",
            "vitals": {"heart_rate": 130},
            "mechanism": "Fall from ladder",
            "case_sheet_id": "CS-2024-001"
        }),
    );
    let (status, created) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    let record = &created["data"];
    assert_eq!(record["triaged_by"], "nurse-7");
    assert_eq!(record["age_group"], "adult");
    assert_eq!(record["mechanism"], "Fall from ladder");
    assert_eq!(record["case_sheet_id"], "CS-2024-001");
    assert!(record["priority_level"].as_u64().is_some());
    assert!(record["triage_reason"].as_array().is_some_and(|r| r.len() == 1));

    let id = record["id"].as_str().unwrap().to_string();
    let (status, fetched) = send(&app, get(&format!("/api/v1/triage/{id}"), Some(&app.token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched["data"], record);

    let (status, listed) = send(&app, get("/api/v1/triage", Some(&app.token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(app.server.repository.len(), 1);
}

#[tokio::test]
async fn test_create_rejects_invalid_age_group_without_storing() {
    let app = test_app();
    let request = post_json("/api/v1/triage", &app.token, &json!({"age_group": "Adult"}));
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_1004");
    assert!(app.server.repository.is_empty());
}

#[tokio::test]
async fn test_create_rejects_oversized_mechanism() {
    let app = test_app();
    let request = post_json(
        "/api/v1/triage",
        &app.token,
        &json!({"age_group": "adult", "mechanism": "x".repeat(1001)}),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert!(body["field_errors"]["mechanism"].is_array());
    assert!(app.server.repository.is_empty());
}

#[tokio::test]
async fn test_list_respects_limit() {
    let app = test_app();
    for _ in 0..3 {
        let request = post_json("/api/v1/triage", &app.token, &json!({"age_group": "adult"}));
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, listed) = send(&app, get("/api/v1/triage?limit=2", Some(&app.token))).await;
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(2));

    let (_, listed) = send(&app, get("/api/v1/triage", Some(&app.token))).await;
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_malformed_limit_returns_standard_error_body() {
    let app = test_app();
    for uri in ["/api/v1/triage?limit=abc", "/api/v1/triage?limit=-1"] {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
            .header("x-request-id", "req-bad-limit")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error_type"], "bad_request");
        assert_eq!(body["code"], "VALIDATION_1003");
        assert_eq!(body["request_id"], "req-bad-limit");
    }
}

#[tokio::test]
async fn test_wildcard_cors_origin_is_served() {
    let mut settings = ServerSettings::default();
    settings.cors.allowed_origins = vec!["*".to_string()];
    let app = test_app_with(settings);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header(header::ORIGIN, "https://ward.example.org")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_unknown_assessment_is_not_found() {
    let app = test_app();
    let unknown = uuid_like();
    for uri in [format!("/api/v1/triage/{unknown}"), "/api/v1/triage/not-a-uuid".to_string()] {
        let (status, body) = send(&app, get(&uri, Some(&app.token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Triage assessment not found");
        assert_eq!(body["code"], "RESOURCE_5001");
    }
}

#[tokio::test]
async fn test_rules_endpoint_lists_protocol_in_order() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/v1/triage/rules", Some(&app.token))).await;

    assert_eq!(status, StatusCode::OK);
    let rules = body["data"].as_array().unwrap();
    assert_eq!(rules.len(), 35);
    assert_eq!(rules[0]["code"], "RED-01");
    assert_eq!(rules[34]["code"], "BLUE-01");
    assert_eq!(rules[34]["reason"], "Stable condition, routine assessment");
}

fn uuid_like() -> String {
    "00000000-0000-4000-8000-000000000000".to_string()
}
