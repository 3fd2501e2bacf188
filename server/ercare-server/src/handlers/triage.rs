use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use triage_engine::{AgeGroup, Classification, Rule, SymptomFlags, TriageError, VitalSigns};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{api_success, ApiError, ApiErrorResponse, ApiResponse, ApiResult};
use crate::middleware::AuthContext;
use crate::server::ErCareServer;
use crate::storage::{NewAssessment, TriageAssessment};
use crate::validation::RequestValidation;

pub const MAX_MECHANISM_CHARS: usize = 1000;
pub const MAX_OTHER_SYMPTOMS: usize = 50;
pub const MAX_OTHER_SYMPTOM_CHARS: usize = 200;
pub const MAX_CASE_SHEET_ID_CHARS: usize = 100;

/// Observations to classify without recording them
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    /// `adult` or `pediatric`
    pub age_group: String,
    #[serde(default)]
    pub vitals: VitalSigns,
    #[serde(default)]
    pub symptoms: SymptomFlags,
}

/// Observations to classify and record as a triage assessment
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTriageRequest {
    /// `adult` or `pediatric`
    pub age_group: String,
    #[serde(default)]
    pub vitals: VitalSigns,
    #[serde(default)]
    pub symptoms: SymptomFlags,
    /// Mechanism of injury, free text
    #[serde(default)]
    pub mechanism: String,
    /// Case sheet this assessment belongs to
    #[serde(default)]
    pub case_sheet_id: Option<String>,
}

/// Classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResponse {
    pub priority_level: u8,
    pub priority_color: String,
    pub priority_name: String,
    pub time_to_see: String,
    pub reasons: Vec<String>,
}

impl From<&Classification> for ClassificationResponse {
    fn from(classification: &Classification) -> Self {
        Self {
            priority_level: classification.priority_level(),
            priority_color: classification.priority_color().to_string(),
            priority_name: classification.priority_name().to_string(),
            time_to_see: classification.time_to_see().to_string(),
            reasons: classification.reasons().to_vec(),
        }
    }
}

/// One entry of the triage protocol, in evaluation order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RuleSummary {
    pub code: String,
    pub priority_level: u8,
    pub priority_color: String,
    pub priority_name: String,
    /// `all` or `pediatric`
    pub scope: String,
    /// Reason text; `{value}` marks the measured value
    pub reason: String,
}

impl From<&Rule> for RuleSummary {
    fn from(rule: &Rule) -> Self {
        Self {
            code: rule.code.to_string(),
            priority_level: rule.priority.level(),
            priority_color: rule.priority.color().to_string(),
            priority_name: rule.priority.name().to_string(),
            scope: rule.scope.as_str().to_string(),
            reason: rule.reason.describe(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTriageParams {
    /// Maximum number of assessments, newest first
    pub limit: Option<usize>,
}

fn validate_symptoms(symptoms: &SymptomFlags) -> Result<(), ApiError> {
    crate::validate_max_items!("symptoms.other_symptoms", symptoms.other_symptoms, MAX_OTHER_SYMPTOMS);
    for entry in &symptoms.other_symptoms {
        crate::validate_max_chars!("symptoms.other_symptoms", entry, MAX_OTHER_SYMPTOM_CHARS);
    }
    Ok(())
}

/// The raw value is client text, so it only reaches the log redacted
fn reject_input(auth: &AuthContext, err: TriageError) -> ApiError {
    logger_redacted::redacted_warn!(
        "Rejected triage input from clinician {}: {}",
        auth.clinician_id,
        err
    );
    auth.reject(err)
}

impl RequestValidation for ClassifyRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_symptoms(&self.symptoms)
    }
}

impl RequestValidation for CreateTriageRequest {
    fn validate(&self) -> Result<(), ApiError> {
        crate::validate_max_chars!("mechanism", self.mechanism, MAX_MECHANISM_CHARS);
        if let Some(case_sheet_id) = &self.case_sheet_id {
            crate::validate_max_chars!("case_sheet_id", case_sheet_id, MAX_CASE_SHEET_ID_CHARS);
        }
        validate_symptoms(&self.symptoms)
    }
}

/// Classify a patient without storing anything
#[utoipa::path(
    post,
    path = crate::routes::paths::api_v1::TRIAGE_CLASSIFY,
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Patient classified", body = ApiResponse<ClassificationResponse>),
        (status = 400, description = "Invalid age group or request body", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse)
    ),
    tag = "triage",
    security(("bearer_auth" = []))
)]
pub async fn classify_triage(
    State(server): State<ErCareServer>,
    auth: AuthContext,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<ClassificationResponse>>> {
    let Json(req) = payload.map_err(|e| auth.reject(e))?;
    req.validate().map_err(|e| auth.reject(e))?;

    let classification = server
        .classifier
        .classify(&req.age_group, &req.vitals, &req.symptoms)
        .map_err(|e| reject_input(&auth, e))?;

    tracing::info!(
        clinician_id = %auth.clinician_id,
        rule = classification.matched_rule(),
        priority_level = classification.priority_level(),
        "Patient classified"
    );

    Ok(Json(api_success(ClassificationResponse::from(&classification))))
}

/// Classify a patient and record the assessment
#[utoipa::path(
    post,
    path = crate::routes::paths::api_v1::TRIAGE,
    request_body = CreateTriageRequest,
    responses(
        (status = 201, description = "Triage assessment recorded", body = ApiResponse<TriageAssessment>),
        (status = 400, description = "Invalid age group or request body", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse)
    ),
    tag = "triage",
    security(("bearer_auth" = []))
)]
pub async fn create_triage(
    State(server): State<ErCareServer>,
    auth: AuthContext,
    payload: Result<Json<CreateTriageRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TriageAssessment>>)> {
    let Json(req) = payload.map_err(|e| auth.reject(e))?;
    req.validate().map_err(|e| auth.reject(e))?;

    let age_group = req
        .age_group
        .parse::<AgeGroup>()
        .map_err(|e| reject_input(&auth, e))?;
    let classification = server.classifier.assess(age_group, &req.vitals, &req.symptoms);

    let assessment = server.repository.insert(TriageAssessment::record(
        NewAssessment {
            age_group,
            vitals: req.vitals,
            symptoms: req.symptoms,
            mechanism: req.mechanism,
            triaged_by: auth.clinician_id.clone(),
            case_sheet_id: req.case_sheet_id,
        },
        &classification,
    ));

    tracing::info!(
        assessment_id = %assessment.id,
        clinician_id = %auth.clinician_id,
        rule = classification.matched_rule(),
        priority_level = assessment.priority_level,
        "Triage assessment recorded"
    );
    if !assessment.mechanism.is_empty() {
        logger_redacted::redacted_info!(
            "Mechanism for assessment {}: {}",
            assessment.id,
            assessment.mechanism
        );
    }

    Ok((StatusCode::CREATED, Json(api_success(assessment))))
}

/// List recorded assessments, newest first
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::TRIAGE,
    params(ListTriageParams),
    responses(
        (status = 200, description = "Triage assessments", body = ApiResponse<Vec<TriageAssessment>>),
        (status = 400, description = "Malformed query string", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse)
    ),
    tag = "triage",
    security(("bearer_auth" = []))
)]
pub async fn list_triage(
    State(server): State<ErCareServer>,
    auth: AuthContext,
    query: Result<Query<ListTriageParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<TriageAssessment>>>> {
    let Query(params) = query.map_err(|e| auth.reject(e))?;
    let limit = server.list_limit(params.limit);
    let assessments = server.repository.list(limit);

    tracing::debug!(
        clinician_id = %auth.clinician_id,
        limit,
        returned = assessments.len(),
        "Triage assessments listed"
    );

    Ok(Json(api_success(assessments)))
}

/// Fetch one recorded assessment
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::TRIAGE_BY_ID,
    params(
        ("id" = String, Path, description = "Triage assessment ID")
    ),
    responses(
        (status = 200, description = "Triage assessment", body = ApiResponse<TriageAssessment>),
        (status = 404, description = "Triage assessment not found", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse)
    ),
    tag = "triage",
    security(("bearer_auth" = []))
)]
pub async fn get_triage(
    State(server): State<ErCareServer>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<TriageAssessment>>> {
    Uuid::parse_str(&id)
        .ok()
        .and_then(|id| server.repository.get(&id))
        .map(|assessment| Json(api_success(assessment)))
        .ok_or_else(|| auth.reject(ApiError::not_found("Triage assessment")))
}

/// The active triage protocol in evaluation order
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::TRIAGE_RULES,
    responses(
        (status = 200, description = "Ordered rule table", body = ApiResponse<Vec<RuleSummary>>),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse)
    ),
    tag = "triage",
    security(("bearer_auth" = []))
)]
pub async fn list_rules(
    State(server): State<ErCareServer>,
    _auth: AuthContext,
) -> Json<ApiResponse<Vec<RuleSummary>>> {
    let rules = server.classifier.rules().iter().map(RuleSummary::from).collect();
    Json(api_success(rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_engine::TriageClassifier;

    #[test]
    fn test_rule_summaries_follow_table_order() {
        let summaries: Vec<RuleSummary> =
            TriageClassifier::standard().rules().iter().map(RuleSummary::from).collect();
        assert_eq!(summaries.first().map(|r| r.code.as_str()), Some("RED-01"));
        assert_eq!(summaries.last().map(|r| r.code.as_str()), Some("BLUE-01"));
        assert!(summaries
            .iter()
            .filter(|r| r.scope == "pediatric")
            .all(|r| r.priority_level == 1));
    }

    #[test]
    fn test_create_request_limits() {
        let mut req = CreateTriageRequest {
            age_group: "adult".to_string(),
            vitals: VitalSigns::default(),
            symptoms: SymptomFlags::default(),
            mechanism: "x".repeat(MAX_MECHANISM_CHARS),
            case_sheet_id: Some("CS-1".to_string()),
        };
        assert!(req.validate().is_ok());

        req.mechanism.push('x');
        assert!(req.validate().is_err());

        req.mechanism.clear();
        req.symptoms.other_symptoms = vec!["itch".to_string(); MAX_OTHER_SYMPTOMS + 1];
        assert!(req.validate().is_err());

        req.symptoms.other_symptoms = vec!["y".repeat(MAX_OTHER_SYMPTOM_CHARS + 1)];
        assert!(req.validate().is_err());
    }
}
