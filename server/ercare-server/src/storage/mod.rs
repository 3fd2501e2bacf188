//! In-process triage record storage

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use triage_engine::{AgeGroup, Classification, SymptomFlags, VitalSigns};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored triage decision. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TriageAssessment {
    pub id: Uuid,
    pub age_group: AgeGroup,
    pub vitals: VitalSigns,
    pub symptoms: SymptomFlags,
    /// Mechanism of injury, free text
    pub mechanism: String,
    pub priority_level: u8,
    pub priority_color: String,
    pub priority_name: String,
    pub time_to_see: String,
    pub triage_reason: Vec<String>,
    /// Subject of the bearer token that recorded the assessment
    pub triaged_by: String,
    pub triaged_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sheet_id: Option<String>,
}

/// Inputs of an assessment besides the classification itself
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub age_group: AgeGroup,
    pub vitals: VitalSigns,
    pub symptoms: SymptomFlags,
    pub mechanism: String,
    pub triaged_by: String,
    pub case_sheet_id: Option<String>,
}

impl TriageAssessment {
    pub fn record(input: NewAssessment, classification: &Classification) -> Self {
        Self {
            id: Uuid::new_v4(),
            age_group: input.age_group,
            vitals: input.vitals,
            symptoms: input.symptoms,
            mechanism: input.mechanism,
            priority_level: classification.priority_level(),
            priority_color: classification.priority_color().to_string(),
            priority_name: classification.priority_name().to_string(),
            time_to_see: classification.time_to_see().to_string(),
            triage_reason: classification.reasons().to_vec(),
            triaged_by: input.triaged_by,
            triaged_at: Utc::now(),
            case_sheet_id: input.case_sheet_id,
        }
    }
}

/// Concurrent in-memory repository of triage assessments
#[derive(Debug, Default)]
pub struct TriageRepository {
    assessments: DashMap<Uuid, TriageAssessment>,
}

impl TriageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, assessment: TriageAssessment) -> TriageAssessment {
        self.assessments.insert(assessment.id, assessment.clone());
        assessment
    }

    pub fn get(&self, id: &Uuid) -> Option<TriageAssessment> {
        self.assessments.get(id).map(|entry| entry.value().clone())
    }

    /// Newest first, at most `limit` records
    pub fn list(&self, limit: usize) -> Vec<TriageAssessment> {
        let mut all: Vec<TriageAssessment> = self
            .assessments
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| b.triaged_at.cmp(&a.triaged_at).then_with(|| a.id.cmp(&b.id)));
        all.truncate(limit);
        all
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use triage_engine::TriageClassifier;

    fn assessment(minutes_ago: i64) -> TriageAssessment {
        let vitals = VitalSigns::default();
        let symptoms = SymptomFlags::default();
        let classification = TriageClassifier::standard().assess(AgeGroup::Adult, &vitals, &symptoms);
        let mut record = TriageAssessment::record(
            NewAssessment {
                age_group: AgeGroup::Adult,
                vitals,
                symptoms,
                mechanism: String::new(),
                triaged_by: "nurse-1".to_string(),
                case_sheet_id: None,
            },
            &classification,
        );
        record.triaged_at = Utc::now() - Duration::minutes(minutes_ago);
        record
    }

    #[test]
    fn test_record_copies_classification() {
        let record = assessment(0);
        assert_eq!(record.priority_level, 5);
        assert_eq!(record.priority_color, "blue");
        assert_eq!(record.triage_reason, vec!["Stable condition, routine assessment".to_string()]);
    }

    #[test]
    fn test_insert_and_get() {
        let repo = TriageRepository::new();
        assert!(repo.is_empty());
        let stored = repo.insert(assessment(0));
        assert_eq!(repo.get(&stored.id), Some(stored));
        assert_eq!(repo.get(&Uuid::new_v4()), None);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let repo = TriageRepository::new();
        let oldest = repo.insert(assessment(30));
        let newest = repo.insert(assessment(1));
        let middle = repo.insert(assessment(10));

        let listed = repo.list(10);
        let ids: Vec<Uuid> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);

        assert_eq!(repo.list(2).len(), 2);
        assert!(repo.list(0).is_empty());
    }
}
