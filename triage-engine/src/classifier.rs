use serde::Serialize;

use crate::error::Result;
use crate::models::{AgeGroup, SymptomFlags, VitalSigns};
use crate::priority::Priority;
use crate::rules::{Rule, ROUTINE_ASSESSMENT, STANDARD_RULES};

/// Outcome of a triage classification. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    #[serde(flatten)]
    priority: Priority,
    /// Triggering reason first
    reasons: Vec<String>,
    #[serde(skip)]
    matched_rule: &'static str,
}

impl Classification {
    fn from_rule(rule: &Rule, vitals: &VitalSigns) -> Self {
        Self {
            priority: rule.priority,
            reasons: vec![rule.reason.render(vitals)],
            matched_rule: rule.code,
        }
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn priority_level(&self) -> u8 {
        self.priority.level()
    }

    pub fn priority_color(&self) -> &'static str {
        self.priority.color()
    }

    pub fn priority_name(&self) -> &'static str {
        self.priority.name()
    }

    pub fn time_to_see(&self) -> &'static str {
        self.priority.time_to_see()
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// The reason that triggered the match
    pub fn primary_reason(&self) -> &str {
        self.reasons.first().map_or("", String::as_str)
    }

    /// Code of the rule that decided this classification
    pub fn matched_rule(&self) -> &'static str {
        self.matched_rule
    }
}

/// Rule-cascade triage classifier.
///
/// Evaluates its rule table in declaration order and stops at the first
/// match. Stateless and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct TriageClassifier {
    rules: &'static [Rule],
}

impl Default for TriageClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl TriageClassifier {
    /// Classifier over the standard emergency department protocol
    pub const fn standard() -> Self {
        Self {
            rules: &STANDARD_RULES,
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Classify from a raw age group string.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`](crate::TriageError::InvalidInput)
    /// when `age_group` is neither `adult` nor `pediatric`.
    pub fn classify(
        &self,
        age_group: &str,
        vitals: &VitalSigns,
        symptoms: &SymptomFlags,
    ) -> Result<Classification> {
        let age_group: AgeGroup = age_group.parse()?;
        Ok(self.assess(age_group, vitals, symptoms))
    }

    /// Classify a validated age group. Always produces a classification.
    pub fn assess(&self, age_group: AgeGroup, vitals: &VitalSigns, symptoms: &SymptomFlags) -> Classification {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.matches(age_group, vitals, symptoms))
            .unwrap_or(&ROUTINE_ASSESSMENT);

        tracing::debug!(
            rule = rule.code,
            priority_level = rule.priority.level(),
            age_group = %age_group,
            "Triage rule matched"
        );

        Classification::from_rule(rule, vitals)
    }
}

/// Classify with the standard protocol.
///
/// # Errors
///
/// Returns [`TriageError::InvalidInput`](crate::TriageError::InvalidInput)
/// for an unrecognized age group.
pub fn classify(age_group: &str, vitals: &VitalSigns, symptoms: &SymptomFlags) -> Result<Classification> {
    TriageClassifier::standard().classify(age_group, vitals, symptoms)
}
