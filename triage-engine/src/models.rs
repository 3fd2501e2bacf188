//! Patient inputs to the classifier: age group, vital signs and symptom flags.
//!
//! Every measurement is optional. An absent value means "not measured" and
//! is never read as zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TriageError;

/// Patient age group. Gates the pediatric-only critical rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Adult,
    Pediatric,
}

impl AgeGroup {
    pub const fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Adult => "adult",
            AgeGroup::Pediatric => "pediatric",
        }
    }

    pub const fn is_pediatric(self) -> bool {
        matches!(self, AgeGroup::Pediatric)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "adult" => Ok(AgeGroup::Adult),
            "pediatric" => Ok(AgeGroup::Pediatric),
            other => Err(TriageError::invalid_age_group(other)),
        }
    }
}

/// Vital signs recorded at triage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct VitalSigns {
    /// Beats per minute
    #[serde(alias = "hr")]
    pub heart_rate: Option<f64>,
    /// mmHg
    #[serde(alias = "bp_systolic")]
    pub systolic_bp: Option<f64>,
    /// mmHg
    #[serde(alias = "bp_diastolic")]
    pub diastolic_bp: Option<f64>,
    /// Breaths per minute
    #[serde(alias = "rr")]
    pub respiratory_rate: Option<f64>,
    /// SpO2 percentage
    #[serde(alias = "spo2")]
    pub oxygen_saturation: Option<f64>,
    /// Degrees Celsius
    #[serde(alias = "temperature")]
    pub body_temperature: Option<f64>,
    #[serde(alias = "gcs_e")]
    pub glasgow_eye: Option<i32>,
    #[serde(alias = "gcs_v")]
    pub glasgow_verbal: Option<i32>,
    #[serde(alias = "gcs_m")]
    pub glasgow_motor: Option<i32>,
    #[serde(alias = "capillary_refill")]
    pub capillary_refill_seconds: Option<f64>,
}

impl VitalSigns {
    /// Glasgow Coma Scale total. A partial GCS is never summed.
    pub fn glasgow_total(&self) -> Option<i32> {
        match (self.glasgow_eye, self.glasgow_verbal, self.glasgow_motor) {
            (Some(eye), Some(verbal), Some(motor)) => {
                Some(eye.saturating_add(verbal).saturating_add(motor))
            }
            _ => None,
        }
    }

    /// Mean arterial pressure, (systolic + 2 x diastolic) / 3
    pub fn mean_arterial_pressure(&self) -> Option<f64> {
        match (self.systolic_bp, self.diastolic_bp) {
            (Some(systolic), Some(diastolic)) => Some((systolic + 2.0 * diastolic) / 3.0),
            _ => None,
        }
    }
}

/// Named symptom indicator, one per boolean on [`SymptomFlags`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symptom {
    // Airway
    ObstructedAirway,
    FacialBurns,
    Stridor,
    // Breathing
    SevereRespiratoryDistress,
    ModerateRespiratoryDistress,
    MildRespiratorySymptoms,
    Cyanosis,
    Apnea,
    // Circulation
    Shock,
    SevereBleeding,
    CardiacArrest,
    ChestPain,
    ChestPainWithHypotension,
    // Neurological
    SeizureOngoing,
    SeizureControlled,
    Confusion,
    FocalDeficits,
    LethargicUnconscious,
    // Trauma
    MajorTrauma,
    ModerateTrauma,
    MinorInjury,
    // Other
    SevereBurns,
    Anaphylaxis,
    SuspectedStroke,
    Sepsis,
    GiBleed,
    Fever,
    NonBlanchingRash,
    SevereDehydration,
    ModerateDehydration,
    AbdominalPainSevere,
    AbdominalPainModerate,
    AbdominalPainMild,
}

impl Symptom {
    pub const ALL: [Symptom; 33] = [
        Symptom::ObstructedAirway,
        Symptom::FacialBurns,
        Symptom::Stridor,
        Symptom::SevereRespiratoryDistress,
        Symptom::ModerateRespiratoryDistress,
        Symptom::MildRespiratorySymptoms,
        Symptom::Cyanosis,
        Symptom::Apnea,
        Symptom::Shock,
        Symptom::SevereBleeding,
        Symptom::CardiacArrest,
        Symptom::ChestPain,
        Symptom::ChestPainWithHypotension,
        Symptom::SeizureOngoing,
        Symptom::SeizureControlled,
        Symptom::Confusion,
        Symptom::FocalDeficits,
        Symptom::LethargicUnconscious,
        Symptom::MajorTrauma,
        Symptom::ModerateTrauma,
        Symptom::MinorInjury,
        Symptom::SevereBurns,
        Symptom::Anaphylaxis,
        Symptom::SuspectedStroke,
        Symptom::Sepsis,
        Symptom::GiBleed,
        Symptom::Fever,
        Symptom::NonBlanchingRash,
        Symptom::SevereDehydration,
        Symptom::ModerateDehydration,
        Symptom::AbdominalPainSevere,
        Symptom::AbdominalPainModerate,
        Symptom::AbdominalPainMild,
    ];

    /// Wire name of the flag
    pub const fn as_str(self) -> &'static str {
        match self {
            Symptom::ObstructedAirway => "obstructed_airway",
            Symptom::FacialBurns => "facial_burns",
            Symptom::Stridor => "stridor",
            Symptom::SevereRespiratoryDistress => "severe_respiratory_distress",
            Symptom::ModerateRespiratoryDistress => "moderate_respiratory_distress",
            Symptom::MildRespiratorySymptoms => "mild_respiratory_symptoms",
            Symptom::Cyanosis => "cyanosis",
            Symptom::Apnea => "apnea",
            Symptom::Shock => "shock",
            Symptom::SevereBleeding => "severe_bleeding",
            Symptom::CardiacArrest => "cardiac_arrest",
            Symptom::ChestPain => "chest_pain",
            Symptom::ChestPainWithHypotension => "chest_pain_with_hypotension",
            Symptom::SeizureOngoing => "seizure_ongoing",
            Symptom::SeizureControlled => "seizure_controlled",
            Symptom::Confusion => "confusion",
            Symptom::FocalDeficits => "focal_deficits",
            Symptom::LethargicUnconscious => "lethargic_unconscious",
            Symptom::MajorTrauma => "major_trauma",
            Symptom::ModerateTrauma => "moderate_trauma",
            Symptom::MinorInjury => "minor_injury",
            Symptom::SevereBurns => "severe_burns",
            Symptom::Anaphylaxis => "anaphylaxis",
            Symptom::SuspectedStroke => "suspected_stroke",
            Symptom::Sepsis => "sepsis",
            Symptom::GiBleed => "gi_bleed",
            Symptom::Fever => "fever",
            Symptom::NonBlanchingRash => "non_blanching_rash",
            Symptom::SevereDehydration => "severe_dehydration",
            Symptom::ModerateDehydration => "moderate_dehydration",
            Symptom::AbdominalPainSevere => "abdominal_pain_severe",
            Symptom::AbdominalPainModerate => "abdominal_pain_moderate",
            Symptom::AbdominalPainMild => "abdominal_pain_mild",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symptom indicators captured at triage.
///
/// Flags are independent: no flag implies another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct SymptomFlags {
    pub obstructed_airway: bool,
    pub facial_burns: bool,
    pub stridor: bool,

    pub severe_respiratory_distress: bool,
    pub moderate_respiratory_distress: bool,
    pub mild_respiratory_symptoms: bool,
    pub cyanosis: bool,
    pub apnea: bool,

    pub shock: bool,
    pub severe_bleeding: bool,
    pub cardiac_arrest: bool,
    pub chest_pain: bool,
    pub chest_pain_with_hypotension: bool,

    pub seizure_ongoing: bool,
    pub seizure_controlled: bool,
    pub confusion: bool,
    pub focal_deficits: bool,
    pub lethargic_unconscious: bool,

    pub major_trauma: bool,
    pub moderate_trauma: bool,
    pub minor_injury: bool,

    pub severe_burns: bool,
    pub anaphylaxis: bool,
    pub suspected_stroke: bool,
    pub sepsis: bool,
    pub gi_bleed: bool,
    pub fever: bool,
    pub non_blanching_rash: bool,

    pub severe_dehydration: bool,
    pub moderate_dehydration: bool,

    pub abdominal_pain_severe: bool,
    pub abdominal_pain_moderate: bool,
    pub abdominal_pain_mild: bool,

    /// Free-text symptoms that have no dedicated flag. Never evaluated.
    pub other_symptoms: Vec<String>,
}

impl SymptomFlags {
    pub fn has(&self, symptom: Symptom) -> bool {
        *self.slot(symptom)
    }

    pub fn set(&mut self, symptom: Symptom, present: bool) {
        *self.slot_mut(symptom) = present;
    }

    /// Builder-style setter
    pub fn with(mut self, symptom: Symptom) -> Self {
        self.set(symptom, true);
        self
    }

    /// Flags that are currently set, in declaration order
    pub fn present(&self) -> impl Iterator<Item = Symptom> + '_ {
        Symptom::ALL.into_iter().filter(move |s| self.has(*s))
    }

    fn slot(&self, symptom: Symptom) -> &bool {
        match symptom {
            Symptom::ObstructedAirway => &self.obstructed_airway,
            Symptom::FacialBurns => &self.facial_burns,
            Symptom::Stridor => &self.stridor,
            Symptom::SevereRespiratoryDistress => &self.severe_respiratory_distress,
            Symptom::ModerateRespiratoryDistress => &self.moderate_respiratory_distress,
            Symptom::MildRespiratorySymptoms => &self.mild_respiratory_symptoms,
            Symptom::Cyanosis => &self.cyanosis,
            Symptom::Apnea => &self.apnea,
            Symptom::Shock => &self.shock,
            Symptom::SevereBleeding => &self.severe_bleeding,
            Symptom::CardiacArrest => &self.cardiac_arrest,
            Symptom::ChestPain => &self.chest_pain,
            Symptom::ChestPainWithHypotension => &self.chest_pain_with_hypotension,
            Symptom::SeizureOngoing => &self.seizure_ongoing,
            Symptom::SeizureControlled => &self.seizure_controlled,
            Symptom::Confusion => &self.confusion,
            Symptom::FocalDeficits => &self.focal_deficits,
            Symptom::LethargicUnconscious => &self.lethargic_unconscious,
            Symptom::MajorTrauma => &self.major_trauma,
            Symptom::ModerateTrauma => &self.moderate_trauma,
            Symptom::MinorInjury => &self.minor_injury,
            Symptom::SevereBurns => &self.severe_burns,
            Symptom::Anaphylaxis => &self.anaphylaxis,
            Symptom::SuspectedStroke => &self.suspected_stroke,
            Symptom::Sepsis => &self.sepsis,
            Symptom::GiBleed => &self.gi_bleed,
            Symptom::Fever => &self.fever,
            Symptom::NonBlanchingRash => &self.non_blanching_rash,
            Symptom::SevereDehydration => &self.severe_dehydration,
            Symptom::ModerateDehydration => &self.moderate_dehydration,
            Symptom::AbdominalPainSevere => &self.abdominal_pain_severe,
            Symptom::AbdominalPainModerate => &self.abdominal_pain_moderate,
            Symptom::AbdominalPainMild => &self.abdominal_pain_mild,
        }
    }

    fn slot_mut(&mut self, symptom: Symptom) -> &mut bool {
        match symptom {
            Symptom::ObstructedAirway => &mut self.obstructed_airway,
            Symptom::FacialBurns => &mut self.facial_burns,
            Symptom::Stridor => &mut self.stridor,
            Symptom::SevereRespiratoryDistress => &mut self.severe_respiratory_distress,
            Symptom::ModerateRespiratoryDistress => &mut self.moderate_respiratory_distress,
            Symptom::MildRespiratorySymptoms => &mut self.mild_respiratory_symptoms,
            Symptom::Cyanosis => &mut self.cyanosis,
            Symptom::Apnea => &mut self.apnea,
            Symptom::Shock => &mut self.shock,
            Symptom::SevereBleeding => &mut self.severe_bleeding,
            Symptom::CardiacArrest => &mut self.cardiac_arrest,
            Symptom::ChestPain => &mut self.chest_pain,
            Symptom::ChestPainWithHypotension => &mut self.chest_pain_with_hypotension,
            Symptom::SeizureOngoing => &mut self.seizure_ongoing,
            Symptom::SeizureControlled => &mut self.seizure_controlled,
            Symptom::Confusion => &mut self.confusion,
            Symptom::FocalDeficits => &mut self.focal_deficits,
            Symptom::LethargicUnconscious => &mut self.lethargic_unconscious,
            Symptom::MajorTrauma => &mut self.major_trauma,
            Symptom::ModerateTrauma => &mut self.moderate_trauma,
            Symptom::MinorInjury => &mut self.minor_injury,
            Symptom::SevereBurns => &mut self.severe_burns,
            Symptom::Anaphylaxis => &mut self.anaphylaxis,
            Symptom::SuspectedStroke => &mut self.suspected_stroke,
            Symptom::Sepsis => &mut self.sepsis,
            Symptom::GiBleed => &mut self.gi_bleed,
            Symptom::Fever => &mut self.fever,
            Symptom::NonBlanchingRash => &mut self.non_blanching_rash,
            Symptom::SevereDehydration => &mut self.severe_dehydration,
            Symptom::ModerateDehydration => &mut self.moderate_dehydration,
            Symptom::AbdominalPainSevere => &mut self.abdominal_pain_severe,
            Symptom::AbdominalPainModerate => &mut self.abdominal_pain_moderate,
            Symptom::AbdominalPainMild => &mut self.abdominal_pain_mild,
        }
    }
}
