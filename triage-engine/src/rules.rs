//! The triage protocol as an ordered rule table.
//!
//! Rules are evaluated top to bottom and the first match decides the whole
//! outcome. Declaration order is part of the clinical protocol: reordering
//! entries changes classifications.

use crate::models::{AgeGroup, Symptom, SymptomFlags, VitalSigns};
use crate::priority::Priority;
use crate::reasons::ReasonTemplate;

/// A numeric value read from the vital signs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    HeartRate,
    SystolicBp,
    RespiratoryRate,
    OxygenSaturation,
    CapillaryRefill,
    /// Only present when all three GCS components are recorded
    GlasgowTotal,
    /// Only present when both blood pressure components are recorded
    MeanArterialPressure,
}

impl Measure {
    pub fn read(self, vitals: &VitalSigns) -> Option<f64> {
        match self {
            Measure::HeartRate => vitals.heart_rate,
            Measure::SystolicBp => vitals.systolic_bp,
            Measure::RespiratoryRate => vitals.respiratory_rate,
            Measure::OxygenSaturation => vitals.oxygen_saturation,
            Measure::CapillaryRefill => vitals.capillary_refill_seconds,
            Measure::GlasgowTotal => vitals.glasgow_total().map(f64::from),
            Measure::MeanArterialPressure => vitals.mean_arterial_pressure(),
        }
    }
}

/// Predicate over a patient's vitals and symptoms.
///
/// Every numeric comparison is false when the measurement is absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    Always,
    Flag(Symptom),
    /// At least one flag set
    AnyFlag(&'static [Symptom]),
    /// `value < limit`
    Below(Measure, f64),
    /// `value <= limit`
    AtMost(Measure, f64),
    /// `value > limit`
    Above(Measure, f64),
    /// `value < low || value > high`
    Outside(Measure, f64, f64),
    /// `low <= value <= high`
    Within(Measure, f64, f64),
    Not(&'static Condition),
    All(&'static [Condition]),
}

impl Condition {
    pub fn evaluate(&self, vitals: &VitalSigns, symptoms: &SymptomFlags) -> bool {
        match *self {
            Condition::Always => true,
            Condition::Flag(symptom) => symptoms.has(symptom),
            Condition::AnyFlag(flags) => flags.iter().any(|s| symptoms.has(*s)),
            Condition::Below(measure, limit) => measure.read(vitals).is_some_and(|v| v < limit),
            Condition::AtMost(measure, limit) => measure.read(vitals).is_some_and(|v| v <= limit),
            Condition::Above(measure, limit) => measure.read(vitals).is_some_and(|v| v > limit),
            Condition::Outside(measure, low, high) => measure
                .read(vitals)
                .is_some_and(|v| v < low || v > high),
            Condition::Within(measure, low, high) => measure
                .read(vitals)
                .is_some_and(|v| (low..=high).contains(&v)),
            Condition::Not(inner) => !inner.evaluate(vitals, symptoms),
            Condition::All(parts) => parts.iter().all(|c| c.evaluate(vitals, symptoms)),
        }
    }
}

/// Which age groups a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    AllAges,
    PediatricOnly,
}

impl RuleScope {
    pub const fn includes(self, age_group: AgeGroup) -> bool {
        match self {
            RuleScope::AllAges => true,
            RuleScope::PediatricOnly => age_group.is_pediatric(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RuleScope::AllAges => "all",
            RuleScope::PediatricOnly => "pediatric",
        }
    }
}

/// One entry of the triage protocol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// Stable identifier, e.g. `RED-04`
    pub code: &'static str,
    pub priority: Priority,
    pub scope: RuleScope,
    pub condition: Condition,
    pub reason: ReasonTemplate,
}

impl Rule {
    pub fn matches(&self, age_group: AgeGroup, vitals: &VitalSigns, symptoms: &SymptomFlags) -> bool {
        self.scope.includes(age_group) && self.condition.evaluate(vitals, symptoms)
    }
}

/// Terminal rule of the protocol. Matches everything.
pub const ROUTINE_ASSESSMENT: Rule = Rule {
    code: "BLUE-01",
    priority: Priority::Blue,
    scope: RuleScope::AllAges,
    condition: Condition::Always,
    reason: ReasonTemplate::Fixed("Stable condition, routine assessment"),
};

const fn red(code: &'static str, condition: Condition, reason: ReasonTemplate) -> Rule {
    Rule {
        code,
        priority: Priority::Red,
        scope: RuleScope::AllAges,
        condition,
        reason,
    }
}

const fn red_pediatric(code: &'static str, condition: Condition, reason: ReasonTemplate) -> Rule {
    Rule {
        code,
        priority: Priority::Red,
        scope: RuleScope::PediatricOnly,
        condition,
        reason,
    }
}

const fn tier(
    priority: Priority,
    code: &'static str,
    condition: Condition,
    reason: ReasonTemplate,
) -> Rule {
    Rule {
        code,
        priority,
        scope: RuleScope::AllAges,
        condition,
        reason,
    }
}

const fn fixed(text: &'static str) -> ReasonTemplate {
    ReasonTemplate::Fixed(text)
}

const fn measured(measure: Measure, prefix: &'static str, suffix: &'static str) -> ReasonTemplate {
    ReasonTemplate::Measured {
        measure,
        prefix,
        suffix,
    }
}

const TACHYCARDIA: Condition = Condition::Above(Measure::HeartRate, 100.0);

/// The emergency department triage protocol, most urgent first
pub static STANDARD_RULES: [Rule; 35] = [
    // RED: immediate, 0 min
    red(
        "RED-01",
        Condition::AnyFlag(&[Symptom::ObstructedAirway, Symptom::FacialBurns, Symptom::Stridor]),
        fixed("Critical airway compromise"),
    ),
    red(
        "RED-02",
        Condition::AnyFlag(&[Symptom::SevereRespiratoryDistress, Symptom::Cyanosis, Symptom::Apnea]),
        fixed("Severe respiratory distress"),
    ),
    red(
        "RED-03",
        Condition::Outside(Measure::RespiratoryRate, 10.0, 30.0),
        measured(Measure::RespiratoryRate, "Critical respiratory rate: ", ""),
    ),
    red(
        "RED-04",
        Condition::Below(Measure::OxygenSaturation, 90.0),
        measured(Measure::OxygenSaturation, "Critical SpO2: ", "%"),
    ),
    red(
        "RED-05",
        Condition::AnyFlag(&[Symptom::CardiacArrest, Symptom::Shock, Symptom::SevereBleeding]),
        fixed("Critical circulatory compromise"),
    ),
    red(
        "RED-06",
        Condition::Below(Measure::SystolicBp, 90.0),
        measured(Measure::SystolicBp, "Hypotension: SBP ", ""),
    ),
    red(
        "RED-07",
        Condition::Flag(Symptom::ChestPainWithHypotension),
        fixed("Chest pain with hemodynamic instability"),
    ),
    red(
        "RED-08",
        Condition::AtMost(Measure::GlasgowTotal, 8.0),
        measured(Measure::GlasgowTotal, "Critically depressed consciousness: GCS ", ""),
    ),
    red(
        "RED-09",
        Condition::Flag(Symptom::SeizureOngoing),
        fixed("Ongoing seizure"),
    ),
    red(
        "RED-10",
        Condition::Flag(Symptom::LethargicUnconscious),
        fixed("Altered level of consciousness"),
    ),
    red(
        "RED-11",
        Condition::AnyFlag(&[
            Symptom::MajorTrauma,
            Symptom::SevereBurns,
            Symptom::Anaphylaxis,
            Symptom::Sepsis,
        ]),
        fixed("Critical condition requiring immediate attention"),
    ),
    red(
        "RED-12",
        Condition::All(&[
            Condition::Flag(Symptom::SuspectedStroke),
            Condition::Flag(Symptom::FocalDeficits),
        ]),
        fixed("Suspected acute stroke with deficits"),
    ),
    red_pediatric(
        "RED-13",
        Condition::All(&[
            Condition::Flag(Symptom::NonBlanchingRash),
            Condition::Flag(Symptom::Fever),
        ]),
        fixed("Non-blanching rash with fever (suspected meningococcemia)"),
    ),
    red_pediatric(
        "RED-14",
        Condition::Flag(Symptom::SevereDehydration),
        fixed("Severe dehydration"),
    ),
    red_pediatric(
        "RED-15",
        Condition::Above(Measure::CapillaryRefill, 3.0),
        measured(Measure::CapillaryRefill, "Prolonged capillary refill: ", "s (shock)"),
    ),
    // ORANGE: very urgent, 5 min
    tier(
        Priority::Orange,
        "ORANGE-01",
        Condition::Flag(Symptom::ModerateRespiratoryDistress),
        fixed("Moderate respiratory distress"),
    ),
    tier(
        Priority::Orange,
        "ORANGE-02",
        Condition::Within(Measure::RespiratoryRate, 21.0, 30.0),
        measured(Measure::RespiratoryRate, "Elevated respiratory rate: ", ""),
    ),
    tier(
        Priority::Orange,
        "ORANGE-03",
        Condition::Within(Measure::OxygenSaturation, 90.0, 94.0),
        measured(Measure::OxygenSaturation, "Low SpO2: ", "%"),
    ),
    tier(
        Priority::Orange,
        "ORANGE-04",
        Condition::All(&[
            Condition::Flag(Symptom::ChestPain),
            Condition::Not(&Condition::Flag(Symptom::ChestPainWithHypotension)),
        ]),
        fixed("Chest pain (possible ACS)"),
    ),
    tier(
        Priority::Orange,
        "ORANGE-05",
        Condition::Below(Measure::MeanArterialPressure, 65.0),
        measured(Measure::MeanArterialPressure, "Low MAP: ", ""),
    ),
    tier(
        Priority::Orange,
        "ORANGE-06",
        Condition::Within(Measure::GlasgowTotal, 9.0, 12.0),
        measured(Measure::GlasgowTotal, "Altered consciousness: GCS ", ""),
    ),
    tier(
        Priority::Orange,
        "ORANGE-07",
        Condition::All(&[
            Condition::Flag(Symptom::FocalDeficits),
            Condition::Not(&Condition::Flag(Symptom::SuspectedStroke)),
        ]),
        fixed("New focal neurological deficit"),
    ),
    tier(
        Priority::Orange,
        "ORANGE-08",
        Condition::Flag(Symptom::Confusion),
        fixed("Acute confusion"),
    ),
    tier(
        Priority::Orange,
        "ORANGE-09",
        Condition::Flag(Symptom::ModerateTrauma),
        fixed("Moderate trauma"),
    ),
    tier(
        Priority::Orange,
        "ORANGE-10",
        Condition::All(&[
            Condition::Flag(Symptom::GiBleed),
            Condition::Not(&Condition::Flag(Symptom::Shock)),
        ]),
        fixed("GI bleed without shock"),
    ),
    // YELLOW: urgent, 30 min
    tier(
        Priority::Yellow,
        "YELLOW-01",
        Condition::Flag(Symptom::MildRespiratorySymptoms),
        fixed("Mild respiratory symptoms"),
    ),
    tier(
        Priority::Yellow,
        "YELLOW-02",
        Condition::All(&[Condition::Flag(Symptom::Fever), TACHYCARDIA]),
        fixed("Fever with tachycardia"),
    ),
    tier(
        Priority::Yellow,
        "YELLOW-03",
        Condition::Flag(Symptom::ModerateDehydration),
        fixed("Moderate dehydration"),
    ),
    tier(
        Priority::Yellow,
        "YELLOW-04",
        Condition::Flag(Symptom::SeizureControlled),
        fixed("Controlled seizures (post-ictal)"),
    ),
    tier(
        Priority::Yellow,
        "YELLOW-05",
        Condition::Flag(Symptom::AbdominalPainModerate),
        fixed("Moderate abdominal pain"),
    ),
    tier(
        Priority::Yellow,
        "YELLOW-06",
        Condition::Within(Measure::GlasgowTotal, 13.0, 14.0),
        fixed("Mild head injury with monitoring needed"),
    ),
    // GREEN: semi-urgent, 60 min
    tier(
        Priority::Green,
        "GREEN-01",
        Condition::Flag(Symptom::MinorInjury),
        fixed("Minor injury"),
    ),
    tier(
        Priority::Green,
        "GREEN-02",
        Condition::All(&[Condition::Flag(Symptom::Fever), Condition::Not(&TACHYCARDIA)]),
        fixed("Mild fever"),
    ),
    tier(
        Priority::Green,
        "GREEN-03",
        Condition::Flag(Symptom::AbdominalPainMild),
        fixed("Mild abdominal pain"),
    ),
    // BLUE: non-urgent, time permitted
    ROUTINE_ASSESSMENT,
];
