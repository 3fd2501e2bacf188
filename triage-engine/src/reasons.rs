//! Justification text for a matched rule.
//!
//! Templating is kept apart from rule evaluation so reason wording can be
//! tested on its own.

use crate::models::VitalSigns;
use crate::rules::Measure;

/// How a rule phrases its justification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonTemplate {
    Fixed(&'static str),
    /// `{prefix}{value}{suffix}` with the triggering measurement
    Measured {
        measure: Measure,
        prefix: &'static str,
        suffix: &'static str,
    },
}

impl ReasonTemplate {
    pub fn render(&self, vitals: &VitalSigns) -> String {
        match *self {
            ReasonTemplate::Fixed(text) => text.to_string(),
            ReasonTemplate::Measured {
                measure,
                prefix,
                suffix,
            } => {
                let value = measure
                    .read(vitals)
                    .map_or_else(|| "not recorded".to_string(), |v| format_value(measure, v));
                format!("{prefix}{value}{suffix}")
            }
        }
    }

    /// Human-readable template with a `{value}` placeholder
    pub fn describe(&self) -> String {
        match *self {
            ReasonTemplate::Fixed(text) => text.to_string(),
            ReasonTemplate::Measured { prefix, suffix, .. } => format!("{prefix}{{value}}{suffix}"),
        }
    }
}

fn format_value(measure: Measure, value: f64) -> String {
    match measure {
        Measure::GlasgowTotal | Measure::MeanArterialPressure => format!("{value:.0}"),
        _ => format_measurement(value),
    }
}

/// Render a measurement without a trailing `.0` on whole numbers
pub fn format_measurement(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
