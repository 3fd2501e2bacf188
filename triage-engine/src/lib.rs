//! Emergency department triage classifier for ERCare Engine
//!
//! Maps a patient's age group, vital signs and symptom flags to one of five
//! acuity tiers, each with a maximum time-to-be-seen and a justification.
//!
//! # Priority Tiers
//!
//! | Level | Color  | Name        | Time to see    |
//! |-------|--------|-------------|----------------|
//! | 1     | red    | IMMEDIATE   | 0 min          |
//! | 2     | orange | VERY URGENT | 5 min          |
//! | 3     | yellow | URGENT      | 30 min         |
//! | 4     | green  | SEMI-URGENT | 60 min         |
//! | 5     | blue   | NON-URGENT  | Time-permitted |
//!
//! # Evaluation
//!
//! The protocol is an ordered rule table ([`STANDARD_RULES`]). Rules are
//! checked top to bottom and the first match decides the outcome; the final
//! BLUE rule always matches, so every well-formed request is classified.
//! Rules that read a measurement never match when it was not recorded, and a
//! Glasgow Coma Scale total is only computed from all three components.
//! Three RED rules apply to pediatric patients only.
//!
//! The classifier is pure: no I/O, no shared state, same input same output.
//!
//! # Example
//!
//! ```rust
//! use triage_engine::{classify, SymptomFlags, VitalSigns};
//!
//! let vitals = VitalSigns {
//!     oxygen_saturation: Some(85.0),
//!     ..Default::default()
//! };
//!
//! let result = classify("adult", &vitals, &SymptomFlags::default())?;
//! assert_eq!(result.priority_level(), 1);
//! assert_eq!(result.priority_color(), "red");
//! assert_eq!(result.primary_reason(), "Critical SpO2: 85%");
//! # Ok::<(), triage_engine::TriageError>(())
//! ```

pub mod classifier;
pub mod error;
pub mod models;
pub mod priority;
pub mod reasons;
pub mod rules;

pub use classifier::{classify, Classification, TriageClassifier};
pub use error::{Result, TriageError};
pub use models::{AgeGroup, Symptom, SymptomFlags, VitalSigns};
pub use priority::Priority;
pub use reasons::ReasonTemplate;
pub use rules::{Condition, Measure, Rule, RuleScope, STANDARD_RULES};
