use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Triage acuity tier.
///
/// Level, color, name and time-to-see are all derived from the variant, so
/// no other combination can be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Red = 1,
    Orange = 2,
    Yellow = 3,
    Green = 4,
    Blue = 5,
}

impl Priority {
    /// All tiers, most urgent first
    pub const ALL: [Priority; 5] = [
        Priority::Red,
        Priority::Orange,
        Priority::Yellow,
        Priority::Green,
        Priority::Blue,
    ];

    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Priority::Red),
            2 => Some(Priority::Orange),
            3 => Some(Priority::Yellow),
            4 => Some(Priority::Green),
            5 => Some(Priority::Blue),
            _ => None,
        }
    }

    /// 1 is most urgent
    pub const fn level(self) -> u8 {
        self as u8
    }

    pub const fn color(self) -> &'static str {
        match self {
            Priority::Red => "red",
            Priority::Orange => "orange",
            Priority::Yellow => "yellow",
            Priority::Green => "green",
            Priority::Blue => "blue",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Priority::Red => "IMMEDIATE",
            Priority::Orange => "VERY URGENT",
            Priority::Yellow => "URGENT",
            Priority::Green => "SEMI-URGENT",
            Priority::Blue => "NON-URGENT",
        }
    }

    /// Maximum time before the patient must be seen by a clinician
    pub const fn time_to_see(self) -> &'static str {
        match self {
            Priority::Red => "0 min",
            Priority::Orange => "5 min",
            Priority::Yellow => "30 min",
            Priority::Green => "60 min",
            Priority::Blue => "Time-permitted",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.color())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Priority", 4)?;
        state.serialize_field("priority_level", &self.level())?;
        state.serialize_field("priority_color", self.color())?;
        state.serialize_field("priority_name", self.name())?;
        state.serialize_field("time_to_see", self.time_to_see())?;
        state.end()
    }
}
