use serde::{Deserialize, Serialize};

/// Time-of-day classification driving the sky and decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    PreFajr,
    Dawn,
    Day,
    Sunset,
    Night,
}

impl DayPhase {
    pub fn display_name(&self) -> &'static str {
        match self {
            DayPhase::PreFajr => "Pre-Fajr",
            DayPhase::Dawn => "Dawn",
            DayPhase::Day => "Day",
            DayPhase::Sunset => "Sunset",
            DayPhase::Night => "Night",
        }
    }
}

impl std::fmt::Display for DayPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which of the two night palettes applies while the phase is `Night`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NightDepth {
    Deep,
    AfterMaghrib,
}

/// Position of a day marker relative to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotStatus {
    Past,
    Current,
    Future,
}
