use serde::{Deserialize, Serialize};

/// Punch completeness of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    #[serde(rename = "complet")]
    Complete,
    #[serde(rename = "partiel")]
    Partial,
    #[serde(rename = "absent")]
    Absent,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Complete => "complet",
            DayStatus::Partial => "partiel",
            DayStatus::Absent => "absent",
        }
    }
}
