use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Kind of day a record describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    #[default]
    Normal,
    Holiday,
    Leave,
    Sick,
    Remote,
}

const SPAN_START: NaiveTime = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
const SPAN_END: NaiveTime = NaiveTime::from_hms_opt(17, 0, 0).unwrap();

/// Span applied automatically when a day is marked holiday or sick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSpan {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub pause_minutes: u32,
}

impl DayType {
    pub const ALL: [DayType; 5] = [
        DayType::Normal,
        DayType::Holiday,
        DayType::Leave,
        DayType::Sick,
        DayType::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Normal => "normal",
            DayType::Holiday => "holiday",
            DayType::Leave => "leave",
            DayType::Sick => "sick",
            DayType::Remote => "remote",
        }
    }

    /// Human label used in tables and exports.
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Normal => "Normal",
            DayType::Holiday => "Holiday",
            DayType::Leave => "Leave",
            DayType::Sick => "Sick",
            DayType::Remote => "Remote",
        }
    }

    /// Lenient parser for values coming from remote deployments, which
    /// mix English codes with the French labels of the spreadsheet UI.
    pub fn from_remote(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "normal" | "travail" | "work" => Some(DayType::Normal),
            "holiday" | "ferie" | "férié" | "jour férié" => Some(DayType::Holiday),
            "leave" | "conge" | "congé" | "conges" | "congés" | "vacation" => Some(DayType::Leave),
            "sick" | "maladie" => Some(DayType::Sick),
            "remote" | "teletravail" | "télétravail" => Some(DayType::Remote),
            _ => None,
        }
    }

    /// Holiday and sick days carry a conventional 8-hour span.
    pub fn fixed_span(&self) -> Option<FixedSpan> {
        match self {
            DayType::Holiday | DayType::Sick => Some(FixedSpan {
                start: SPAN_START,
                end: SPAN_END,
                pause_minutes: 60,
            }),
            _ => None,
        }
    }

    /// Days that show up in the leave list and take visual precedence
    /// over the punch status.
    pub fn is_absence(&self) -> bool {
        matches!(self, DayType::Holiday | DayType::Leave | DayType::Sick)
    }
}

impl FromStr for DayType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayType::from_remote(s).ok_or_else(|| {
            let known: Vec<&str> = DayType::ALL.iter().map(DayType::as_str).collect();
            AppError::InvalidDayType(format!("'{}' (expected one of: {})", s, known.join(", ")))
        })
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
