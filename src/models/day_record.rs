use super::{day_type::DayType, origin::Origin, status::DayStatus};
use crate::utils::time::{duration_minutes, format_minutes};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PAUSE_MINUTES: u32 = 60;

/// Date → record map. Ordered, one record per date.
pub type DayMap = BTreeMap<NaiveDate, DayRecord>;

/// One punch entry for a calendar date. The date is the key of the owning
/// map and is not repeated inside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    #[serde(default, with = "hhmm")]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "hhmm")]
    pub end: Option<NaiveTime>,
    #[serde(default = "default_pause")]
    pub pause_minutes: u32,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub day_type: DayType,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub pending_sync: bool,
}

fn default_pause() -> u32 {
    DEFAULT_PAUSE_MINUTES
}

impl Default for DayRecord {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            pause_minutes: DEFAULT_PAUSE_MINUTES,
            note: String::new(),
            day_type: DayType::Normal,
            last_modified: None,
            origin: Origin::User,
            pending_sync: false,
        }
    }
}

impl DayRecord {
    /// Record used to fill dates that have nothing stored.
    pub fn placeholder() -> Self {
        Self {
            pause_minutes: 0,
            ..Self::default()
        }
    }

    /// Empty record sent to backends that have no delete route.
    pub fn tombstone() -> Self {
        Self::placeholder()
    }

    pub fn with_times(start: Option<NaiveTime>, end: Option<NaiveTime>, pause: u32) -> Self {
        Self {
            start,
            end,
            pause_minutes: pause,
            ..Self::default()
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        duration_minutes(self.start, self.end, self.pause_minutes)
    }

    pub fn duration_label(&self) -> String {
        format_minutes(self.duration_minutes())
    }

    pub fn status(&self) -> DayStatus {
        match (self.start, self.end) {
            (Some(_), Some(_)) => DayStatus::Complete,
            (Some(_), None) => DayStatus::Partial,
            _ => DayStatus::Absent,
        }
    }

    /// True when the record carries nothing worth showing or syncing.
    pub fn is_blank(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.note.trim().is_empty()
            && self.day_type == DayType::Normal
    }

    /// Switch the day type; holiday and sick days get their fixed span.
    pub fn apply_day_type(&mut self, day_type: DayType) {
        self.day_type = day_type;
        if let Some(span) = day_type.fixed_span() {
            self.start = Some(span.start);
            self.end = Some(span.end);
            self.pause_minutes = span.pause_minutes;
        }
    }

    /// Stamp a local edit: user-owned, waiting for the remote.
    pub fn touch_local(&mut self, now: DateTime<Utc>) {
        self.last_modified = Some(now);
        self.origin = Origin::User;
        self.pending_sync = true;
    }

    /// Mark the record as mirrored by the remote endpoint.
    pub fn mark_synced(&mut self) {
        self.pending_sync = false;
        self.origin = Origin::Cloud;
    }

    pub fn start_str(&self) -> String {
        fmt_time(self.start)
    }

    pub fn end_str(&self) -> String {
        fmt_time(self.end)
    }
}

pub fn fmt_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

/// A `(date, record)` pair: the element of a normalized range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub record: DayRecord,
}

impl DayEntry {
    pub fn new(date: NaiveDate, record: DayRecord) -> Self {
        Self { date, record }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// `HH:MM` strings on the wire; the empty string means "not punched".
pub(crate) mod hhmm {
    use crate::utils::time::parse_time;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_time(s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid time of day: {s}"))),
        }
    }
}
