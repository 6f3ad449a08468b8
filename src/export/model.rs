use crate::models::DayEntry;
use crate::utils::date::weekday_short;

/// Header shared by CSV and XLSX.
pub(crate) const HEADERS: [&str; 9] = [
    "Date", "Day", "Start", "End", "Pause", "Duration", "Type", "Status", "Note",
];

/// One flattened line of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub date: String,
    pub weekday: String,
    pub start: String,
    pub end: String,
    /// Minutes, empty when the day has no times.
    pub pause: String,
    pub duration: String,
    pub day_type: String,
    pub status: String,
    pub note: String,
}

impl ExportRow {
    pub fn from_entry(e: &DayEntry) -> Self {
        let r = &e.record;
        let has_times = r.start.is_some() || r.end.is_some();
        Self {
            date: e.date_str(),
            weekday: weekday_short(e.date).to_string(),
            start: r.start_str(),
            end: r.end_str(),
            pause: if has_times {
                r.pause_minutes.to_string()
            } else {
                String::new()
            },
            duration: r.duration_label(),
            day_type: r.day_type.as_str().to_string(),
            status: r.status().as_str().to_string(),
            note: r.note.clone(),
        }
    }

    pub(crate) fn cells(&self) -> [&str; 9] {
        [
            &self.date,
            &self.weekday,
            &self.start,
            &self.end,
            &self.pause,
            &self.duration,
            &self.day_type,
            &self.status,
            &self.note,
        ]
    }
}
