//! Leave list: holiday, leave and sick days in a range.

use crate::models::{DayMap, DayType};
use crate::utils::date::weekday_short;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveEntry {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub note: String,
}

pub fn collect_leaves(days: &DayMap, start: NaiveDate, end: NaiveDate) -> Vec<LeaveEntry> {
    if start > end {
        return Vec::new();
    }
    days.range(start..=end)
        .filter(|(_, r)| r.day_type.is_absence())
        .map(|(d, r)| LeaveEntry {
            date: *d,
            day_type: r.day_type,
            note: r.note.clone(),
        })
        .collect()
}

/// Day count per absence type.
pub fn count_by_type(entries: &[LeaveEntry]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for e in entries {
        *counts.entry(e.day_type.label()).or_insert(0) += 1;
    }
    counts
}

pub fn render(entries: &[LeaveEntry]) -> String {
    if entries.is_empty() {
        return "No leave, holiday or sick days in this period.\n".to_string();
    }

    let mut out = String::new();
    for e in entries {
        out.push_str(&format!(
            "{} {}  {:<8} {}\n",
            e.date.format("%Y-%m-%d"),
            weekday_short(e.date),
            e.day_type.label(),
            e.note
        ));
    }

    let summary: Vec<String> = count_by_type(entries)
        .into_iter()
        .map(|(label, n)| format!("{label}: {n}"))
        .collect();
    out.push_str(&format!("\n{}\n", summary.join("  |  ")));
    out
}
