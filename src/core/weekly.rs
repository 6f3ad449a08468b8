//! Weekly table: Monday to Sunday around an anchor date.

use crate::core::calendar::cell_tone;
use crate::core::normalize::normalize_range;
use crate::core::stats::{RangeStats, compute_stats};
use crate::models::{DayEntry, DayMap};
use crate::utils::colors::{colorize_optional, tone_color, RESET};
use crate::utils::date::{week_start, weekday_short};
use crate::utils::table::{Column, Table};
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone)]
pub struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayEntry>,
    pub stats: RangeStats,
}

pub fn build_week(anchor: NaiveDate, days: &DayMap) -> WeekView {
    let start = week_start(anchor);
    let end = start + Duration::days(6);
    let entries = normalize_range(start, end, days);
    let stats = compute_stats(&entries);

    WeekView {
        start,
        end,
        days: entries,
        stats,
    }
}

impl WeekView {
    /// Plain-text table; `color` adds ANSI tones per day.
    pub fn render(&self, color: bool) -> String {
        let mut out = format!(
            "Week {} → {}\n\n",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        );
        out.push_str(&render_days(&self.days, color));
        out.push_str(&render_totals(&self.stats));
        out
    }
}

/// Day-per-line table shared by the weekly view and `list`.
pub fn render_days(entries: &[DayEntry], color: bool) -> String {
    let mut table = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Day", 3),
        Column::new("Start", 5),
        Column::new("End", 5),
        Column::new("Pause", 5),
        Column::new("Worked", 6),
        Column::new("Type", 7),
        Column::new("Status", 7),
        Column::new("Note", 0),
    ]);

    for e in entries {
        let r = &e.record;
        let mut row = vec![
            e.date_str(),
            weekday_short(e.date).to_string(),
            r.start_str(),
            r.end_str(),
            if r.start.is_some() || r.end.is_some() {
                r.pause_minutes.to_string()
            } else {
                String::new()
            },
            r.duration_label(),
            r.day_type.label().to_string(),
            r.status().as_str().to_string(),
            r.note.clone(),
        ];
        if r.pending_sync {
            row[7].push_str(" ⟳");
        }
        if color {
            let tone = tone_color(cell_tone(r));
            row[0] = format!("{tone}{}{RESET}", row[0]);
            row[5] = colorize_optional(&row[5]);
        }
        table.add_row(row);
    }
    table.render()
}

/// `Total | Days worked | Average` footer line.
pub fn render_totals(stats: &RangeStats) -> String {
    let mut out = format!(
        "\nTotal: {}  |  Days worked: {}",
        stats.total_label(),
        stats.days_worked
    );
    if let Some(avg) = stats.average_label() {
        out.push_str(&format!("  |  Average: {}", avg));
    }
    out.push('\n');
    out
}
