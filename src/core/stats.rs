use crate::models::DayEntry;
use crate::utils::time::format_minutes;

/// Totals over a normalized range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeStats {
    pub total_minutes: i64,
    /// Days with a positive worked duration.
    pub days_worked: usize,
    /// Mean over worked days; `None` when nothing was worked.
    pub average_minutes: Option<i64>,
}

impl RangeStats {
    pub fn total_label(&self) -> String {
        format_minutes(self.total_minutes)
    }

    pub fn average_label(&self) -> Option<String> {
        self.average_minutes.map(format_minutes)
    }
}

pub fn compute_stats(entries: &[DayEntry]) -> RangeStats {
    let mut total = 0;
    let mut worked = 0;

    for e in entries {
        let mins = e.record.duration_minutes();
        if mins > 0 {
            total += mins;
            worked += 1;
        }
    }

    RangeStats {
        total_minutes: total,
        days_worked: worked,
        average_minutes: (worked > 0).then(|| total / worked as i64),
    }
}
