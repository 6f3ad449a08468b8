//! Formatting utilities used for CLI and export outputs.

use chrono::NaiveDate;

/// `YYYY-MM-DD → YYYY-MM-DD`, or the single date when both ends match.
pub fn describe_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format("%Y-%m-%d").to_string()
    } else {
        format!("{} → {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
    }
}
