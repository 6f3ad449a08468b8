//! Range expressions shared by `export --range` and the `--period` flags.

use crate::errors::{AppError, AppResult};
use crate::utils::date::{month_bounds, parse_date, week_start};
use chrono::{Duration, NaiveDate};

fn invalid(expr: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("{} ({})", expr, why))
}

/// Bounds of one side of a range: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn bounds_of(part: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match part.len() {
        // YYYY
        4 => {
            let y: i32 = part.parse().map_err(|_| invalid(part, "invalid year"))?;
            let first = month_bounds(y, 1).ok_or_else(|| invalid(part, "invalid year"))?;
            let last = month_bounds(y, 12).ok_or_else(|| invalid(part, "invalid year"))?;
            Ok((first.0, last.1))
        }
        // YYYY-MM
        7 => {
            let (y, m) = part
                .split_once('-')
                .ok_or_else(|| invalid(part, "expected YYYY-MM"))?;
            let y: i32 = y.parse().map_err(|_| invalid(part, "invalid year"))?;
            let m: u32 = m.parse().map_err(|_| invalid(part, "invalid month"))?;
            month_bounds(y, m).ok_or_else(|| invalid(part, "invalid month"))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(part).ok_or_else(|| invalid(part, "invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid(part, "unsupported range format")),
    }
}

/// Parse `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or `a:b` where both sides share
/// one of those shapes.
pub fn parse_range(expr: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let expr = expr.trim();
    let (start, end) = match expr.split_once(':') {
        Some((a, b)) => {
            let (a, b) = (a.trim(), b.trim());
            if a.len() != b.len() {
                return Err(invalid(expr, "start and end must have same format"));
            }
            (bounds_of(a)?.0, bounds_of(b)?.1)
        }
        None => bounds_of(expr)?,
    };

    if start > end {
        return Err(invalid(expr, "start is after end"));
    }
    Ok((start, end))
}

/// Like [`parse_range`], plus `today`, `week` and `month` relative to `today`.
pub fn parse_period(expr: &str, today: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
    match expr.trim().to_lowercase().as_str() {
        "today" => Ok((today, today)),
        "week" => {
            let start = week_start(today);
            Ok((start, start + Duration::days(6)))
        }
        "month" => {
            use chrono::Datelike;
            month_bounds(today.year(), today.month()).ok_or_else(|| invalid(expr, "invalid month"))
        }
        _ => parse_range(expr),
    }
}
