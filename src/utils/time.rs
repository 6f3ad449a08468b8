//! Time utilities: parsing HH:MM, duration computations, formatting minutes, etc.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde_json::Value;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let duration = end - start;
    duration.num_minutes()
}

/// Worked minutes for a punched span: `(end - start) - pause`, clamped at 0.
/// Missing punches yield 0. The end is assumed on the same calendar day.
pub fn duration_minutes(start: Option<NaiveTime>, end: Option<NaiveTime>, pause: u32) -> i64 {
    match (start, end) {
        (Some(s), Some(e)) => (minutes_between(s, e) - i64::from(pause)).max(0),
        _ => 0,
    }
}

/// Format minutes as `HHhMM`. Non-positive values render as `00h00`.
pub fn format_minutes(mins: i64) -> String {
    if mins <= 0 {
        return "00h00".to_string();
    }
    format!("{:02}h{:02}", mins / 60, mins % 60)
}

/// Parse a duration label as written by spreadsheet backends:
/// `60`, `"60"`, `"60 min"`, `"01h00"`, `"1:00"`.
pub fn parse_minutes_label(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|m| u32::try_from(m).ok()),
        Value::String(s) => parse_minutes_str(s),
        _ => None,
    }
}

fn parse_minutes_str(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Ok(m) = s.trim_end_matches("min").trim().parse::<u32>() {
        return Some(m);
    }

    let (h, m) = s.split_once('h').or_else(|| s.split_once(':'))?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = if m.trim().is_empty() {
        0
    } else {
        m.trim().parse().ok()?
    };
    h.checked_mul(60)?.checked_add(m)
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}
