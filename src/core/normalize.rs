//! Range normalization: the single adapter between the loose shapes served
//! by the backends and the canonical date map, plus gap filling.

use crate::models::{DayEntry, DayMap, DayRecord, DayType, Origin};
use crate::remote::RangePayload;
use crate::remote::wire::{PunchItem, RemoteRecord};
use crate::utils::date::{days_between, parse_date};
use crate::utils::time::{parse_minutes_label, parse_time};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use serde_json::Value;

/// Convert any range payload into cloud-owned records keyed by date.
/// Rows that cannot be dated are dropped with a warning.
pub fn normalize_remote(payload: RangePayload, fetched_at: DateTime<Utc>) -> DayMap {
    let mut out = DayMap::new();

    match payload {
        RangePayload::Rows(rows) => {
            for row in rows {
                match record_from_row(&row) {
                    Some((date, rec)) => {
                        out.insert(date, rec);
                    }
                    None => tracing::warn!(?row, "skipping undatable remote row"),
                }
            }
        }
        RangePayload::Records(map) => {
            for (key, remote) in map {
                match parse_remote_date(&key) {
                    Some(date) => {
                        out.insert(date, record_from_remote(remote));
                    }
                    None => tracing::warn!(key = %key, "skipping remote record with invalid date"),
                }
            }
        }
        RangePayload::Items { items } => {
            out = records_from_punches(&items);
        }
    }

    for rec in out.values_mut() {
        rec.origin = Origin::Cloud;
        rec.pending_sync = false;
        if rec.last_modified.is_none() {
            rec.last_modified = Some(fetched_at);
        }
    }
    out
}

/// One entry per date in `[start, end]`, ascending, with empty placeholders
/// where nothing is stored. An inverted range yields nothing.
pub fn normalize_range(start: NaiveDate, end: NaiveDate, days: &DayMap) -> Vec<DayEntry> {
    days_between(start, end)
        .map(|d| {
            let record = days.get(&d).cloned().unwrap_or_else(DayRecord::placeholder);
            DayEntry::new(d, record)
        })
        .collect()
}

// ---------------------------
// Row shape: [date, start, end, pauseLabel, durationLabel, note]
// ---------------------------

fn record_from_row(row: &[Value]) -> Option<(NaiveDate, DayRecord)> {
    let date = row.first().and_then(value_str).and_then(|s| parse_remote_date(&s))?;

    let record = DayRecord {
        start: row.get(1).and_then(value_str).and_then(|s| parse_remote_time(&s)),
        end: row.get(2).and_then(value_str).and_then(|s| parse_remote_time(&s)),
        pause_minutes: row.get(3).and_then(parse_minutes_label).unwrap_or(0),
        // index 4 is the backend's duration label, always recomputed
        note: row.get(5).and_then(value_str).unwrap_or_default(),
        ..DayRecord::default()
    };
    Some((date, record))
}

// ---------------------------
// Record shape
// ---------------------------

fn record_from_remote(remote: RemoteRecord) -> DayRecord {
    let day_type = match remote.day_type.as_deref() {
        None => DayType::Normal,
        Some(raw) => DayType::from_remote(raw).unwrap_or_else(|| {
            tracing::warn!(raw, "unknown remote day type, using normal");
            DayType::Normal
        }),
    };

    DayRecord {
        start: remote.start.as_deref().and_then(parse_remote_time),
        end: remote.end.as_deref().and_then(parse_remote_time),
        pause_minutes: remote
            .pause
            .as_ref()
            .and_then(parse_minutes_label)
            .unwrap_or(crate::models::day_record::DEFAULT_PAUSE_MINUTES),
        note: remote.note.unwrap_or_default(),
        day_type,
        last_modified: remote
            .timestamp
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc)),
        ..DayRecord::default()
    }
}

// ---------------------------
// Punch shape: earliest "in" is the start, latest "out" the end
// ---------------------------

fn records_from_punches(items: &[PunchItem]) -> DayMap {
    let mut out = DayMap::new();

    for item in items {
        let Ok(ts) = DateTime::parse_from_rfc3339(&item.timestamp) else {
            tracing::warn!(timestamp = %item.timestamp, "skipping punch with invalid timestamp");
            continue;
        };
        let local = ts.with_timezone(&Local).naive_local();
        let (date, time) = (local.date(), local.time());

        let rec = out.entry(date).or_insert_with(|| DayRecord {
            last_modified: Some(ts.with_timezone(&Utc)),
            ..DayRecord::default()
        });

        match item.kind.trim().to_lowercase().as_str() {
            "in" | "entree" | "entrée" | "start" => {
                rec.start = Some(rec.start.map_or(time, |s| s.min(time)));
            }
            "out" | "sortie" | "end" => {
                rec.end = Some(rec.end.map_or(time, |e| e.max(time)));
            }
            other => tracing::debug!(kind = other, "ignoring punch kind"),
        }

        if let Some(note) = item.note.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            if rec.note.is_empty() {
                rec.note = note.to_string();
            } else {
                rec.note = format!("{}; {}", rec.note, note);
            }
        }

        let stamp = ts.with_timezone(&Utc);
        if rec.last_modified.is_none_or(|m| m < stamp) {
            rec.last_modified = Some(stamp);
        }
    }
    out
}

// ---------------------------
// Scalars
// ---------------------------

fn value_str(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `YYYY-MM-DD`, or a full timestamp whose date part is taken.
fn parse_remote_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    parse_date(s).or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Local).date_naive())
    })
}

/// `HH:MM[:SS]`, or a spreadsheet time cell serialized as a timestamp
/// on the 1899-12-30 epoch.
fn parse_remote_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    parse_time(s).or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Local).time())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayStatus;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn fills_gaps_in_ascending_order() {
        let entries = normalize_range(d("2025-01-01"), d("2025-01-03"), &DayMap::new());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].date, d("2025-01-01"));
        assert_eq!(entries[2].date, d("2025-01-03"));
        for e in &entries {
            assert_eq!(e.record.start_str(), "");
            assert_eq!(e.record.end_str(), "");
            assert_eq!(e.record.note, "");
            assert_eq!(e.record.duration_label(), "00h00");
            assert_eq!(e.record.status(), DayStatus::Absent);
        }
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(normalize_range(d("2025-01-03"), d("2025-01-01"), &DayMap::new()).is_empty());
    }

    #[test]
    fn keeps_stored_records() {
        let mut days = DayMap::new();
        days.insert(
            d("2025-01-02"),
            DayRecord::with_times(parse_time("09:00"), parse_time("17:00"), 60),
        );
        let entries = normalize_range(d("2025-01-01"), d("2025-01-03"), &days);
        assert_eq!(entries[1].record.duration_label(), "07h00");
        assert_eq!(entries[0].record.duration_minutes(), 0);
    }

    #[test]
    fn rows_are_adapted_and_duration_recomputed() {
        let payload: RangePayload = serde_json::from_str(
            r#"[
                ["2025-01-03","08:30","12:00","0","99h99","morning"],
                ["2025-01-02","09:00","17:00","01h00","07h00",""],
                ["not a date","09:00","17:00","60","",""]
            ]"#,
        )
        .unwrap();
        let map = normalize_remote(payload, Utc::now());
        assert_eq!(map.len(), 2);

        let first = map.iter().next().unwrap();
        assert_eq!(*first.0, d("2025-01-02"));
        assert_eq!(first.1.pause_minutes, 60);
        assert_eq!(first.1.origin, Origin::Cloud);
        assert!(!first.1.pending_sync);

        let morning = &map[&d("2025-01-03")];
        assert_eq!(morning.duration_label(), "03h30");
        assert_eq!(morning.note, "morning");
    }

    #[test]
    fn oversized_pause_label_falls_back_to_zero() {
        let payload: RangePayload = serde_json::from_str(
            r#"[["2025-01-02","09:00","17:00","99999999h00","",""]]"#,
        )
        .unwrap();
        let map = normalize_remote(payload, Utc::now());
        let rec = &map[&d("2025-01-02")];
        assert_eq!(rec.pause_minutes, 0);
        assert_eq!(rec.duration_label(), "08h00");
    }

    #[test]
    fn records_accept_french_aliases_and_types() {
        let payload: RangePayload = serde_json::from_str(
            r#"{
                "2025-05-01": {"type": "férié"},
                "2025-05-02": {"debut": "09:15", "fin": "18:00", "pause": "45", "note": "x", "type": "remote"}
            }"#,
        )
        .unwrap();
        let map = normalize_remote(payload, Utc::now());
        assert_eq!(map[&d("2025-05-01")].day_type, DayType::Holiday);
        let r = &map[&d("2025-05-02")];
        assert_eq!(r.day_type, DayType::Remote);
        assert_eq!(r.pause_minutes, 45);
        assert_eq!(r.duration_minutes(), 480);
    }

    #[test]
    fn punches_group_per_day() {
        let day = d("2025-03-10");
        let at = |h: u32, m: u32| {
            day.and_hms_opt(h, m, 0)
                .unwrap()
                .and_local_timezone(Local)
                .unwrap()
                .to_rfc3339()
        };
        let json = serde_json::json!({
            "items": [
                {"timestamp": at(12, 0), "type": "out"},
                {"timestamp": at(8, 45), "type": "in", "note": "early"},
                {"timestamp": at(13, 0), "type": "in"},
                {"timestamp": at(17, 30), "type": "out"},
                {"timestamp": "garbage", "type": "in"}
            ]
        });
        let payload: RangePayload = serde_json::from_value(json).unwrap();
        let map = normalize_remote(payload, Utc::now());
        let r = &map[&day];
        assert_eq!(r.start_str(), "08:45");
        assert_eq!(r.end_str(), "17:30");
        assert_eq!(r.note, "early");
    }
}
