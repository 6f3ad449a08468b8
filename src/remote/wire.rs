//! Shapes exchanged with the backends. Everything the deployments disagree
//! on is kept loose here and normalized in `core::normalize`.

use crate::models::{DayRecord, DayType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of a range query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RangePayload {
    /// `[[date, start, end, pauseLabel, durationLabel, note], ...]`
    Rows(Vec<Vec<Value>>),
    /// `{items: [{timestamp, type, note}, ...]}`: raw punches.
    Items { items: Vec<PunchItem> },
    /// `{date: {start, end, pause, note, type}, ...}`
    Records(BTreeMap<String, RemoteRecord>),
}

impl RangePayload {
    pub fn is_empty(&self) -> bool {
        match self {
            RangePayload::Rows(rows) => rows.is_empty(),
            RangePayload::Items { items } => items.is_empty(),
            RangePayload::Records(map) => map.is_empty(),
        }
    }
}

/// A record as some backends store it. French field names from older
/// spreadsheets are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteRecord {
    #[serde(default, alias = "debut")]
    pub start: Option<String>,
    #[serde(default, alias = "fin")]
    pub end: Option<String>,
    #[serde(default, alias = "pauseMinutes")]
    pub pause: Option<Value>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, rename = "type", alias = "dayType")]
    pub day_type: Option<String>,
    #[serde(default, alias = "lastModified")]
    pub timestamp: Option<String>,
}

/// A single punch as logged by the punch-style backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PunchItem {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// POST body of an upsert.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<&'a str>,
    pub date: String,
    pub start: String,
    pub end: String,
    pub pause: u32,
    pub note: &'a str,
    #[serde(rename = "type")]
    pub day_type: DayType,
    pub timestamp: DateTime<Utc>,
}

impl<'a> UpsertPayload<'a> {
    pub fn new(user: Option<&'a str>, date: NaiveDate, record: &'a DayRecord) -> Self {
        Self {
            user,
            date: date.format("%Y-%m-%d").to_string(),
            start: record.start_str(),
            end: record.end_str(),
            pause: record.pause_minutes,
            note: &record.note,
            day_type: record.day_type,
            timestamp: record.last_modified.unwrap_or_else(Utc::now),
        }
    }
}

/// POST body of a delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeletePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<&'a str>,
    pub date: String,
}

/// Interpret a write acknowledgement. `{ok:false}` is a rejection, any
/// other body (including none) is accepted.
pub fn check_ack(body: &str) -> Result<(), String> {
    if body.trim().is_empty() {
        return Ok(());
    }
    let Ok(v) = serde_json::from_str::<Value>(body) else {
        tracing::debug!("non-JSON acknowledgement accepted");
        return Ok(());
    };
    match v.get("ok") {
        Some(Value::Bool(false)) => Err(v
            .get("error")
            .or_else(|| v.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("ok=false")
            .to_string()),
        _ => Ok(()),
    }
}

/// Status string of a ping answer (`{status: "..."}`), `ok` otherwise.
pub fn ping_status(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("status").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "ok".to_string())
}
