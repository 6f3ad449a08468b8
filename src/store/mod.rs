//! Local persistence.
//!
//! A [`KeyValueStore`] backend holds raw JSON strings; [`LocalStore`] sits on
//! top and never fails: unreadable or corrupt values read as absent and
//! failed writes return `false`. Every failure is logged.

mod memory;

pub use memory::MemoryKv;

use crate::errors::AppResult;
use crate::models::DayMap;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Key of the blob mapping date → day record.
pub const DAYS_KEY: &str = "tt_days";
/// Key of the small blob recording the initial historical import.
pub const IMPORT_STATUS_KEY: &str = "tt_import_status";

/// Raw string storage.
pub trait KeyValueStore: Send {
    fn read(&self, key: &str) -> AppResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&mut self, key: &str) -> AppResult<()>;

    /// Record an operation in the backend's audit trail, if it keeps one.
    fn audit(&self, _operation: &str, _target: &str, _message: &str) {}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStatus {
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub imported: usize,
}

pub struct LocalStore {
    backend: Box<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryKv::default())
    }

    /// Parsed value for `key`, or `None` when absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "local store read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt value in local store, treated as absent");
                None
            }
        }
    }

    /// Serialize and persist `value`. Returns `false` on any failure.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "cannot serialize value for local store");
                return false;
            }
        };

        match self.backend.write(key, &raw) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "local store write failed");
                false
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "local store remove failed");
                false
            }
        }
    }

    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        self.backend.audit(operation, target, message);
    }

    // ---------------------------
    // Typed accessors
    // ---------------------------

    pub fn load_days(&self) -> DayMap {
        self.get(DAYS_KEY).unwrap_or_default()
    }

    pub fn save_days(&mut self, days: &DayMap) -> bool {
        self.set(DAYS_KEY, days)
    }

    pub fn import_status(&self) -> ImportStatus {
        self.get(IMPORT_STATUS_KEY).unwrap_or_default()
    }

    pub fn save_import_status(&mut self, status: &ImportStatus) -> bool {
        self.set(IMPORT_STATUS_KEY, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayRecord;
    use chrono::NaiveDate;

    #[test]
    fn absent_and_corrupt_values_read_as_none() {
        let mut kv = MemoryKv::default();
        kv.write("broken", "{not json").unwrap();
        let store = LocalStore::new(kv);

        assert_eq!(store.get::<u32>("missing"), None);
        assert_eq!(store.get::<u32>("broken"), None);
        assert!(store.load_days().is_empty());
    }

    #[test]
    fn quota_failure_returns_false() {
        let mut store = LocalStore::new(MemoryKv::with_quota(16));
        assert!(store.set("small", &1u8));
        assert!(!store.set("big", &"x".repeat(64)));
        assert_eq!(store.get::<String>("big"), None);
    }

    #[test]
    fn days_blob_round_trips() {
        let mut store = LocalStore::in_memory();
        let mut days = DayMap::new();
        days.insert(
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            DayRecord::default(),
        );
        assert!(store.save_days(&days));
        assert_eq!(store.load_days(), days);
    }

    #[test]
    fn import_status_defaults_to_not_completed() {
        let store = LocalStore::in_memory();
        assert!(!store.import_status().completed);
    }
}
