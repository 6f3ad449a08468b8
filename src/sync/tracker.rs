//! The reconciliation controller.
//!
//! `Tracker` owns the local store and the optional remote endpoint. Local
//! writes land first and are stamped `pendingSync`; the remote is then
//! told, and a successful push clears the flag. Refreshes from the cloud
//! never overwrite a record the user still owns.

use crate::core::normalize::normalize_remote;
use crate::errors::{AppError, AppResult};
use crate::models::{DayEntry, DayMap, DayRecord, DayType, Origin};
use crate::remote::RemoteEndpoint;
use crate::store::{ImportStatus, LocalStore};
use crate::utils::date::{days_between, is_weekend};
use chrono::{NaiveDate, NaiveTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchKind {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub stored: bool,
    pub synced: bool,
}

/// Handle of one refresh. Only the most recently issued ticket may apply
/// its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Remote records inserted or overwriting a cloud-owned local one.
    pub applied: usize,
    /// Remote records ignored because the local one is user-owned or pending.
    pub kept_local: usize,
    /// Cloud-owned local records the remote no longer has.
    pub removed: usize,
    /// The result belonged to a superseded refresh and was dropped.
    pub stale: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub pushed: usize,
    pub remaining: usize,
    pub stopped_early: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkOutcome {
    pub marked: usize,
    pub skipped_weekends: usize,
    pub sync: SyncReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// `None` when no remote is configured.
    pub remote_deleted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    AlreadyDone(ImportStatus),
    Imported(RefreshReport),
}

pub struct Tracker {
    store: LocalStore,
    remote: Option<Arc<dyn RemoteEndpoint>>,
    online: bool,
    generation: u64,
    default_pause: u32,
}

impl Tracker {
    pub fn new(store: LocalStore, remote: Option<Arc<dyn RemoteEndpoint>>) -> Self {
        let online = remote.is_some();
        Self {
            store,
            remote,
            online,
            generation: 0,
            default_pause: crate::models::day_record::DEFAULT_PAUSE_MINUTES,
        }
    }

    /// Pause given to records created by a punch or a period mark.
    pub fn with_default_pause(mut self, minutes: u32) -> Self {
        self.default_pause = minutes;
        self
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Last known reachability. Always `false` without a remote.
    pub fn is_online(&self) -> bool {
        self.remote.is_some() && self.online
    }

    pub fn load_days(&self) -> DayMap {
        self.store.load_days()
    }

    pub fn get_day(&self, date: NaiveDate) -> Option<DayRecord> {
        self.store.load_days().remove(&date)
    }

    /// Stored records in `[start, end]`, ascending. No gap filling.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<DayEntry> {
        if start > end {
            return Vec::new();
        }
        self.store
            .load_days()
            .range(start..=end)
            .map(|(d, r)| DayEntry::new(*d, r.clone()))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.store.load_days().values().filter(|r| r.pending_sync).count()
    }

    fn new_record(&self) -> DayRecord {
        DayRecord {
            pause_minutes: self.default_pause,
            ..DayRecord::default()
        }
    }

    // ---------------------------
    // Local writes
    // ---------------------------

    /// Full overwrite of one date, then a push when a remote is configured.
    pub async fn save_day(&mut self, date: NaiveDate, mut record: DayRecord) -> SaveOutcome {
        record.touch_local(Utc::now());

        let mut days = self.store.load_days();
        days.insert(date, record);
        if !self.store.save_days(&days) {
            warn!(%date, "day not stored locally");
            return SaveOutcome::default();
        }
        self.store.audit("save", &date.to_string(), "local save");

        let synced = self.push_one(date).await;
        SaveOutcome {
            stored: true,
            synced,
        }
    }

    /// Set start (`In`) or end (`Out`) on the date's record, keeping the rest.
    pub async fn punch(
        &mut self,
        date: NaiveDate,
        kind: PunchKind,
        time: NaiveTime,
        note: Option<&str>,
    ) -> SaveOutcome {
        let mut record = self.get_day(date).unwrap_or_else(|| self.new_record());
        match kind {
            PunchKind::In => record.start = Some(time),
            PunchKind::Out => record.end = Some(time),
        }
        if let Some(n) = note.map(str::trim).filter(|n| !n.is_empty()) {
            record.note = n.to_string();
        }
        self.save_day(date, record).await
    }

    pub async fn set_day_type(&mut self, date: NaiveDate, day_type: DayType) -> SaveOutcome {
        let mut record = self.get_day(date).unwrap_or_else(|| self.new_record());
        record.apply_day_type(day_type);
        self.save_day(date, record).await
    }

    /// Apply `day_type` to every date of `[start, end]`, then push.
    pub async fn mark_period(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        day_type: DayType,
        include_weekends: bool,
    ) -> AppResult<MarkOutcome> {
        if start > end {
            return Err(AppError::Validation(format!(
                "period start {} is after end {}",
                start, end
            )));
        }

        let now = Utc::now();
        let mut days = self.store.load_days();
        let mut outcome = MarkOutcome::default();

        for date in days_between(start, end) {
            if !include_weekends && is_weekend(date) {
                outcome.skipped_weekends += 1;
                continue;
            }
            let mut record = days.remove(&date).unwrap_or_else(|| self.new_record());
            record.apply_day_type(day_type);
            record.touch_local(now);
            days.insert(date, record);
            outcome.marked += 1;
        }

        if !self.store.save_days(&days) {
            return Err(AppError::Other("period not stored locally".into()));
        }
        self.store.audit(
            "mark",
            &format!("{}:{}", start, end),
            &format!("{} day(s) as {}", outcome.marked, day_type),
        );

        outcome.sync = self.sync_pending().await;
        Ok(outcome)
    }

    /// Remove locally, then delete remotely on a best-effort basis.
    pub async fn delete_day(&mut self, date: NaiveDate) -> AppResult<DeleteOutcome> {
        let mut days = self.store.load_days();
        if days.remove(&date).is_none() {
            return Err(AppError::NoRecordForDate(date.to_string()));
        }
        if !self.store.save_days(&days) {
            return Err(AppError::Other(format!("could not remove {} locally", date)));
        }
        self.store.audit("delete", &date.to_string(), "local delete");

        let Some(remote) = self.remote.clone() else {
            return Ok(DeleteOutcome {
                remote_deleted: None,
            });
        };

        let deleted = match remote.delete_day(date).await {
            Ok(()) => {
                self.online = true;
                true
            }
            Err(e) => {
                warn!(%date, error = %e, "remote delete failed");
                self.online = false;
                false
            }
        };
        Ok(DeleteOutcome {
            remote_deleted: Some(deleted),
        })
    }

    // ---------------------------
    // Push
    // ---------------------------

    /// Upsert one stored date. `true` when the remote acknowledged it.
    async fn push_one(&mut self, date: NaiveDate) -> bool {
        let Some(remote) = self.remote.clone() else {
            return false;
        };
        let Some(record) = self.get_day(date) else {
            return false;
        };

        match remote.upsert_day(date, &record).await {
            Ok(()) => {
                self.online = true;
                let mut days = self.store.load_days();
                if let Some(r) = days.get_mut(&date) {
                    r.mark_synced();
                }
                if !self.store.save_days(&days) {
                    warn!(%date, "pushed but could not clear pending flag");
                }
                debug!(%date, "day pushed");
                true
            }
            Err(e) => {
                warn!(%date, error = %e, "push failed, record stays pending");
                self.online = false;
                false
            }
        }
    }

    /// Push every pending record in date order. Stops at the first failure.
    pub async fn sync_pending(&mut self) -> SyncReport {
        let pending: Vec<NaiveDate> = self
            .store
            .load_days()
            .iter()
            .filter(|(_, r)| r.pending_sync)
            .map(|(d, _)| *d)
            .collect();

        let mut report = SyncReport {
            remaining: pending.len(),
            ..SyncReport::default()
        };
        if self.remote.is_none() || pending.is_empty() {
            return report;
        }

        for date in pending {
            if !self.push_one(date).await {
                report.stopped_early = true;
                break;
            }
            report.pushed += 1;
            report.remaining -= 1;
        }

        if report.pushed > 0 {
            self.store.audit(
                "sync",
                "pending",
                &format!("pushed {}, remaining {}", report.pushed, report.remaining),
            );
        }
        info!(
            pushed = report.pushed,
            remaining = report.remaining,
            "pending sweep done"
        );
        report
    }

    // ---------------------------
    // Pull
    // ---------------------------

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        RefreshTicket(self.generation)
    }

    /// Merge a normalized remote range into the store. Blank remote records
    /// (left behind by empty-record deletes) count as absent. A result from
    /// a superseded ticket changes nothing.
    pub fn apply_remote(
        &mut self,
        ticket: RefreshTicket,
        start: NaiveDate,
        end: NaiveDate,
        remote: DayMap,
    ) -> RefreshReport {
        if ticket.0 < self.generation {
            debug!(ticket = ticket.0, latest = self.generation, "stale refresh dropped");
            return RefreshReport {
                stale: true,
                ..RefreshReport::default()
            };
        }

        let remote: DayMap = remote.into_iter().filter(|(_, r)| !r.is_blank()).collect();
        let mut days = self.store.load_days();
        let mut report = RefreshReport::default();

        let gone: Vec<NaiveDate> = days
            .range(start..=end)
            .filter(|(d, r)| {
                !remote.contains_key(d) && r.origin == Origin::Cloud && !r.pending_sync
            })
            .map(|(d, _)| *d)
            .collect();
        for d in gone {
            days.remove(&d);
            report.removed += 1;
        }

        for (date, incoming) in remote {
            match days.get(&date) {
                Some(local) if local.pending_sync || local.origin == Origin::User => {
                    report.kept_local += 1;
                }
                _ => {
                    days.insert(date, incoming);
                    report.applied += 1;
                }
            }
        }

        if (report.applied > 0 || report.removed > 0) && !self.store.save_days(&days) {
            warn!("refreshed records could not be stored");
        }
        report
    }

    pub async fn refresh_from_cloud(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<RefreshReport> {
        let remote = self.remote.clone().ok_or(AppError::NoBackend)?;
        let ticket = self.begin_refresh();

        let payload = match remote.fetch_range(start, end).await {
            Ok(p) => {
                self.online = true;
                if p.is_empty() {
                    debug!(%start, %end, "backend returned an empty range");
                }
                p
            }
            Err(e) => {
                self.online = false;
                return Err(e.into());
            }
        };

        let records = normalize_remote(payload, Utc::now());
        let report = self.apply_remote(ticket, start, end, records);
        self.store.audit(
            "refresh",
            &format!("{}:{}", start, end),
            &format!(
                "applied {}, kept {}, removed {}",
                report.applied, report.kept_local, report.removed
            ),
        );
        Ok(report)
    }

    /// One-time pull of a historical range. Runs again only with `force`.
    pub async fn import_history(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        force: bool,
    ) -> AppResult<ImportOutcome> {
        let status = self.store.import_status();
        if status.completed && !force {
            return Ok(ImportOutcome::AlreadyDone(status));
        }

        let report = self.refresh_from_cloud(start, end).await?;
        let status = ImportStatus {
            completed: true,
            completed_at: Some(Utc::now()),
            imported: report.applied,
        };
        if !self.store.save_import_status(&status) {
            warn!("import status not stored");
        }
        self.store.audit(
            "import",
            &format!("{}:{}", start, end),
            &format!("{} record(s)", report.applied),
        );
        Ok(ImportOutcome::Imported(report))
    }

    /// Probe the remote and update the online flag.
    pub async fn ping(&mut self) -> Option<String> {
        let remote = self.remote.clone()?;
        match remote.ping().await {
            Ok(status) => {
                self.online = true;
                Some(status)
            }
            Err(e) => {
                debug!(error = %e, "ping failed");
                self.online = false;
                None
            }
        }
    }
}
