use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use timetrack::models::{DayMap, DayRecord, DayType, Origin};
use timetrack::remote::{RangePayload, RemoteEndpoint, RemoteError};
use timetrack::store::{LocalStore, MemoryKv};
use timetrack::sync::{ImportOutcome, PunchKind, Tracker};
use timetrack::utils::time::parse_time;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// In-process backend. Fails every call while `down` is set, or after
/// `fail_after` successful upserts.
#[derive(Default)]
struct FakeRemote {
    down: AtomicBool,
    fail_after: Mutex<Option<usize>>,
    upserts: Mutex<Vec<NaiveDate>>,
    deletes: AtomicUsize,
    range: Mutex<serde_json::Value>,
}

impl FakeRemote {
    fn serving(range: serde_json::Value) -> Arc<Self> {
        let fake = Self::default();
        *fake.range.lock().unwrap() = range;
        Arc::new(fake)
    }

    fn check(&self) -> Result<(), RemoteError> {
        if self.down.load(Ordering::SeqCst) {
            Err(RemoteError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteEndpoint for FakeRemote {
    async fn ping(&self) -> Result<String, RemoteError> {
        self.check().map(|_| "ok".into())
    }

    async fn fetch_range(&self, _: NaiveDate, _: NaiveDate) -> Result<RangePayload, RemoteError> {
        self.check()?;
        let body = self.range.lock().unwrap().clone();
        serde_json::from_value(body).map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn upsert_day(&self, date: NaiveDate, _: &DayRecord) -> Result<(), RemoteError> {
        self.check()?;
        let mut upserts = self.upserts.lock().unwrap();
        if let Some(limit) = *self.fail_after.lock().unwrap() {
            if upserts.len() >= limit {
                return Err(RemoteError::Status {
                    url: "fake".into(),
                    status: 503,
                });
            }
        }
        upserts.push(date);
        Ok(())
    }

    async fn delete_day(&self, _: NaiveDate) -> Result<(), RemoteError> {
        self.check()?;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn tracker_with(remote: &Arc<FakeRemote>) -> Tracker {
    let dyn_remote: Arc<dyn RemoteEndpoint> = remote.clone();
    Tracker::new(LocalStore::in_memory(), Some(dyn_remote))
}

fn workday(start: &str, end: &str) -> DayRecord {
    DayRecord::with_times(parse_time(start), parse_time(end), 60)
}

#[tokio::test]
async fn save_while_online_is_synced_and_cloud_owned() {
    let remote = FakeRemote::serving(serde_json::json!({}));
    let mut tracker = tracker_with(&remote);

    let outcome = tracker.save_day(d("2025-03-03"), workday("09:00", "17:00")).await;
    assert!(outcome.stored && outcome.synced);

    let rec = tracker.get_day(d("2025-03-03")).unwrap();
    assert!(!rec.pending_sync);
    assert_eq!(rec.origin, Origin::Cloud);
    assert!(rec.last_modified.is_some());
    assert!(tracker.is_online());
}

#[tokio::test]
async fn save_while_offline_stays_pending() {
    let remote = FakeRemote::serving(serde_json::json!({}));
    remote.down.store(true, Ordering::SeqCst);
    let mut tracker = tracker_with(&remote);

    let outcome = tracker.save_day(d("2025-03-03"), workday("09:00", "17:00")).await;
    assert!(outcome.stored);
    assert!(!outcome.synced);
    assert!(!tracker.is_online());

    let rec = tracker.get_day(d("2025-03-03")).unwrap();
    assert!(rec.pending_sync);
    assert_eq!(rec.origin, Origin::User);
    assert_eq!(tracker.pending_count(), 1);

    remote.down.store(false, Ordering::SeqCst);
    let report = tracker.sync_pending().await;
    assert_eq!(report.pushed, 1);
    assert_eq!(report.remaining, 0);
    assert_eq!(tracker.pending_count(), 0);
}

#[tokio::test]
async fn sweep_stops_at_first_failure() {
    let remote = FakeRemote::serving(serde_json::json!({}));
    remote.down.store(true, Ordering::SeqCst);
    let mut tracker = tracker_with(&remote);
    for day in ["2025-03-03", "2025-03-04", "2025-03-05"] {
        tracker.save_day(d(day), workday("09:00", "17:00")).await;
    }
    assert_eq!(tracker.pending_count(), 3);

    remote.down.store(false, Ordering::SeqCst);
    *remote.fail_after.lock().unwrap() = Some(1);

    let report = tracker.sync_pending().await;
    assert_eq!(report.pushed, 1);
    assert_eq!(report.remaining, 2);
    assert!(report.stopped_early);
    assert_eq!(*remote.upserts.lock().unwrap(), vec![d("2025-03-03")]);
    assert!(tracker.get_day(d("2025-03-04")).unwrap().pending_sync);
}

#[tokio::test]
async fn refresh_never_overwrites_pending_records() {
    let remote = FakeRemote::serving(serde_json::json!({
        "2025-03-03": {"start": "07:00", "end": "15:00", "pause": 30},
        "2025-03-04": {"start": "10:00", "end": "18:00", "pause": 60}
    }));
    remote.down.store(true, Ordering::SeqCst);
    let mut tracker = tracker_with(&remote);
    tracker.save_day(d("2025-03-03"), workday("09:00", "17:00")).await;
    remote.down.store(false, Ordering::SeqCst);

    let report = tracker
        .refresh_from_cloud(d("2025-03-01"), d("2025-03-31"))
        .await
        .unwrap();
    assert_eq!(report.kept_local, 1);
    assert_eq!(report.applied, 1);

    let mine = tracker.get_day(d("2025-03-03")).unwrap();
    assert_eq!(mine.start_str(), "09:00");
    assert!(mine.pending_sync);

    let theirs = tracker.get_day(d("2025-03-04")).unwrap();
    assert_eq!(theirs.start_str(), "10:00");
    assert_eq!(theirs.origin, Origin::Cloud);
}

#[tokio::test]
async fn refresh_replaces_cloud_records_and_drops_vanished_ones() {
    let remote = FakeRemote::serving(serde_json::json!({
        "2025-03-03": {"start": "08:00", "end": "16:00"},
        "2025-03-04": {"start": "08:00", "end": "12:00"}
    }));
    let mut tracker = tracker_with(&remote);
    tracker
        .refresh_from_cloud(d("2025-03-01"), d("2025-03-31"))
        .await
        .unwrap();

    *remote.range.lock().unwrap() = serde_json::json!({
        "2025-03-03": {"start": "08:30", "end": "16:30"}
    });
    let report = tracker
        .refresh_from_cloud(d("2025-03-01"), d("2025-03-31"))
        .await
        .unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(report.removed, 1);
    assert_eq!(tracker.get_day(d("2025-03-03")).unwrap().start_str(), "08:30");
    assert!(tracker.get_day(d("2025-03-04")).is_none());
}

#[tokio::test]
async fn stale_refresh_is_discarded() {
    let remote = FakeRemote::serving(serde_json::json!({}));
    let mut tracker = tracker_with(&remote);

    let older = tracker.begin_refresh();
    let newer = tracker.begin_refresh();

    let mut fresh = DayMap::new();
    fresh.insert(d("2025-03-05"), workday("09:00", "12:00"));
    let report = tracker.apply_remote(newer, d("2025-03-01"), d("2025-03-31"), fresh);
    assert_eq!(report.applied, 1);

    let mut late = DayMap::new();
    late.insert(d("2025-03-05"), workday("06:00", "07:00"));
    late.insert(d("2025-03-06"), workday("06:00", "07:00"));
    let report = tracker.apply_remote(older, d("2025-03-01"), d("2025-03-31"), late);
    assert!(report.stale);
    assert_eq!(tracker.get_day(d("2025-03-05")).unwrap().start_str(), "09:00");
    assert!(tracker.get_day(d("2025-03-06")).is_none());
}

#[tokio::test]
async fn punches_and_day_types_merge_into_the_record() {
    let mut tracker = Tracker::new(LocalStore::in_memory(), None).with_default_pause(30);
    let day = d("2025-03-07");

    tracker
        .punch(day, PunchKind::In, parse_time("08:15").unwrap(), Some("early"))
        .await;
    tracker
        .punch(day, PunchKind::Out, parse_time("16:45").unwrap(), None)
        .await;
    let rec = tracker.get_day(day).unwrap();
    assert_eq!(rec.duration_minutes(), 480);
    assert_eq!(rec.note, "early");

    tracker.set_day_type(day, DayType::Sick).await;
    let rec = tracker.get_day(day).unwrap();
    assert_eq!(rec.start_str(), "09:00");
    assert_eq!(rec.end_str(), "17:00");
    assert_eq!(rec.pause_minutes, 60);
    assert_eq!(rec.note, "early");
}

#[tokio::test]
async fn mark_period_skips_weekends_unless_asked() {
    let mut tracker = Tracker::new(LocalStore::in_memory(), None);

    // Friday to Monday
    let outcome = tracker
        .mark_period(d("2025-03-07"), d("2025-03-10"), DayType::Leave, false)
        .await
        .unwrap();
    assert_eq!(outcome.marked, 2);
    assert_eq!(outcome.skipped_weekends, 2);
    assert!(tracker.get_day(d("2025-03-08")).is_none());

    let outcome = tracker
        .mark_period(d("2025-03-07"), d("2025-03-10"), DayType::Leave, true)
        .await
        .unwrap();
    assert_eq!(outcome.marked, 4);
    assert_eq!(tracker.get_range(d("2025-03-01"), d("2025-03-31")).len(), 4);

    assert!(
        tracker
            .mark_period(d("2025-03-10"), d("2025-03-07"), DayType::Leave, true)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn delete_is_local_first_then_best_effort_remote() {
    let remote = FakeRemote::serving(serde_json::json!({}));
    let mut tracker = tracker_with(&remote);
    tracker.save_day(d("2025-03-03"), workday("09:00", "17:00")).await;
    tracker.save_day(d("2025-03-04"), workday("09:00", "17:00")).await;

    let out = tracker.delete_day(d("2025-03-03")).await.unwrap();
    assert_eq!(out.remote_deleted, Some(true));

    remote.down.store(true, Ordering::SeqCst);
    let out = tracker.delete_day(d("2025-03-04")).await.unwrap();
    assert_eq!(out.remote_deleted, Some(false));
    assert!(tracker.get_day(d("2025-03-04")).is_none());
    assert_eq!(remote.deletes.load(Ordering::SeqCst), 1);

    assert!(tracker.delete_day(d("2025-03-04")).await.is_err());
}

#[tokio::test]
async fn import_runs_once_unless_forced() {
    let remote = FakeRemote::serving(serde_json::json!([
        ["2025-01-02", "09:00", "17:00", "60", "07h00", ""],
        ["2025-01-03", "09:00", "13:00", "0", "04h00", "short"]
    ]));
    let mut tracker = tracker_with(&remote);

    match tracker.import_history(d("2025-01-01"), d("2025-12-31"), false).await.unwrap() {
        ImportOutcome::Imported(report) => assert_eq!(report.applied, 2),
        other => panic!("expected import, got {other:?}"),
    }
    let status = tracker.store().import_status();
    assert!(status.completed);
    assert_eq!(status.imported, 2);

    assert!(matches!(
        tracker.import_history(d("2025-01-01"), d("2025-12-31"), false).await.unwrap(),
        ImportOutcome::AlreadyDone(_)
    ));
    assert!(matches!(
        tracker.import_history(d("2025-01-01"), d("2025-12-31"), true).await.unwrap(),
        ImportOutcome::Imported(_)
    ));
}

#[tokio::test]
async fn failing_local_store_reports_not_stored() {
    let mut tracker = Tracker::new(LocalStore::new(MemoryKv::with_quota(8)), None);
    let outcome = tracker.save_day(d("2025-03-03"), workday("09:00", "17:00")).await;
    assert!(!outcome.stored);
    assert!(tracker.get_day(d("2025-03-03")).is_none());
}

#[tokio::test]
async fn ping_flips_online_flag() {
    let remote = FakeRemote::serving(serde_json::json!({}));
    let mut tracker = tracker_with(&remote);
    assert_eq!(tracker.ping().await.as_deref(), Some("ok"));
    assert!(tracker.is_online());

    remote.down.store(true, Ordering::SeqCst);
    assert!(tracker.ping().await.is_none());
    assert!(!tracker.is_online());

    let offline = Tracker::new(LocalStore::in_memory(), None);
    assert!(!offline.is_online());
}

#[tokio::test]
async fn blank_remote_rows_count_as_deleted() {
    let remote = FakeRemote::serving(serde_json::json!([
        ["2025-04-01", "09:00", "17:00", "60", "07h00", ""],
        ["2025-04-02", "09:00", "17:00", "60", "07h00", ""]
    ]));
    let mut tracker = tracker_with(&remote);
    tracker
        .refresh_from_cloud(d("2025-04-01"), d("2025-04-30"))
        .await
        .unwrap();

    *remote.range.lock().unwrap() = serde_json::json!([
        ["2025-04-01", "09:00", "17:00", "60", "07h00", ""],
        ["2025-04-02", "", "", "", "", ""]
    ]);
    let report = tracker
        .refresh_from_cloud(d("2025-04-01"), d("2025-04-30"))
        .await
        .unwrap();
    assert_eq!(report.removed, 1);
    assert!(tracker.get_day(d("2025-04-02")).is_none());
}
