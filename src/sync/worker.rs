//! Periodic push of pending records.

use super::tracker::{SyncReport, Tracker};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Sweep `sync_pending` every `interval` until `cancel` fires. The timer is
/// re-armed after each pass, so passes never overlap. Returns the number of
/// passes run.
pub async fn run_periodic_sync<F>(
    tracker: &mut Tracker,
    interval: Duration,
    cancel: CancellationToken,
    mut on_pass: F,
) -> usize
where
    F: FnMut(&SyncReport),
{
    let mut passes = 0;
    info!(?interval, "periodic sync started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("periodic sync cancelled");
                break;
            }
            _ = tokio::time::sleep(interval) => {
                let report = tracker.sync_pending().await;
                passes += 1;
                on_pass(&report);
            }
        }
    }

    info!(passes, "periodic sync stopped");
    passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;

    #[tokio::test]
    async fn stops_when_cancelled() {
        let mut tracker = Tracker::new(LocalStore::in_memory(), None);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        let mut seen = 0;
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(80)).await;
            trigger.cancel();
        });

        let passes = run_periodic_sync(&mut tracker, Duration::from_millis(10), cancel, |r| {
            assert_eq!(r.pushed, 0);
            seen += 1;
        })
        .await;
        stopper.await.unwrap();

        assert!(passes >= 1);
        assert_eq!(passes, seen);
    }
}
