use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::parse_period;
use crate::sync::{ImportOutcome, RefreshReport, SyncReport, Tracker, run_periodic_sync};
use crate::ui::messages::{cloud, info, success, warning};
use crate::utils::colors::colorize_online;
use crate::utils::date::today;
use crate::utils::describe_range;
use chrono::Datelike;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn report_push(report: &SyncReport) {
    if report.stopped_early {
        warning(format!(
            "Pushed {} record(s); {} still pending (backend unreachable).",
            report.pushed, report.remaining
        ));
    } else if report.pushed > 0 {
        cloud(format!("Pushed {} pending record(s).", report.pushed));
    } else {
        info("Nothing pending.");
    }
}

fn report_refresh(report: &RefreshReport) {
    cloud(format!(
        "Refreshed: {} applied, {} kept local, {} removed.",
        report.applied, report.kept_local, report.removed
    ));
}

/// Handle `sync`, `import` and `status`.
pub async fn handle(cmd: &Commands, cfg: &Config, tracker: &mut Tracker) -> AppResult<()> {
    match cmd {
        Commands::Sync {
            refresh,
            period,
            watch,
            interval,
        } => {
            if !tracker.has_remote() {
                return Err(AppError::NoBackend);
            }

            report_push(&tracker.sync_pending().await);

            if *refresh {
                let (start, end) = parse_period(period, today())?;
                info(format!("Refreshing {} from the backend…", describe_range(start, end)));
                report_refresh(&tracker.refresh_from_cloud(start, end).await?);
            }

            if *watch {
                let every = interval
                    .map(|s| Duration::from_secs(s.max(1)))
                    .unwrap_or_else(|| cfg.sync_interval());
                let cancel = CancellationToken::new();
                let on_signal = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        on_signal.cancel();
                    }
                });

                info(format!("Watching every {}s, Ctrl-C to stop.", every.as_secs()));
                let passes = run_periodic_sync(tracker, every, cancel, |r| {
                    if r.pushed > 0 || r.stopped_early {
                        report_push(r);
                    }
                })
                .await;
                success(format!("Stopped after {} sweep(s).", passes));
            }
            Ok(())
        }

        Commands::Import { period, force } => {
            let (start, end) = match period {
                Some(p) => parse_period(p, today())?,
                None => parse_period(&today().year().to_string(), today())?,
            };

            match tracker.import_history(start, end, *force).await? {
                ImportOutcome::AlreadyDone(status) => {
                    let when = status
                        .completed_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "an earlier run".into());
                    info(format!(
                        "History already imported ({} record(s), {}). Use --force to import again.",
                        status.imported, when
                    ));
                }
                ImportOutcome::Imported(report) => {
                    success(format!("Imported {}.", describe_range(start, end)));
                    report_refresh(&report);
                }
            }
            Ok(())
        }

        Commands::Status => {
            let backend = cfg.backend_url.as_deref().unwrap_or("(none)");
            println!("🔗 Backend : {}", backend);
            println!("👤 User    : {}", cfg.user.as_deref().unwrap_or("(none)"));

            if tracker.has_remote() {
                let status = tracker.ping().await;
                println!("📶 Online  : {}", colorize_online(tracker.is_online()));
                if let Some(s) = status {
                    println!("💬 Status  : {}", s);
                }
            } else {
                println!("📶 Online  : {}", colorize_online(false));
            }

            println!("⏳ Pending : {}", tracker.pending_count());
            let imported = tracker.store().import_status();
            println!(
                "📥 Imported: {}",
                if imported.completed { "yes" } else { "no" }
            );
            Ok(())
        }

        _ => Ok(()),
    }
}
