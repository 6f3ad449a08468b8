use crate::cli::parser::{Commands, PunchDirection};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::parse_range;
use crate::models::{DayRecord, DayType};
use crate::sync::{PunchKind, SaveOutcome, Tracker};
use crate::ui::messages::{cloud, error, info, success, warning};
use crate::utils::date::{self, today};
use crate::utils::describe_range;
use crate::utils::time::{parse_optional_time, parse_time};
use chrono::{Local, NaiveDate, Timelike};

fn parse_day(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Report where a save ended up.
pub(crate) fn report_save(
    date: NaiveDate,
    outcome: SaveOutcome,
    tracker: &Tracker,
) -> AppResult<()> {
    if !outcome.stored {
        error(format!("Could not store {} locally.", date));
        return Err(AppError::Other("local store write failed".into()));
    }
    success(format!("Saved {}.", date));
    if outcome.synced {
        cloud("Synced with the backend.");
    } else if tracker.has_remote() {
        warning("Backend unreachable: the change stays pending and will be pushed later.");
    }
    Ok(())
}

/// Handle `punch`, `add` and `mark`.
pub async fn handle(cmd: &Commands, cfg: &Config, tracker: &mut Tracker) -> AppResult<()> {
    match cmd {
        Commands::Punch {
            direction,
            at,
            date,
            note,
        } => {
            let d = match date {
                Some(s) => parse_day(s)?,
                None => today(),
            };
            let time = match at {
                Some(s) => parse_time(s).ok_or_else(|| AppError::InvalidTime(s.clone()))?,
                None => {
                    let now = Local::now().time();
                    now.with_second(0).unwrap_or(now).with_nanosecond(0).unwrap_or(now)
                }
            };
            let kind = match direction {
                PunchDirection::In => PunchKind::In,
                PunchDirection::Out => PunchKind::Out,
            };

            let outcome = tracker.punch(d, kind, time, note.as_deref()).await;
            info(format!(
                "Punch {} at {}",
                if kind == PunchKind::In { "in" } else { "out" },
                time.format("%H:%M")
            ));
            report_save(d, outcome, tracker)
        }

        Commands::Add {
            date,
            start,
            end,
            pause,
            note,
            day_type,
        } => {
            let d = parse_day(date)?;
            let start = parse_optional_time(start.as_ref())?;
            let end = parse_optional_time(end.as_ref())?;

            let mut record = DayRecord {
                pause_minutes: cfg.default_pause,
                note: note.clone().unwrap_or_default(),
                ..DayRecord::default()
            };
            if let Some(t) = day_type {
                record.apply_day_type(*t);
            }
            if start.is_some() {
                record.start = start;
            }
            if end.is_some() {
                record.end = end;
            }
            if let Some(p) = pause {
                record.pause_minutes = *p;
            }

            validate(&record)?;

            let outcome = tracker.save_day(d, record).await;
            report_save(d, outcome, tracker)
        }

        Commands::Mark {
            range,
            day_type,
            include_weekends,
        } => {
            let (start, end) = parse_range(range)?;
            let outcome = tracker
                .mark_period(start, end, *day_type, *include_weekends)
                .await?;

            success(format!(
                "Marked {} as {}: {} day(s).",
                describe_range(start, end),
                day_type.label(),
                outcome.marked
            ));
            if outcome.skipped_weekends > 0 {
                info(format!("Skipped {} weekend day(s).", outcome.skipped_weekends));
            }
            if tracker.has_remote() {
                if outcome.sync.stopped_early {
                    warning(format!(
                        "Pushed {}, {} still pending (backend unreachable).",
                        outcome.sync.pushed, outcome.sync.remaining
                    ));
                } else {
                    cloud(format!("Pushed {} record(s).", outcome.sync.pushed));
                }
            }
            Ok(())
        }

        _ => Ok(()),
    }
}

/// Worked days need both times, and end after they start.
fn validate(record: &DayRecord) -> AppResult<()> {
    let needs_times = matches!(record.day_type, DayType::Normal | DayType::Remote);
    match (record.start, record.end) {
        (None, Some(_)) => Err(AppError::Validation(
            "an end time needs a start time (--in)".into(),
        )),
        (None, None) if needs_times => Err(AppError::Validation(
            "a start time is required (--in)".into(),
        )),
        (Some(_), None) if needs_times => Err(AppError::Validation(
            "an end time is required (--out)".into(),
        )),
        (Some(s), Some(e)) if e < s => Err(AppError::Validation(format!(
            "end {} is before start {}",
            e.format("%H:%M"),
            s.format("%H:%M")
        ))),
        _ => Ok(()),
    }
}
