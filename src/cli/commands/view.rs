//! Read-only views: `list`, `week`, `calendar`, `leaves`.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::{CalendarCursor, build_month};
use crate::core::leaves::{collect_leaves, render as render_leaves};
use crate::core::normalize::normalize_range;
use crate::core::stats::compute_stats;
use crate::core::weekly::{build_week, render_days, render_totals};
use crate::errors::{AppError, AppResult};
use crate::export::parse_period;
use crate::utils::date::{parse_date, today};
use crate::utils::describe_range;
use std::io::IsTerminal;

fn parse_month(s: &str) -> AppResult<CalendarCursor> {
    let invalid = || AppError::InvalidDate(format!("{} (expected YYYY-MM)", s));
    let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if month == 0 {
        return Err(invalid());
    }
    CalendarCursor::new(month - 1, year)
        .filter(|c| c.bounds().is_some())
        .ok_or_else(invalid)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let color = std::io::stdout().is_terminal();
    let tracker = crate::build_tracker(cfg, true)?;
    let days = tracker.load_days();

    match cmd {
        Commands::List { period } => {
            let (start, end) = parse_period(period, today())?;
            let entries = normalize_range(start, end, &days);
            println!("📅 {}\n", describe_range(start, end));
            print!("{}", render_days(&entries, color));
            print!("{}", render_totals(&compute_stats(&entries)));
        }

        Commands::Week { date } => {
            let anchor = match date {
                Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                None => today(),
            };
            print!("{}", build_week(anchor, &days).render(color));
        }

        Commands::Calendar { month, next, prev } => {
            let base = match month {
                Some(m) => parse_month(m)?,
                None => CalendarCursor::current(),
            };
            let steps = i64::from(*next) - i64::from(*prev);
            let cursor = base.shift(steps.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
            print!("{}", build_month(cursor, &days).render(color));
        }

        Commands::Leaves { period } => {
            let (start, end) = parse_period(period, today())?;
            println!("🏖️  {}\n", describe_range(start, end));
            print!("{}", render_leaves(&collect_leaves(&days, start, end)));
        }

        _ => {}
    }

    Ok(())
}
