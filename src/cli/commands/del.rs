use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::sync::Tracker;
use crate::ui::messages::{cloud, info, success, warning};
use crate::utils::date;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub async fn handle(cmd: &Commands, tracker: &mut Tracker) -> AppResult<()> {
    let Commands::Del { date: date_str, yes } = cmd else {
        return Ok(());
    };

    let d = date::parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.into()))?;

    let prompt = format!("Delete the record for {}? This action is irreversible.", d);
    if !*yes && !ask_confirmation(&prompt) {
        info("Operation cancelled.");
        return Ok(());
    }

    let outcome = tracker.delete_day(d).await?;
    success(format!("Record for {} has been deleted.", d));
    match outcome.remote_deleted {
        Some(true) => cloud("Removed from the backend."),
        Some(false) => warning("Backend delete failed; the remote copy may come back on refresh."),
        None => {}
    }
    Ok(())
}
