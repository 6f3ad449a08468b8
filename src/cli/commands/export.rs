use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::normalize::normalize_range;
use crate::errors::AppResult;
use crate::export::{ExportLogic, parse_period};
use crate::utils::date::today;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        delimiter,
        force,
    } = cmd
    {
        let (start, end) = parse_period(range, today())?;
        let tracker = crate::build_tracker(cfg, true)?;
        let entries = normalize_range(start, end, &tracker.load_days());

        let path = match file {
            Some(f) => PathBuf::from(f),
            None => std::env::current_dir()?.join(format.default_file_name(start, end)),
        };

        ExportLogic::export(
            *format,
            &entries,
            &path,
            delimiter.unwrap_or(cfg.csv_delimiter),
            *force,
        )?;
    }

    Ok(())
}
