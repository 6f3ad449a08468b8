use super::fs_utils::ensure_writable;
use super::{ExportFormat, notify_export_success, to_csv_bytes, to_json_bytes, to_xlsx_bytes};
use crate::core::stats::compute_stats;
use crate::errors::{AppError, AppResult};
use crate::models::DayEntry;
use crate::ui::messages::{info, warning};
use std::fs;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Render `entries` in memory.
    pub fn render(
        format: ExportFormat,
        entries: &[DayEntry],
        delimiter: char,
    ) -> AppResult<Vec<u8>> {
        match format {
            ExportFormat::Csv => to_csv_bytes(entries, delimiter),
            ExportFormat::Json => to_json_bytes(entries),
            ExportFormat::Xlsx => to_xlsx_bytes(entries, &compute_stats(entries)),
        }
    }

    /// Render and write to `path`, which must be absolute. An existing file
    /// is only replaced with `force` or after confirmation.
    pub fn export(
        format: ExportFormat,
        entries: &[DayEntry],
        path: &Path,
        delimiter: char,
        force: bool,
    ) -> AppResult<()> {
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                path.display()
            )));
        }
        if entries.is_empty() {
            warning("Nothing to export for the selected range.");
            return Ok(());
        }

        ensure_writable(path, force)?;

        info(format!(
            "Exporting {} day(s) to {}: {}",
            entries.len(),
            format.as_str().to_uppercase(),
            path.display()
        ));
        let bytes = Self::render(format, entries, delimiter)?;
        fs::write(path, bytes)?;

        notify_export_success(&format.as_str().to_uppercase(), path);
        Ok(())
    }
}
