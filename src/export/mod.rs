//! Export of a normalized range to CSV, JSON or XLSX.
//!
//! The renderers are pure (`entries → bytes`); [`ExportLogic`] resolves
//! the output path and writes the file.

mod csv;
mod excel_date;
mod fs_utils;
mod json;
pub mod logic;
mod model;
pub mod range;
mod xlsx;

pub use self::csv::to_csv_bytes;
pub use json::to_json_bytes;
pub use logic::ExportLogic;
pub use model::ExportRow;
pub use range::{parse_period, parse_range};
pub use xlsx::to_xlsx_bytes;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Default file name when `--file` is omitted.
    pub fn default_file_name(&self, start: chrono::NaiveDate, end: chrono::NaiveDate) -> String {
        format!(
            "timetrack_{}_{}.{}",
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
            self.as_str()
        )
    }
}
