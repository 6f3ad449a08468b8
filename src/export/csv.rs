use super::model::{ExportRow, HEADERS};
use crate::errors::{AppError, AppResult};
use crate::models::DayEntry;

/// CSV with a header line. Fields containing the delimiter, quotes or
/// newlines are quoted, inner quotes doubled.
pub fn to_csv_bytes(entries: &[DayEntry], delimiter: char) -> AppResult<Vec<u8>> {
    if !delimiter.is_ascii() {
        return Err(AppError::Export(format!(
            "CSV delimiter must be a single ASCII character, got '{}'",
            delimiter
        )));
    }

    let mut wtr = ::csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .quote_style(::csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(HEADERS)
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for e in entries {
        let row = ExportRow::from_entry(e);
        wtr.write_record(row.cells())
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))
}
