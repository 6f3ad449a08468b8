use super::excel_date::{DATE_FORMAT, TIME_FORMAT, date_serial, time_serial};
use super::model::{ExportRow, HEADERS};
use crate::core::stats::RangeStats;
use crate::errors::{AppError, AppResult};
use crate::models::DayEntry;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

const BAND_1: u32 = 0xEAF3FB;
const BAND_2: u32 = 0xFFFFFF;

/// Workbook with a styled header, banded day rows and a statistics block.
pub fn to_xlsx_bytes(entries: &[DayEntry], stats: &RangeStats) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Timesheet").map_err(to_app_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    // ---------------------------
    // Rows
    // ---------------------------
    for (i, entry) in entries.iter().enumerate() {
        let row = (i + 1) as u32;
        let band = Color::RGB(if i % 2 == 0 { BAND_1 } else { BAND_2 });
        let cells = ExportRow::from_entry(entry);
        let record = &entry.record;

        for (col, text) in cells.cells().iter().enumerate() {
            let col16 = col as u16;
            match col {
                0 => {
                    let d = date_serial(entry.date);
                    write_serial(worksheet, row, col16, d, DATE_FORMAT, band)?
                }
                2 if record.start.is_some() => {
                    let t = record.start.map(time_serial).unwrap_or_default();
                    write_serial(worksheet, row, col16, t, TIME_FORMAT, band)?
                }
                3 if record.end.is_some() => {
                    let t = record.end.map(time_serial).unwrap_or_default();
                    write_serial(worksheet, row, col16, t, TIME_FORMAT, band)?
                }
                4 if !text.is_empty() => {
                    write_number(worksheet, row, col16, f64::from(record.pause_minutes), band)?
                }
                _ => write_text(worksheet, row, col16, text, band)?,
            }
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(*text));
        }
    }

    // ---------------------------
    // Statistics
    // ---------------------------
    let label_format = Format::new().set_bold();
    let first = entries.len() as u32 + 2;
    let mut stats_rows: Vec<(&str, String)> = vec![
        ("Total", stats.total_label()),
        ("Days worked", stats.days_worked.to_string()),
    ];
    if let Some(avg) = stats.average_label() {
        stats_rows.push(("Average", avg));
    }
    for (offset, (label, value)) in stats_rows.iter().enumerate() {
        let row = first + offset as u32;
        worksheet
            .write_with_format(row, 0, *label, &label_format)
            .map_err(to_app_error)?;
        worksheet.write(row, 1, value.as_str()).map_err(to_app_error)?;
    }
    col_widths[0] = col_widths[0].max(UnicodeWidthStr::width("Days worked"));

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save_to_buffer().map_err(to_app_error)
}

fn band_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_serial(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    serial: f64,
    num_format: &str,
    bg: Color,
) -> AppResult<()> {
    let fmt = band_format(bg).set_num_format(num_format);
    ws.write_with_format(row, col, serial, &fmt).map_err(to_app_error)?;
    Ok(())
}

fn write_number(ws: &mut Worksheet, row: u32, col: u16, n: f64, bg: Color) -> AppResult<()> {
    let fmt = band_format(bg).set_align(FormatAlign::Right);
    ws.write_with_format(row, col, n, &fmt).map_err(to_app_error)?;
    Ok(())
}

fn write_text(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    ws.write_with_format(row, col, s, &band_format(bg))
        .map_err(to_app_error)?;
    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
