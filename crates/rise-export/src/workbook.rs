//! Two-sheet XLSX workbook: `Dettaglio` with the record table and
//! `Riepilogo` with the per-year day counts.

use std::path::Path;

use rise_core::error::{Result, RiseError};
use rise_core::models::AttendanceRecord;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::spreadsheet::{DETAIL_COLUMNS, SUMMARY_COLUMNS};
use crate::views::YearSummaryRow;

pub const DETAIL_SHEET: &str = "Dettaglio";
pub const SUMMARY_SHEET: &str = "Riepilogo";

/// Build the workbook in memory.
pub fn build_workbook(rows: &[&AttendanceRecord], summary: &[YearSummaryRow]) -> Result<Workbook> {
    fill(rows, summary).map_err(xlsx_err)
}

/// Serialise the workbook to XLSX bytes.
pub fn workbook_bytes(rows: &[&AttendanceRecord], summary: &[YearSummaryRow]) -> Result<Vec<u8>> {
    build_workbook(rows, summary)?.save_to_buffer().map_err(xlsx_err)
}

/// Write the workbook to `path`, replacing any existing file.
pub fn save_workbook(
    path: &Path,
    rows: &[&AttendanceRecord],
    summary: &[YearSummaryRow],
) -> Result<()> {
    build_workbook(rows, summary)?.save(path).map_err(xlsx_err)
}

fn fill(
    rows: &[&AttendanceRecord],
    summary: &[YearSummaryRow],
) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let detail = workbook.add_worksheet();
    detail.set_name(DETAIL_SHEET)?;
    write_header(detail, &DETAIL_COLUMNS, &bold)?;
    for (i, record) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        detail.write_number(row, 0, record.year)?;
        detail.write_number(row, 1, record.month)?;
        detail.write_string(row, 2, record.iso_date())?;
        detail.write_string(row, 3, &record.weekday_label)?;
        detail.write_string(row, 4, &record.entry_time)?;
        detail.write_string(row, 5, &record.exit_time)?;
        detail.write_number(row, 6, record.pair_index)?;
        detail.write_string(row, 7, &record.source_file)?;
    }

    let totals = workbook.add_worksheet();
    totals.set_name(SUMMARY_SHEET)?;
    write_header(totals, &SUMMARY_COLUMNS, &bold)?;
    for (i, entry) in summary.iter().enumerate() {
        let row = i as u32 + 1;
        totals.write_number(row, 0, entry.year)?;
        totals.write_number(row, 1, entry.days as f64)?;
    }

    Ok(workbook)
}

fn write_header(
    sheet: &mut Worksheet,
    columns: &[&str],
    format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, format)?;
    }
    Ok(())
}

fn xlsx_err(e: XlsxError) -> RiseError {
    RiseError::Export(format!("XLSX: {}", e))
}
