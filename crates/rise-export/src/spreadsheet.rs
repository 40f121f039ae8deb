//! Tabular exports: the detail sheet and the per-year summary sheet as CSV.

use std::io::Write;

use rise_core::error::{Result, RiseError};
use rise_core::models::AttendanceRecord;

use crate::views::YearSummaryRow;

/// Column order of the detail table.
pub const DETAIL_COLUMNS: [&str; 8] = [
    "Year",
    "Month",
    "Date",
    "Weekday",
    "EntryTime",
    "ExitTime",
    "PairIndex",
    "SourceFile",
];

/// Column order of the summary table.
pub const SUMMARY_COLUMNS: [&str; 2] = ["Year", "DaysWithMarker"];

/// Write the detail rows with a header line, even when there are no rows.
pub fn write_detail_csv<W: Write>(writer: W, rows: &[&AttendanceRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(DETAIL_COLUMNS).map_err(export_err)?;
    for row in rows {
        csv_writer.serialize(row).map_err(export_err)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the per-year summary with a header line.
pub fn write_summary_csv<W: Write>(writer: W, rows: &[YearSummaryRow]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(SUMMARY_COLUMNS).map_err(export_err)?;
    for row in rows {
        csv_writer.serialize(row).map_err(export_err)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn export_err(e: csv::Error) -> RiseError {
    RiseError::Export(format!("CSV: {}", e))
}
