//! Sorted read-only views over the record table.

use rise_core::models::{AttendanceRecord, YearDayIndex};
use serde::{Deserialize, Serialize};

/// One row of the per-year summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummaryRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "DaysWithMarker")]
    pub days: usize,
}

/// Records ordered by (year, date, pair index). Ties keep discovery order.
pub fn detail_view(records: &[AttendanceRecord]) -> Vec<&AttendanceRecord> {
    let mut rows: Vec<&AttendanceRecord> = records.iter().collect();
    rows.sort_by_key(|r| (r.year, r.date, r.pair_index));
    rows
}

/// One row per year, ascending.
pub fn summary_view(year_days: &YearDayIndex) -> Vec<YearSummaryRow> {
    year_days
        .counts()
        .into_iter()
        .map(|(year, days)| YearSummaryRow { year, days })
        .collect()
}
