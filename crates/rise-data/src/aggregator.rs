//! Batch-wide accumulation of attendance records.

use rise_core::models::{AttendanceRecord, YearDayIndex};

use crate::segmenter::DocumentScan;

// ── AttendanceAggregator ──────────────────────────────────────────────────────

/// Folds per-document scans into one record table and one year-day index.
///
/// Records keep discovery order; the index collapses repeated dates.
#[derive(Debug, Clone, Default)]
pub struct AttendanceAggregator {
    records: Vec<AttendanceRecord>,
    year_days: YearDayIndex,
}

impl AttendanceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records of one document and merge its days.
    pub fn add_document(&mut self, scan: DocumentScan) {
        self.records.extend(scan.records);
        self.year_days.merge(&scan.year_days);
    }

    pub fn into_parts(self) -> (Vec<AttendanceRecord>, YearDayIndex) {
        (self.records, self.year_days)
    }
}

/// Rebuild the year-day index from a record table.
///
/// Equals the aggregator's own index for any table it produced.
pub fn index_from_records(records: &[AttendanceRecord]) -> YearDayIndex {
    let mut index = YearDayIndex::new();
    for record in records {
        index.insert(record.date);
    }
    index
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_record(y: i32, m: u32, d: u32, pair: u32, file: &str) -> AttendanceRecord {
        AttendanceRecord {
            year: y,
            month: m,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            weekday_label: "Lunedì".to_string(),
            entry_time: "08:00".to_string(),
            exit_time: "17:00".to_string(),
            pair_index: pair,
            source_file: file.to_string(),
        }
    }

    fn scan_of(records: Vec<AttendanceRecord>) -> DocumentScan {
        let year_days = index_from_records(&records);
        DocumentScan {
            marker_blocks: records.len(),
            records,
            year_days,
        }
    }

    #[test]
    fn test_add_document_keeps_discovery_order() {
        let mut agg = AttendanceAggregator::new();
        agg.add_document(scan_of(vec![make_record(2023, 6, 1, 1, "b.pdf")]));
        agg.add_document(scan_of(vec![make_record(2023, 1, 9, 1, "a.pdf")]));

        let (records, _) = agg.into_parts();
        let files: Vec<&str> = records.iter().map(|r| r.source_file.as_str()).collect();
        assert_eq!(files, vec!["b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_duplicate_dates_across_documents_collapse() {
        let mut agg = AttendanceAggregator::new();
        agg.add_document(scan_of(vec![make_record(2023, 5, 5, 1, "a.pdf")]));
        agg.add_document(scan_of(vec![
            make_record(2023, 5, 5, 1, "copy.pdf"),
            make_record(2023, 5, 5, 2, "copy.pdf"),
        ]));

        let (records, index) = agg.into_parts();
        assert_eq!(records.len(), 3);
        assert_eq!(index.total_days(), 1);
    }

    #[test]
    fn test_total_days_sums_years() {
        let mut agg = AttendanceAggregator::new();
        agg.add_document(scan_of(vec![
            make_record(2022, 12, 30, 1, "a.pdf"),
            make_record(2023, 1, 2, 1, "b.pdf"),
            make_record(2023, 1, 3, 1, "b.pdf"),
        ]));

        let (_, index) = agg.into_parts();
        assert_eq!(index.days_in_year(2022), 1);
        assert_eq!(index.days_in_year(2023), 2);
        assert_eq!(index.total_days(), 3);
    }

    #[test]
    fn test_index_matches_records() {
        let mut agg = AttendanceAggregator::new();
        agg.add_document(scan_of(vec![
            make_record(2023, 5, 5, 1, "a.pdf"),
            make_record(2023, 5, 5, 2, "a.pdf"),
            make_record(2024, 2, 29, 1, "b.pdf"),
        ]));
        let (records, index) = agg.into_parts();
        assert_eq!(index_from_records(&records), index);
    }

    #[test]
    fn test_empty_aggregator() {
        let (records, index) = AttendanceAggregator::new().into_parts();
        assert!(records.is_empty());
        assert!(index.is_empty());
    }
}
