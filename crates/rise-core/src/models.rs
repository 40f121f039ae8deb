use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A resolved (month, year) context for one timesheet document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    /// Calendar month, 1-12.
    pub month: u32,
    /// Four-digit calendar year.
    pub year: i32,
}

impl MonthYear {
    /// Build a context, rejecting months outside 1-12.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { month, year })
        } else {
            None
        }
    }

    /// The calendar date for `day` in this month, or `None` when the day does
    /// not exist (e.g. 31 April).
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

/// One (entry, exit) reading extracted from a day block carrying the marker.
///
/// Serialises with the column names of the tabular record set consumed by the
/// report renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttendanceRecord {
    pub year: i32,
    pub month: u32,
    /// Serialised as ISO 8601 (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Full weekday label, e.g. `"Lunedì"`.
    #[serde(rename = "Weekday")]
    pub weekday_label: String,
    /// `HH:MM`.
    pub entry_time: String,
    /// `HH:MM`.
    pub exit_time: String,
    /// 1-based order of the pair within the day's block.
    pub pair_index: u32,
    /// Base name of the document the record came from.
    pub source_file: String,
}

impl AttendanceRecord {
    /// The record date as an ISO 8601 string.
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Year → distinct dates that produced at least one attendance record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearDayIndex {
    days: BTreeMap<i32, BTreeSet<NaiveDate>>,
}

impl YearDayIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `date` under its own year. Returns `true` when the date was new.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.days.entry(date.year()).or_default().insert(date)
    }

    /// Fold every date of `other` into this index.
    pub fn merge(&mut self, other: &YearDayIndex) {
        for date in other.days.values().flatten() {
            self.insert(*date);
        }
    }

    /// Number of distinct days recorded for `year`.
    pub fn days_in_year(&self, year: i32) -> usize {
        self.days.get(&year).map(BTreeSet::len).unwrap_or(0)
    }

    /// Sum of the per-year set sizes.
    pub fn total_days(&self) -> usize {
        self.days.values().map(BTreeSet::len).sum()
    }

    /// Year → count of distinct days, ascending by year.
    pub fn counts(&self) -> BTreeMap<i32, usize> {
        self.days
            .iter()
            .map(|(year, dates)| (*year, dates.len()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DiagnosticOutcome {
    /// The document was opened and walked. Month/year may still be absent.
    Scanned {
        month: Option<u32>,
        year: Option<i32>,
        detected_block_count: usize,
    },
    /// The document could not be opened or decoded.
    Failed { error: String },
}

/// Per-document processing summary for operator visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    #[serde(flatten)]
    pub outcome: DiagnosticOutcome,
}

impl Diagnostic {
    pub fn scanned(
        file: impl Into<String>,
        period: Option<MonthYear>,
        detected_block_count: usize,
    ) -> Self {
        Self {
            file: file.into(),
            outcome: DiagnosticOutcome::Scanned {
                month: period.map(|p| p.month),
                year: period.map(|p| p.year),
                detected_block_count,
            },
        }
    }

    pub fn failed(file: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            file: file.into(),
            outcome: DiagnosticOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, DiagnosticOutcome::Failed { .. })
    }

    /// Marker-block count, zero for failures.
    pub fn detected_block_count(&self) -> usize {
        match self.outcome {
            DiagnosticOutcome::Scanned {
                detected_block_count,
                ..
            } => detected_block_count,
            DiagnosticOutcome::Failed { .. } => 0,
        }
    }
}
