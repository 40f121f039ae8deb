//! JSON dump of a batch: records, per-year day counts and diagnostics.

use std::collections::BTreeMap;
use std::io::Write;

use rise_core::error::Result;
use rise_core::models::{AttendanceRecord, Diagnostic};
use rise_data::analysis::{AnalysisMetadata, AnalysisResult};
use serde::Serialize;

/// Serialisable view over an [`AnalysisResult`].
#[derive(Debug, Serialize)]
pub struct AnalysisDump<'a> {
    pub metadata: &'a AnalysisMetadata,
    pub total_days: usize,
    pub days_per_year: BTreeMap<i32, usize>,
    pub records: &'a [AttendanceRecord],
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> AnalysisDump<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        Self {
            metadata: &result.metadata,
            total_days: result.total_days(),
            days_per_year: result.year_days.counts(),
            records: &result.records,
            diagnostics: &result.diagnostics,
        }
    }
}

/// Pretty-print the dump of `result` into `writer`.
pub fn write_analysis_json<W: Write>(writer: W, result: &AnalysisResult) -> Result<()> {
    serde_json::to_writer_pretty(writer, &AnalysisDump::new(result))?;
    Ok(())
}
