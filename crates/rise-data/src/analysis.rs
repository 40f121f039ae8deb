//! Batch analysis pipeline.
//!
//! Walks discovered documents one at a time in path order, resolves each
//! document's month/year, segments its pages and folds the results into an
//! [`AnalysisResult`]. Per-document failures become diagnostics; nothing
//! here aborts the batch.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rise_core::matchers::MarkerMatcher;
use rise_core::models::{AttendanceRecord, Diagnostic, DiagnosticOutcome, YearDayIndex};
use rise_core::period;
use tracing::{debug, info, warn};

use crate::aggregator::AttendanceAggregator;
use crate::reader::{file_label, find_pdf_files, DocumentProvider};
use crate::segmenter::{BlockSegmenter, DocumentScan};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// The marker word searched for.
    pub marker: String,
    /// Candidate documents discovered.
    pub documents_found: usize,
    /// Documents that could not be opened or decoded.
    pub documents_failed: usize,
    /// Documents whose month/year could not be resolved.
    pub documents_unresolved: usize,
    /// Blocks containing the marker, across all documents.
    pub marker_blocks: usize,
    /// Wall-clock seconds spent on the batch.
    pub processing_time_seconds: f64,
}

/// The complete output of a batch.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Records in discovery order.
    pub records: Vec<AttendanceRecord>,
    /// Year → distinct days with records.
    pub year_days: YearDayIndex,
    /// One entry per discovered document, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Sum of distinct days across all years.
    pub fn total_days(&self) -> usize {
        self.year_days.total_days()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Discover every candidate PDF under `folder` and analyse it.
pub fn analyze_folder<P: DocumentProvider + ?Sized>(
    folder: &Path,
    provider: &P,
    marker: &MarkerMatcher,
) -> AnalysisResult {
    let documents = find_pdf_files(folder);
    analyze_documents(&documents, provider, marker)
}

/// Analyse `documents` in the given order.
///
/// Every document yields exactly one [`Diagnostic`], success or failure.
pub fn analyze_documents<P: DocumentProvider + ?Sized>(
    documents: &[PathBuf],
    provider: &P,
    marker: &MarkerMatcher,
) -> AnalysisResult {
    let start = std::time::Instant::now();
    let mut aggregator = AttendanceAggregator::new();
    let mut diagnostics = Vec::with_capacity(documents.len());
    let mut documents_unresolved = 0usize;
    let mut marker_blocks = 0usize;

    for path in documents {
        let (diagnostic, scan) = process_document(path, provider, marker);
        if let Some(scan) = scan {
            marker_blocks += scan.marker_blocks;
            aggregator.add_document(scan);
        }
        if matches!(
            diagnostic.outcome,
            DiagnosticOutcome::Scanned { month: None, .. }
        ) {
            documents_unresolved += 1;
        }
        diagnostics.push(diagnostic);
    }

    let documents_failed = diagnostics.iter().filter(|d| d.is_failure()).count();
    let (records, year_days) = aggregator.into_parts();

    info!(
        "Analysed {} documents: {} records, {} days, {} failed",
        documents.len(),
        records.len(),
        year_days.total_days(),
        documents_failed
    );

    AnalysisResult {
        records,
        year_days,
        diagnostics,
        metadata: AnalysisMetadata {
            generated_at: Utc::now().to_rfc3339(),
            marker: marker.word().to_string(),
            documents_found: documents.len(),
            documents_failed,
            documents_unresolved,
            marker_blocks,
            processing_time_seconds: start.elapsed().as_secs_f64(),
        },
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Open, scan and release one document.
fn process_document<P: DocumentProvider + ?Sized>(
    path: &Path,
    provider: &P,
    marker: &MarkerMatcher,
) -> (Diagnostic, Option<DocumentScan>) {
    let file = file_label(path);

    let pages = match provider.open(path) {
        Ok(pages) => pages,
        Err(e) => {
            warn!("Unable to read {}: {}", file, e);
            return (Diagnostic::failed(file, e.detail()), None);
        }
    };

    let texts: Vec<&str> = pages.iter().map(|p| p.text()).collect();
    let period = period::resolve(&file, &texts);
    if period.is_none() {
        warn!("Could not resolve month/year for {}", file);
    }

    let scan = BlockSegmenter::new(marker, period, file.as_str()).scan_document(&texts);
    debug!(
        "{}: period {:?}, {} pages, {} marker blocks",
        file,
        period,
        pages.len(),
        scan.marker_blocks
    );

    (Diagnostic::scanned(file, period, scan.marker_blocks), Some(scan))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::index_from_records;
    use crate::reader::InMemoryProvider;

    const MAY: &str = "Cartellino_05_2023.pdf";

    fn provider_with(docs: &[(&str, &[&str])]) -> InMemoryProvider {
        let mut provider = InMemoryProvider::new();
        for (path, pages) in docs {
            provider.insert(*path, pages.iter().copied());
        }
        provider
    }

    fn run(provider: &InMemoryProvider) -> AnalysisResult {
        analyze_documents(&provider.paths(), provider, &MarkerMatcher::default())
    }

    // ── end-to-end ────────────────────────────────────────────────────────────

    #[test]
    fn test_single_document_single_record() {
        let provider = provider_with(&[(MAY, &["05 Lu\nR I S E\n08:00\n17:00"])]);
        let result = run(&provider);

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.iso_date(), "2023-05-05");
        assert_eq!(record.weekday_label, "Lunedì");
        assert_eq!(record.entry_time, "08:00");
        assert_eq!(record.exit_time, "17:00");
        assert_eq!(record.pair_index, 1);
        assert_eq!(record.source_file, MAY);
        assert_eq!(result.total_days(), 1);
        assert_eq!(
            result.diagnostics[0].outcome,
            DiagnosticOutcome::Scanned {
                month: Some(5),
                year: Some(2023),
                detected_block_count: 1
            }
        );
    }

    #[test]
    fn test_content_fallback_on_second_page() {
        let provider = provider_with(&[(
            "scan.pdf",
            &["Dipendente: Mario Rossi\n", "Febbraio 2022\n03 Gi\nRISE 08:00 17:00"],
        )]);
        let result = run(&provider);

        assert_eq!(
            result.diagnostics[0].outcome,
            DiagnosticOutcome::Scanned {
                month: Some(2),
                year: Some(2022),
                detected_block_count: 1
            }
        );
        assert_eq!(result.records[0].iso_date(), "2022-02-03");
    }

    #[test]
    fn test_unresolved_document_gives_diagnostic_only() {
        let provider = provider_with(&[("scan.pdf", &["05 Lu\nRISE 08:00 17:00"])]);
        let result = run(&provider);

        assert!(result.records.is_empty());
        assert_eq!(result.metadata.documents_unresolved, 1);
        assert_eq!(
            result.diagnostics[0].outcome,
            DiagnosticOutcome::Scanned {
                month: None,
                year: None,
                detected_block_count: 0
            }
        );
    }

    // ── failures ──────────────────────────────────────────────────────────────

    #[test]
    fn test_failed_document_does_not_abort_batch() {
        let mut provider = provider_with(&[
            ("a/Cartellino_01_2023.pdf", &["09 Lu\nRISE 08:00 17:00"]),
            ("c/Cartellino_03_2023.pdf", &["06 Lu\nRISE 08:00 17:00"]),
        ]);
        provider.insert_failure("b/Cartellino_02_2023.pdf", "invalid file header");
        let result = run(&provider);

        assert_eq!(result.diagnostics.len(), 3);
        assert!(result.diagnostics[1].is_failure());
        assert_eq!(result.diagnostics[1].file, "Cartellino_02_2023.pdf");
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.metadata.documents_failed, 1);
    }

    #[test]
    fn test_failure_diagnostic_independent_of_location() {
        let mut first = InMemoryProvider::new();
        first.insert_failure(
            "/tmp/.tmpA/unzipped/Cartellino_02_2023.pdf",
            "invalid file header",
        );
        let mut second = InMemoryProvider::new();
        second.insert_failure(
            "/tmp/.tmpB/unzipped/Cartellino_02_2023.pdf",
            "invalid file header",
        );

        let a = run(&first);
        let b = run(&second);
        assert_eq!(a.diagnostics, b.diagnostics);
        assert_eq!(
            a.diagnostics[0].outcome,
            DiagnosticOutcome::Failed {
                error: "invalid file header".to_string()
            }
        );
    }

    #[test]
    fn test_zero_documents_gives_empty_outputs() {
        let provider = InMemoryProvider::new();
        let result = run(&provider);
        assert!(result.records.is_empty());
        assert!(result.diagnostics.is_empty());
        assert!(result.year_days.is_empty());
        assert_eq!(result.metadata.documents_found, 0);
    }

    // ── invariants ────────────────────────────────────────────────────────────

    #[test]
    fn test_diagnostics_follow_discovery_order() {
        let provider = provider_with(&[
            ("z/Cartellino_02_2023.pdf", &[""]),
            ("a/Cartellino_01_2023.pdf", &[""]),
        ]);
        let result = run(&provider);
        let files: Vec<&str> = result.diagnostics.iter().map(|d| d.file.as_str()).collect();
        assert_eq!(
            files,
            vec!["Cartellino_01_2023.pdf", "Cartellino_02_2023.pdf"]
        );
    }

    #[test]
    fn test_year_days_derivable_from_records() {
        let provider = provider_with(&[
            (
                "Cartellino_12_2022.pdf",
                &["30 Ve\nRISE 08:00 12:00 13:00 17:00\n31 Sa\nRISE 09:00 12:00"],
            ),
            ("Cartellino_01_2023.pdf", &["02 Lu\nRISE 08:00 17:00"]),
        ]);
        let result = run(&provider);

        assert_eq!(result.records.len(), 4);
        assert_eq!(index_from_records(&result.records), result.year_days);
        assert_eq!(result.year_days.days_in_year(2022), 2);
        assert_eq!(result.year_days.days_in_year(2023), 1);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut provider = provider_with(&[
            (MAY, &["05 Lu\nRISE 08:00 17:00\n06 Ma\nRISE 08:00 12:00 13:00"]),
            ("Cartellino_06_2023.pdf", &["01 Gi\nrise 07:00 15:00"]),
        ]);
        provider.insert_failure("Cartellino_07_2023.pdf", "broken");

        let first = run(&provider);
        let second = run(&provider);
        assert_eq!(first.records, second.records);
        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.year_days, second.year_days);
    }

    // ── analyze_folder ────────────────────────────────────────────────────────

    #[test]
    fn test_analyze_folder_uses_discovery() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(MAY);
        std::fs::write(&path, b"placeholder").unwrap();
        std::fs::write(tmp.path().join("._ignored.pdf"), b"x").unwrap();

        let mut provider = InMemoryProvider::new();
        provider.insert(path, ["05 Lu\nRISE 08:00 17:00"]);

        let result = analyze_folder(tmp.path(), &provider, &MarkerMatcher::default());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.records.len(), 1);
    }
}
