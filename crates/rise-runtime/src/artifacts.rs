//! Writes the downloadable artifacts of a finished batch.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rise_core::error::{Result, RiseError};
use rise_core::formatting;
use rise_export::document::{render_text_report, ReportDocument};
use rise_export::dump::write_analysis_json;
use rise_export::months::save_months_bundle;
use rise_export::spreadsheet::{write_detail_csv, write_summary_csv};
use rise_export::views::{detail_view, summary_view};
use rise_export::workbook::save_workbook;

use crate::batch::BatchOutcome;

/// Output location and layout options.
#[derive(Debug, Clone)]
pub struct ArtifactOptions {
    pub output_dir: PathBuf,
    pub rows_per_page: usize,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            rows_per_page: 40,
        }
    }
}

/// Paths of every file written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub report: PathBuf,
    pub detail_csv: PathBuf,
    pub summary_csv: PathBuf,
    pub workbook: PathBuf,
    pub analysis_json: PathBuf,
    pub months_bundle: PathBuf,
}

impl ArtifactPaths {
    fn new(dir: &Path, marker: &str, name: &str) -> Self {
        let stem = formatting::report_stem(marker, name);
        Self {
            report: dir.join(format!("{}.txt", stem)),
            detail_csv: dir.join(format!("{}_Dettaglio.csv", stem)),
            summary_csv: dir.join(format!("{}_Riepilogo.csv", stem)),
            workbook: dir.join(format!("{}.xlsx", stem)),
            analysis_json: dir.join(format!("{}_analisi.json", stem)),
            months_bundle: dir.join(formatting::months_bundle_name(marker, name)),
        }
    }

    pub fn all(&self) -> [&Path; 6] {
        [
            &self.report,
            &self.detail_csv,
            &self.summary_csv,
            &self.workbook,
            &self.analysis_json,
            &self.months_bundle,
        ]
    }
}

/// Write the report, both tables, the workbook, the JSON dump and the months
/// bundle.
///
/// Files are overwritten, so running the same batch twice yields the same
/// set of files.
pub fn write_artifacts(outcome: &BatchOutcome, options: &ArtifactOptions) -> Result<ArtifactPaths> {
    std::fs::create_dir_all(&options.output_dir).map_err(|source| RiseError::FileRead {
        path: options.output_dir.clone(),
        source,
    })?;
    let marker = outcome.marker();
    let paths = ArtifactPaths::new(&options.output_dir, marker, &outcome.display_name);

    let analysis = &outcome.analysis;
    let rows = detail_view(&analysis.records);
    let summary = summary_view(&analysis.year_days);

    let report = render_text_report(&ReportDocument {
        full_name: &outcome.display_name,
        marker,
        total_days: analysis.total_days(),
        rows: &rows,
        summary: &summary,
        rows_per_page: options.rows_per_page,
    });
    std::fs::write(&paths.report, report).map_err(|source| RiseError::FileRead {
        path: paths.report.clone(),
        source,
    })?;

    write_detail_csv(create(&paths.detail_csv)?, &rows)?;
    write_summary_csv(create(&paths.summary_csv)?, &summary)?;
    save_workbook(&paths.workbook, &rows, &summary)?;
    write_analysis_json(create(&paths.analysis_json)?, analysis)?;

    let bundled = save_months_bundle(
        &paths.months_bundle,
        &analysis.records,
        outcome.workspace.root(),
    )?;

    tracing::info!(
        dir = %options.output_dir.display(),
        rows = rows.len(),
        bundled,
        "artifacts written"
    );
    Ok(paths)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| RiseError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
