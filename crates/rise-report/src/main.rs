mod bootstrap;

use anyhow::Result;
use rise_core::formatting;
use rise_core::models::{Diagnostic, DiagnosticOutcome};
use rise_core::settings::Settings;
use rise_export::dump::AnalysisDump;
use rise_runtime::artifacts::{write_artifacts, ArtifactOptions, ArtifactPaths};
use rise_runtime::batch::{BatchOutcome, BatchRequest, BatchRunner};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("RISE report v{} starting", env!("CARGO_PKG_VERSION"));

    let runner = BatchRunner::pdf(&settings.marker);
    let request = BatchRequest::new(settings.name.clone(), settings.bundle.clone());
    let outcome = runner.run(&request)?;

    let artifacts = if settings.no_export {
        None
    } else {
        bootstrap::ensure_output_dir(&settings.output_dir)?;
        let options = ArtifactOptions {
            output_dir: settings.output_dir.clone(),
            rows_per_page: settings.rows_per_page as usize,
        };
        Some(write_artifacts(&outcome, &options)?)
    };

    if settings.json_output() {
        println!(
            "{}",
            serde_json::to_string_pretty(&AnalysisDump::new(&outcome.analysis))?
        );
    } else {
        print_summary(&outcome, artifacts.as_ref());
    }

    Ok(())
}

fn print_summary(outcome: &BatchOutcome, artifacts: Option<&ArtifactPaths>) {
    let marker = outcome.marker();
    println!(
        "{}",
        formatting::report_title(&outcome.display_name, marker, outcome.total_days())
    );

    let counts = outcome.analysis.year_days.counts();
    if counts.is_empty() {
        println!("{}", formatting::empty_report_notice(marker));
    } else {
        println!("{}", formatting::days_with_marker_label(marker));
        for (year, days) in counts {
            println!("  {}: {}", year, formatting::format_day_count(days));
        }
    }

    if !outcome.analysis.diagnostics.is_empty() {
        println!();
        println!("Diagnostica:");
        for diagnostic in &outcome.analysis.diagnostics {
            println!("  {}", describe(diagnostic, marker));
        }
    }

    if let Some(paths) = artifacts {
        println!();
        for path in paths.all() {
            println!("  -> {}", path.display());
        }
    }
}

fn describe(diagnostic: &Diagnostic, marker: &str) -> String {
    match &diagnostic.outcome {
        DiagnosticOutcome::Scanned {
            month: Some(month),
            year: Some(year),
            detected_block_count,
        } => format!(
            "{}: {:02}/{}, blocchi {}: {}",
            diagnostic.file, month, year, marker, detected_block_count
        ),
        DiagnosticOutcome::Scanned {
            detected_block_count,
            ..
        } => format!(
            "{}: mese non determinato, blocchi {}: {}",
            diagnostic.file, marker, detected_block_count
        ),
        DiagnosticOutcome::Failed { error } => format!("{}: errore: {}", diagnostic.file, error),
    }
}
