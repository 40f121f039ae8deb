use clap::Parser;
use std::path::PathBuf;

use crate::matchers::DEFAULT_MARKER;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Extract RISE attendance days from a bundle of timesheet PDFs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rise-report",
    about = "Extract RISE attendance days from a bundle of timesheet PDFs",
    version
)]
pub struct Settings {
    /// Full name printed on the reports
    #[arg(long, env = "RISE_NAME")]
    pub name: Option<String>,

    /// ZIP bundle of Cartellino_MM_YYYY.pdf files, or an already extracted directory
    #[arg(long, env = "RISE_BUNDLE")]
    pub bundle: Option<PathBuf>,

    /// Directory the report files are written to
    #[arg(long, env = "RISE_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Attendance code looked for in each day block
    #[arg(long, env = "RISE_MARKER", default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Table rows per page in the text report (5-500)
    #[arg(long, default_value = "40", value_parser = clap::value_parser!(u32).range(5..=500))]
    pub rows_per_page: u32,

    /// Console summary format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Analyse and print the summary without writing report files
    #[arg(long)]
    pub no_export: bool,

    /// Logging level
    #[arg(long, env = "RISE_LOG_LEVEL", default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// `true` when the console summary should be JSON.
    pub fn json_output(&self) -> bool {
        self.format == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
