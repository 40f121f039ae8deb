use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the RISE report crates.
#[derive(Error, Debug)]
pub enum RiseError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A PDF document could not be opened or decoded.
    #[error("Failed to open PDF {path}: {message}")]
    PdfLoad { path: PathBuf, message: String },

    /// Text extraction failed for one page of an otherwise readable PDF.
    #[error("Failed to extract text from page {page} of {path}: {message}")]
    PdfText {
        path: PathBuf,
        page: u32,
        message: String,
    },

    /// The uploaded bundle is not a readable archive.
    #[error("Archive error: {0}")]
    Archive(String),

    /// A required batch input was not supplied.
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// The bundle path does not exist.
    #[error("Bundle not found: {0}")]
    BundleNotFound(PathBuf),

    /// A report artifact could not be produced.
    #[error("Export error: {0}")]
    Export(String),

    /// A JSON document could not be produced or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RiseError {
    /// The error message without the file path.
    ///
    /// Documents live under a per-session temporary directory, so the full
    /// path differs between runs over the same bundle.
    pub fn detail(&self) -> String {
        match self {
            RiseError::FileRead { source, .. } => source.to_string(),
            RiseError::PdfLoad { message, .. } => message.clone(),
            RiseError::PdfText { page, message, .. } => format!("page {}: {}", page, message),
            other => other.to_string(),
        }
    }
}

/// Convenience alias used throughout the RISE crates.
pub type Result<T> = std::result::Result<T, RiseError>;
