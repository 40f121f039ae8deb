//! The "run batch" trigger.
//!
//! A batch takes a display name and a bundle of timesheet documents. Both
//! inputs are checked before any work starts; after that every per-document
//! problem is recovered inside the analysis and surfaced as a diagnostic.

use std::path::{Path, PathBuf};

use rise_core::error::{Result, RiseError};
use rise_core::matchers::MarkerMatcher;
use rise_data::analysis::{analyze_folder, AnalysisResult};
use rise_data::bundle::extract_bundle;
use rise_data::reader::{DocumentProvider, PdfDocumentProvider};
use tempfile::TempDir;

/// Sub-directory of the session workspace that receives the bundle contents.
const EXTRACT_DIR: &str = "unzipped";

// ── BatchRequest ──────────────────────────────────────────────────────────────

/// User inputs for one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    /// Name printed on the reports.
    pub display_name: Option<String>,
    /// ZIP bundle, or a directory that already holds the documents.
    pub bundle: Option<PathBuf>,
}

impl BatchRequest {
    pub fn new(display_name: Option<String>, bundle: Option<PathBuf>) -> Self {
        Self {
            display_name,
            bundle,
        }
    }

    /// Check the preconditions and return the trimmed name and bundle path.
    pub fn validate(&self) -> Result<(String, PathBuf)> {
        let name = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(RiseError::MissingInput("name"))?;
        let bundle = self
            .bundle
            .clone()
            .ok_or(RiseError::MissingInput("bundle"))?;
        if !bundle.exists() {
            return Err(RiseError::BundleNotFound(bundle));
        }
        Ok((name.to_string(), bundle))
    }
}

// ── Workspace ─────────────────────────────────────────────────────────────────

/// Where the batch documents live for the duration of the session.
#[derive(Debug)]
pub enum Workspace {
    /// Extracted from a ZIP into a temporary directory, removed on drop.
    Extracted { _dir: TempDir, root: PathBuf },
    /// An existing directory supplied by the caller.
    Directory(PathBuf),
}

impl Workspace {
    pub fn root(&self) -> &Path {
        match self {
            Workspace::Extracted { root, .. } => root,
            Workspace::Directory(root) => root,
        }
    }

    fn prepare(bundle: &Path) -> Result<Self> {
        if bundle.is_dir() {
            return Ok(Workspace::Directory(bundle.to_path_buf()));
        }
        let dir = TempDir::new()?;
        let root = dir.path().join(EXTRACT_DIR);
        let files = extract_bundle(bundle, &root)?;
        tracing::debug!(files, root = %root.display(), "bundle extracted");
        Ok(Workspace::Extracted { _dir: dir, root })
    }
}

// ── BatchOutcome ──────────────────────────────────────────────────────────────

/// Result of a completed batch. Owns the workspace so the source documents
/// stay available until the outcome is dropped.
#[derive(Debug)]
pub struct BatchOutcome {
    pub display_name: String,
    pub analysis: AnalysisResult,
    pub workspace: Workspace,
}

impl BatchOutcome {
    pub fn total_days(&self) -> usize {
        self.analysis.total_days()
    }

    /// The marker word the batch searched for.
    pub fn marker(&self) -> &str {
        &self.analysis.metadata.marker
    }
}

// ── BatchRunner ───────────────────────────────────────────────────────────────

/// Runs batches against a [`DocumentProvider`].
pub struct BatchRunner<P: DocumentProvider = PdfDocumentProvider> {
    provider: P,
    marker: MarkerMatcher,
}

impl BatchRunner<PdfDocumentProvider> {
    /// Runner reading real PDFs.
    pub fn pdf(marker: &str) -> Self {
        Self::new(PdfDocumentProvider, marker)
    }
}

impl<P: DocumentProvider> BatchRunner<P> {
    pub fn new(provider: P, marker: &str) -> Self {
        Self {
            provider,
            marker: MarkerMatcher::new(marker),
        }
    }

    /// Validate `request`, prepare the workspace and analyse every document.
    pub fn run(&self, request: &BatchRequest) -> Result<BatchOutcome> {
        let (display_name, bundle) = request.validate()?;
        if self.marker.word().trim().is_empty() {
            return Err(RiseError::MissingInput("marker"));
        }
        tracing::info!(bundle = %bundle.display(), marker = self.marker.word(), "starting batch");

        let workspace = Workspace::prepare(&bundle)?;
        let analysis = analyze_folder(workspace.root(), &self.provider, &self.marker);

        tracing::info!(
            documents = analysis.metadata.documents_found,
            records = analysis.records.len(),
            total_days = analysis.total_days(),
            "batch complete"
        );

        Ok(BatchOutcome {
            display_name,
            analysis,
            workspace,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
