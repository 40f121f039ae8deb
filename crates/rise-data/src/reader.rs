//! Timesheet document discovery and page-text loading.
//!
//! Finds candidate PDFs under an extracted bundle and turns each one into an
//! ordered list of [`Page`]s through a [`DocumentProvider`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rise_core::error::{Result, RiseError};
use tracing::{debug, warn};

/// Prefix of resource-fork artifacts written by some archive tools.
const HIDDEN_ARTIFACT_PREFIX: &str = "._";

/// Directory some archive tools add next to the real content.
const ARTIFACT_DIR: &str = "__MACOSX";

// ── Page / DocumentProvider ───────────────────────────────────────────────────

/// One page of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    pub text: String,
}

impl Page {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Source of page text for a document path.
///
/// Implementations must release the underlying document before returning;
/// a corrupt or unreadable file is reported as an error, never a panic.
pub trait DocumentProvider {
    fn open(&self, path: &Path) -> Result<Vec<Page>>;
}

/// [`DocumentProvider`] backed by `lopdf` text extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDocumentProvider;

impl DocumentProvider for PdfDocumentProvider {
    fn open(&self, path: &Path) -> Result<Vec<Page>> {
        let doc = lopdf::Document::load(path).map_err(|e| RiseError::PdfLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut pages = Vec::new();
        for (page_num, _page_id) in doc.get_pages() {
            let text = doc
                .extract_text(&[page_num])
                .map_err(|e| RiseError::PdfText {
                    path: path.to_path_buf(),
                    page: page_num,
                    message: e.to_string(),
                })?;
            pages.push(Page {
                number: page_num,
                text,
            });
        }

        debug!("Loaded {} pages from {}", pages.len(), path.display());
        Ok(pages)
    }
}

/// [`DocumentProvider`] over page text already held in memory, keyed by path.
///
/// Paths registered with [`InMemoryProvider::insert_failure`] fail to open
/// with the given message; unknown paths fail as unreadable files.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    documents: HashMap<PathBuf, std::result::Result<Vec<String>, String>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document made of `pages`, in order.
    pub fn insert<S: Into<String>>(
        &mut self,
        path: impl Into<PathBuf>,
        pages: impl IntoIterator<Item = S>,
    ) {
        self.documents.insert(
            path.into(),
            Ok(pages.into_iter().map(Into::into).collect()),
        );
    }

    /// Register a document that fails to open.
    pub fn insert_failure(&mut self, path: impl Into<PathBuf>, message: impl Into<String>) {
        self.documents.insert(path.into(), Err(message.into()));
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.documents.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl DocumentProvider for InMemoryProvider {
    fn open(&self, path: &Path) -> Result<Vec<Page>> {
        match self.documents.get(path) {
            Some(Ok(pages)) => Ok(pages
                .iter()
                .enumerate()
                .map(|(i, text)| Page {
                    number: i as u32 + 1,
                    text: text.clone(),
                })
                .collect()),
            Some(Err(message)) => Err(RiseError::PdfLoad {
                path: path.to_path_buf(),
                message: message.clone(),
            }),
            None => Err(RiseError::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not registered"),
            }),
        }
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `.pdf` files recursively under `root`, sorted by path.
///
/// Hidden `._*` artifacts and anything below a `__MACOSX` directory are
/// skipped.
pub fn find_pdf_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        warn!("Document path does not exist: {}", root.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !(entry.file_type().is_dir() && entry.file_name() == ARTIFACT_DIR))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_candidate_name(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Base name of `path`, used as the `SourceFile` column and diagnostic key.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_candidate_name(path: &Path) -> bool {
    let has_pdf_ext = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    let hidden = path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with(HIDDEN_ARTIFACT_PREFIX))
        .unwrap_or(true);
    has_pdf_ext && !hidden
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        path
    }

    // ── find_pdf_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_pdf_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "2023/Cartellino_02_2023.pdf");
        touch(dir.path(), "Cartellino_01_2023.pdf");
        touch(dir.path(), "2022/Cartellino_12_2022.PDF");

        let files = find_pdf_files(dir.path());
        let rel: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(
            rel,
            vec![
                "2022/Cartellino_12_2022.PDF",
                "2023/Cartellino_02_2023.pdf",
                "Cartellino_01_2023.pdf",
            ]
        );
    }

    #[test]
    fn test_find_pdf_files_skips_hidden_artifacts() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Cartellino_01_2023.pdf");
        touch(dir.path(), "._Cartellino_01_2023.pdf");
        touch(dir.path(), "__MACOSX/Cartellino_01_2023.pdf");

        let files = find_pdf_files(dir.path());
        assert_eq!(files.len(), 1);
        assert_eq!(file_label(&files[0]), "Cartellino_01_2023.pdf");
    }

    #[test]
    fn test_find_pdf_files_ignores_other_extensions() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "Cartellino_01_2023.pdf.bak");
        assert!(find_pdf_files(dir.path()).is_empty());
    }

    #[test]
    fn test_find_pdf_files_nonexistent_path() {
        let files = find_pdf_files(Path::new("/tmp/does-not-exist-rise-test-xyz"));
        assert!(files.is_empty());
    }

    // ── PdfDocumentProvider ───────────────────────────────────────────────────

    #[test]
    fn test_pdf_provider_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfDocumentProvider.open(&path).unwrap_err();
        assert!(matches!(err, RiseError::PdfLoad { .. }));
    }

    #[test]
    fn test_pdf_provider_missing_file() {
        let result = PdfDocumentProvider.open(Path::new("/tmp/rise-missing-file.pdf"));
        assert!(result.is_err());
    }

    // ── InMemoryProvider ──────────────────────────────────────────────────────

    #[test]
    fn test_in_memory_provider_numbers_pages() {
        let mut provider = InMemoryProvider::new();
        provider.insert("a.pdf", ["first", "second"]);

        let pages = provider.open(Path::new("a.pdf")).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].text(), "second");
    }

    #[test]
    fn test_in_memory_provider_failures() {
        let mut provider = InMemoryProvider::new();
        provider.insert_failure("bad.pdf", "truncated");

        let err = provider.open(Path::new("bad.pdf")).unwrap_err();
        assert!(err.to_string().contains("truncated"));
        assert!(provider.open(Path::new("unknown.pdf")).is_err());
    }

    // ── file_label ────────────────────────────────────────────────────────────

    #[test]
    fn test_file_label_uses_base_name() {
        assert_eq!(
            file_label(Path::new("/x/y/Cartellino_05_2023.pdf")),
            "Cartellino_05_2023.pdf"
        );
    }
}
