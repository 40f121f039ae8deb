//! ZIP of the source documents for months that produced records.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use rise_core::error::{Result, RiseError};
use rise_core::models::AttendanceRecord;
use rise_data::reader::{file_label, find_pdf_files};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Copy every document under `root` whose file name appears in `records`
/// into a ZIP written to `writer`, flat by file name.
///
/// When two documents share a name only the first in path order is kept.
/// Returns the number of documents added.
pub fn write_months_bundle<W: Write + Seek>(
    writer: W,
    records: &[AttendanceRecord],
    root: &Path,
) -> Result<usize> {
    let wanted: HashSet<&str> = records.iter().map(|r| r.source_file.as_str()).collect();

    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut added: HashSet<String> = HashSet::new();

    for path in find_pdf_files(root) {
        let name = file_label(&path);
        if !wanted.contains(name.as_str()) {
            continue;
        }
        if added.contains(&name) {
            warn!("Skipping duplicate document name {}", path.display());
            continue;
        }

        let mut source = File::open(&path).map_err(|source| RiseError::FileRead {
            path: path.clone(),
            source,
        })?;
        zip.start_file(name.as_str(), options).map_err(zip_err)?;
        std::io::copy(&mut source, &mut zip)?;
        added.insert(name);
    }

    zip.finish().map_err(zip_err)?;
    debug!("Bundled {} documents", added.len());
    Ok(added.len())
}

/// [`write_months_bundle`] into a new file at `out`.
pub fn save_months_bundle(out: &Path, records: &[AttendanceRecord], root: &Path) -> Result<usize> {
    let file = File::create(out).map_err(|source| RiseError::FileRead {
        path: out.to_path_buf(),
        source,
    })?;
    write_months_bundle(file, records, root)
}

fn zip_err(e: zip::result::ZipError) -> RiseError {
    RiseError::Archive(e.to_string())
}
