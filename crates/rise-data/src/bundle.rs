//! Extraction of uploaded ZIP bundles onto the local filesystem.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rise_core::error::{Result, RiseError};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Extract every file of the ZIP at `bundle` below `dest`.
///
/// Entries whose names would land outside `dest` are skipped. Returns the
/// number of files written.
pub fn extract_bundle(bundle: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(bundle).map_err(|source| RiseError::FileRead {
        path: bundle.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| RiseError::Archive(format!("{}: {}", bundle.display(), e)))?;

    std::fs::create_dir_all(dest)?;

    let mut written = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| RiseError::Archive(format!("entry {}: {}", i, e)))?;

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping archive entry outside destination: {}", entry.name());
            continue;
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&target).map_err(|source| RiseError::FileRead {
            path: target.clone(),
            source,
        })?;
        std::io::copy(&mut entry, &mut out)?;
        written += 1;
    }

    debug!(
        "Extracted {} files from {} into {}",
        written,
        bundle.display(),
        dest.display()
    );
    Ok(written)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_bundle_nested_entries() {
        let tmp = TempDir::new().unwrap();
        let bundle = tmp.path().join("cartellini.zip");
        write_zip(
            &bundle,
            &[
                ("Cartellino_01_2023.pdf", b"one"),
                ("2022/Cartellino_12_2022.pdf", b"two"),
            ],
        );

        let dest = tmp.path().join("out");
        let written = extract_bundle(&bundle, &dest).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            std::fs::read(dest.join("2022/Cartellino_12_2022.pdf")).unwrap(),
            b"two"
        );
    }

    #[test]
    fn test_extract_bundle_skips_escaping_entries() {
        let tmp = TempDir::new().unwrap();
        let bundle = tmp.path().join("evil.zip");
        write_zip(&bundle, &[("../escape.pdf", b"x"), ("ok.pdf", b"y")]);

        let dest = tmp.path().join("out");
        let written = extract_bundle(&bundle, &dest).unwrap();

        assert_eq!(written, 1);
        assert!(!tmp.path().join("escape.pdf").exists());
        assert!(dest.join("ok.pdf").exists());
    }

    #[test]
    fn test_extract_bundle_rejects_non_zip() {
        let tmp = TempDir::new().unwrap();
        let bundle = tmp.path().join("not.zip");
        std::fs::write(&bundle, b"plain text").unwrap();

        let err = extract_bundle(&bundle, &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, RiseError::Archive(_)));
    }

    #[test]
    fn test_extract_bundle_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = extract_bundle(&tmp.path().join("nope.zip"), tmp.path()).unwrap_err();
        assert!(matches!(err, RiseError::FileRead { .. }));
    }
}
