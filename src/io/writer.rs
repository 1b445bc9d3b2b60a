//! PDF writing with atomic replacement.
//!
//! Documents are always assembled fully in memory before anything is
//! written; the writer then saves to a temporary sibling file and renames
//! it into place, so a failed write never leaves a partial output at the
//! destination path.

use lopdf::Document;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const WRITE_BUFFER_SIZE: usize = 8192;

/// Write a document to `path` atomically.
///
/// The document is saved to `path` with a `.tmp` extension first and then
/// renamed over the destination. The temporary file is removed if any
/// step fails.
///
/// # Errors
///
/// Returns the underlying I/O error when the destination cannot be
/// created or written (permissions, missing parent directory, disk full).
pub fn write_document(doc: &mut Document, path: &Path) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");

    let result = (|| {
        let file = fs::File::create(&tmp_path)?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
        doc.save_to(&mut writer).map_err(io::Error::other)?;
        writer.flush()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }

    result
}

/// Create `dir` (and intermediate directories) if it does not exist.
///
/// Fails when the path exists but is not a directory.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
