//! Document splitting: one file per page, or one file per page range.
//!
//! Outputs are numbered 1-based: per-page splits by page number, range
//! splits by *range position* in the caller's list. Files written before
//! a mid-operation failure remain on disk; they are not rolled back.

use lopdf::Document;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::SplitError;
use crate::io::{self, PdfSource};

/// Split `input` into one single-page document per page.
///
/// Output files are named `{prefix}-{n}.pdf` with `n` the 1-based page
/// number, and the returned paths are in ascending page order.
///
/// # Errors
///
/// - [`SplitError::SourceUnreadable`] if the input cannot be opened.
/// - [`SplitError::Empty`] if the input has no pages.
/// - [`SplitError::CannotCreateDir`] if `output_dir` cannot be created.
/// - [`SplitError::WriteFailed`] if a page file cannot be written; pages
///   already written stay on disk.
pub fn split_every_blocking(
    input: &Path,
    output_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, SplitError> {
    let source = open_non_empty(input)?;
    prepare_output_dir(output_dir)?;

    let page_count = source.page_count() as u32;
    info!(input = %input.display(), pages = page_count, "splitting per page");

    let mut outputs = Vec::with_capacity(page_count as usize);
    for page in 1..=page_count {
        let path = write_extracted(&source, &[page], output_dir, prefix, page as usize)?;
        outputs.push(path);
    }

    Ok(outputs)
}

/// Split `input` into one document per page range.
///
/// Ranges are inclusive 1-based `(start, end)` spans applied in list
/// order; they may overlap or leave gaps. Each span is clipped to the
/// document's page range and out-of-range pages are silently skipped. A
/// span that clips to nothing produces no file, but its 1-based position
/// is still consumed for naming, so later outputs keep their numbers.
///
/// Same directory-creation and write-failure semantics as
/// [`split_every_blocking`].
pub fn split_by_ranges_blocking(
    input: &Path,
    spans: &[(u32, u32)],
    output_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, SplitError> {
    let source = open_non_empty(input)?;
    prepare_output_dir(output_dir)?;

    let page_count = source.page_count() as u32;
    info!(input = %input.display(), ranges = spans.len(), "splitting by ranges");

    let mut outputs = Vec::new();
    for (position, &(start, end)) in spans.iter().enumerate() {
        let lo = start.max(1);
        let hi = end.min(page_count);
        if lo > hi {
            warn!(range = position + 1, start, end, "range clips to no pages, skipping");
            continue;
        }

        let keep: Vec<u32> = (lo..=hi).collect();
        let path = write_extracted(&source, &keep, output_dir, prefix, position + 1)?;
        outputs.push(path);
    }

    Ok(outputs)
}

fn open_non_empty(input: &Path) -> Result<PdfSource, SplitError> {
    let source = PdfSource::open(input).map_err(SplitError::source_unreadable)?;
    if source.page_count() == 0 {
        return Err(SplitError::Empty {
            path: input.to_path_buf(),
        });
    }
    Ok(source)
}

fn prepare_output_dir(output_dir: &Path) -> Result<(), SplitError> {
    io::ensure_dir(output_dir).map_err(|err| SplitError::CannotCreateDir {
        path: output_dir.to_path_buf(),
        source: err,
    })
}

/// Extract `keep` (ascending 1-based page numbers) into a new document
/// and write it as `{prefix}-{number}.pdf`.
fn write_extracted(
    source: &PdfSource,
    keep: &[u32],
    output_dir: &Path,
    prefix: &str,
    number: usize,
) -> Result<PathBuf, SplitError> {
    let mut doc = extract_pages(source.document(), keep);
    let path = output_dir.join(format!("{prefix}-{number}.pdf"));

    io::write_document(&mut doc, &path).map_err(|err| SplitError::WriteFailed {
        path: path.clone(),
        source: err,
    })?;

    debug!(output = %path.display(), pages = keep.len(), "wrote split output");
    Ok(path)
}

/// Build a document containing only the given 1-based pages of `document`.
///
/// Works by deleting the complement: pages are removed one at a time in
/// descending order because page numbers shift after each deletion, then
/// orphaned objects are pruned.
fn extract_pages(document: &Document, keep: &[u32]) -> Document {
    let mut doc = document.clone();
    let page_count = doc.get_pages().len() as u32;
    let keep_set: HashSet<u32> = keep.iter().copied().collect();

    for page in (1..=page_count).rev() {
        if !keep_set.contains(&page) {
            doc.delete_pages(&[page]);
        }
    }

    doc.prune_objects();
    doc.compress();
    doc
}
