//! Core PDF merging implementation.
//!
//! Combines the pages of an ordered input list into a single output
//! document. Inputs are opened in list order and every page of each
//! input is appended in order, so the output preserves input-list order
//! first and intra-document order second.

use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{MergeError, OpenError};
use crate::io::{self, PdfSource};

/// Result of a completed merge.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Path the merged document was written to.
    pub output: PathBuf,

    /// Number of input files merged.
    pub files_merged: usize,

    /// Page count of the merged document.
    pub total_pages: usize,
}

/// Merge `inputs` into a single document written to `output`.
///
/// The output is assembled fully in memory and written atomically, so a
/// failure at any point leaves no partial output on disk.
///
/// # Errors
///
/// - [`MergeError::NoInputFiles`] if `inputs` is empty; no file is created.
/// - [`MergeError::SourceUnreadable`] if any input fails to open; the
///   whole merge is aborted.
/// - [`MergeError::WriteFailed`] if the destination cannot be created or
///   written.
pub fn merge_blocking(inputs: &[PathBuf], output: &Path) -> Result<MergeOutcome, MergeError> {
    if inputs.is_empty() {
        return Err(MergeError::NoInputFiles);
    }

    info!(files = inputs.len(), output = %output.display(), "merging documents");

    let mut sources = Vec::with_capacity(inputs.len());
    for path in inputs {
        let source = PdfSource::open(path).map_err(MergeError::source_unreadable)?;
        debug!(path = %path.display(), pages = source.page_count(), "opened merge input");
        sources.push(source);
    }

    let mut merged = assemble(&sources)?;
    let total_pages = merged.get_pages().len();

    io::write_document(&mut merged, output).map_err(|err| MergeError::WriteFailed {
        path: output.to_path_buf(),
        source: err,
    })?;

    info!(pages = total_pages, output = %output.display(), "merge complete");

    Ok(MergeOutcome {
        output: output.to_path_buf(),
        files_merged: inputs.len(),
        total_pages,
    })
}

/// Concatenate opened sources into one document.
fn assemble(sources: &[PdfSource]) -> Result<Document, MergeError> {
    // The first document becomes the base; the remaining documents are
    // renumbered past its id space and grafted onto its page tree.
    let base = &sources[0];
    let mut merged = base.document().clone();
    let mut max_id = merged.max_id;

    for source in &sources[1..] {
        let mut doc = source.document().clone();

        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        merged.objects.extend(doc.objects);

        append_to_page_tree(&mut merged, &doc_pages, base.path())?;
    }

    merged.renumber_objects();
    merged.compress();

    Ok(merged)
}

/// Append page references to the merged document's page tree.
fn append_to_page_tree(
    merged: &mut Document,
    page_ids: &[ObjectId],
    base_path: &Path,
) -> Result<(), MergeError> {
    let malformed = |detail: &str| {
        MergeError::source_unreadable(OpenError::unreadable(
            base_path,
            format!("malformed page tree: {detail}"),
        ))
    };

    let pages_id = merged
        .catalog_mut()
        .map_err(|err| malformed(&err.to_string()))?
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|err| malformed(&err.to_string()))?;

    let pages_obj = merged
        .get_object_mut(pages_id)
        .map_err(|err| malformed(&err.to_string()))?;

    let Object::Dictionary(dict) = pages_obj else {
        return Err(malformed("Pages object is not a dictionary"));
    };

    match dict.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => {
            for &page_id in page_ids {
                kids.push(Object::Reference(page_id));
            }
        }
        _ => return Err(malformed("Pages dictionary missing Kids array")),
    }

    let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
