//! Document assembly and decomposition.
//!
//! This module implements the assembly engine:
//! - Merging an ordered list of PDFs into one document
//! - Splitting a PDF into one file per page
//! - Splitting a PDF into one file per page range
//! - Page count lookups
//!
//! The `*_blocking` functions do the work synchronously; the async
//! wrappers run them on the blocking thread pool so callers never stall
//! an interactive context.
//!
//! # Examples
//!
//! ```no_run
//! use pdfshelf::assemble;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let outcome = assemble::merge(inputs, PathBuf::from("merged.pdf")).await?;
//! println!("{} pages written", outcome.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod merger;
pub mod ranges;
pub mod splitter;

pub use merger::{MergeOutcome, merge_blocking};
pub use ranges::PageRanges;
pub use splitter::{split_by_ranges_blocking, split_every_blocking};

use std::path::PathBuf;
use tokio::task;

use crate::error::{MergeError, OpenError, SplitError};
use crate::io::PdfSource;

/// Merge `inputs` into `output` off the calling task.
///
/// See [`merge_blocking`] for semantics.
pub async fn merge(inputs: Vec<PathBuf>, output: PathBuf) -> Result<MergeOutcome, MergeError> {
    run_blocking(move || merge_blocking(&inputs, &output)).await
}

/// Split `input` into per-page documents off the calling task.
///
/// See [`split_every_blocking`] for semantics.
pub async fn split_every(
    input: PathBuf,
    output_dir: PathBuf,
    prefix: String,
) -> Result<Vec<PathBuf>, SplitError> {
    run_blocking(move || split_every_blocking(&input, &output_dir, &prefix)).await
}

/// Split `input` into per-range documents off the calling task.
///
/// See [`split_by_ranges_blocking`] for semantics.
pub async fn split_by_ranges(
    input: PathBuf,
    ranges: PageRanges,
    output_dir: PathBuf,
    prefix: String,
) -> Result<Vec<PathBuf>, SplitError> {
    run_blocking(move || split_by_ranges_blocking(&input, ranges.spans(), &output_dir, &prefix))
        .await
}

/// Read the page count of `path` off the calling task.
pub async fn page_count(path: PathBuf) -> Result<usize, OpenError> {
    run_blocking(move || PdfSource::page_count_of(&path)).await
}

/// Run a blocking closure on the blocking pool, propagating panics.
async fn run_blocking<T, F>(work: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match task::spawn_blocking(work).await {
        Ok(value) => value,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => panic!("assembly task cancelled: {err}"),
    }
}
