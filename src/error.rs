//! Error types for pdfshelf.
//!
//! This module defines all error types that can occur during shelf and
//! assembly operations. Errors are designed to be informative and
//! actionable, and to keep read failures distinguishable from write
//! failures so callers can suggest different remedies.
//!
//! # Error Categories
//!
//! - **Open errors**: a source document cannot be read or parsed
//! - **Merge errors**: problems while assembling a combined document
//! - **Split errors**: problems while decomposing a document
//! - **Index errors**: page access outside a document's bounds

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A source document could not be opened.
///
/// Covers missing files, invalid documents, and encrypted or corrupted
/// files alike: from the shelf's point of view they are all unreadable.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The path does not exist or does not parse as a PDF document.
    #[error("cannot open {}: {reason}", path.display())]
    Unreadable {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Human-readable cause (parse error, encryption, ...).
        reason: String,
    },
}

impl OpenError {
    /// Create an Unreadable error.
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Path of the file that failed to open.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Unreadable { path, .. } => path,
        }
    }
}

/// A page index was outside a document's page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page index {index} out of range for document with {page_count} page(s)")]
pub struct IndexError {
    /// The requested zero-based page index.
    pub index: usize,
    /// Number of pages in the document.
    pub page_count: usize,
}

/// Errors produced while merging documents.
#[derive(Debug, Error)]
pub enum MergeError {
    /// No input files were provided for merging.
    #[error("no input files specified for merging")]
    NoInputFiles,

    /// An input document could not be read; the whole merge is aborted
    /// and no output is left on disk.
    #[error("cannot read source PDF: {}", path.display())]
    SourceUnreadable {
        /// Path to the unreadable input.
        path: PathBuf,
        /// The underlying open failure.
        #[source]
        source: OpenError,
    },

    /// The assembled document could not be written to the destination.
    #[error("cannot write merged PDF: {}", path.display())]
    WriteFailed {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Another assembly operation is already writing to this output path.
    #[error("an assembly operation is already writing to {}", .0.display())]
    OutputBusy(PathBuf),
}

/// Errors produced while splitting a document.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The requested input was not found on the shelf.
    #[error("no input file selected for splitting")]
    NoInputFiles,

    /// The input document could not be read.
    #[error("cannot read source PDF: {}", path.display())]
    SourceUnreadable {
        /// Path to the unreadable input.
        path: PathBuf,
        /// The underlying open failure.
        #[source]
        source: OpenError,
    },

    /// The input document has no pages to split.
    #[error("document has no pages: {}", path.display())]
    Empty {
        /// Path to the empty document.
        path: PathBuf,
    },

    /// The output directory could not be created.
    #[error("cannot create output directory: {}", path.display())]
    CannotCreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A split output file could not be written. Files produced before
    /// the failure remain on disk; they are not rolled back.
    #[error("cannot write split output: {}", path.display())]
    WriteFailed {
        /// Path of the file that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Another assembly operation is already writing into this directory.
    #[error("an assembly operation is already writing into {}", .0.display())]
    OutputBusy(PathBuf),
}

impl MergeError {
    /// Wrap an open failure as a merge-level source error.
    pub fn source_unreadable(source: OpenError) -> Self {
        let path = source.path().clone();
        Self::SourceUnreadable { path, source }
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoInputFiles => 1,
            Self::SourceUnreadable { .. } => 3,
            Self::OutputBusy(_) => 4,
            Self::WriteFailed { .. } => 5,
        }
    }
}

impl SplitError {
    /// Wrap an open failure as a split-level source error.
    pub fn source_unreadable(source: OpenError) -> Self {
        let path = source.path().clone();
        Self::SourceUnreadable { path, source }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoInputFiles => 1,
            Self::SourceUnreadable { .. } | Self::Empty { .. } => 3,
            Self::OutputBusy(_) => 4,
            Self::CannotCreateDir { .. } | Self::WriteFailed { .. } => 5,
        }
    }
}

impl OpenError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unreadable { .. } => 3,
        }
    }
}
