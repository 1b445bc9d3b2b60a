//! I/O operations for pdfshelf.
//!
//! This module handles all file I/O:
//! - Opening and parsing PDF source documents
//! - Page handles into opened documents
//! - Atomic writes of assembled documents
//! - Document inspection reports

pub mod source;
pub mod writer;

pub use source::{DocumentInfo, PageRef, PdfSource};
pub use writer::{ensure_dir, write_document};
