//! Read-only access to PDF source documents.
//!
//! A [`PdfSource`] owns one opened document and exposes its pages as
//! opaque handles. Pages are borrows: a [`PageRef`] is only valid while
//! its source is open, and all page content passes through assembly
//! unmodified.
//!
//! # Examples
//!
//! ```no_run
//! use pdfshelf::io::PdfSource;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = PdfSource::open(Path::new("document.pdf"))?;
//! println!("{} pages", source.page_count());
//! let first = source.page(0)?;
//! println!("first page object: {:?}", first.object_id());
//! # Ok(())
//! # }
//! ```

use lopdf::{Document, ObjectId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{IndexError, OpenError};

/// An opened, parsed PDF document.
///
/// Opening performs a full read-only parse; there are no side effects
/// beyond file access. The source exclusively owns its pages.
#[derive(Debug)]
pub struct PdfSource {
    /// Path the document was loaded from.
    path: PathBuf,
    /// The parsed document.
    document: Document,
    /// Page object ids in page order.
    pages: Vec<ObjectId>,
}

impl PdfSource {
    /// Open a PDF file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError::Unreadable`] if the path does not exist, is
    /// not a valid PDF, or is encrypted/corrupted.
    pub fn open(path: &Path) -> Result<Self, OpenError> {
        let document = Document::load(path).map_err(|err| {
            let reason = err.to_string();
            if reason.contains("encrypt") || reason.contains("password") {
                OpenError::unreadable(path, "document is encrypted")
            } else {
                OpenError::unreadable(path, reason)
            }
        })?;

        let pages = document.get_pages().into_values().collect();

        Ok(Self {
            path: path.to_path_buf(),
            document,
            pages,
        })
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a handle to the page at `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index >= page_count`.
    pub fn page(&self, index: usize) -> Result<PageRef<'_>, IndexError> {
        match self.pages.get(index) {
            Some(&id) => Ok(PageRef {
                source: self,
                index,
                id,
            }),
            None => Err(IndexError {
                index,
                page_count: self.pages.len(),
            }),
        }
    }

    /// Borrow the underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Read the page count of a file without keeping it open.
    pub fn page_count_of(path: &Path) -> Result<usize, OpenError> {
        Ok(Self::open(path)?.page_count())
    }

    /// Inspect a file and produce a summary report.
    pub fn inspect(path: &Path) -> Result<DocumentInfo, OpenError> {
        let source = Self::open(path)?;
        Ok(DocumentInfo::from_source(&source))
    }
}

/// Opaque handle to one page of an opened document.
///
/// Carries no owned state beyond its index; valid only while the source
/// document is open.
#[derive(Debug, Clone, Copy)]
pub struct PageRef<'a> {
    source: &'a PdfSource,
    index: usize,
    id: ObjectId,
}

impl<'a> PageRef<'a> {
    /// Zero-based index of this page in its source document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Object id of the page in the source document.
    pub fn object_id(&self) -> ObjectId {
        self.id
    }

    /// The source document this page belongs to.
    pub fn source(&self) -> &'a PdfSource {
        self.source
    }
}

/// Summary of an inspected PDF file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Path to the inspected file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// PDF version string.
    pub version: String,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the document.
    pub object_count: usize,

    /// First-page dimensions (width, height) in points, if available.
    pub page_dimensions: Option<(f32, f32)>,
}

impl DocumentInfo {
    fn from_source(source: &PdfSource) -> Self {
        let doc = source.document();

        // First-page MediaBox, when present and well-formed.
        let page_dimensions = source.pages.first().and_then(|&page_id| {
            let page_obj = doc.get_object(page_id).ok()?;
            let dict = page_obj.as_dict().ok()?;
            let mediabox = dict.get(b"MediaBox").ok()?;
            if let lopdf::Object::Array(arr) = mediabox
                && arr.len() >= 4
            {
                let width = arr[2].as_float().ok()?;
                let height = arr[3].as_float().ok()?;
                return Some((width, height));
            }
            None
        });

        let file_size = std::fs::metadata(source.path()).map(|m| m.len()).unwrap_or(0);

        Self {
            path: source.path().to_path_buf(),
            page_count: source.page_count(),
            version: doc.version.clone(),
            file_size,
            object_count: doc.objects.len(),
            page_dimensions,
        }
    }
}
