//! pdfshelf - Stage, reorder, merge, and split PDF files.
//!
//! This library implements a transient "shelf" of PDF files and the
//! assembly engine behind it. It supports:
//!
//! - Merging ordered lists of PDFs into a single document
//! - Splitting a PDF into per-page or per-range files
//! - An ordered collection with selection, focus, and drag reordering
//! - Bounded undo/redo over shelf ordering and membership
//! - Asynchronous assembly with completion notifications
//!
//! # Examples
//!
//! ## Driving the shelf
//!
//! ```no_run
//! use pdfshelf::context::AppContext;
//! use pdfshelf::controller::ShelfController;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = ShelfController::new(AppContext::with_defaults());
//!
//! controller
//!     .add_paths(vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])
//!     .await;
//! let merged = controller.perform_merge(PathBuf::from("merged.pdf")).await?;
//! println!("wrote {}", merged.display());
//!
//! controller.undo().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the assembly engine directly
//!
//! ```no_run
//! use pdfshelf::assemble::{self, PageRanges};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ranges = PageRanges::parse("1-3,7")?;
//! let parts = assemble::split_by_ranges(
//!     PathBuf::from("input.pdf"),
//!     ranges,
//!     PathBuf::from("out"),
//!     "part".to_string(),
//! )
//! .await?;
//! println!("{} part(s) written", parts.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assemble;
pub mod cli;
pub mod context;
pub mod controller;
pub mod error;
pub mod io;
pub mod output;
pub mod shelf;
pub mod utils;

// Re-export commonly used types
pub use context::AppContext;
pub use controller::{ShelfController, ShelfView, SplitMode};
pub use error::{IndexError, MergeError, OpenError, SplitError};
pub use shelf::{ItemId, ShelfCollection, ShelfItem};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
