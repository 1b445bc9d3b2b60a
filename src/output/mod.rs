//! Output formatting and display for the pdfshelf CLI.
//!
//! This module handles user-facing output:
//! - Formatted status messages
//! - Error and warning display
//! - Quiet and verbose modes
//!
//! Library code logs through `tracing`; this formatter is the CLI's
//! presentation surface only.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};
