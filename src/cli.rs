//! CLI argument parsing for pdfshelf.
//!
//! This module defines the command-line interface structure using
//! `clap`. The binary drives the assembly engine directly: merging,
//! splitting, and inspecting documents without the interactive shelf.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stage, reorder, merge, and split PDF files.
///
/// pdfshelf merges ordered lists of PDF files into a single document and
/// splits documents into per-page or per-range files.
#[derive(Parser, Debug)]
#[command(name = "pdfshelf")]
#[command(version)]
#[command(about = "Merge and split PDF files", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Verbose output - show detailed information
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge PDF files into a single document
    ///
    /// Inputs are merged in the order given. Each input may be a file,
    /// a glob pattern, or a directory (scanned recursively for PDFs).
    Merge {
        /// Input PDF files, glob patterns, or directories (in order)
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<String>,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Split a PDF into per-page or per-range files
    ///
    /// By default every page becomes its own file, named after the
    /// source file's stem. With --ranges, one file is written per range
    /// (1-based, inclusive, in the order given), numbered by range
    /// position.
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (created if absent)
        #[arg(short = 'd', long, value_name = "DIR")]
        output_dir: PathBuf,

        /// Prefix for output file names
        ///
        /// Defaults to the input file's stem for per-page splits and to
        /// "part" for range splits.
        #[arg(short, long, value_name = "PREFIX")]
        prefix: Option<String>,

        /// Page ranges, e.g. "1-3,7,9-12"
        #[arg(short, long, value_name = "RANGES")]
        ranges: Option<String>,
    },

    /// Show the page count and details of a PDF
    Pages {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}
