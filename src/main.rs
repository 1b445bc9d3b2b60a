//! pdfshelf - merge and split PDF files from the command line.

use clap::Parser;
use std::path::Path;
use std::process;
use thiserror::Error;

use pdfshelf::assemble::{self, PageRanges};
use pdfshelf::cli::{Cli, Command};
use pdfshelf::error::{MergeError, OpenError, SplitError};
use pdfshelf::io::PdfSource;
use pdfshelf::output::OutputFormatter;
use pdfshelf::utils;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let formatter = OutputFormatter::new(cli.quiet, cli.verbose);

    if let Err(err) = run(cli, &formatter).await {
        formatter.error(&err.to_string());
        process::exit(err.exit_code());
    }
}

/// Route log events to stderr; `RUST_LOG` overrides the default level.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Failures surfaced by the CLI, each with its process exit code.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Open(#[from] OpenError),

    #[error(transparent)]
    Usage(#[from] anyhow::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Merge(err) => err.exit_code(),
            Self::Split(err) => err.exit_code(),
            Self::Open(err) => err.exit_code(),
            Self::Usage(_) => 1,
        }
    }
}

/// Main application logic.
async fn run(cli: Cli, formatter: &OutputFormatter) -> Result<(), CliError> {
    match cli.command {
        Command::Merge { inputs, output } => {
            let paths = utils::collect_input_paths(&inputs)?;

            formatter.info(&format!("Merging {} file(s)...", paths.len()));
            for (index, path) in paths.iter().enumerate() {
                formatter.debug(&format!("[{}/{}] {}", index + 1, paths.len(), path.display()));
            }

            let outcome = assemble::merge(paths, output).await?;
            formatter.success(&format!(
                "Created {} ({} page(s) from {} file(s))",
                outcome.output.display(),
                outcome.total_pages,
                outcome.files_merged
            ));
        }

        Command::Split {
            input,
            output_dir,
            prefix,
            ranges,
        } => {
            let outputs = match ranges {
                Some(expr) => {
                    let ranges = PageRanges::parse(&expr)?;
                    let prefix = prefix.unwrap_or_else(|| "part".to_string());
                    assemble::split_by_ranges(input, ranges, output_dir.clone(), prefix).await?
                }
                None => {
                    let prefix = prefix.unwrap_or_else(|| per_page_prefix(&input));
                    assemble::split_every(input, output_dir.clone(), prefix).await?
                }
            };

            formatter.success(&format!(
                "Wrote {} file(s) to {}",
                outputs.len(),
                output_dir.display()
            ));
            for (index, path) in outputs.iter().enumerate() {
                formatter.list_item(index + 1, &path.display().to_string());
            }
        }

        Command::Pages { input, json } => {
            let info = PdfSource::inspect(&input)?;

            if json {
                let report = serde_json::to_string_pretty(&info).map_err(anyhow::Error::from)?;
                println!("{report}");
            } else {
                formatter.info(&format!(
                    "{}: {} page(s)",
                    info.path.display(),
                    info.page_count
                ));
                formatter.detail("Version", &info.version);
                formatter.detail("File size", &utils::format_file_size(info.file_size));
                formatter.detail("Objects", &info.object_count.to_string());
                if let Some((width, height)) = info.page_dimensions {
                    formatter.detail("Page size", &format!("{width:.1} x {height:.1} pts"));
                }
            }
        }
    }

    Ok(())
}

/// Per-page split outputs are named after the source file's stem.
fn per_page_prefix(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string())
}
