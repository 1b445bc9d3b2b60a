//! Utilities for path collection and display helpers.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Check whether a path carries a `.pdf` extension (case-insensitive).
///
/// The shelf only trusts `.pdf` paths from drop sources and file pickers;
/// everything else is silently dropped.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Expand CLI input arguments into PDF paths.
///
/// Each argument may be a literal path, a glob pattern (`chapters/*.pdf`),
/// or a directory, which is walked recursively for PDF files. Results keep
/// argument order; directory and glob expansions are sorted within an
/// argument so runs are deterministic.
///
/// Errors:
/// - Propagates `glob` pattern parse errors.
/// - Propagates filesystem errors from the glob iterator.
pub fn collect_input_paths<T>(patterns: T) -> anyhow::Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let as_path = Path::new(pattern);

        if as_path.is_dir() {
            resolved.extend(collect_pdfs_in_dir(as_path));
        } else if as_path.is_file() {
            resolved.push(as_path.to_path_buf());
        } else {
            let mut matched: Vec<PathBuf> = glob::glob(pattern)?.collect::<Result<_, _>>()?;
            matched.sort();
            resolved.extend(matched);
        }
    }

    Ok(resolved)
}

/// Recursively collect PDF files below a directory, sorted by path.
pub fn collect_pdfs_in_dir(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_pdf_extension(path))
        .collect();
    paths.sort();
    paths
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
