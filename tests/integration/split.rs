//! Integration tests for splitting.

use pdfshelf::assemble::{self, PageRanges};
use pdfshelf::error::SplitError;
use tempfile::TempDir;

use crate::common::{page_count, page_widths, write_pdf, write_pdf_with_pages};

#[tokio::test]
async fn test_split_every_produces_one_file_per_page() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "report.pdf", &[100, 200, 300]);
    let out_dir = temp_dir.path().join("pages");

    let outputs = assemble::split_every(input, out_dir.clone(), "report".to_string())
        .await
        .unwrap();

    assert_eq!(outputs.len(), 3);
    for (i, path) in outputs.iter().enumerate() {
        assert_eq!(path, &out_dir.join(format!("report-{}.pdf", i + 1)));
        assert_eq!(page_count(path), 1);
    }
    // Page i of file i is source page i-1.
    assert_eq!(page_widths(&outputs[0]), vec![100]);
    assert_eq!(page_widths(&outputs[1]), vec![200]);
    assert_eq!(page_widths(&outputs[2]), vec![300]);
}

#[tokio::test]
async fn test_split_every_empty_document() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "empty.pdf", &[]);

    let result = assemble::split_every(
        input,
        temp_dir.path().join("out"),
        "empty".to_string(),
    )
    .await;
    assert!(matches!(result, Err(SplitError::Empty { .. })));
}

#[tokio::test]
async fn test_split_every_unreadable_source() {
    let temp_dir = TempDir::new().unwrap();
    let bad = temp_dir.path().join("bad.pdf");
    std::fs::write(&bad, b"junk").unwrap();

    let result =
        assemble::split_every(bad, temp_dir.path().join("out"), "bad".to_string()).await;
    assert!(matches!(result, Err(SplitError::SourceUnreadable { .. })));
}

#[tokio::test]
async fn test_split_cannot_create_dir_over_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf_with_pages(temp_dir.path(), "input.pdf", 1);
    let blocked = temp_dir.path().join("blocked");
    std::fs::write(&blocked, b"a file, not a directory").unwrap();

    let result = assemble::split_every(input, blocked, "page".to_string()).await;
    assert!(matches!(result, Err(SplitError::CannotCreateDir { .. })));
}

#[tokio::test]
async fn test_split_by_ranges_basic() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "input.pdf", &[100, 200, 300, 400]);
    let out_dir = temp_dir.path().join("parts");

    let ranges = PageRanges::new(vec![(1, 3), (4, 4)]);
    let outputs = assemble::split_by_ranges(input, ranges, out_dir.clone(), "part".to_string())
        .await
        .unwrap();

    assert_eq!(outputs.len(), 2);
    assert_eq!(page_count(&outputs[0]), 3);
    assert_eq!(page_count(&outputs[1]), 1);
    assert_eq!(page_widths(&outputs[0]), vec![100, 200, 300]);
    assert_eq!(page_widths(&outputs[1]), vec![400]);
}

#[tokio::test]
async fn test_split_by_ranges_out_of_range_span_keeps_numbering() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "input.pdf", &[100, 200]);
    let out_dir = temp_dir.path().join("parts");

    // The first span is entirely outside the document: it produces no
    // file, but the second span still takes range position 2.
    let ranges = PageRanges::new(vec![(5, 9), (1, 1)]);
    let outputs = assemble::split_by_ranges(input, ranges, out_dir.clone(), "part".to_string())
        .await
        .unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0], out_dir.join("part-2.pdf"));
    assert!(!out_dir.join("part-1.pdf").exists());
    assert_eq!(page_widths(&outputs[0]), vec![100]);
}

#[tokio::test]
async fn test_split_by_ranges_clips_overlong_span() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "input.pdf", &[100, 200, 300]);

    let ranges = PageRanges::new(vec![(2, 99)]);
    let outputs = assemble::split_by_ranges(
        input,
        ranges,
        temp_dir.path().join("out"),
        "part".to_string(),
    )
    .await
    .unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(page_widths(&outputs[0]), vec![200, 300]);
}

#[tokio::test]
async fn test_split_round_trip_merge() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "input.pdf", &[100, 200, 300]);
    let out_dir = temp_dir.path().join("pages");

    let parts = assemble::split_every(input.clone(), out_dir, "input".to_string())
        .await
        .unwrap();
    let rejoined = temp_dir.path().join("rejoined.pdf");
    assemble::merge(parts, rejoined.clone()).await.unwrap();

    assert_eq!(page_widths(&rejoined), page_widths(&input));
}
