//! Integration tests for merging.

use pdfshelf::assemble;
use pdfshelf::error::MergeError;
use tempfile::TempDir;

use crate::common::{page_count, page_widths, write_pdf, write_pdf_with_pages};

#[tokio::test]
async fn test_merge_three_documents_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &[100]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &[200, 201]);
    let c = write_pdf(temp_dir.path(), "c.pdf", &[300, 301, 302]);
    let output = temp_dir.path().join("merged.pdf");

    let outcome = assemble::merge(vec![a, b, c], output.clone()).await.unwrap();

    // Page count is the sum of the inputs' counts, pages in input-list
    // then intra-document order: A0, B0, B1, C0, C1, C2.
    assert_eq!(outcome.total_pages, 6);
    assert_eq!(page_count(&output), 6);
    assert_eq!(page_widths(&output), vec![100, 200, 201, 300, 301, 302]);
}

#[tokio::test]
async fn test_merge_empty_input_list() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("merged.pdf");

    let result = assemble::merge(vec![], output.clone()).await;
    assert!(matches!(result, Err(MergeError::NoInputFiles)));
    assert!(!output.exists(), "no output may be created");
}

#[tokio::test]
async fn test_merge_unreadable_input_leaves_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf_with_pages(temp_dir.path(), "a.pdf", 2);
    let bad = temp_dir.path().join("bad.pdf");
    std::fs::write(&bad, b"definitely not a pdf").unwrap();
    let output = temp_dir.path().join("merged.pdf");

    let result = assemble::merge(vec![a, bad.clone()], output.clone()).await;
    match result {
        Err(MergeError::SourceUnreadable { path, .. }) => assert_eq!(path, bad),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn test_merge_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.pdf");
    let output = temp_dir.path().join("merged.pdf");

    let result = assemble::merge(vec![missing], output).await;
    assert!(matches!(result, Err(MergeError::SourceUnreadable { .. })));
}

#[tokio::test]
async fn test_merge_write_failure_reports_destination() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf_with_pages(temp_dir.path(), "a.pdf", 1);
    let output = temp_dir.path().join("no/such/dir/merged.pdf");

    let result = assemble::merge(vec![a], output.clone()).await;
    match result {
        Err(MergeError::WriteFailed { path, .. }) => assert_eq!(path, output),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_merged_output_is_mergeable_again() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &[100]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &[200]);
    let first = temp_dir.path().join("first.pdf");
    let second = temp_dir.path().join("second.pdf");

    assemble::merge(vec![a, b], first.clone()).await.unwrap();
    let outcome = assemble::merge(vec![first.clone(), first], second.clone())
        .await
        .unwrap();

    assert_eq!(outcome.total_pages, 4);
    assert_eq!(page_widths(&second), vec![100, 200, 100, 200]);
}
