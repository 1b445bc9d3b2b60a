//! End-to-end shelf controller tests against real files.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use pdfshelf::assemble::PageRanges;
use pdfshelf::context::{AppContext, NotificationSink, PdfSourceResolver};
use pdfshelf::controller::{ShelfController, SplitMode};
use pdfshelf::error::MergeError;
use pdfshelf::shelf::{DropZone, ItemId};
use tempfile::TempDir;

use crate::common::{page_count, page_widths, write_pdf};

/// Sink that records every notification title.
struct RecordingSink(Mutex<Vec<String>>);

impl NotificationSink for RecordingSink {
    fn notify(&self, title: &str, _body: &str) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(title.to_string());
    }
}

fn recording_controller() -> (ShelfController, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink(Mutex::new(Vec::new())));
    let context = AppContext::new(Arc::new(PdfSourceResolver), sink.clone());
    (ShelfController::new(context), sink)
}

fn titles(sink: &RecordingSink) -> Vec<String> {
    sink.0
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn ids(controller: &ShelfController) -> Vec<ItemId> {
    controller
        .shelf()
        .items()
        .iter()
        .map(|item| item.id())
        .collect()
}

#[tokio::test]
async fn test_add_resolves_real_page_counts() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &[100]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &[200, 201]);

    let (mut controller, _) = recording_controller();
    let added = controller.add_paths(vec![a, b]).await;

    assert_eq!(added, 2);
    let counts: Vec<usize> = controller
        .shelf()
        .items()
        .iter()
        .map(|item| item.page_count())
        .collect();
    assert_eq!(counts, vec![1, 2]);
}

#[tokio::test]
async fn test_merge_through_controller() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &[100]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &[200, 201]);
    let c = write_pdf(temp_dir.path(), "c.pdf", &[300, 301, 302]);
    let output = temp_dir.path().join("merged.pdf");

    let (mut controller, sink) = recording_controller();
    controller.add_paths(vec![a, b, c]).await;

    let merged = controller.perform_merge(output.clone()).await.unwrap();
    assert_eq!(merged, output);
    assert_eq!(page_count(&output), 6);
    assert_eq!(titles(&sink), vec!["Merge complete".to_string()]);
}

#[tokio::test]
async fn test_reorder_then_merge_uses_shelf_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &[100]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &[200]);
    let c = write_pdf(temp_dir.path(), "c.pdf", &[300]);
    let d = write_pdf(temp_dir.path(), "d.pdf", &[400]);
    let output = temp_dir.path().join("merged.pdf");

    let (mut controller, _) = recording_controller();
    controller.add_paths(vec![a, b, c, d]).await;
    let before = ids(&controller);

    // Drag A to the trailing half of C: proposal 3, order becomes
    // [B, C, A, D].
    assert!(controller.begin_drag(before[0]));
    assert_eq!(
        controller.update_insertion_index(before[2], DropZone::Trailing),
        Some(3)
    );
    assert!(controller.end_drag());

    controller.perform_merge(output.clone()).await.unwrap();
    assert_eq!(page_widths(&output), vec![200, 300, 100, 400]);
}

#[tokio::test]
async fn test_merge_failure_notifies() {
    let temp_dir = TempDir::new().unwrap();
    let bad = temp_dir.path().join("bad.pdf");
    std::fs::write(&bad, b"junk").unwrap();
    let output = temp_dir.path().join("merged.pdf");

    let (mut controller, sink) = recording_controller();
    controller.add_paths(vec![bad]).await;

    let result = controller.perform_merge(output).await;
    assert!(matches!(result, Err(MergeError::SourceUnreadable { .. })));
    assert_eq!(titles(&sink), vec!["Merge failed".to_string()]);
}

#[tokio::test]
async fn test_split_through_controller_per_page() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "report.pdf", &[100, 200, 300]);
    let out_dir = temp_dir.path().join("pages");

    let (mut controller, sink) = recording_controller();
    controller.add_paths(vec![input]).await;
    let id = ids(&controller)[0];

    let outputs = controller
        .perform_split(id, out_dir.clone(), SplitMode::PerPage)
        .await
        .unwrap();

    // Per-page outputs are named after the source file's stem.
    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0], out_dir.join("report-1.pdf"));
    assert_eq!(outputs[2], out_dir.join("report-3.pdf"));
    assert_eq!(titles(&sink), vec!["Split complete".to_string()]);
}

#[tokio::test]
async fn test_split_through_controller_by_ranges() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "report.pdf", &[100, 200, 300, 400]);
    let out_dir = temp_dir.path().join("parts");

    let (mut controller, _) = recording_controller();
    controller.add_paths(vec![input]).await;
    let id = ids(&controller)[0];

    let ranges = PageRanges::new(vec![(1, 2), (3, 4)]);
    let outputs = controller
        .perform_split(id, out_dir.clone(), SplitMode::ByRanges(ranges))
        .await
        .unwrap();

    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0], out_dir.join("part-1.pdf"));
    assert_eq!(page_widths(&outputs[1]), vec![300, 400]);
}

#[tokio::test]
async fn test_undo_rederives_evicted_items_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "report.pdf", &[100, 200, 300]);

    let (mut controller, _) = recording_controller();
    controller.add_paths(vec![input]).await;
    let id = ids(&controller)[0];

    assert!(controller.remove(id));
    assert!(controller.shelf().is_empty());

    // The restored item keeps its recorded id and re-reads its page
    // count from disk.
    assert!(controller.undo().await);
    let items = controller.shelf().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), id);
    assert_eq!(items[0].page_count(), 3);

    assert!(controller.redo().await);
    assert!(controller.shelf().is_empty());
}

#[tokio::test]
async fn test_undo_depth_matches_mutation_count() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &[100]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &[200]);
    let c = write_pdf(temp_dir.path(), "c.pdf", &[300]);

    let (mut controller, _) = recording_controller();
    controller.add_paths(vec![a]).await;
    controller.add_paths(vec![b]).await;
    controller.add_paths(vec![c]).await;
    assert_eq!(controller.shelf().len(), 3);

    // Three undos walk back through the adds; a fourth has nothing to do.
    assert!(controller.undo().await);
    assert!(controller.undo().await);
    assert!(controller.undo().await);
    assert!(controller.shelf().is_empty());
    assert!(!controller.undo().await);

    // Redo all the way forward again.
    assert!(controller.redo().await);
    assert!(controller.redo().await);
    assert!(controller.redo().await);
    assert_eq!(controller.shelf().len(), 3);
    assert!(!controller.redo().await);
}

#[tokio::test]
async fn test_add_ignores_non_pdf_paths() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = write_pdf(temp_dir.path(), "a.pdf", &[100]);
    let text = temp_dir.path().join("notes.txt");
    std::fs::write(&text, b"notes").unwrap();

    let (mut controller, _) = recording_controller();
    let added = controller.add_paths(vec![pdf, text, PathBuf::from("x.png")]).await;

    assert_eq!(added, 1);
    assert_eq!(controller.shelf().len(), 1);
}
