//! The shelf controller: composition root for shelf, history, and
//! assembly.
//!
//! The controller owns the collection and the history manager and is the
//! only writer of either; callers mutate shelf state exclusively through
//! `&mut ShelfController` on the interactive task. Assembly and
//! page-info resolution run on the blocking pool and communicate back as
//! awaited values; worker code never touches shelf state. After every
//! mutation a read-only [`ShelfView`] is published to subscribers, so
//! presentation layers observe explicit change notifications instead of
//! shared mutable fields.

use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task;
use tracing::{debug, warn};

use crate::assemble::{self, PageRanges};
use crate::context::{AppContext, ResolvedPageInfo};
use crate::error::{MergeError, OpenError, SplitError};
use crate::shelf::{
    DropZone, FocusDirection, HistoryManager, ItemId, ShelfCollection, ShelfItem, Snapshot,
};
use crate::utils;

/// Parallelism for resolving added files.
const RESOLVE_WORKERS: usize = 4;

/// How a shelf item should be split.
#[derive(Debug, Clone)]
pub enum SplitMode {
    /// One output file per page.
    PerPage,
    /// One output file per range, in range order.
    ByRanges(PageRanges),
}

/// Read-only value snapshot of the whole shelf state.
///
/// Published to subscribers after each mutation; safe to hold across
/// further mutations because nothing in it aliases live state.
#[derive(Debug, Clone, Default)]
pub struct ShelfView {
    /// Items in shelf order.
    pub items: Vec<ShelfItem>,
    /// Selected item ids.
    pub selected: HashSet<ItemId>,
    /// Focused item id.
    pub focused: Option<ItemId>,
    /// Item being dragged, during an active gesture.
    pub dragged: Option<ItemId>,
    /// Item under the pointer, during an active gesture.
    pub drop_target: Option<ItemId>,
    /// Insertion slot the drag would commit to.
    pub pending_insertion: Option<usize>,
}

/// Orchestrates shelf mutations, history, and assembly operations.
pub struct ShelfController {
    shelf: ShelfCollection,
    history: HistoryManager,
    context: AppContext,
    in_flight: Arc<Mutex<HashSet<PathBuf>>>,
    updates: watch::Sender<ShelfView>,
}

impl ShelfController {
    /// Create a controller with an empty shelf.
    pub fn new(context: AppContext) -> Self {
        let (updates, _) = watch::channel(ShelfView::default());
        Self {
            shelf: ShelfCollection::new(),
            history: HistoryManager::new(),
            context,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            updates,
        }
    }

    /// Subscribe to shelf state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ShelfView> {
        self.updates.subscribe()
    }

    /// Read-only access to the collection.
    pub fn shelf(&self) -> &ShelfCollection {
        &self.shelf
    }

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Add files to the shelf.
    ///
    /// Only `.pdf` paths (case-insensitive) are accepted; the rest are
    /// silently dropped. Page counts and thumbnails resolve off the
    /// interactive task in bounded parallel, and the whole batch commits
    /// in request order once every file has resolved. Files that fail to
    /// resolve are still added, with a page count of zero. Returns the
    /// number of accepted paths.
    pub async fn add_paths(&mut self, paths: Vec<PathBuf>) -> usize {
        let accepted: Vec<PathBuf> = paths
            .into_iter()
            .filter(|path| utils::has_pdf_extension(path))
            .collect();
        if accepted.is_empty() {
            return 0;
        }

        let resolver = Arc::clone(self.context.resolver());
        let tasks = accepted.iter().cloned().enumerate().map(|(index, path)| {
            let resolver = Arc::clone(&resolver);
            async move {
                let work_path = path.clone();
                let outcome = run_blocking(move || resolver.resolve(&work_path)).await;
                (index, path, outcome)
            }
        });

        let mut resolved: Vec<(usize, PathBuf, Result<ResolvedPageInfo, OpenError>)> =
            stream::iter(tasks)
                .buffer_unordered(RESOLVE_WORKERS)
                .collect()
                .await;
        resolved.sort_by_key(|(index, _, _)| *index);

        let items: Vec<ShelfItem> = resolved
            .into_iter()
            .map(|(_, path, outcome)| match outcome {
                Ok(info) => ShelfItem::new(path, info.page_count, info.thumbnail),
                Err(err) => {
                    warn!(error = %err, "added file failed to resolve");
                    ShelfItem::new(path, 0, None)
                }
            })
            .collect();

        let count = items.len();
        self.history.push(self.shelf.snapshot());
        self.shelf.append(items);
        debug!(added = count, total = self.shelf.len(), "files added to shelf");
        self.publish();
        count
    }

    /// Remove an item from the shelf.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let snapshot = self.shelf.snapshot();
        if !self.shelf.remove(id) {
            return false;
        }
        self.history.push(snapshot);
        self.publish();
        true
    }

    /// Remove every selected item, snapshotting first.
    pub fn remove_selected(&mut self) -> bool {
        let snapshot = self.shelf.snapshot();
        if !self.shelf.remove_selected() {
            return false;
        }
        self.history.push(snapshot);
        self.publish();
        true
    }

    /// Select an item (see [`ShelfCollection::select`]).
    pub fn select(&mut self, id: ItemId, extend: bool) {
        self.shelf.select(id, extend);
        self.publish();
    }

    /// Select every item.
    pub fn select_all(&mut self) {
        self.shelf.select_all();
        self.publish();
    }

    /// Move the focus cursor.
    pub fn move_focus(&mut self, direction: FocusDirection) {
        self.shelf.move_focus(direction);
        self.publish();
    }

    /// Toggle the focused item's selection.
    pub fn toggle_focused_selection(&mut self) {
        self.shelf.toggle_focused_selection();
        self.publish();
    }

    /// Move an item to an insertion slot, snapshotting first.
    ///
    /// A slot that resolves to the item's current position changes
    /// nothing and records no history entry.
    pub fn move_item(&mut self, id: ItemId, insertion_index: usize) -> bool {
        let snapshot = self.shelf.snapshot();
        if !self.shelf.move_item(id, insertion_index) {
            return false;
        }
        self.history.push(snapshot);
        self.publish();
        true
    }

    /// Start a drag gesture.
    pub fn begin_drag(&mut self, id: ItemId) -> bool {
        let started = self.shelf.begin_drag(id);
        if started {
            self.publish();
        }
        started
    }

    /// Update the drag's proposed insertion slot.
    pub fn update_insertion_index(&mut self, over: ItemId, zone: DropZone) -> Option<usize> {
        let proposal = self.shelf.update_insertion_index(over, zone);
        if proposal.is_some() {
            self.publish();
        }
        proposal
    }

    /// Finish the drag gesture, committing the proposed slot.
    pub fn end_drag(&mut self) -> bool {
        let snapshot = self.shelf.snapshot();
        let moved = self.shelf.end_drag();
        if moved {
            self.history.push(snapshot);
        }
        self.publish();
        moved
    }

    /// Empty the shelf, snapshotting first.
    pub fn clear(&mut self) -> bool {
        let snapshot = self.shelf.snapshot();
        if !self.shelf.clear() {
            return false;
        }
        self.history.push(snapshot);
        self.publish();
        true
    }

    /// Undo the most recent mutating operation.
    ///
    /// Returns false when there is nothing to undo.
    pub async fn undo(&mut self) -> bool {
        let current = self.shelf.snapshot();
        let Some(snapshot) = self.history.undo(current) else {
            return false;
        };
        self.restore(snapshot).await;
        self.publish();
        true
    }

    /// Redo the most recently undone operation.
    pub async fn redo(&mut self) -> bool {
        let current = self.shelf.snapshot();
        let Some(snapshot) = self.history.redo(current) else {
            return false;
        };
        self.restore(snapshot).await;
        self.publish();
        true
    }

    /// Rebuild shelf state from a snapshot.
    ///
    /// Items whose id is still resident are reused as-is (same
    /// identity, cached page count and thumbnail) so selection and
    /// focus keep addressing them. Entries that were evicted are
    /// re-derived from their path under their recorded id.
    async fn restore(&mut self, snapshot: Snapshot) {
        let mut resident: HashMap<ItemId, ShelfItem> = self
            .shelf
            .items()
            .iter()
            .map(|item| (item.id(), item.clone()))
            .collect();

        let mut items = Vec::with_capacity(snapshot.entries.len());
        for entry in &snapshot.entries {
            if let Some(item) = resident.remove(&entry.id) {
                items.push(item);
                continue;
            }

            let resolver = Arc::clone(self.context.resolver());
            let path = entry.path.clone();
            let outcome = run_blocking(move || resolver.resolve(&path)).await;
            let info = outcome.unwrap_or_else(|err| {
                warn!(error = %err, "restored file failed to resolve");
                ResolvedPageInfo::default()
            });
            items.push(ShelfItem::restored(
                entry.id,
                entry.path.clone(),
                info.page_count,
                info.thumbnail,
            ));
        }

        self.shelf.restore(items, snapshot.selected, snapshot.focused);
    }

    /// Merge the shelf's files, in shelf order, into `output`.
    ///
    /// Fails immediately with [`MergeError::NoInputFiles`] on an empty
    /// shelf and with [`MergeError::OutputBusy`] when another assembly
    /// is already writing to the same path. Reads a value snapshot of
    /// the ordered paths, so concurrent shelf edits cannot affect a
    /// merge in flight. Completion or failure is reported to the
    /// notification sink.
    pub async fn perform_merge(&self, output: PathBuf) -> Result<PathBuf, MergeError> {
        if self.shelf.is_empty() {
            self.notify("Merge failed", "There are no files on the shelf");
            return Err(MergeError::NoInputFiles);
        }

        let inputs: Vec<PathBuf> = self
            .shelf
            .items()
            .iter()
            .map(|item| item.path().to_path_buf())
            .collect();

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, &output) else {
            self.notify(
                "Merge failed",
                &format!("Another operation is writing to {}", output.display()),
            );
            return Err(MergeError::OutputBusy(output));
        };

        match assemble::merge(inputs, output).await {
            Ok(outcome) => {
                self.notify(
                    "Merge complete",
                    &format!(
                        "Merged {} file(s) into {} page(s) at {}",
                        outcome.files_merged,
                        outcome.total_pages,
                        outcome.output.display()
                    ),
                );
                Ok(outcome.output)
            }
            Err(err) => {
                self.notify("Merge failed", &err.to_string());
                Err(err)
            }
        }
    }

    /// Split one shelf item into `output_dir`.
    ///
    /// Fails with [`SplitError::NoInputFiles`] when `id` is not on the
    /// shelf and with [`SplitError::OutputBusy`] when another assembly
    /// is already writing into the same directory. Per-page splits name
    /// outputs after the source file's stem; range splits use a generic
    /// `part` prefix.
    pub async fn perform_split(
        &self,
        id: ItemId,
        output_dir: PathBuf,
        mode: SplitMode,
    ) -> Result<Vec<PathBuf>, SplitError> {
        let Some(item) = self.shelf.item(id) else {
            self.notify("Split failed", "The selected file is no longer on the shelf");
            return Err(SplitError::NoInputFiles);
        };
        let input = item.path().to_path_buf();

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, &output_dir) else {
            self.notify(
                "Split failed",
                &format!("Another operation is writing into {}", output_dir.display()),
            );
            return Err(SplitError::OutputBusy(output_dir));
        };

        let result = match mode {
            SplitMode::PerPage => {
                let prefix = input
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "page".to_string());
                assemble::split_every(input, output_dir.clone(), prefix).await
            }
            SplitMode::ByRanges(ranges) => {
                assemble::split_by_ranges(input, ranges, output_dir.clone(), "part".to_string())
                    .await
            }
        };

        match &result {
            Ok(outputs) => self.notify(
                "Split complete",
                &format!(
                    "Wrote {} file(s) to {}",
                    outputs.len(),
                    output_dir.display()
                ),
            ),
            Err(err) => self.notify("Split failed", &err.to_string()),
        }

        result
    }

    fn notify(&self, title: &str, body: &str) {
        self.context.notifier().notify(title, body);
    }

    fn publish(&self) {
        self.updates.send_replace(self.view());
    }

    fn view(&self) -> ShelfView {
        ShelfView {
            items: self.shelf.items().to_vec(),
            selected: self.shelf.selected().clone(),
            focused: self.shelf.focused(),
            dragged: self.shelf.dragged(),
            drop_target: self.shelf.drop_target(),
            pending_insertion: self.shelf.pending_insertion(),
        }
    }
}

/// Registry of output paths with an assembly operation in flight.
///
/// Acquiring inserts the key and fails when it is already held; dropping
/// the guard releases it.
struct InFlightGuard {
    registry: Arc<Mutex<HashSet<PathBuf>>>,
    key: PathBuf,
}

impl InFlightGuard {
    fn acquire(registry: &Arc<Mutex<HashSet<PathBuf>>>, key: &Path) -> Option<Self> {
        let mut held = registry.lock().unwrap_or_else(PoisonError::into_inner);
        if !held.insert(key.to_path_buf()) {
            return None;
        }
        drop(held);
        Some(Self {
            registry: Arc::clone(registry),
            key: key.to_path_buf(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Run a blocking closure on the blocking pool, propagating panics.
async fn run_blocking<T, F>(work: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match task::spawn_blocking(work).await {
        Ok(value) => value,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => panic!("resolver task cancelled: {err}"),
    }
}
