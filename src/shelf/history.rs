//! Bounded undo/redo history over shelf snapshots.
//!
//! History is linear: every new push invalidates the entire redo branch.
//! Undo and redo are exchange operations: the caller hands in a
//! snapshot of the current state, which becomes the opposing stack's new
//! top, and receives the popped snapshot to restore. The exchange is
//! what makes `redo(undo(s)) == s` hold.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::time::SystemTime;

use crate::shelf::item::{ItemId, ShelfItem};

/// Maximum number of retained undo entries.
pub const MAX_HISTORY: usize = 50;

/// One ordered entry of a captured shelf state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Identity of the item at this position.
    pub id: ItemId,
    /// Path the item was staged from.
    pub path: PathBuf,
}

/// Immutable capture of shelf ordering, selection, and focus.
///
/// Entries carry item ids so a restore can hand selection and focus back
/// to the same logical items; page counts and thumbnails are re-derived
/// (or reused from still-resident items) at restore time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Items in shelf order.
    pub entries: Vec<SnapshotEntry>,
    /// Selected item ids at capture time.
    pub selected: HashSet<ItemId>,
    /// Focused item id at capture time.
    pub focused: Option<ItemId>,
    /// When the snapshot was captured.
    pub captured_at: SystemTime,
}

impl Snapshot {
    /// Capture a snapshot from live shelf state.
    pub fn capture(
        items: &[ShelfItem],
        selected: HashSet<ItemId>,
        focused: Option<ItemId>,
    ) -> Self {
        Self {
            entries: items
                .iter()
                .map(|item| SnapshotEntry {
                    id: item.id(),
                    path: item.path().to_path_buf(),
                })
                .collect(),
            selected,
            focused,
            captured_at: SystemTime::now(),
        }
    }

    /// The captured paths in shelf order.
    pub fn ordered_paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|entry| entry.path.clone()).collect()
    }
}

/// Bounded undo/redo stacks of shelf snapshots.
#[derive(Debug, Default)]
pub struct HistoryManager {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
}

impl HistoryManager {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pre-mutation snapshot.
    ///
    /// Evicts the oldest entry past [`MAX_HISTORY`] and discards every
    /// pending redo entry.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        if self.undo.len() > MAX_HISTORY {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Pop the most recent undo snapshot, exchanging it for `current`.
    ///
    /// `current` becomes the redo top so a following redo restores it.
    /// Returns `None` (and drops `current`) when there is nothing to
    /// undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo.pop_back()?;
        self.redo.push_back(current);
        Some(snapshot)
    }

    /// Pop the most recent redo snapshot, exchanging it for `current`.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo.pop_back()?;
        self.undo.push_back(current);
        Some(snapshot)
    }

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of retained undo entries.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Empty both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
