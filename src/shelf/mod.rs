//! Shelf state: ordered items, selection, focus, drag, and history.
//!
//! The collection is a pure in-memory state machine; the history manager
//! keeps bounded undo/redo snapshots of it. Asynchronous concerns
//! (resolving page counts, taking snapshots at the right moments) live
//! in the controller.

pub mod collection;
pub mod history;
pub mod item;

pub use collection::{DropZone, FocusDirection, ShelfCollection};
pub use history::{HistoryManager, MAX_HISTORY, Snapshot, SnapshotEntry};
pub use item::{ItemId, ShelfItem, Thumbnail};
