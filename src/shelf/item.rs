//! Shelf items and their identifiers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a shelf item.
///
/// Minted once at item creation from a process-wide counter and never
/// reused by the generator; identity is the addressing invariant for
/// selection, focus, and drag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ItemId(u64);

impl ItemId {
    /// Mint a fresh, never-before-issued id.
    pub(crate) fn mint() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Opaque thumbnail image bytes supplied by a resolver collaborator.
///
/// This crate performs no rendering; whatever bytes a resolver provides
/// are carried as-is and shared by reference count so views clone
/// cheaply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Encoded image data.
    pub bytes: Vec<u8>,
}

/// One staged file on the shelf.
///
/// Owned exclusively by the collection; everything handed to the
/// presentation layer is a clone.
#[derive(Debug, Clone)]
pub struct ShelfItem {
    id: ItemId,
    path: PathBuf,
    page_count: usize,
    thumbnail: Option<Arc<Thumbnail>>,
}

impl ShelfItem {
    /// Create an item with a freshly minted id.
    pub fn new(path: PathBuf, page_count: usize, thumbnail: Option<Arc<Thumbnail>>) -> Self {
        Self {
            id: ItemId::mint(),
            path,
            page_count,
            thumbnail,
        }
    }

    /// Recreate an item under a previously issued id.
    ///
    /// Used when restoring history snapshots so selection and focus keep
    /// addressing the same logical item.
    pub(crate) fn restored(
        id: ItemId,
        path: PathBuf,
        page_count: usize,
        thumbnail: Option<Arc<Thumbnail>>,
    ) -> Self {
        Self {
            id,
            path,
            page_count,
            thumbnail,
        }
    }

    /// The item's identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Path of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached page count (0 until resolved, or for unreadable files).
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Cached thumbnail, if a resolver supplied one.
    pub fn thumbnail(&self) -> Option<&Arc<Thumbnail>> {
        self.thumbnail.as_ref()
    }

    /// File name component of the path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether the document has more than one page (split is useful).
    pub fn is_multi_page(&self) -> bool {
        self.page_count > 1
    }
}
