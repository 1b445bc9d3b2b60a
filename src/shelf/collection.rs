//! The ordered shelf collection.
//!
//! A [`ShelfCollection`] is a state machine over the ordered item list,
//! the selection set, the focus cursor, and transient drag-session
//! fields. It is purely synchronous and never touches the file system;
//! asynchronous resolution and history snapshots are the controller's
//! job. Mutating operations report whether they changed anything so the
//! caller can decide when a history snapshot is worth keeping.
//!
//! Invariants:
//! - `selected` is a subset of the item ids at all times.
//! - `focused` is `None` or the id of a present item.
//! - Drag-session fields are `None` outside an active drag gesture.

use std::collections::HashSet;

use crate::shelf::history::Snapshot;
use crate::shelf::item::{ItemId, ShelfItem};

/// Direction for keyboard focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Towards the front of the shelf.
    Previous,
    /// Towards the back of the shelf.
    Next,
}

/// Which half of an item the pointer is crossing during a drag.
///
/// The midpoint rule: crossing the leading half of the item at position
/// `index` proposes insertion at `index`, the trailing half at
/// `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    /// The half nearer the front of the shelf.
    Leading,
    /// The half nearer the back of the shelf.
    Trailing,
}

/// Ordered, uniquely-keyed set of staged files with selection, focus,
/// and drag-reorder state.
#[derive(Debug, Default)]
pub struct ShelfCollection {
    items: Vec<ShelfItem>,
    selected: HashSet<ItemId>,
    focused: Option<ItemId>,
    dragged: Option<ItemId>,
    drop_target: Option<ItemId>,
    pending_insertion: Option<usize>,
}

impl ShelfCollection {
    /// Create an empty shelf.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items on the shelf.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the shelf is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items in shelf order.
    pub fn items(&self) -> &[ShelfItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&ShelfItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Position of an item in shelf order.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// The selected item ids.
    pub fn selected(&self) -> &HashSet<ItemId> {
        &self.selected
    }

    /// Selected items in shelf order.
    pub fn selected_items(&self) -> Vec<&ShelfItem> {
        self.items
            .iter()
            .filter(|item| self.selected.contains(&item.id()))
            .collect()
    }

    /// The single selected item, if exactly one is selected.
    pub fn single_selection(&self) -> Option<&ShelfItem> {
        if self.selected.len() != 1 {
            return None;
        }
        self.items.iter().find(|item| self.selected.contains(&item.id()))
    }

    /// The focused item id.
    pub fn focused(&self) -> Option<ItemId> {
        self.focused
    }

    /// The id being dragged, while a drag gesture is active.
    pub fn dragged(&self) -> Option<ItemId> {
        self.dragged
    }

    /// The item currently under the pointer during a drag.
    pub fn drop_target(&self) -> Option<ItemId> {
        self.drop_target
    }

    /// The insertion slot the drag would commit to if dropped now.
    pub fn pending_insertion(&self) -> Option<usize> {
        self.pending_insertion
    }

    /// Append a resolved batch to the end of the shelf, in batch order.
    pub fn append(&mut self, items: Vec<ShelfItem>) {
        self.items.extend(items);
    }

    /// Remove the item with `id`, pruning it from selection and focus.
    ///
    /// Returns false when no item has that id.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        self.items.remove(index);
        self.selected.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.dragged == Some(id) {
            self.dragged = None;
            self.drop_target = None;
            self.pending_insertion = None;
        }
        if self.drop_target == Some(id) {
            self.drop_target = None;
        }
        true
    }

    /// Remove every selected item, emptying the selection and focus.
    ///
    /// Returns false when nothing was selected.
    pub fn remove_selected(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }

        let selected = std::mem::take(&mut self.selected);
        self.items.retain(|item| !selected.contains(&item.id()));
        self.focused = None;
        if self.dragged.is_some_and(|id| selected.contains(&id)) {
            self.dragged = None;
            self.drop_target = None;
            self.pending_insertion = None;
        }
        if self.drop_target.is_some_and(|id| selected.contains(&id)) {
            self.drop_target = None;
        }
        true
    }

    /// Select an item.
    ///
    /// With `extend` false this is single-selection with toggle-off: the
    /// selection becomes `{id}` unless `id` was already the sole
    /// selection, in which case the selection empties. With `extend`
    /// true the id's membership is toggled; focus follows the id unless
    /// the selection ends up empty.
    pub fn select(&mut self, id: ItemId, extend: bool) {
        if self.item(id).is_none() {
            return;
        }

        if extend {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
            if self.selected.is_empty() {
                self.focused = None;
            } else {
                self.focused = Some(id);
            }
        } else if self.selected.len() == 1 && self.selected.contains(&id) {
            self.selected.clear();
            self.focused = None;
        } else {
            self.selected.clear();
            self.selected.insert(id);
            self.focused = Some(id);
        }
    }

    /// Select every item and focus the last one in order.
    pub fn select_all(&mut self) {
        self.selected = self.items.iter().map(|item| item.id()).collect();
        self.focused = self.items.last().map(|item| item.id());
    }

    /// Move the focus cursor one step, without wraparound.
    ///
    /// With no current focus, `Next` jumps to the first item and
    /// `Previous` to the last. Moving past either end is a no-op.
    pub fn move_focus(&mut self, direction: FocusDirection) {
        if self.items.is_empty() {
            return;
        }

        let current = self.focused.and_then(|id| self.index_of(id));
        let next = match (direction, current) {
            (FocusDirection::Next, None) => Some(0),
            (FocusDirection::Previous, None) => Some(self.items.len() - 1),
            (FocusDirection::Next, Some(index)) if index + 1 < self.items.len() => {
                Some(index + 1)
            }
            (FocusDirection::Previous, Some(index)) if index > 0 => Some(index - 1),
            _ => None,
        };

        if let Some(index) = next {
            self.focused = Some(self.items[index].id());
        }
    }

    /// Toggle the focused item's membership in the selection.
    pub fn toggle_focused_selection(&mut self) {
        let Some(id) = self.focused else {
            return;
        };
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Move an item to an insertion slot.
    ///
    /// `insertion_index` is a pre-removal slot in `0..=len`; values past
    /// the end are clamped. Returns false (and changes nothing) when the
    /// slot resolves to the item's current position or the id is
    /// unknown.
    pub fn move_item(&mut self, id: ItemId, insertion_index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };

        let item = self.items.remove(from);

        // Slots above the source shift down once the item is out; clamp
        // to the post-removal length so "past the end" means append.
        let mut to = insertion_index;
        if to > from {
            to -= 1;
        }
        let to = to.min(self.items.len());

        if to == from {
            self.items.insert(from, item);
            return false;
        }

        self.items.insert(to, item);
        true
    }

    /// Start a drag gesture for `id`.
    ///
    /// Returns false when the id is not on the shelf.
    pub fn begin_drag(&mut self, id: ItemId) -> bool {
        if self.item(id).is_none() {
            return false;
        }
        self.dragged = Some(id);
        self.drop_target = None;
        self.pending_insertion = None;
        true
    }

    /// Recompute the proposed insertion slot as the pointer crosses an
    /// item boundary.
    ///
    /// Applies the midpoint rule against the item under the pointer and
    /// clamps the proposal to `0..=len`. Returns the proposal, or `None`
    /// when no drag is active or `over` is unknown.
    pub fn update_insertion_index(&mut self, over: ItemId, zone: DropZone) -> Option<usize> {
        self.dragged?;
        let index = self.index_of(over)?;

        let proposal = match zone {
            DropZone::Leading => index,
            DropZone::Trailing => index + 1,
        };
        let proposal = proposal.min(self.items.len());

        self.drop_target = Some(over);
        self.pending_insertion = Some(proposal);
        Some(proposal)
    }

    /// Finish the drag gesture, committing the last proposed slot.
    ///
    /// No-op when no slot was ever proposed or the pointer ended over
    /// the dragged item itself. Transient drag state is always cleared.
    /// Returns whether the order changed.
    pub fn end_drag(&mut self) -> bool {
        let dragged = self.dragged.take();
        let target = self.drop_target.take();
        let pending = self.pending_insertion.take();

        match (dragged, pending) {
            (Some(id), Some(index)) if target != Some(id) => self.move_item(id, index),
            _ => false,
        }
    }

    /// Empty the shelf, selection, and focus.
    ///
    /// Returns false when there was nothing to clear.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() && self.selected.is_empty() && self.focused.is_none() {
            return false;
        }
        self.items.clear();
        self.selected.clear();
        self.focused = None;
        self.dragged = None;
        self.drop_target = None;
        self.pending_insertion = None;
        true
    }

    /// Capture the current ordering, selection, and focus by value.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.items, self.selected.clone(), self.focused)
    }

    /// Replace the shelf contents from a restored snapshot.
    ///
    /// Selection and focus are pruned to ids present in `items`; any
    /// active drag is discarded.
    pub(crate) fn restore(
        &mut self,
        items: Vec<ShelfItem>,
        selected: HashSet<ItemId>,
        focused: Option<ItemId>,
    ) {
        let present: HashSet<ItemId> = items.iter().map(|item| item.id()).collect();
        self.items = items;
        self.selected = selected
            .into_iter()
            .filter(|id| present.contains(id))
            .collect();
        self.focused = focused.filter(|id| present.contains(id));
        self.dragged = None;
        self.drop_target = None;
        self.pending_insertion = None;
    }
}
