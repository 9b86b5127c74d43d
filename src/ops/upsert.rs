use std::collections::HashSet;

use crate::model::{Item, ItemId};

/// Outcome of putting an item at the front of the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// An item with the same identity existed at `from` and was moved to 0
    Moved { from: usize },
    /// The item was new and inserted at 0
    Created,
}

/// Insert `item` at the front, or move its existing twin there.
/// The sequence never gains a duplicate identity.
pub fn upsert_item(items: &mut Vec<Item>, item: Item) -> Upsert {
    match items.iter().position(|existing| existing.id == item.id) {
        Some(from) => {
            let existing = items.remove(from);
            items.insert(0, existing);
            Upsert::Moved { from }
        }
        None => {
            items.insert(0, item);
            Upsert::Created
        }
    }
}

/// Flip membership of `id` in the marked set. Returns whether it is now marked.
pub fn toggle_mark(marked: &mut HashSet<ItemId>, id: &ItemId) -> bool {
    if marked.remove(id) {
        false
    } else {
        marked.insert(id.clone());
        true
    }
}
