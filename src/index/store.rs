//! Append-only arena owning every inserted item.
//!
//! Buckets reference items by [`ItemId`] only; the full vector and its
//! metadata live here exactly once.

use serde::{Deserialize, Serialize};

use crate::error::LshResult;
use crate::index::types::ItemId;

/// A vector together with its caller-supplied metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem<T> {
    pub vector: Vec<f32>,
    pub metadata: T,
}

/// Arena of items indexed by insertion order.
#[derive(Debug, Clone)]
pub struct ItemStore<T> {
    items: Vec<StoredItem<T>>,
}

impl<T> Default for ItemStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ItemStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next pushed item will receive, or `CapacityExceeded`
    /// once every `u32` id is taken.
    pub fn next_id(&self) -> LshResult<ItemId> {
        ItemId::from_index(self.items.len())
    }

    /// Appends an item and returns its id. The store is unchanged on error.
    pub fn push(&mut self, vector: Vec<f32>, metadata: T) -> LshResult<ItemId> {
        let id = self.next_id()?;
        self.items.push(StoredItem { vector, metadata });
        Ok(id)
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&StoredItem<T>> {
        self.items.get(id.as_index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &StoredItem<T>)> {
        // `push` never lets the arena outgrow the u32 id range.
        (0..=u32::MAX).map(ItemId::new).zip(self.items.iter())
    }

    /// Consumes the store, yielding items in insertion order.
    pub fn into_items(self) -> Vec<StoredItem<T>> {
        self.items
    }
}
