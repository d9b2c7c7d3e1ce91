//! One LSH hash table: K projections and the buckets they induce.

use std::collections::HashMap;

use crate::error::LshResult;
use crate::index::hasher::hash_vector;
use crate::index::types::{HashCode, ItemId};

/// Hash table mapping K-bit codes to buckets of item ids.
///
/// Buckets keep ids in insertion order and are never capped.
#[derive(Debug, Clone)]
pub struct HashTable {
    projections: Vec<Vec<f32>>,
    buckets: HashMap<HashCode, Vec<ItemId>>,
}

impl HashTable {
    /// Creates an empty table from this table's projections.
    pub fn new(projections: Vec<Vec<f32>>) -> Self {
        Self {
            projections,
            buckets: HashMap::new(),
        }
    }

    #[must_use]
    pub fn projections(&self) -> &[Vec<f32>] {
        &self.projections
    }

    /// Computes the code of `vector` in this table.
    pub fn code_for(&self, vector: &[f32]) -> LshResult<HashCode> {
        hash_vector(vector, &self.projections)
    }

    /// Records `id` in the bucket for `code`.
    pub fn insert(&mut self, code: HashCode, id: ItemId) {
        self.buckets.entry(code).or_default().push(id);
    }

    /// The bucket for `code`, if any item has hashed to it.
    #[must_use]
    pub fn bucket(&self, code: HashCode) -> Option<&[ItemId]> {
        self.buckets.get(&code).map(Vec::as_slice)
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Sizes of every non-empty bucket, in no particular order.
    pub fn bucket_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.values().map(Vec::len)
    }

    /// Drops all buckets; projections are kept.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
