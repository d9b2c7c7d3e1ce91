//! Candidate aggregation and exact re-ranking.
//!
//! # Algorithm
//! 1. Hash the query in every table and collect the matching buckets
//! 2. Deduplicate candidates by item id
//! 3. Compute the exact Euclidean distance to each candidate
//! 4. Sort ascending, breaking ties by insertion order, and keep the top k

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LshResult;
use crate::index::store::ItemStore;
use crate::index::table::HashTable;
use crate::index::types::ItemId;

/// A ranked match borrowing its vector and metadata from the index.
#[derive(Debug, PartialEq)]
pub struct SearchHit<'a, T> {
    pub id: ItemId,
    pub distance: f32,
    pub vector: &'a [f32],
    pub metadata: &'a T,
}

// Only references are held, so copying never needs `T: Copy`.
impl<T> Clone for SearchHit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SearchHit<'_, T> {}

impl<T: Clone> SearchHit<'_, T> {
    /// Copies the hit out of the index.
    #[must_use]
    pub fn into_owned(self) -> SearchResult<T> {
        SearchResult {
            id: self.id,
            distance: self.distance,
            vector: self.vector.to_vec(),
            metadata: self.metadata.clone(),
        }
    }
}

/// An owned ranked match, detached from the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    pub id: ItemId,
    pub distance: f32,
    pub vector: Vec<f32>,
    pub metadata: T,
}

/// Hits of one query together with how much work the query did.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<'a, T> {
    pub hits: Vec<SearchHit<'a, T>>,
    /// Distinct items whose distance was computed.
    pub candidates_examined: usize,
    /// Tables in which the query's bucket existed.
    pub tables_hit: usize,
}

/// Deduplicated candidate ids for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Sorted ascending, i.e. in insertion order.
    pub ids: Vec<ItemId>,
    pub tables_hit: usize,
}

/// Euclidean (L2) distance between two equal-length vectors.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have same dimension");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Unions the query's bucket from every table.
pub fn gather_candidates(tables: &[HashTable], query: &[f32]) -> LshResult<Candidates> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut tables_hit = 0;

    for table in tables {
        let code = table.code_for(query)?;
        if let Some(bucket) = table.bucket(code) {
            tables_hit += 1;
            ids.extend(bucket.iter().copied().filter(|id| seen.insert(*id)));
        }
    }

    ids.sort_unstable();
    Ok(Candidates { ids, tables_hit })
}

/// Scores candidates against the query and returns the `k` closest.
///
/// `candidates` must be in insertion order; the stable sort then breaks
/// distance ties by insertion order.
pub fn rank_candidates<'a, T>(
    store: &'a ItemStore<T>,
    query: &[f32],
    candidates: &[ItemId],
    k: usize,
) -> Vec<SearchHit<'a, T>> {
    if k == 0 {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a, T>> = candidates
        .iter()
        .filter_map(|&id| {
            store.get(id).map(|item| SearchHit {
                id,
                distance: euclidean_distance(query, &item.vector),
                vector: &item.vector,
                metadata: &item.metadata,
            })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.truncate(k);
    hits
}
