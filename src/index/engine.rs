//! The LSH index that ties projections, store and tables together.
//!
//! `add` hashes a vector through all L tables and records its id in the
//! matching bucket of each. `search` hashes the query the same way, unions
//! the buckets it lands in and re-ranks those candidates by exact distance.

use tracing::{debug, trace};

use crate::config::IndexConfig;
use crate::error::LshResult;
use crate::index::projection::generate_projections;
use crate::index::query::{SearchHit, SearchOutcome, gather_candidates, rank_candidates};
use crate::index::random::{RandomSource, RngSource};
use crate::index::stats::IndexStats;
use crate::index::store::{ItemStore, StoredItem};
use crate::index::table::HashTable;
use crate::index::types::{DEFAULT_K, IndexParams, ItemId};

/// Approximate nearest-neighbor index over `f32` vectors with opaque metadata `T`.
///
/// The index is not internally synchronized. Searches take `&self` and may
/// run concurrently; `add` and `clear` take `&mut self`. See
/// [`SharedLshIndex`](crate::index::SharedLshIndex) for a lock-protected handle.
#[derive(Debug, Clone)]
pub struct LshIndex<T> {
    params: IndexParams,
    store: ItemStore<T>,
    tables: Vec<HashTable>,
}

impl<T> LshIndex<T> {
    /// Creates an index with 10 tables of 8 projections, seeded from the OS.
    pub fn new(dimension: usize) -> LshResult<Self> {
        Self::with_params(
            IndexParams::new(dimension),
            &mut RngSource::from_os_entropy(),
        )
    }

    /// Creates an index drawing its projections from `source`.
    pub fn with_params(params: IndexParams, source: &mut dyn RandomSource) -> LshResult<Self> {
        params.validate()?;
        let projections = generate_projections(
            params.dimension,
            params.num_tables,
            params.num_projections,
            source,
        );
        debug!(
            "Created LSH index: dimension={}, tables={}, projections={}",
            params.dimension, params.num_tables, params.num_projections
        );
        Ok(Self::from_projections(params, projections))
    }

    /// Creates an index from configuration; a configured seed makes the
    /// projections reproducible.
    pub fn from_config(config: &IndexConfig) -> LshResult<Self> {
        let params = config.params();
        match config.seed {
            Some(seed) => Self::with_params(params, &mut RngSource::seeded(seed)),
            None => Self::with_params(params, &mut RngSource::from_os_entropy()),
        }
    }

    /// Builds an empty index around existing projections.
    ///
    /// Callers must have checked that `projections` is shaped
    /// `[num_tables][num_projections][dimension]`.
    pub(crate) fn from_projections(params: IndexParams, projections: Vec<Vec<Vec<f32>>>) -> Self {
        Self {
            params,
            store: ItemStore::new(),
            tables: projections.into_iter().map(HashTable::new).collect(),
        }
    }

    /// Inserts a vector with its metadata and returns the new item's id.
    ///
    /// Inserting the same vector twice creates two distinct items. On a
    /// dimension mismatch, or `CapacityExceeded` once `u32::MAX + 1` items
    /// are stored, nothing is modified.
    pub fn add(&mut self, vector: Vec<f32>, metadata: T) -> LshResult<ItemId> {
        self.check_dimension(&vector)?;

        // Hash before touching any state so a failure leaves the index unchanged.
        let codes = self
            .tables
            .iter()
            .map(|table| table.code_for(&vector))
            .collect::<LshResult<Vec<_>>>()?;

        let id = self.store.push(vector, metadata)?;
        for (table, code) in self.tables.iter_mut().zip(codes) {
            table.insert(code, id);
        }
        trace!("Added item {id}");
        Ok(id)
    }

    /// Inserts several items; if any vector has the wrong dimension nothing is inserted.
    pub fn add_batch<I>(&mut self, items: I) -> LshResult<Vec<ItemId>>
    where
        I: IntoIterator<Item = (Vec<f32>, T)>,
    {
        let items: Vec<(Vec<f32>, T)> = items.into_iter().collect();
        for (vector, _) in &items {
            self.check_dimension(vector)?;
        }

        let ids = items
            .into_iter()
            .map(|(vector, metadata)| self.add(vector, metadata))
            .collect::<LshResult<Vec<_>>>()?;
        debug!("Added batch of {} items, index size {}", ids.len(), self.len());
        Ok(ids)
    }

    /// Returns up to `k` stored items closest to `query` among its LSH candidates.
    ///
    /// The result is approximate: near neighbors that share no bucket with
    /// the query are not returned.
    pub fn search(&self, query: &[f32], k: usize) -> LshResult<Vec<SearchHit<'_, T>>> {
        Ok(self.search_with_stats(query, k)?.hits)
    }

    /// [`search`](Self::search) with the default `k` of 5.
    pub fn search_default(&self, query: &[f32]) -> LshResult<Vec<SearchHit<'_, T>>> {
        self.search(query, DEFAULT_K)
    }

    /// Like [`search`](Self::search) but also reports how many candidates
    /// were examined and how many tables contributed.
    pub fn search_with_stats(&self, query: &[f32], k: usize) -> LshResult<SearchOutcome<'_, T>> {
        self.check_dimension(query)?;

        let candidates = gather_candidates(&self.tables, query)?;
        let hits = rank_candidates(&self.store, query, &candidates.ids, k);
        trace!(
            "Search examined {} candidates from {} tables",
            candidates.ids.len(),
            candidates.tables_hit
        );

        Ok(SearchOutcome {
            hits,
            candidates_examined: candidates.ids.len(),
            tables_hit: candidates.tables_hit,
        })
    }

    /// Number of stored items.
    #[must_use]
    pub fn size(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes every item and bucket. Projections are kept, so items added
    /// afterwards hash exactly as before.
    pub fn clear(&mut self) {
        let removed = self.store.len();
        self.store.clear();
        for table in &mut self.tables {
            table.clear();
        }
        debug!("Cleared LSH index ({removed} items removed)");
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&StoredItem<T>> {
        self.store.get(id)
    }

    /// Stored items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &StoredItem<T>)> {
        self.store.iter()
    }

    #[must_use]
    pub fn params(&self) -> IndexParams {
        self.params
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.params.dimension
    }

    #[must_use]
    pub fn num_tables(&self) -> usize {
        self.params.num_tables
    }

    #[must_use]
    pub fn num_projections(&self) -> usize {
        self.params.num_projections
    }

    /// Projections of every table, shaped `[num_tables][num_projections][dimension]`.
    pub fn projections(&self) -> impl Iterator<Item = &[Vec<f32>]> {
        self.tables.iter().map(HashTable::projections)
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats::collect(&self.params, self.store.len(), &self.tables)
    }

    /// Fails with `DimensionMismatch` unless `vector` has the index dimension.
    pub fn check_dimension(&self, vector: &[f32]) -> LshResult<()> {
        self.params.validate_vector(vector)
    }

    pub(crate) fn store(&self) -> &ItemStore<T> {
        &self.store
    }
}
