//! Lock-protected handle for using one index from several threads.
//!
//! Searches take the read lock and may run in parallel; `add`, `add_batch`
//! and `clear` take the write lock.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::error::LshResult;
use crate::index::engine::LshIndex;
use crate::index::query::SearchResult;
use crate::index::stats::IndexStats;
use crate::index::types::{DEFAULT_K, ItemId};

/// Cloneable, thread-safe handle to an [`LshIndex`].
pub struct SharedLshIndex<T> {
    inner: Arc<RwLock<LshIndex<T>>>,
}

impl<T> Clone for SharedLshIndex<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedLshIndex<T> {
    /// Wraps an index for shared use.
    pub fn new(index: LshIndex<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Inserts with exclusive access.
    pub fn add(&self, vector: Vec<f32>, metadata: T) -> LshResult<ItemId> {
        self.inner.write().add(vector, metadata)
    }

    /// Inserts a batch with exclusive access; all or nothing.
    pub fn add_batch<I>(&self, items: I) -> LshResult<Vec<ItemId>>
    where
        I: IntoIterator<Item = (Vec<f32>, T)>,
    {
        self.inner.write().add_batch(items)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    /// Runs `f` against the index under the read lock.
    pub fn with_read<R>(&self, f: impl FnOnce(&LshIndex<T>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Unwraps the index if this is the last handle.
    pub fn into_inner(self) -> Result<LshIndex<T>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T: Clone> SharedLshIndex<T> {
    /// Searches under the read lock and returns owned results.
    pub fn search(&self, query: &[f32], k: usize) -> LshResult<Vec<SearchResult<T>>> {
        let index = self.inner.read();
        let hits = index.search(query, k)?;
        Ok(hits.into_iter().map(|hit| hit.into_owned()).collect())
    }

    pub fn search_default(&self, query: &[f32]) -> LshResult<Vec<SearchResult<T>>> {
        self.search(query, DEFAULT_K)
    }
}

impl<T: Serialize> SharedLshIndex<T> {
    pub fn export(&self) -> LshResult<String> {
        self.inner.read().export()
    }
}

impl<T> From<LshIndex<T>> for SharedLshIndex<T> {
    fn from(index: LshIndex<T>) -> Self {
        Self::new(index)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SharedLshIndex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_read() {
            Some(index) => write!(f, "SharedLshIndex {{ index: {index:?} }}"),
            None => write!(f, "SharedLshIndex {{ <locked> }}"),
        }
    }
}
