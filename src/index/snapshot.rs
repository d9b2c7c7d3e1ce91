//! Export and import of complete index state.
//!
//! # Snapshot Format
//!
//! A snapshot is a self-describing JSON document:
//! - `format_version`: snapshot schema version
//! - `dimension`, `num_tables`, `num_projections`: index shape
//! - `projections`: `[num_tables][num_projections][dimension]` floats
//! - `items`: `{vector, metadata}` in insertion order
//!
//! Import installs the projections verbatim, so hash codes are unchanged,
//! and replays every item through `add` to rebuild the buckets.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LshError, LshResult};
use crate::index::engine::LshIndex;
use crate::index::store::StoredItem;
use crate::index::types::IndexParams;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot<T> {
    pub format_version: u32,
    pub dimension: usize,
    pub num_tables: usize,
    pub num_projections: usize,
    pub projections: Vec<Vec<Vec<f32>>>,
    pub items: Vec<StoredItem<T>>,
}

/// Borrowing twin of [`IndexSnapshot`] so export does not clone items.
#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    format_version: u32,
    dimension: usize,
    num_tables: usize,
    num_projections: usize,
    projections: Vec<&'a [Vec<f32>]>,
    items: Vec<&'a StoredItem<T>>,
}

impl<T> IndexSnapshot<T> {
    fn params(&self) -> IndexParams {
        IndexParams {
            dimension: self.dimension,
            num_tables: self.num_tables,
            num_projections: self.num_projections,
        }
    }

    /// Checks that the decoded data agrees with its declared shape.
    pub fn validate(&self) -> LshResult<()> {
        if self.format_version != SNAPSHOT_VERSION {
            return Err(LshError::corrupt(format!(
                "unsupported snapshot version {}, expected {SNAPSHOT_VERSION}",
                self.format_version
            )));
        }

        self.params()
            .validate()
            .map_err(|e| LshError::corrupt(format!("invalid declared shape: {e}")))?;

        if self.projections.len() != self.num_tables {
            return Err(LshError::corrupt(format!(
                "declared {} tables but found projections for {}",
                self.num_tables,
                self.projections.len()
            )));
        }
        for (t, table) in self.projections.iter().enumerate() {
            if table.len() != self.num_projections {
                return Err(LshError::corrupt(format!(
                    "table {t} has {} projections, expected {}",
                    table.len(),
                    self.num_projections
                )));
            }
            for (p, projection) in table.iter().enumerate() {
                if projection.len() != self.dimension {
                    return Err(LshError::corrupt(format!(
                        "projection {p} of table {t} has length {}, expected {}",
                        projection.len(),
                        self.dimension
                    )));
                }
            }
        }

        for (i, item) in self.items.iter().enumerate() {
            if item.vector.len() != self.dimension {
                return Err(LshError::corrupt(format!(
                    "item {i} has dimension {}, expected {}",
                    item.vector.len(),
                    self.dimension
                )));
            }
        }
        Ok(())
    }
}

impl<T: Serialize> LshIndex<T> {
    /// Encodes dimension, table shape, projections and all items as JSON.
    ///
    /// Fails with `Serialization` if a stored vector holds NaN or an
    /// infinity, since JSON would write it as `null` and import could not
    /// read the snapshot back.
    pub fn export(&self) -> LshResult<String> {
        if let Some((id, _)) = self
            .store()
            .iter()
            .find(|(_, item)| item.vector.iter().any(|x| !x.is_finite()))
        {
            return Err(LshError::serialization(format!(
                "item {id} has a non-finite component that JSON cannot represent"
            )));
        }

        let snapshot = self.snapshot_ref();
        let json = serde_json::to_string(&snapshot)
            .map_err(|e| LshError::serialization(e.to_string()))?;
        info!(
            "Exported LSH index: {} items, {} bytes",
            self.len(),
            json.len()
        );
        Ok(json)
    }

    /// [`export`](Self::export) as UTF-8 bytes.
    pub fn export_bytes(&self) -> LshResult<Vec<u8>> {
        self.export().map(String::into_bytes)
    }

    fn snapshot_ref(&self) -> SnapshotRef<'_, T> {
        let params = self.params();
        SnapshotRef {
            format_version: SNAPSHOT_VERSION,
            dimension: params.dimension,
            num_tables: params.num_tables,
            num_projections: params.num_projections,
            projections: self.projections().collect(),
            items: self.store().iter().map(|(_, item)| item).collect(),
        }
    }
}

impl<T: DeserializeOwned> LshIndex<T> {
    /// Rebuilds an index from a JSON snapshot produced by [`export`](Self::export).
    ///
    /// Fails with `ParseError` if the text cannot be decoded and with
    /// `CorruptIndex` if the decoded shape is inconsistent.
    pub fn import(data: &str) -> LshResult<Self> {
        let snapshot: IndexSnapshot<T> =
            serde_json::from_str(data).map_err(|e| LshError::parse(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// [`import`](Self::import) from UTF-8 bytes.
    pub fn import_bytes(data: &[u8]) -> LshResult<Self> {
        let snapshot: IndexSnapshot<T> =
            serde_json::from_slice(data).map_err(|e| LshError::parse(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }
}

impl<T> LshIndex<T> {
    /// Rebuilds an index from an already decoded snapshot.
    pub fn from_snapshot(snapshot: IndexSnapshot<T>) -> LshResult<Self> {
        snapshot.validate()?;

        let params = snapshot.params();
        let mut index = Self::from_projections(params, snapshot.projections);
        for item in snapshot.items {
            index.add(item.vector, item.metadata)?;
        }
        info!(
            "Imported LSH index: {} items, dimension={}, tables={}, projections={}",
            index.len(),
            params.dimension,
            params.num_tables,
            params.num_projections
        );
        Ok(index)
    }
}
