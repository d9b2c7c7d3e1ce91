//! Type-safe wrappers and core types for the LSH index.
//!
//! Newtypes keep item identities, hash codes and index parameters from
//! being confused with plain integers.

use serde::{Deserialize, Serialize};

use crate::error::{LshError, LshResult};

/// Default number of hash tables (L).
pub const DEFAULT_NUM_TABLES: usize = 10;

/// Default number of hyperplane projections per table (K).
pub const DEFAULT_NUM_PROJECTIONS: usize = 8;

/// Default number of results returned by `search_default`.
pub const DEFAULT_K: usize = 5;

/// Hash codes are packed into a `u64`, one bit per projection.
pub const MAX_PROJECTIONS: usize = 64;

/// Identity of an item in the store.
///
/// Ids are assigned sequentially from zero in insertion order, so ordering
/// ids is the same as ordering by insertion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new `ItemId`.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Id for the item at `index` in the store arena.
    ///
    /// Fails once the arena holds more items than a `u32` can address.
    pub fn from_index(index: usize) -> LshResult<Self> {
        u32::try_from(index)
            .map(Self)
            .map_err(|_| LshError::CapacityExceeded {
                capacity: u32::MAX as usize + 1,
            })
    }

    /// Position of the item inside the store arena.
    #[must_use]
    pub const fn as_index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// K-bit code produced by hashing a vector against one table's projections.
///
/// Bit `i` is set when the vector lies on the positive side of projection `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashCode(u64);

impl HashCode {
    /// Creates a code from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Whether the bit for projection `position` is set.
    #[must_use]
    pub const fn bit(&self, position: usize) -> bool {
        position < MAX_PROJECTIONS && (self.0 >> position) & 1 == 1
    }

    /// Renders the first `width` bits in projection order, e.g. `"1011"`.
    #[must_use]
    pub fn to_bit_string(&self, width: usize) -> String {
        (0..width.min(MAX_PROJECTIONS))
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }
}

/// Shape of an index: dimension D, table count L and projections per table K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexParams {
    pub dimension: usize,
    pub num_tables: usize,
    pub num_projections: usize,
}

impl IndexParams {
    /// Parameters with the default table and projection counts.
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            num_tables: DEFAULT_NUM_TABLES,
            num_projections: DEFAULT_NUM_PROJECTIONS,
        }
    }

    #[must_use]
    pub const fn with_tables(mut self, num_tables: usize) -> Self {
        self.num_tables = num_tables;
        self
    }

    #[must_use]
    pub const fn with_projections(mut self, num_projections: usize) -> Self {
        self.num_projections = num_projections;
        self
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> LshResult<()> {
        if self.dimension == 0 {
            return Err(LshError::invalid_config("dimension must be at least 1"));
        }
        if self.num_tables == 0 {
            return Err(LshError::invalid_config(
                "number of hash tables must be at least 1",
            ));
        }
        if self.num_projections == 0 || self.num_projections > MAX_PROJECTIONS {
            return Err(LshError::invalid_config(format!(
                "projections per table must be between 1 and {MAX_PROJECTIONS}, got {}",
                self.num_projections
            )));
        }
        Ok(())
    }

    /// Validates that a vector has the configured dimension.
    pub fn validate_vector(&self, vector: &[f32]) -> LshResult<()> {
        if vector.len() != self.dimension {
            return Err(LshError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}
