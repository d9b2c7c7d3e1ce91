//! Sign-of-projection hashing.
//!
//! A vector's code for one table has bit `i` set when its dot product with
//! projection `i` is strictly positive. Vectors separated by a small angle
//! `θ` agree on each bit with probability `1 - θ/π`.

use crate::error::{LshError, LshResult};
use crate::index::types::{HashCode, MAX_PROJECTIONS};

/// Dot product of two equal-length slices.
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have same dimension");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Hashes `vector` against one table's projections.
///
/// Returns `DimensionMismatch` when a projection's length differs from the
/// vector's.
pub fn hash_vector(vector: &[f32], projections: &[Vec<f32>]) -> LshResult<HashCode> {
    debug_assert!(projections.len() <= MAX_PROJECTIONS);

    let mut bits = 0u64;
    for (i, projection) in projections.iter().enumerate() {
        if projection.len() != vector.len() {
            return Err(LshError::DimensionMismatch {
                expected: projection.len(),
                actual: vector.len(),
            });
        }
        if dot(vector, projection) > 0.0 {
            bits |= 1 << i;
        }
    }
    Ok(HashCode::from_bits(bits))
}
