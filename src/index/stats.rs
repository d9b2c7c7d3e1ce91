//! Bucket occupancy statistics, computed on demand.

use serde::Serialize;

use crate::index::table::HashTable;
use crate::index::types::IndexParams;

/// Snapshot of index shape and bucket occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub items: usize,
    pub dimension: usize,
    pub num_tables: usize,
    pub num_projections: usize,
    /// Non-empty buckets in each table.
    pub buckets_per_table: Vec<usize>,
    pub total_buckets: usize,
    pub max_bucket_size: usize,
    /// Average items per non-empty bucket, 0.0 for an empty index.
    pub mean_bucket_size: f64,
    /// Rough heap footprint of vectors, projections and bucket entries.
    pub memory_estimate_bytes: usize,
}

impl IndexStats {
    pub(crate) fn collect(params: &IndexParams, items: usize, tables: &[HashTable]) -> Self {
        let buckets_per_table: Vec<usize> = tables.iter().map(HashTable::bucket_count).collect();
        let total_buckets: usize = buckets_per_table.iter().sum();
        let max_bucket_size = tables
            .iter()
            .flat_map(HashTable::bucket_sizes)
            .max()
            .unwrap_or(0);
        // Every item sits in exactly one bucket per table.
        let bucket_entries = items * tables.len();
        let mean_bucket_size = if total_buckets == 0 {
            0.0
        } else {
            bucket_entries as f64 / total_buckets as f64
        };

        let float = std::mem::size_of::<f32>();
        let vector_bytes = items * params.dimension * float;
        let projection_bytes =
            params.num_tables * params.num_projections * params.dimension * float;
        let bucket_bytes = bucket_entries * std::mem::size_of::<u32>()
            + total_buckets * (std::mem::size_of::<u64>() + std::mem::size_of::<Vec<u32>>());

        Self {
            items,
            dimension: params.dimension,
            num_tables: params.num_tables,
            num_projections: params.num_projections,
            buckets_per_table,
            total_buckets,
            max_bucket_size,
            mean_bucket_size,
            memory_estimate_bytes: vector_bytes + projection_bytes + bucket_bytes,
        }
    }
}
