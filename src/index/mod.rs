//! Approximate nearest-neighbor search with random-hyperplane LSH.
//!
//! # Architecture
//! Each of L hash tables owns K random unit vectors. A vector's code in a
//! table is the sign pattern of its dot products with those K hyperplanes.
//! Items live once in an append-only store; buckets hold only item ids.
//! A query is hashed into every table, the union of its buckets forms the
//! candidate set, and candidates are re-ranked by exact Euclidean distance.
//!
//! # Performance Characteristics
//! - Insert: L × K dot products, O(1) in the index size
//! - Query: L × K dot products plus one distance per candidate
//! - Candidate count stays small for well-separated data but grows toward n
//!   for tightly clustered data; buckets are never capped

mod engine;
mod hasher;
mod projection;
mod query;
mod random;
mod shared;
mod snapshot;
mod stats;
mod store;
mod table;
mod types;
pub mod tuning;

// Re-export core types for public API
pub use engine::LshIndex;
pub use hasher::{dot, hash_vector};
pub use projection::{gaussian, generate_projections, random_unit_vector};
pub use query::{SearchHit, SearchOutcome, SearchResult, euclidean_distance};
pub use random::{RandomSource, RngSource};
pub use shared::SharedLshIndex;
pub use snapshot::{IndexSnapshot, SNAPSHOT_VERSION};
pub use stats::IndexStats;
pub use store::StoredItem;
pub use table::HashTable;
pub use types::{
    DEFAULT_K, DEFAULT_NUM_PROJECTIONS, DEFAULT_NUM_TABLES, HashCode, IndexParams, ItemId,
    MAX_PROJECTIONS,
};
