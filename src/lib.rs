//! Approximate nearest-neighbor search over dense vectors using
//! random-hyperplane locality-sensitive hashing.
//!
//! ```
//! use hyperlsh::{IndexParams, LshIndex, RngSource};
//!
//! let params = IndexParams::new(3).with_tables(8).with_projections(4);
//! let mut index = LshIndex::with_params(params, &mut RngSource::seeded(7))?;
//! index.add(vec![1.0, 0.0, 0.0], "a")?;
//! index.add(vec![0.0, 1.0, 0.0], "b")?;
//!
//! let hits = index.search(&[0.9, 0.1, 0.0], 1)?;
//! assert_eq!(*hits[0].metadata, "a");
//! # Ok::<(), hyperlsh::LshError>(())
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod logging;

// Explicit exports for better API clarity
pub use config::{IndexConfig, LoggingConfig, Settings};
pub use error::{LshError, LshResult};
pub use index::{
    HashCode, IndexParams, IndexSnapshot, IndexStats, ItemId, LshIndex, RandomSource, RngSource,
    SearchHit, SearchOutcome, SearchResult, SharedLshIndex,
};
pub use logging::init_logging;

/// Crate version, as recorded in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
