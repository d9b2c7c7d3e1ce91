//! Error types for the LSH index
//!
//! This module provides structured error types using thiserror with
//! actionable error messages. Every fallible operation of the index
//! returns [`LshResult`].

use thiserror::Error;

/// Main error type for index operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LshError {
    /// A vector did not have the configured number of components
    #[error(
        "Vector dimension mismatch: expected {expected}, got {actual}\nSuggestion: Ensure all vectors come from the same embedding model"
    )]
    DimensionMismatch { expected: usize, actual: usize },

    /// The serialized snapshot could not be decoded
    #[error(
        "Failed to parse index snapshot: {reason}\nSuggestion: Check that the blob was produced by export() and was not truncated"
    )]
    ParseError { reason: String },

    /// The snapshot decoded but disagrees with its own declared shape
    #[error(
        "Index snapshot appears to be corrupted: {reason}\nSuggestion: Re-export the index from a healthy instance"
    )]
    CorruptIndex { reason: String },

    /// The index could not be encoded, usually because metadata failed to serialize
    #[error(
        "Failed to encode index snapshot: {reason}\nSuggestion: Check that the metadata type serializes to JSON"
    )]
    Serialization { reason: String },

    /// The store ran out of item ids
    #[error(
        "Index is full: at most {capacity} items can be stored\nSuggestion: Shard the data across several indexes"
    )]
    CapacityExceeded { capacity: usize },

    /// Index parameters are out of range
    #[error("Invalid index configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl LshError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(reason: S) -> Self {
        Self::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a new corrupt index error.
    pub fn corrupt<S: Into<String>>(reason: S) -> Self {
        Self::CorruptIndex {
            reason: reason.into(),
        }
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(reason: S) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }

    /// Create a new invalid configuration error.
    pub fn invalid_config<S: Into<String>>(reason: S) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that callers can use for programmatic
    /// error handling (e.g. in JSON responses).
    pub fn status_code(&self) -> String {
        match self {
            Self::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            Self::ParseError { .. } => "PARSE_ERROR",
            Self::CorruptIndex { .. } => "CORRUPT_INDEX",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::DimensionMismatch { .. } => vec![
                "Check the dimension the index was created with",
                "Re-embed the input with the model used to build the index",
            ],
            Self::ParseError { .. } => vec![
                "Verify the snapshot is complete JSON produced by export()",
                "Check that the metadata type matches the one used at export time",
            ],
            Self::CorruptIndex { .. } => vec![
                "Re-export the index from the original instance",
                "Rebuild the index from the source vectors",
            ],
            Self::Serialization { .. } => vec![
                "Use metadata whose maps have string keys",
                "Avoid metadata types with custom Serialize impls that can fail",
            ],
            Self::CapacityExceeded { .. } => vec![
                "Split the data across several indexes",
                "Clear the index before reusing it",
            ],
            Self::InvalidConfig { .. } => vec![
                "Use a dimension and table count of at least 1",
                "Keep the number of projections per table between 1 and 64",
            ],
        }
    }
}

/// Result type alias for index operations
pub type LshResult<T> = Result<T, LshError>;
