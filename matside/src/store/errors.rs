//! Collaborator store error types.

use thiserror::Error;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Record does not exist
    #[error("Record not found")]
    NotFound,

    /// Uniqueness constraint violated
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Optimistic update lost against a concurrent write
    #[error("Revision conflict: expected {expected}, found {actual}")]
    Conflict { expected: u64, actual: u64 },

    /// Append-only record already written
    #[error("Result already recorded")]
    AlreadyRecorded,

    /// Backend failure
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
