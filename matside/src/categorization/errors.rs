//! Categorization error types.

use thiserror::Error;

/// Categorization errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategorizationError {
    /// Weight or birth date cannot be classified
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for categorization
pub type CategorizationResult<T> = Result<T, CategorizationError>;
