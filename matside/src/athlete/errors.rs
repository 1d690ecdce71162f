//! Athlete profile error types.

use thiserror::Error;

/// Profile errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// A required field is blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Weight must be a positive number
    #[error("Invalid body weight: {0} kg")]
    InvalidWeight(f64),

    /// Field cannot change once the profile is locked
    #[error("Field {0} is locked; request a correction from the organizer")]
    LockedField(&'static str),
}

/// Result type for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;
