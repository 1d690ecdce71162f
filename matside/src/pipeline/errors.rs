//! Pipeline error types.

use super::models::{EventId, PipelineStage, RegistrationId};
use crate::{athlete::AthleteId, categorization::CategorizationError, store::StoreError};
use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Target is not the next stage, or the current stage is terminal
    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition {
        from: PipelineStage,
        to: PipelineStage,
    },

    /// Category can no longer be recomputed
    #[error("Category is frozen at stage {stage}")]
    CategoryFrozen { stage: PipelineStage },

    /// Registration does not exist
    #[error("Registration not found: {0}")]
    NotFound(RegistrationId),

    /// Athlete profile does not exist
    #[error("Athlete profile not found: {0}")]
    ProfileNotFound(AthleteId),

    /// Athlete profile is incomplete or the change is not allowed
    #[error("Invalid athlete profile: {0}")]
    IncompleteProfile(#[from] crate::athlete::ProfileError),

    /// One registration per athlete per event
    #[error("Athlete {athlete_id} already registered for event {event_id}")]
    AlreadyRegistered {
        athlete_id: AthleteId,
        event_id: EventId,
    },

    /// Another operator moved the registration since it was read
    #[error("Registration {0} changed since it was read")]
    StageChanged(RegistrationId),

    /// Registration is not part of the bout being recorded
    #[error("Registration {0} is not part of this bout")]
    NotInBout(RegistrationId),

    /// Categorization failed
    #[error("Categorization error: {0}")]
    Categorization(#[from] CategorizationError),

    /// Store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// Operator-facing message that does not leak internal IDs
    pub fn client_message(&self) -> String {
        match self {
            PipelineError::NotFound(_) => "Registration not found".to_string(),
            PipelineError::ProfileNotFound(_) => "Athlete profile not found".to_string(),
            PipelineError::AlreadyRegistered { .. } => {
                "Athlete is already registered for this event".to_string()
            }
            PipelineError::StageChanged(_) => {
                "Registration was updated by someone else; reload and retry".to_string()
            }
            PipelineError::NotInBout(_) => "Registration is not part of this bout".to_string(),
            PipelineError::Store(_) => "Storage unavailable".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
