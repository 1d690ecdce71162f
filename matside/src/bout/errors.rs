//! Bout timer and scoring error types.

use crate::pipeline::{PipelineStage, RegistrationId};
use thiserror::Error;

/// Bout errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoutError {
    /// Bout already has a result; nothing may change
    #[error("Bout already finalized")]
    BoutAlreadyFinalized,

    #[error("A winner is required to finalize the bout")]
    MissingWinner,

    #[error("A reason code is required to finalize the bout")]
    MissingReason,

    /// Reason `Other` needs a written description
    #[error("A description is required when the reason is Other")]
    MissingDescription,

    /// Operation requires a stopped clock
    #[error("Timer is running")]
    TimerRunning,

    /// Clock reached zero; reset or reconfigure first
    #[error("No time remaining")]
    TimeExpired,

    /// Duration must be positive
    #[error("Invalid bout duration: {0}s")]
    InvalidDuration(u32),

    #[error("Remaining time {remaining}s exceeds bout duration {duration}s")]
    RemainingExceedsDuration { remaining: u32, duration: u32 },

    /// Both competitors must be called to the mat first
    #[error("Registration {registration} is at stage {stage}, not called-to-mat")]
    NotCalledToMat {
        registration: RegistrationId,
        stage: PipelineStage,
    },

    #[error("A bout needs two different registrations")]
    SameRegistration,

    #[error("Registrations belong to different events")]
    EventMismatch,

    /// The live session has shut down
    #[error("Bout session is closed")]
    SessionClosed,
}

impl BoutError {
    /// Operator-facing message that does not leak internal IDs
    pub fn client_message(&self) -> String {
        match self {
            BoutError::NotCalledToMat { stage, .. } => {
                format!("Competitor is {stage}, not yet called to the mat")
            }
            _ => self.to_string(),
        }
    }
}
