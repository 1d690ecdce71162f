//! Coordinator error types.

use crate::{bout::BoutError, pipeline::PipelineError, store::StoreError};
use thiserror::Error;

/// Errors from opening or closing a bout
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Bout(#[from] BoutError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CoordinatorError {
    pub fn client_message(&self) -> String {
        match self {
            CoordinatorError::Bout(e) => e.client_message(),
            CoordinatorError::Pipeline(e) => e.client_message(),
            CoordinatorError::Store(StoreError::AlreadyRecorded) => {
                "A result was already recorded for this bout".to_string()
            }
            CoordinatorError::Store(_) => "Storage unavailable".to_string(),
        }
    }
}

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;
