//! Pure registration transitions.
//!
//! Both functions take the current registration by reference and return the
//! next one; the input is never modified, so a failed call leaves the caller's
//! state untouched.

use super::{
    errors::{PipelineError, PipelineResult},
    models::{PipelineStage, Registration, TransitionEvent},
};
use crate::categorization::Category;
use chrono::{DateTime, Utc};

/// Move a registration to `target`.
///
/// Legal targets are the immediate forward successor, or `Disqualified` from
/// any non-terminal stage. Reaching `WeighedIn` freezes the category.
///
/// # Errors
///
/// Returns `IllegalTransition` for any other target.
pub fn advance(
    registration: &Registration,
    target: PipelineStage,
    at: DateTime<Utc>,
) -> PipelineResult<(Registration, TransitionEvent)> {
    let from = registration.stage;
    if !from.can_advance_to(target) {
        return Err(PipelineError::IllegalTransition { from, to: target });
    }

    let mut next = registration.clone();
    next.stage = target;
    next.revision += 1;
    if target == PipelineStage::WeighedIn {
        next.locked = true;
    }

    let event = TransitionEvent {
        registration_id: registration.id,
        from,
        to: target,
        timestamp: at,
    };

    Ok((next, event))
}

/// Replace the category of a registration that has not been weighed in.
///
/// # Errors
///
/// Returns `CategoryFrozen` once the registration is locked or has left the
/// `Registered` stage.
pub fn reclassify(registration: &Registration, category: Category) -> PipelineResult<Registration> {
    if registration.locked || registration.stage != PipelineStage::Registered {
        return Err(PipelineError::CategoryFrozen {
            stage: registration.stage,
        });
    }

    let mut next = registration.clone();
    next.category = category;
    next.revision += 1;
    Ok(next)
}
