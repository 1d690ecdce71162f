//! Registration manager: runs pipeline transitions against the stores.

use super::{
    errors::{PipelineError, PipelineResult},
    models::{EventId, PipelineStage, Registration, RegistrationId},
    state_machine,
};
use crate::{
    athlete::{AthleteId, AthleteProfile, ProfileUpdate},
    bout::{BoutResult, ReasonCode},
    categorization::classify_profile,
    store::{AuditEvent, AuditSink, ProfileStore, RegistrationStore, StoreError, emit},
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Registration manager
#[derive(Clone)]
pub struct RegistrationManager {
    registrations: Arc<dyn RegistrationStore>,
    profiles: Arc<dyn ProfileStore>,
    audit: Arc<dyn AuditSink>,
}

impl RegistrationManager {
    /// Create a new registration manager
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        profiles: Arc<dyn ProfileStore>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            registrations,
            profiles,
            audit,
        }
    }

    async fn load_profile(&self, athlete_id: AthleteId) -> PipelineResult<AthleteProfile> {
        match self.profiles.get(athlete_id).await {
            Ok(profile) => Ok(profile),
            Err(StoreError::NotFound) => Err(PipelineError::ProfileNotFound(athlete_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a registration
    pub async fn get(&self, registration_id: RegistrationId) -> PipelineResult<Registration> {
        match self.registrations.get(registration_id).await {
            Ok(registration) => Ok(registration),
            Err(StoreError::NotFound) => Err(PipelineError::NotFound(registration_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Enroll an athlete in an event, classifying them as of `as_of`.
    ///
    /// # Errors
    ///
    /// `ProfileNotFound`, `IncompleteProfile`, `Categorization`, or
    /// `AlreadyRegistered` when the athlete already has a registration for
    /// the event.
    pub async fn enroll(
        &self,
        athlete_id: AthleteId,
        event_id: EventId,
        as_of: NaiveDate,
    ) -> PipelineResult<Registration> {
        let profile = self.load_profile(athlete_id).await?;
        profile.validate()?;
        let category = classify_profile(&profile, as_of)?;

        let registration = Registration::new(athlete_id, event_id, category);
        match self.registrations.insert(registration.clone()).await {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => {
                return Err(PipelineError::AlreadyRegistered {
                    athlete_id,
                    event_id,
                });
            }
            Err(e) => return Err(e.into()),
        }

        log::info!(
            "Registration {} created: athlete {} in event {} as {}",
            registration.id,
            athlete_id,
            event_id,
            registration.category.label()
        );
        Ok(registration)
    }

    /// Move a registration to `target`.
    ///
    /// The write is optimistic: if another operator changed the registration
    /// after it was read, nothing is written and `StageChanged` is returned.
    pub async fn advance(
        &self,
        registration_id: RegistrationId,
        target: PipelineStage,
    ) -> PipelineResult<Registration> {
        let current = self.get(registration_id).await?;
        self.commit_transition(&current, target).await
    }

    /// Shorthand for advancing to `Disqualified`
    pub async fn disqualify(&self, registration_id: RegistrationId) -> PipelineResult<Registration> {
        self.advance(registration_id, PipelineStage::Disqualified)
            .await
    }

    async fn commit_transition(
        &self,
        current: &Registration,
        target: PipelineStage,
    ) -> PipelineResult<Registration> {
        let (next, event) = state_machine::advance(current, target, Utc::now())?;
        self.write(next.clone(), current.revision).await?;

        log::info!(
            "Registration {}: {} -> {}",
            event.registration_id,
            event.from,
            event.to
        );
        emit(self.audit.as_ref(), AuditEvent::StageChanged(event)).await;
        Ok(next)
    }

    /// Recompute the category from the athlete's current profile.
    ///
    /// Only allowed before weigh-in.
    pub async fn reclassify(
        &self,
        registration_id: RegistrationId,
        as_of: NaiveDate,
    ) -> PipelineResult<Registration> {
        let current = self.get(registration_id).await?;
        if current.locked || current.stage != PipelineStage::Registered {
            return Err(PipelineError::CategoryFrozen {
                stage: current.stage,
            });
        }

        let profile = self.load_profile(current.athlete_id).await?;
        let category = classify_profile(&profile, as_of)?;
        let next = state_machine::reclassify(&current, category)?;
        self.write(next.clone(), current.revision).await?;

        if next.category != current.category {
            log::info!(
                "Registration {} reclassified: {} -> {}",
                registration_id,
                current.category.label(),
                next.category.label()
            );
        }
        Ok(next)
    }

    /// Apply a profile change for a registered athlete.
    ///
    /// Before weigh-in a change to birth date, gender or weight also moves the
    /// registration to its new category. After weigh-in the profile is still
    /// updated but the category stays frozen.
    pub async fn update_profile(
        &self,
        registration_id: RegistrationId,
        update: ProfileUpdate,
        as_of: NaiveDate,
    ) -> PipelineResult<(AthleteProfile, Registration)> {
        let current = self.get(registration_id).await?;
        let profile = self.load_profile(current.athlete_id).await?;
        let affects_category = AthleteProfile::affects_category(&update);
        let updated = profile.apply_update(update)?;
        if affects_category {
            // Reject an update whose new category cannot be computed
            classify_profile(&updated, as_of)?;
        }
        self.profiles.put(updated.clone()).await?;

        let registration = if !affects_category {
            current
        } else if current.locked || current.stage != PipelineStage::Registered {
            log::info!(
                "Registration {}: profile updated, category frozen at {}",
                registration_id,
                current.stage
            );
            current
        } else {
            self.reclassify(registration_id, as_of).await?
        };
        Ok((updated, registration))
    }

    /// Feed a bout result back into the pipeline.
    ///
    /// The winner is completed. The loser is completed too, unless the bout
    /// was won by disqualification, in which case the loser is disqualified.
    /// A loser already disqualified while on the mat stays as is. Both
    /// registrations move or neither does. Returns `(winner, loser)`.
    pub async fn record_outcome(
        &self,
        result: &BoutResult,
    ) -> PipelineResult<(Registration, Registration)> {
        let winner = self.get(result.winner_registration).await?;
        let loser = self.get(result.loser_registration).await?;
        if winner.athlete_id != result.winner_athlete {
            return Err(PipelineError::NotInBout(winner.id));
        }
        if loser.athlete_id != result.loser_athlete {
            return Err(PipelineError::NotInBout(loser.id));
        }
        let loser_settled = loser_already_out(&loser, result.reason);
        for registration in [&winner, &loser] {
            let stage = registration.stage;
            let settled = registration.id == loser.id && loser_settled;
            if stage != PipelineStage::CalledToMat && !settled {
                return Err(PipelineError::IllegalTransition {
                    from: stage,
                    to: PipelineStage::Completed,
                });
            }
        }

        let loser_target = match result.reason {
            ReasonCode::Disqualification => PipelineStage::Disqualified,
            _ => PipelineStage::Completed,
        };

        let at = Utc::now();
        let (winner_next, winner_event) =
            state_machine::advance(&winner, PipelineStage::Completed, at)?;
        let mut events = vec![winner_event];

        let loser_next = if loser_settled {
            self.write(winner_next.clone(), winner.revision).await?;
            loser
        } else {
            let (loser_next, loser_event) = state_machine::advance(&loser, loser_target, at)?;
            self.write(loser_next.clone(), loser.revision).await?;
            if let Err(e) = self.write(winner_next.clone(), winner.revision).await {
                self.restore(&loser, &loser_next).await;
                return Err(e);
            }
            events.push(loser_event);
            loser_next
        };

        for event in events {
            log::info!(
                "Registration {}: {} -> {}",
                event.registration_id,
                event.from,
                event.to
            );
            emit(self.audit.as_ref(), AuditEvent::StageChanged(event)).await;
        }
        Ok((winner_next, loser_next))
    }

    /// Put back the stage a registration had before `committed` was written
    async fn restore(&self, previous: &Registration, committed: &Registration) {
        let mut restored = previous.clone();
        restored.revision = committed.revision + 1;
        if let Err(e) = self.write(restored, committed.revision).await {
            log::error!(
                "Registration {}: failed to restore stage {}: {}",
                previous.id,
                previous.stage,
                e
            );
        }
    }

    async fn write(&self, registration: Registration, expected_revision: u64) -> PipelineResult<()> {
        let id = registration.id;
        match self.registrations.update(registration, expected_revision).await {
            Ok(()) => Ok(()),
            Err(StoreError::Conflict { .. }) => {
                log::warn!("Registration {}: concurrent update rejected", id);
                Err(PipelineError::StageChanged(id))
            }
            Err(StoreError::NotFound) => Err(PipelineError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

/// A competitor disqualified through the pipeline during the bout, losing
/// it by disqualification
pub(crate) fn loser_already_out(loser: &Registration, reason: ReasonCode) -> bool {
    loser.stage == PipelineStage::Disqualified && reason == ReasonCode::Disqualification
}
