//! Bout state: clock, both score ledgers and the finalization protocol.
//!
//! Every mutating method checks its preconditions before touching any field,
//! so an error always leaves the bout exactly as it was.

use super::{
    errors::BoutError,
    result::{BoutResult, ReasonCode},
    score::{Score, ScoreField, Side},
    timer::TimerState,
};
use crate::{
    athlete::AthleteId,
    pipeline::{EventId, PipelineStage, Registration, RegistrationId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bout ID type
pub type BoutId = Uuid;

/// A single timed match between two competitors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bout {
    pub id: BoutId,
    pub event_id: EventId,
    pub registration_a: RegistrationId,
    pub registration_b: RegistrationId,
    pub athlete_a: AthleteId,
    pub athlete_b: AthleteId,
    pub timer: TimerState,
    pub score_a: Score,
    pub score_b: Score,
    /// Set exactly once by `finalize`
    pub result: Option<BoutResult>,
    pub created_at: DateTime<Utc>,
}

impl Bout {
    /// Pair two registrations that have both been called to the mat.
    ///
    /// # Errors
    ///
    /// `NotCalledToMat` if either registration is at another stage,
    /// `SameRegistration` or `EventMismatch` for an invalid pairing, and
    /// `InvalidDuration` for a zero duration.
    pub fn pair(
        registration_a: &Registration,
        registration_b: &Registration,
        duration_secs: u32,
    ) -> Result<Self, BoutError> {
        for registration in [registration_a, registration_b] {
            if registration.stage != PipelineStage::CalledToMat {
                return Err(BoutError::NotCalledToMat {
                    registration: registration.id,
                    stage: registration.stage,
                });
            }
        }
        if registration_a.id == registration_b.id
            || registration_a.athlete_id == registration_b.athlete_id
        {
            return Err(BoutError::SameRegistration);
        }
        if registration_a.event_id != registration_b.event_id {
            return Err(BoutError::EventMismatch);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            event_id: registration_a.event_id,
            registration_a: registration_a.id,
            registration_b: registration_b.id,
            athlete_a: registration_a.athlete_id,
            athlete_b: registration_b.athlete_id,
            timer: TimerState::new(duration_secs)?,
            score_a: Score::default(),
            score_b: Score::default(),
            result: None,
            created_at: Utc::now(),
        })
    }

    pub const fn is_finalized(&self) -> bool {
        self.result.is_some()
    }

    pub const fn score(&self, side: Side) -> Score {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    pub const fn registration(&self, side: Side) -> RegistrationId {
        match side {
            Side::A => self.registration_a,
            Side::B => self.registration_b,
        }
    }

    pub const fn athlete(&self, side: Side) -> AthleteId {
        match side {
            Side::A => self.athlete_a,
            Side::B => self.athlete_b,
        }
    }

    fn ensure_open(&self) -> Result<(), BoutError> {
        if self.is_finalized() {
            return Err(BoutError::BoutAlreadyFinalized);
        }
        Ok(())
    }

    pub fn configure(&mut self, duration_secs: u32) -> Result<(), BoutError> {
        self.ensure_open()?;
        self.timer = self.timer.configure(duration_secs)?;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), BoutError> {
        self.ensure_open()?;
        self.timer = self.timer.start()?;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), BoutError> {
        self.ensure_open()?;
        self.timer = self.timer.pause();
        Ok(())
    }

    /// One elapsed second; returns the new timer state
    pub fn tick(&mut self) -> Result<TimerState, BoutError> {
        self.ensure_open()?;
        self.timer = self.timer.tick();
        Ok(self.timer)
    }

    pub fn reset(&mut self) -> Result<(), BoutError> {
        self.ensure_open()?;
        self.timer = self.timer.reset();
        Ok(())
    }

    /// Operator re-keys the remaining time after a clock dispute
    pub fn override_remaining(&mut self, remaining_secs: u32) -> Result<(), BoutError> {
        self.ensure_open()?;
        self.timer = self.timer.override_remaining(remaining_secs)?;
        Ok(())
    }

    /// Zero both ledgers. The clock is untouched.
    pub fn reset_scores(&mut self) -> Result<(), BoutError> {
        self.ensure_open()?;
        self.score_a = Score::default();
        self.score_b = Score::default();
        Ok(())
    }

    /// Adjust one column of one side; returns the side's new score.
    ///
    /// Allowed in any timer state, including after time has expired.
    pub fn adjust_score(
        &mut self,
        side: Side,
        field: ScoreField,
        delta: i32,
    ) -> Result<Score, BoutError> {
        self.ensure_open()?;
        let slot = match side {
            Side::A => &mut self.score_a,
            Side::B => &mut self.score_b,
        };
        *slot = slot.adjusted(field, delta);
        Ok(*slot)
    }

    /// Close the bout with a winner and a reason.
    ///
    /// # Errors
    ///
    /// Checked in order: `BoutAlreadyFinalized`, `MissingWinner`,
    /// `MissingReason`, then `MissingDescription` when the reason is `Other`
    /// and the description is absent or blank.
    pub fn finalize(
        &mut self,
        winner: Option<Side>,
        reason: Option<ReasonCode>,
        other_description: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<BoutResult, BoutError> {
        self.ensure_open()?;
        let winner = winner.ok_or(BoutError::MissingWinner)?;
        let reason = reason.ok_or(BoutError::MissingReason)?;

        let other_description = match reason {
            ReasonCode::Other => {
                let text = other_description
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .ok_or(BoutError::MissingDescription)?;
                Some(text.to_string())
            }
            _ => None,
        };

        let result = BoutResult {
            bout_id: self.id,
            winner,
            winner_registration: self.registration(winner),
            loser_registration: self.registration(winner.opponent()),
            winner_athlete: self.athlete(winner),
            loser_athlete: self.athlete(winner.opponent()),
            reason,
            other_description,
            final_score_a: self.score_a,
            final_score_b: self.score_b,
            finalized_at: at,
        };

        self.timer = self.timer.pause();
        self.result = Some(result.clone());
        Ok(result)
    }
}
