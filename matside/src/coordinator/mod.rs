//! Mat coordinator.
//!
//! Ties a live bout to the registration pipeline: a bout can only be opened
//! between two registrations that have been called to the mat, and closing it
//! records the result, audits it and moves both registrations to their
//! terminal stage.

pub mod errors;

pub use errors::{CoordinatorError, CoordinatorResult};

use crate::{
    bout::{
        Bout, BoutError, BoutHandle, BoutId, BoutResult, BoutSession, ClockSource,
        IntervalClock, ReasonCode, SessionTask, Side,
    },
    config::MatConfig,
    pipeline::{
        PipelineStage, RegistrationId, RegistrationManager, manager::loser_already_out,
    },
    store::{AuditEvent, AuditSink, BoutStore, emit},
};
use std::sync::Arc;

/// A bout with a running session
pub struct LiveBout {
    pub handle: BoutHandle,
    task: SessionTask,
}

impl LiveBout {
    pub fn bout_id(&self) -> BoutId {
        self.handle.bout_id()
    }

    /// Stop the session and return the bout as it ended
    pub async fn close(self) -> Option<Bout> {
        self.handle.shutdown().await;
        self.task.wait().await
    }
}

/// Opens and closes bouts on one mat
pub struct MatCoordinator {
    registrations: RegistrationManager,
    bouts: Arc<dyn BoutStore>,
    audit: Arc<dyn AuditSink>,
    config: MatConfig,
}

impl MatCoordinator {
    pub fn new(
        registrations: RegistrationManager,
        bouts: Arc<dyn BoutStore>,
        audit: Arc<dyn AuditSink>,
        config: MatConfig,
    ) -> Self {
        Self {
            registrations,
            bouts,
            audit,
            config,
        }
    }

    pub fn registrations(&self) -> &RegistrationManager {
        &self.registrations
    }

    pub fn config(&self) -> &MatConfig {
        &self.config
    }

    /// Open a bout driven by the wall clock
    pub async fn open_bout(
        &self,
        registration_a: RegistrationId,
        registration_b: RegistrationId,
    ) -> CoordinatorResult<LiveBout> {
        let clock = IntervalClock::new(self.config.tick_interval());
        self.open_bout_with_clock(registration_a, registration_b, clock)
            .await
    }

    /// Open a bout between two called-to-mat registrations.
    ///
    /// The bout is persisted before its session is spawned.
    pub async fn open_bout_with_clock(
        &self,
        registration_a: RegistrationId,
        registration_b: RegistrationId,
        clock: impl ClockSource + 'static,
    ) -> CoordinatorResult<LiveBout> {
        let a = self.registrations.get(registration_a).await?;
        let b = self.registrations.get(registration_b).await?;
        let bout = Bout::pair(&a, &b, self.config.default_bout_duration_secs)?;
        self.bouts.put(bout.clone()).await?;

        log::info!(
            "Bout {} opened: {} vs {} ({})",
            bout.id,
            a.id,
            b.id,
            a.category.label()
        );

        let (handle, task) =
            BoutSession::spawn(bout, clock, self.config.session_inbox_capacity);
        Ok(LiveBout { handle, task })
    }

    /// Finalize a live bout and feed the result back into the pipeline.
    ///
    /// Both competitors must still be on the mat. A loser disqualified
    /// through the pipeline mid-bout may only lose by disqualification.
    /// Any rejection leaves the bout open so the operator can correct the
    /// input and retry. Once the session has committed the result it is
    /// returned; failures persisting it or moving the registrations are
    /// logged.
    pub async fn close_bout(
        &self,
        live: &LiveBout,
        winner: Option<Side>,
        reason: Option<ReasonCode>,
        other_description: Option<String>,
    ) -> CoordinatorResult<BoutResult> {
        let bout = live.handle.snapshot().await?;
        if bout.result.is_some() {
            return Err(BoutError::BoutAlreadyFinalized.into());
        }
        let loser = winner.map(Side::opponent);
        for side in [Side::A, Side::B] {
            let registration = self.registrations.get(bout.registration(side)).await?;
            let settled = Some(side) == loser
                && reason.is_some_and(|reason| loser_already_out(&registration, reason));
            if registration.stage != PipelineStage::CalledToMat && !settled {
                return Err(BoutError::NotCalledToMat {
                    registration: registration.id,
                    stage: registration.stage,
                }
                .into());
            }
        }

        let result = live
            .handle
            .finalize(winner, reason, other_description)
            .await?;

        log::info!(
            "Bout {} finalized: side {} wins by {}",
            result.bout_id,
            result.winner,
            result.reason
        );
        self.settle(live, &result).await;
        Ok(result)
    }

    /// Persist a committed result, audit it and move both registrations
    async fn settle(&self, live: &LiveBout, result: &BoutResult) {
        match live.handle.snapshot().await {
            Ok(bout) => {
                if let Err(e) = self.bouts.put(bout).await {
                    log::error!("Bout {}: failed to store final state: {}", result.bout_id, e);
                }
            }
            Err(e) => log::error!("Bout {}: final state unavailable: {}", result.bout_id, e),
        }
        if let Err(e) = self.bouts.put_result(result.bout_id, result.clone()).await {
            log::error!("Bout {}: failed to store result: {}", result.bout_id, e);
        }

        emit(
            self.audit.as_ref(),
            AuditEvent::BoutFinalized {
                bout_id: result.bout_id,
                result: result.clone(),
            },
        )
        .await;

        if let Err(e) = self.registrations.record_outcome(result).await {
            log::error!(
                "Bout {}: result not applied to registrations {} and {}: {}",
                result.bout_id,
                result.winner_registration,
                result.loser_registration,
                e
            );
        }
    }
}
