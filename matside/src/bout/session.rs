//! Live bout session: one actor task per bout.
//!
//! The session owns the [`Bout`] and is its only writer. Operators talk to it
//! through a cloneable [`BoutHandle`]; each command carries a oneshot reply.
//! Every accepted change is published on a watch channel for scoreboards.
//!
//! The task ends when a `Shutdown` command arrives, when every handle has been
//! dropped, or when the [`SessionTask`] guard is dropped (the task is aborted).
//! The clock goes down with the task, so no tick outlives its bout.

use super::{
    clock::ClockSource,
    engine::{Bout, BoutId},
    errors::BoutError,
    result::{BoutResult, ReasonCode},
    score::{Score, ScoreField, Side},
    timer::TimerState,
};
use chrono::Utc;
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};

type Reply<T> = oneshot::Sender<Result<T, BoutError>>;

/// Messages accepted by a bout session
#[derive(Debug)]
pub enum BoutCommand {
    Configure {
        duration_secs: u32,
        response: Reply<TimerState>,
    },
    Start {
        response: Reply<TimerState>,
    },
    Pause {
        response: Reply<TimerState>,
    },
    Reset {
        response: Reply<TimerState>,
    },
    OverrideRemaining {
        remaining_secs: u32,
        response: Reply<TimerState>,
    },
    ResetScores {
        response: Reply<()>,
    },
    AdjustScore {
        side: Side,
        field: ScoreField,
        delta: i32,
        response: Reply<Score>,
    },
    Finalize {
        winner: Option<Side>,
        reason: Option<ReasonCode>,
        other_description: Option<String>,
        response: Reply<BoutResult>,
    },
    Snapshot {
        response: oneshot::Sender<Bout>,
    },
    Shutdown,
}

/// Handle for sending commands to a bout session
#[derive(Clone)]
pub struct BoutHandle {
    sender: mpsc::Sender<BoutCommand>,
    updates: watch::Receiver<Bout>,
    bout_id: BoutId,
}

/// Guard for the session task. Dropping it aborts the session.
pub struct SessionTask {
    join: Option<JoinHandle<Bout>>,
}

/// Actor owning one bout
pub struct BoutSession {
    bout: Bout,
    inbox: mpsc::Receiver<BoutCommand>,
    clock: Box<dyn ClockSource>,
    updates: watch::Sender<Bout>,
}

impl BoutSession {
    /// Create a session and its handle
    pub fn new(
        bout: Bout,
        clock: impl ClockSource + 'static,
        inbox_capacity: usize,
    ) -> (Self, BoutHandle) {
        let (sender, inbox) = mpsc::channel(inbox_capacity.max(1));
        let (updates, updates_rx) = watch::channel(bout.clone());
        let handle = BoutHandle {
            sender,
            updates: updates_rx,
            bout_id: bout.id,
        };
        let session = Self {
            bout,
            inbox,
            clock: Box::new(clock),
            updates,
        };
        (session, handle)
    }

    /// Spawn the session onto the current runtime
    pub fn spawn(
        bout: Bout,
        clock: impl ClockSource + 'static,
        inbox_capacity: usize,
    ) -> (BoutHandle, SessionTask) {
        let (session, handle) = Self::new(bout, clock, inbox_capacity);
        let join = tokio::spawn(session.run());
        (handle, SessionTask { join: Some(join) })
    }

    /// Run until shut down; returns the bout as last seen
    pub async fn run(mut self) -> Bout {
        log::info!("Bout {} session starting", self.bout.id);

        loop {
            let ticking = self.bout.timer.running && !self.bout.is_finalized();

            tokio::select! {
                // Ticks first: a tick that is already due must land before any
                // command queued behind it
                biased;

                () = self.clock.next_tick(), if ticking => {
                    self.on_tick();
                }

                message = self.inbox.recv() => {
                    match message {
                        Some(BoutCommand::Shutdown) | None => break,
                        Some(command) => self.handle_command(command),
                    }
                }
            }
        }

        log::info!("Bout {} session closed", self.bout.id);
        self.bout
    }

    fn on_tick(&mut self) {
        match self.bout.tick() {
            Ok(timer) => {
                log::debug!("Bout {}: {}", self.bout.id, timer.display());
                if timer.expired() {
                    log::info!("Bout {}: regulation time expired", self.bout.id);
                }
                self.publish();
            }
            Err(e) => log::warn!("Bout {}: tick rejected: {}", self.bout.id, e),
        }
    }

    fn handle_command(&mut self, command: BoutCommand) {
        match command {
            BoutCommand::Configure {
                duration_secs,
                response,
            } => {
                let result = self.bout.configure(duration_secs).map(|()| self.bout.timer);
                self.reply(response, result);
            }
            BoutCommand::Start { response } => {
                let was_running = self.bout.timer.running;
                let result = self.bout.start().map(|()| self.bout.timer);
                if result.is_ok() && !was_running {
                    self.clock.restart();
                }
                self.reply(response, result);
            }
            BoutCommand::Pause { response } => {
                let result = self.bout.pause().map(|()| self.bout.timer);
                self.reply(response, result);
            }
            BoutCommand::Reset { response } => {
                let result = self.bout.reset().map(|()| self.bout.timer);
                self.reply(response, result);
            }
            BoutCommand::OverrideRemaining {
                remaining_secs,
                response,
            } => {
                let result = self
                    .bout
                    .override_remaining(remaining_secs)
                    .map(|()| self.bout.timer);
                self.reply(response, result);
            }
            BoutCommand::ResetScores { response } => {
                let result = self.bout.reset_scores();
                self.reply(response, result);
            }
            BoutCommand::AdjustScore {
                side,
                field,
                delta,
                response,
            } => {
                let result = self.bout.adjust_score(side, field, delta);
                self.reply(response, result);
            }
            BoutCommand::Finalize {
                winner,
                reason,
                other_description,
                response,
            } => {
                let result = self.bout.finalize(
                    winner,
                    reason,
                    other_description.as_deref(),
                    Utc::now(),
                );
                if let Ok(result) = &result {
                    log::info!(
                        "Bout {} finalized: {} wins by {}",
                        self.bout.id,
                        result.winner,
                        result.reason
                    );
                }
                self.reply(response, result);
            }
            BoutCommand::Snapshot { response } => {
                let _ = response.send(self.bout.clone());
            }
            BoutCommand::Shutdown => {}
        }
    }

    fn reply<T>(&self, response: Reply<T>, result: Result<T, BoutError>) {
        if result.is_ok() {
            self.publish();
        }
        if response.send(result).is_err() {
            log::debug!("Bout {}: caller went away before reply", self.bout.id);
        }
    }

    fn publish(&self) {
        self.updates.send_replace(self.bout.clone());
    }
}

impl BoutHandle {
    pub fn bout_id(&self) -> BoutId {
        self.bout_id
    }

    /// Receiver that sees every accepted change
    pub fn subscribe(&self) -> watch::Receiver<Bout> {
        self.updates.clone()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> BoutCommand,
    ) -> Result<T, BoutError> {
        let (response, reply) = oneshot::channel();
        self.sender
            .send(build(response))
            .await
            .map_err(|_| BoutError::SessionClosed)?;
        reply.await.map_err(|_| BoutError::SessionClosed)
    }

    pub async fn configure(&self, duration_secs: u32) -> Result<TimerState, BoutError> {
        self.request(|response| BoutCommand::Configure {
            duration_secs,
            response,
        })
        .await?
    }

    pub async fn start(&self) -> Result<TimerState, BoutError> {
        self.request(|response| BoutCommand::Start { response })
            .await?
    }

    pub async fn pause(&self) -> Result<TimerState, BoutError> {
        self.request(|response| BoutCommand::Pause { response })
            .await?
    }

    pub async fn reset(&self) -> Result<TimerState, BoutError> {
        self.request(|response| BoutCommand::Reset { response })
            .await?
    }

    pub async fn override_remaining(&self, remaining_secs: u32) -> Result<TimerState, BoutError> {
        self.request(|response| BoutCommand::OverrideRemaining {
            remaining_secs,
            response,
        })
        .await?
    }

    pub async fn reset_scores(&self) -> Result<(), BoutError> {
        self.request(|response| BoutCommand::ResetScores { response })
            .await?
    }

    pub async fn adjust_score(
        &self,
        side: Side,
        field: ScoreField,
        delta: i32,
    ) -> Result<Score, BoutError> {
        self.request(|response| BoutCommand::AdjustScore {
            side,
            field,
            delta,
            response,
        })
        .await?
    }

    pub async fn finalize(
        &self,
        winner: Option<Side>,
        reason: Option<ReasonCode>,
        other_description: Option<String>,
    ) -> Result<BoutResult, BoutError> {
        self.request(|response| BoutCommand::Finalize {
            winner,
            reason,
            other_description,
            response,
        })
        .await?
    }

    /// Current bout state
    pub async fn snapshot(&self) -> Result<Bout, BoutError> {
        self.request(|response| BoutCommand::Snapshot { response })
            .await
    }

    /// Ask the session to stop. Stopping an already closed session is fine.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(BoutCommand::Shutdown).await;
    }
}

impl SessionTask {
    /// Wait for the session to finish and return its final bout.
    ///
    /// Returns `None` if the task was aborted or panicked.
    pub async fn wait(mut self) -> Option<Bout> {
        let join = self.join.take()?;
        join.await.ok()
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for SessionTask {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}
