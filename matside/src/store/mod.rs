//! Collaborator contracts.
//!
//! Persistence and audit are owned outside this crate. The core only talks to
//! them through these traits; `memory` provides in-process implementations for
//! tests, demos and single-process deployments.
//!
//! Stores own their own consistency rules:
//! - `RegistrationStore::insert` enforces one registration per (athlete, event)
//! - `RegistrationStore::update` is optimistic on `Registration::revision`
//! - `BoutStore::put_result` is append-only

pub mod audit;
pub mod errors;
pub mod memory;

pub use audit::{AuditEvent, AuditSink, ChannelAuditSink, LogAuditSink, emit};
pub use errors::{StoreError, StoreResult};
pub use memory::{MemoryBoutStore, MemoryProfileStore, MemoryRegistrationStore};

use crate::{
    athlete::{AthleteId, AthleteProfile},
    bout::{Bout, BoutId, BoutResult},
    pipeline::{EventId, Registration, RegistrationId},
};
use async_trait::async_trait;

/// Athlete profile persistence
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, athlete_id: AthleteId) -> StoreResult<AthleteProfile>;

    async fn put(&self, profile: AthleteProfile) -> StoreResult<()>;
}

/// Registration persistence
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn get(&self, registration_id: RegistrationId) -> StoreResult<Registration>;

    async fn find(
        &self,
        athlete_id: AthleteId,
        event_id: EventId,
    ) -> StoreResult<Option<Registration>>;

    /// Insert a new registration; `Duplicate` if the athlete already has one
    /// for the event
    async fn insert(&self, registration: Registration) -> StoreResult<()>;

    /// Replace a registration if its stored revision still equals
    /// `expected_revision`; `Conflict` otherwise
    async fn update(&self, registration: Registration, expected_revision: u64) -> StoreResult<()>;
}

/// Bout persistence
#[async_trait]
pub trait BoutStore: Send + Sync {
    async fn put(&self, bout: Bout) -> StoreResult<()>;

    async fn get(&self, bout_id: BoutId) -> StoreResult<Bout>;

    /// Append the result; `AlreadyRecorded` if one exists
    async fn put_result(&self, bout_id: BoutId, result: BoutResult) -> StoreResult<()>;

    async fn get_result(&self, bout_id: BoutId) -> StoreResult<Option<BoutResult>>;
}
