//! In-memory store implementations.

use super::{BoutStore, ProfileStore, RegistrationStore, StoreError, StoreResult};
use crate::{
    athlete::{AthleteId, AthleteProfile},
    bout::{Bout, BoutId, BoutResult},
    pipeline::{EventId, Registration, RegistrationId},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Profiles keyed by athlete
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<AthleteId, AthleteProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, athlete_id: AthleteId) -> StoreResult<AthleteProfile> {
        self.profiles
            .read()
            .await
            .get(&athlete_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put(&self, profile: AthleteProfile) -> StoreResult<()> {
        self.profiles.write().await.insert(profile.id, profile);
        Ok(())
    }
}

/// Registrations with an (athlete, event) uniqueness index
#[derive(Default)]
pub struct MemoryRegistrationStore {
    inner: RwLock<RegistrationTables>,
}

#[derive(Default)]
struct RegistrationTables {
    by_id: HashMap<RegistrationId, Registration>,
    by_entry: HashMap<(AthleteId, EventId), RegistrationId>,
}

impl MemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationStore for MemoryRegistrationStore {
    async fn get(&self, registration_id: RegistrationId) -> StoreResult<Registration> {
        self.inner
            .read()
            .await
            .by_id
            .get(&registration_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find(
        &self,
        athlete_id: AthleteId,
        event_id: EventId,
    ) -> StoreResult<Option<Registration>> {
        let tables = self.inner.read().await;
        Ok(tables
            .by_entry
            .get(&(athlete_id, event_id))
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }

    async fn insert(&self, registration: Registration) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        let key = (registration.athlete_id, registration.event_id);
        if tables.by_entry.contains_key(&key) || tables.by_id.contains_key(&registration.id) {
            return Err(StoreError::Duplicate(format!(
                "athlete {} in event {}",
                registration.athlete_id, registration.event_id
            )));
        }
        tables.by_entry.insert(key, registration.id);
        tables.by_id.insert(registration.id, registration);
        Ok(())
    }

    async fn update(&self, registration: Registration, expected_revision: u64) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        let stored = tables
            .by_id
            .get_mut(&registration.id)
            .ok_or(StoreError::NotFound)?;
        if stored.revision != expected_revision {
            return Err(StoreError::Conflict {
                expected: expected_revision,
                actual: stored.revision,
            });
        }
        *stored = registration;
        Ok(())
    }
}

/// Bouts plus an append-only result log
#[derive(Default)]
pub struct MemoryBoutStore {
    bouts: RwLock<HashMap<BoutId, Bout>>,
    results: RwLock<HashMap<BoutId, BoutResult>>,
}

impl MemoryBoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoutStore for MemoryBoutStore {
    async fn put(&self, bout: Bout) -> StoreResult<()> {
        self.bouts.write().await.insert(bout.id, bout);
        Ok(())
    }

    async fn get(&self, bout_id: BoutId) -> StoreResult<Bout> {
        self.bouts
            .read()
            .await
            .get(&bout_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put_result(&self, bout_id: BoutId, result: BoutResult) -> StoreResult<()> {
        let mut results = self.results.write().await;
        if results.contains_key(&bout_id) {
            return Err(StoreError::AlreadyRecorded);
        }
        results.insert(bout_id, result);
        Ok(())
    }

    async fn get_result(&self, bout_id: BoutId) -> StoreResult<Option<BoutResult>> {
        Ok(self.results.read().await.get(&bout_id).cloned())
    }
}
