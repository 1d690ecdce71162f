//! Integration tests for the registration pipeline
//!
//! These tests drive the registration manager against the in-memory stores
//! and check the audit trail it leaves behind.

use chrono::NaiveDate;
use matside::athlete::{AthleteProfile, Belt, Gender, ProfileUpdate};
use matside::categorization::{AgeBand, WeightBand};
use matside::pipeline::{PipelineError, PipelineStage, RegistrationManager};
use matside::store::{
    AuditEvent, ChannelAuditSink, MemoryProfileStore, MemoryRegistrationStore, ProfileStore,
    RegistrationStore,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

struct Harness {
    manager: RegistrationManager,
    profiles: Arc<MemoryProfileStore>,
    registrations: Arc<MemoryRegistrationStore>,
    audit: mpsc::UnboundedReceiver<AuditEvent>,
}

fn harness() -> Harness {
    let profiles = Arc::new(MemoryProfileStore::new());
    let registrations = Arc::new(MemoryRegistrationStore::new());
    let (sink, audit) = ChannelAuditSink::new();
    Harness {
        manager: RegistrationManager::new(registrations.clone(), profiles.clone(), Arc::new(sink)),
        profiles,
        registrations,
        audit,
    }
}

fn event_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 13).unwrap()
}

async fn register_profile(h: &Harness, born: NaiveDate, weight: f64) -> AthleteProfile {
    let profile = AthleteProfile::new(
        "Marcus Almeida",
        born,
        Gender::Male,
        weight,
        Belt::Black,
        "Checkmat",
    )
    .complete()
    .unwrap();
    h.profiles.put(profile.clone()).await.unwrap();
    profile
}

#[tokio::test]
async fn test_full_forward_chain() {
    let mut h = harness();
    let profile = register_profile(&h, NaiveDate::from_ymd_opt(1990, 4, 4).unwrap(), 100.0).await;
    let reg = h
        .manager
        .enroll(profile.id, Uuid::new_v4(), event_day())
        .await
        .unwrap();
    assert_eq!(reg.category.age_band, AgeBand::Master1);
    assert_eq!(reg.category.weight_band, WeightBand::UltraHeavy);

    let chain = [
        PipelineStage::WeighedIn,
        PipelineStage::WarmingUp,
        PipelineStage::CalledToMat,
        PipelineStage::Completed,
    ];
    for stage in chain {
        let reg = h.manager.advance(reg.id, stage).await.unwrap();
        assert_eq!(reg.stage, stage);
    }

    let mut seen = Vec::new();
    while let Ok(AuditEvent::StageChanged(event)) = h.audit.try_recv() {
        seen.push((event.from, event.to));
    }
    assert_eq!(
        seen,
        vec![
            (PipelineStage::Registered, PipelineStage::WeighedIn),
            (PipelineStage::WeighedIn, PipelineStage::WarmingUp),
            (PipelineStage::WarmingUp, PipelineStage::CalledToMat),
            (PipelineStage::CalledToMat, PipelineStage::Completed),
        ]
    );

    // Terminal stages go nowhere
    assert!(matches!(
        h.manager.disqualify(reg.id).await,
        Err(PipelineError::IllegalTransition { .. })
    ));
}

#[tokio::test]
async fn test_skipping_a_stage_is_illegal() {
    let h = harness();
    let profile = register_profile(&h, NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(), 70.0).await;
    let reg = h
        .manager
        .enroll(profile.id, Uuid::new_v4(), event_day())
        .await
        .unwrap();

    let err = h
        .manager
        .advance(reg.id, PipelineStage::CalledToMat)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::IllegalTransition {
            from: PipelineStage::Registered,
            to: PipelineStage::CalledToMat,
        }
    ));
    assert_eq!(
        h.manager.get(reg.id).await.unwrap().stage,
        PipelineStage::Registered
    );
}

#[tokio::test]
async fn test_disqualify_from_warming_up() {
    let h = harness();
    let profile = register_profile(&h, NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(), 70.0).await;
    let reg = h
        .manager
        .enroll(profile.id, Uuid::new_v4(), event_day())
        .await
        .unwrap();
    h.manager
        .advance(reg.id, PipelineStage::WeighedIn)
        .await
        .unwrap();
    h.manager
        .advance(reg.id, PipelineStage::WarmingUp)
        .await
        .unwrap();

    let reg = h.manager.disqualify(reg.id).await.unwrap();
    assert_eq!(reg.stage, PipelineStage::Disqualified);
    assert!(reg.stage.is_terminal());
}

#[tokio::test]
async fn test_one_registration_per_event() {
    let h = harness();
    let profile = register_profile(&h, NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(), 70.0).await;
    let event = Uuid::new_v4();

    let first = h
        .manager
        .enroll(profile.id, event, event_day())
        .await
        .unwrap();
    assert!(matches!(
        h.manager.enroll(profile.id, event, event_day()).await,
        Err(PipelineError::AlreadyRegistered { .. })
    ));
    h.manager
        .enroll(profile.id, Uuid::new_v4(), event_day())
        .await
        .unwrap();
    let stored = h.registrations.find(profile.id, event).await.unwrap();
    assert_eq!(stored.map(|r| r.id), Some(first.id));
}

#[tokio::test]
async fn test_incomplete_profile_cannot_enroll() {
    let h = harness();
    let profile = AthleteProfile::new(
        "  ",
        NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
        Gender::Female,
        55.0,
        Belt::Blue,
        "Atos",
    );
    h.profiles.put(profile.clone()).await.unwrap();
    assert!(matches!(
        h.manager
            .enroll(profile.id, Uuid::new_v4(), event_day())
            .await,
        Err(PipelineError::IncompleteProfile(_))
    ));
}

#[tokio::test]
async fn test_concurrent_advances_commit_once() {
    let h = harness();
    let profile = register_profile(&h, NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(), 70.0).await;
    let reg = h
        .manager
        .enroll(profile.id, Uuid::new_v4(), event_day())
        .await
        .unwrap();

    let first = h.manager.clone();
    let second = h.manager.clone();
    let (a, b) = tokio::join!(
        first.advance(reg.id, PipelineStage::WeighedIn),
        second.advance(reg.id, PipelineStage::WeighedIn),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|r| matches!(
        r,
        Err(PipelineError::StageChanged(_)) | Err(PipelineError::IllegalTransition { .. })
    )));

    let stored = h.manager.get(reg.id).await.unwrap();
    assert_eq!(stored.stage, PipelineStage::WeighedIn);
    assert_eq!(stored.revision, 1);
}

#[tokio::test]
async fn test_category_frozen_after_weigh_in() {
    let h = harness();
    let profile = register_profile(&h, NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(), 70.0).await;
    let reg = h
        .manager
        .enroll(profile.id, Uuid::new_v4(), event_day())
        .await
        .unwrap();
    h.manager
        .advance(reg.id, PipelineStage::WeighedIn)
        .await
        .unwrap();

    // Weight changes after weigh-in no longer move the athlete
    let update = ProfileUpdate {
        body_weight_kg: Some(90.0),
        ..ProfileUpdate::default()
    };
    assert!(AthleteProfile::affects_category(&update));
    h.profiles
        .put(profile.apply_update(update).unwrap())
        .await
        .unwrap();

    let err = h
        .manager
        .reclassify(reg.id, event_day())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::CategoryFrozen {
            stage: PipelineStage::WeighedIn
        }
    ));
    assert_eq!(
        h.manager.get(reg.id).await.unwrap().category.weight_band,
        WeightBand::Light
    );
}
