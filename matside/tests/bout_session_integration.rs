//! Integration tests for live bout sessions
//!
//! Sessions are driven with a manual clock so every tick is explicit, except
//! for the wall-clock test which runs on tokio's paused time.

use matside::bout::{
    Bout, BoutError, BoutSession, IntervalClock, ManualClock, ReasonCode, ScoreField, Side,
    TimerState,
};
use matside::categorization::{AgeBand, Category, WeightBand};
use matside::pipeline::{PipelineStage, Registration};
use std::time::Duration;
use uuid::Uuid;

fn called_pair() -> (Registration, Registration) {
    let event = Uuid::new_v4();
    let category = Category {
        competitive_age: 24,
        age_band: AgeBand::Adult,
        weight_band: WeightBand::Middle,
    };
    let mut a = Registration::new(Uuid::new_v4(), event, category);
    let mut b = Registration::new(Uuid::new_v4(), event, category);
    a.stage = PipelineStage::CalledToMat;
    b.stage = PipelineStage::CalledToMat;
    (a, b)
}

fn fresh_bout(duration: u32) -> Bout {
    let (a, b) = called_pair();
    Bout::pair(&a, &b, duration).unwrap()
}

#[tokio::test]
async fn test_full_regulation_runs_out() {
    let (clock, ticker) = ManualClock::new();
    let (handle, _task) = BoutSession::spawn(fresh_bout(300), clock, 16);

    handle.configure(300).await.unwrap();
    handle.start().await.unwrap();
    ticker.advance(300);

    let timer = handle.snapshot().await.unwrap().timer;
    assert_eq!(timer.remaining_seconds, 0);
    assert!(!timer.running);
    assert!(timer.expired());

    // Further ticks are ignored
    ticker.advance(5);
    assert_eq!(handle.snapshot().await.unwrap().timer, timer);
    assert_eq!(handle.start().await, Err(BoutError::TimeExpired));
}

#[tokio::test]
async fn test_reset_then_configure_restores_initial_timer() {
    let (clock, ticker) = ManualClock::new();
    let (handle, _task) = BoutSession::spawn(fresh_bout(300), clock, 16);

    let initial = handle.configure(240).await.unwrap();
    handle.start().await.unwrap();
    ticker.advance(17);
    handle.pause().await.unwrap();

    handle.reset().await.unwrap();
    let restored = handle.configure(240).await.unwrap();
    assert_eq!(restored, initial);
    assert_eq!(restored, TimerState::new(240).unwrap());
}

#[tokio::test]
async fn test_reset_keeps_scores() {
    let (clock, _ticker) = ManualClock::new();
    let (handle, _task) = BoutSession::spawn(fresh_bout(300), clock, 16);

    handle
        .adjust_score(Side::A, ScoreField::Advantages, 2)
        .await
        .unwrap();
    handle.reset().await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().score_a.advantages, 2);

    handle.reset_scores().await.unwrap();
    let bout = handle.snapshot().await.unwrap();
    assert_eq!(bout.score_a.advantages, 0);
    assert_eq!(bout.timer.remaining_seconds, 300);
}

#[tokio::test]
async fn test_clock_corrections_need_a_stopped_clock() {
    let (clock, _ticker) = ManualClock::new();
    let (handle, _task) = BoutSession::spawn(fresh_bout(300), clock, 16);

    handle.start().await.unwrap();
    assert_eq!(
        handle.override_remaining(120).await,
        Err(BoutError::TimerRunning)
    );
    assert_eq!(handle.configure(600).await, Err(BoutError::TimerRunning));

    handle.pause().await.unwrap();
    assert_eq!(
        handle.override_remaining(301).await,
        Err(BoutError::RemainingExceedsDuration {
            remaining: 301,
            duration: 300
        })
    );
    let timer = handle.override_remaining(120).await.unwrap();
    assert_eq!(timer.remaining_seconds, 120);
    assert_eq!(timer.display(), "02:00");
}

#[tokio::test]
async fn test_finalize_validation_order() {
    let (clock, _ticker) = ManualClock::new();
    let (handle, _task) = BoutSession::spawn(fresh_bout(300), clock, 16);

    assert_eq!(
        handle.finalize(None, None, None).await,
        Err(BoutError::MissingWinner)
    );
    assert_eq!(
        handle.finalize(Some(Side::A), None, None).await,
        Err(BoutError::MissingReason)
    );
    assert_eq!(
        handle
            .finalize(Some(Side::A), Some(ReasonCode::Other), Some("   ".to_string()))
            .await,
        Err(BoutError::MissingDescription)
    );
    assert!(!handle.snapshot().await.unwrap().is_finalized());

    let result = handle
        .finalize(
            Some(Side::A),
            Some(ReasonCode::Other),
            Some("opponent injured".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(result.other_description.as_deref(), Some("opponent injured"));
}

#[tokio::test]
async fn test_finalized_bout_is_frozen() {
    let (clock, ticker) = ManualClock::new();
    let (handle, _task) = BoutSession::spawn(fresh_bout(300), clock, 16);

    handle.start().await.unwrap();
    handle
        .adjust_score(Side::B, ScoreField::Points, 2)
        .await
        .unwrap();
    ticker.advance(10);
    let result = handle
        .finalize(Some(Side::B), Some(ReasonCode::Submission), None)
        .await
        .unwrap();
    assert_eq!(result.winner_score().points, 2);

    let bout = handle.snapshot().await.unwrap();
    assert!(!bout.timer.running);
    assert_eq!(bout.timer.remaining_seconds, 290);

    assert_eq!(
        handle.adjust_score(Side::A, ScoreField::Points, 2).await,
        Err(BoutError::BoutAlreadyFinalized)
    );
    assert_eq!(handle.start().await, Err(BoutError::BoutAlreadyFinalized));
    assert_eq!(handle.reset().await, Err(BoutError::BoutAlreadyFinalized));
    assert_eq!(
        handle
            .finalize(Some(Side::A), Some(ReasonCode::Points), None)
            .await,
        Err(BoutError::BoutAlreadyFinalized)
    );

    ticker.advance(10);
    assert_eq!(handle.snapshot().await.unwrap(), bout);
}

#[tokio::test(start_paused = true)]
async fn test_interval_clock_counts_seconds() {
    let (handle, _task) = BoutSession::spawn(fresh_bout(300), IntervalClock::per_second(), 16);

    // Time spent before the start does not count
    tokio::time::sleep(Duration::from_secs(3)).await;
    handle.start().await.unwrap();

    tokio::time::sleep(Duration::from_millis(5500)).await;
    let timer = handle.snapshot().await.unwrap().timer;
    assert_eq!(timer.remaining_seconds, 295);
    assert!(timer.running);
}
