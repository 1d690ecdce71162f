//! Tick sources for the bout countdown.
//!
//! A live session only polls its clock while the timer is running and calls
//! `restart` every time the timer starts, so a paused bout holds no pending
//! tick and the first tick after a start is a full period away.

use async_trait::async_trait;
use std::time::Duration;
use tokio::{
    sync::mpsc,
    time::{Instant, Interval, MissedTickBehavior, interval_at},
};

/// Supplies one tick per elapsed second
#[async_trait]
pub trait ClockSource: Send {
    /// Wait for the next tick
    async fn next_tick(&mut self);

    /// Re-arm so the next tick is one full period from now
    fn restart(&mut self);
}

/// Wall-clock ticks from a tokio interval
pub struct IntervalClock {
    interval: Interval,
}

impl IntervalClock {
    /// Create a clock with the given period.
    ///
    /// Must be called from within a tokio runtime. A zero `period` is raised
    /// to one millisecond.
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let mut interval = interval_at(Instant::now() + period, period);
        // A stalled runtime must not replay a burst of seconds
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl ClockSource for IntervalClock {
    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }

    fn restart(&mut self) {
        self.interval.reset();
    }
}

/// Deterministic clock driven by a [`ManualTicker`]
pub struct ManualClock {
    ticks: mpsc::UnboundedReceiver<()>,
}

/// Test-side handle that fires ticks into a [`ManualClock`]
#[derive(Clone)]
pub struct ManualTicker {
    sender: mpsc::UnboundedSender<()>,
}

impl ManualClock {
    pub fn new() -> (Self, ManualTicker) {
        let (sender, ticks) = mpsc::unbounded_channel();
        (Self { ticks }, ManualTicker { sender })
    }
}

#[async_trait]
impl ClockSource for ManualClock {
    async fn next_tick(&mut self) {
        if self.ticks.recv().await.is_none() {
            // Ticker gone: the clock simply never fires again
            std::future::pending::<()>().await;
        }
    }

    fn restart(&mut self) {
        // Ticks fired while stopped are discarded, like a real clock
        while self.ticks.try_recv().is_ok() {}
    }
}

impl ManualTicker {
    /// Fire one tick
    pub fn tick(&self) {
        let _ = self.sender.send(());
    }

    /// Fire `n` ticks
    pub fn advance(&self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_interval_clock_first_tick_is_one_period_away() {
        let mut clock = IntervalClock::per_second();
        let started = Instant::now();
        clock.next_tick().await;
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_clock_restart_rearms() {
        let mut clock = IntervalClock::per_second();
        tokio::time::advance(Duration::from_millis(700)).await;
        clock.restart();
        let restarted = Instant::now();
        clock.next_tick().await;
        assert_eq!(restarted.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_clock_zero_period_is_clamped() {
        let mut clock = IntervalClock::new(Duration::ZERO);
        let started = Instant::now();
        clock.next_tick().await;
        assert_eq!(started.elapsed(), Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_manual_clock_restart_discards_queued_ticks() {
        let (mut clock, ticker) = ManualClock::new();
        ticker.advance(3);
        clock.restart();
        ticker.tick();
        clock.next_tick().await;
        assert!(clock.ticks.try_recv().is_err());
    }
}
