//! Bout countdown clock.
//!
//! `TimerState` is a plain value. Every operation either returns a new state
//! or an error and never mutates in place, so a rejected call leaves the
//! caller's copy as it was. Finalization is tracked by the bout, not here.

use super::errors::BoutError;
use serde::{Deserialize, Serialize};

/// Regulation time for an adult bout
pub const DEFAULT_DURATION_SECS: u32 = 300;

/// Countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left on the clock (never above the configured duration)
    pub remaining_seconds: u32,
    /// Configured bout length
    pub configured_duration_seconds: u32,
    /// Whether the clock is counting down
    pub running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            remaining_seconds: DEFAULT_DURATION_SECS,
            configured_duration_seconds: DEFAULT_DURATION_SECS,
            running: false,
        }
    }
}

impl TimerState {
    /// Stopped timer with a full clock
    pub fn new(duration_secs: u32) -> Result<Self, BoutError> {
        if duration_secs == 0 {
            return Err(BoutError::InvalidDuration(duration_secs));
        }
        Ok(Self {
            remaining_seconds: duration_secs,
            configured_duration_seconds: duration_secs,
            running: false,
        })
    }

    /// Set a new bout length and refill the clock
    pub fn configure(self, duration_secs: u32) -> Result<Self, BoutError> {
        if self.running {
            return Err(BoutError::TimerRunning);
        }
        Self::new(duration_secs)
    }

    /// Start counting down. Starting a running clock is a no-op.
    pub fn start(self) -> Result<Self, BoutError> {
        if self.running {
            return Ok(self);
        }
        if self.remaining_seconds == 0 {
            return Err(BoutError::TimeExpired);
        }
        Ok(Self {
            running: true,
            ..self
        })
    }

    #[must_use]
    pub fn pause(self) -> Self {
        Self {
            running: false,
            ..self
        }
    }

    /// One elapsed second. Hitting zero stops the clock.
    #[must_use]
    pub fn tick(self) -> Self {
        if !self.running {
            return self;
        }
        let remaining_seconds = self.remaining_seconds.saturating_sub(1);
        Self {
            remaining_seconds,
            running: remaining_seconds > 0,
            ..self
        }
    }

    /// Stop and refill to the configured duration
    #[must_use]
    pub fn reset(self) -> Self {
        Self {
            remaining_seconds: self.configured_duration_seconds,
            running: false,
            ..self
        }
    }

    /// Manual clock correction by the table operator
    pub fn override_remaining(self, remaining_secs: u32) -> Result<Self, BoutError> {
        if self.running {
            return Err(BoutError::TimerRunning);
        }
        if remaining_secs > self.configured_duration_seconds {
            return Err(BoutError::RemainingExceedsDuration {
                remaining: remaining_secs,
                duration: self.configured_duration_seconds,
            });
        }
        Ok(Self {
            remaining_seconds: remaining_secs,
            ..self
        })
    }

    pub const fn expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Inside the closing-seconds warning window
    pub const fn in_final_stretch(&self, threshold_secs: u32) -> bool {
        self.remaining_seconds < threshold_secs
    }

    /// `MM:SS`
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

/// Format seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
