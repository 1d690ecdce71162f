//! Score ledger for one competitor.

use serde::{Deserialize, Serialize};

/// Which competitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Adjustable score column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreField {
    Points,
    Advantages,
    Penalties,
}

impl std::fmt::Display for ScoreField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreField::Points => write!(f, "points"),
            ScoreField::Advantages => write!(f, "advantages"),
            ScoreField::Penalties => write!(f, "penalties"),
        }
    }
}

/// Points, advantages and penalties. No column ever goes below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub points: u32,
    pub advantages: u32,
    pub penalties: u32,
}

impl Score {
    pub const fn get(&self, field: ScoreField) -> u32 {
        match field {
            ScoreField::Points => self.points,
            ScoreField::Advantages => self.advantages,
            ScoreField::Penalties => self.penalties,
        }
    }

    /// Apply a signed delta to one column, clamping at zero
    #[must_use]
    pub fn adjusted(self, field: ScoreField, delta: i32) -> Score {
        let current = self.get(field);
        let value = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs())
        } else {
            current.saturating_sub(delta.unsigned_abs())
        };

        let mut next = self;
        match field {
            ScoreField::Points => next.points = value,
            ScoreField::Advantages => next.advantages = value,
            ScoreField::Penalties => next.penalties = value,
        }
        next
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pts / {} adv / {} pen",
            self.points, self.advantages, self.penalties
        )
    }
}
