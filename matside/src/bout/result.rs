//! Finalized bout outcome.

use super::{
    engine::BoutId,
    score::{Score, Side},
};
use crate::{athlete::AthleteId, pipeline::RegistrationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the bout was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    Submission,
    Points,
    Decision,
    Disqualification,
    Other,
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReasonCode::Submission => write!(f, "submission"),
            ReasonCode::Points => write!(f, "points"),
            ReasonCode::Decision => write!(f, "decision"),
            ReasonCode::Disqualification => write!(f, "disqualification"),
            ReasonCode::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for ReasonCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "submission" | "sub" => Ok(ReasonCode::Submission),
            "points" | "pts" => Ok(ReasonCode::Points),
            "decision" | "dec" => Ok(ReasonCode::Decision),
            "disqualification" | "dq" => Ok(ReasonCode::Disqualification),
            "other" => Ok(ReasonCode::Other),
            _ => Err(format!("unknown reason code '{s}'")),
        }
    }
}

/// Immutable record of a finished bout.
///
/// `other_description` is `Some` exactly when `reason` is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoutResult {
    pub bout_id: BoutId,
    pub winner: Side,
    pub winner_registration: RegistrationId,
    pub loser_registration: RegistrationId,
    pub winner_athlete: AthleteId,
    pub loser_athlete: AthleteId,
    pub reason: ReasonCode,
    pub other_description: Option<String>,
    pub final_score_a: Score,
    pub final_score_b: Score,
    pub finalized_at: DateTime<Utc>,
}

impl BoutResult {
    pub const fn loser(&self) -> Side {
        self.winner.opponent()
    }

    /// Score of the winning side
    pub const fn winner_score(&self) -> Score {
        match self.winner {
            Side::A => self.final_score_a,
            Side::B => self.final_score_b,
        }
    }
}
