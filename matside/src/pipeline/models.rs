//! Registration pipeline data models.

use crate::{athlete::AthleteId, categorization::Category};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration ID type
pub type RegistrationId = Uuid;

/// Event (championship) ID type
pub type EventId = Uuid;

/// Day-of-event operational stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Enrolled in the event
    Registered,
    /// Passed the scale
    WeighedIn,
    /// In the warm-up area
    WarmingUp,
    /// Called to a mat for a bout
    CalledToMat,
    /// Bout finished
    Completed,
    /// Removed from the event
    Disqualified,
}

impl PipelineStage {
    /// The forward chain, in order
    pub const FORWARD: [PipelineStage; 5] = [
        PipelineStage::Registered,
        PipelineStage::WeighedIn,
        PipelineStage::WarmingUp,
        PipelineStage::CalledToMat,
        PipelineStage::Completed,
    ];

    /// Immediate successor in the forward chain
    pub const fn next(self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Registered => Some(PipelineStage::WeighedIn),
            PipelineStage::WeighedIn => Some(PipelineStage::WarmingUp),
            PipelineStage::WarmingUp => Some(PipelineStage::CalledToMat),
            PipelineStage::CalledToMat => Some(PipelineStage::Completed),
            PipelineStage::Completed | PipelineStage::Disqualified => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Completed | PipelineStage::Disqualified)
    }

    /// Whether `target` is a legal transition from this stage
    pub fn can_advance_to(self, target: PipelineStage) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == PipelineStage::Disqualified || self.next() == Some(target)
    }

    /// Every stage reachable in one step
    pub fn legal_targets(self) -> Vec<PipelineStage> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.next()
            .into_iter()
            .chain(std::iter::once(PipelineStage::Disqualified))
            .collect()
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Registered => write!(f, "registered"),
            PipelineStage::WeighedIn => write!(f, "weighed-in"),
            PipelineStage::WarmingUp => write!(f, "warming-up"),
            PipelineStage::CalledToMat => write!(f, "called-to-mat"),
            PipelineStage::Completed => write!(f, "completed"),
            PipelineStage::Disqualified => write!(f, "disqualified"),
        }
    }
}

/// One athlete's registration in one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Registration ID
    pub id: RegistrationId,
    /// Registered athlete
    pub athlete_id: AthleteId,
    /// Event
    pub event_id: EventId,
    /// Category at enrollment (or last reclassification)
    pub category: Category,
    /// Current stage
    pub stage: PipelineStage,
    /// Category frozen
    pub locked: bool,
    /// Bumped on every write; used for optimistic updates
    pub revision: u64,
    /// Enrollment timestamp
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    /// Create a registration at the `Registered` stage
    pub fn new(athlete_id: AthleteId, event_id: EventId, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            athlete_id,
            event_id,
            category,
            stage: PipelineStage::Registered,
            locked: false,
            revision: 0,
            registered_at: Utc::now(),
        }
    }
}

/// A successful stage change, reported to audit collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub registration_id: RegistrationId,
    pub from: PipelineStage,
    pub to: PipelineStage,
    pub timestamp: DateTime<Utc>,
}
