//! Registration pipeline.
//!
//! Tracks one athlete's registration in one event through the day-of-event
//! stages:
//!
//! `Registered -> WeighedIn -> WarmingUp -> CalledToMat -> Completed`
//!
//! with `Disqualified` reachable from any non-terminal stage. Transitions are
//! forward only and never skip a stage. The category is frozen at weigh-in.
//!
//! - [`state_machine`]: pure transition functions
//! - [`RegistrationManager`]: applies transitions against the stores and
//!   reports each one to the audit sink

pub mod errors;
pub mod manager;
pub mod models;
pub mod state_machine;

pub use errors::{PipelineError, PipelineResult};
pub use manager::RegistrationManager;
pub use models::{EventId, PipelineStage, Registration, RegistrationId, TransitionEvent};
pub use state_machine::{advance, reclassify};
