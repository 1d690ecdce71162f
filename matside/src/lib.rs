//! # Matside
//!
//! Mat-side operations core for grappling tournaments.
//!
//! The crate covers the three pieces of logic a tournament needs on the day of
//! the event:
//!
//! - **Categorization**: birth date, gender and weight to an age band and a
//!   weight band
//! - **Registration pipeline**: each athlete's progress from registration
//!   through weigh-in, warm-up and call to the mat, ending completed or
//!   disqualified
//! - **Bout engine**: countdown timer, per-side points, advantages and
//!   penalties, and the finalization protocol that produces a `BoutResult`
//!
//! Persistence, audit and the clock are collaborators behind traits in
//! [`store`] and [`bout::clock`]; in-memory implementations are included.
//!
//! ## Core Modules
//!
//! - [`athlete`]: athlete profiles and their completion rules
//! - [`categorization`]: pure classification functions and band tables
//! - [`pipeline`]: registration stages, transitions and the registration manager
//! - [`bout`]: timer, scores, finalization and the live bout session
//! - [`coordinator`]: opens bouts between called registrations and records results
//! - [`store`]: store and audit contracts
//! - [`config`]: environment-driven mat configuration

pub mod athlete;
pub mod bout;
pub mod categorization;
pub mod config;
pub mod coordinator;
pub mod pipeline;
pub mod store;

pub use athlete::{AthleteId, AthleteProfile, Gender};
pub use bout::{Bout, BoutError, BoutHandle, BoutResult, ReasonCode, ScoreField, Side};
pub use categorization::{AgeBand, Category, WeightBand, classify};
pub use config::{ConfigError, MatConfig};
pub use coordinator::{CoordinatorError, LiveBout, MatCoordinator};
pub use pipeline::{PipelineError, PipelineStage, Registration, RegistrationManager};
