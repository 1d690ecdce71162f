//! Athlete profiles.
//!
//! Profiles are created on first submission and locked on first successful
//! completion. After locking, legal name and birth date are frozen while the
//! remaining fields stay editable.

pub mod errors;
pub mod models;

pub use errors::{ProfileError, ProfileResult};
pub use models::{AthleteId, AthleteProfile, Belt, Gender, ProfileUpdate};
