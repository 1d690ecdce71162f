//! Categorization engine.
//!
//! Maps a competitor's birth date, gender and body weight onto a competitive
//! age, an age band and a weight band. Both lookups are table driven:
//!
//! - the age table is keyed on the calendar-year competitive age
//! - the weight table is picked by gender and by whether the age band is
//!   adult/master or youth
//!
//! Every function here is pure; the reference date is always an argument so
//! results are reproducible.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use matside::athlete::Gender;
//! use matside::categorization::{classify, AgeBand, WeightBand};
//!
//! let born = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let as_of = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let category = classify(born, Gender::Male, 70.0, as_of).unwrap();
//!
//! assert_eq!(category.competitive_age, 25);
//! assert_eq!(category.age_band, AgeBand::Adult);
//! assert_eq!(category.weight_band, WeightBand::Light);
//! ```

pub mod bands;
pub mod engine;
pub mod errors;
pub mod tables;

pub use bands::{AgeBand, WeightBand};
pub use engine::{
    Category, classify, classify_now, classify_profile, classify_str, competitive_age,
};
pub use errors::{CategorizationError, CategorizationResult};
