//! Athlete profile models.

use super::errors::{ProfileError, ProfileResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Athlete ID type
pub type AthleteId = Uuid;

/// Competitor gender, as used by the weight tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Belt rank, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Belt {
    White,
    Grey,
    Yellow,
    Orange,
    Green,
    Blue,
    Purple,
    Brown,
    Black,
}

impl std::fmt::Display for Belt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Belt::White => "white",
            Belt::Grey => "grey",
            Belt::Yellow => "yellow",
            Belt::Orange => "orange",
            Belt::Green => "green",
            Belt::Blue => "blue",
            Belt::Purple => "purple",
            Belt::Brown => "brown",
            Belt::Black => "black",
        };
        write!(f, "{name}")
    }
}

/// Athlete profile
///
/// Once `profile_locked` is set, `full_name` and `birth_date` can only change
/// through an external correction process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Athlete ID
    pub id: AthleteId,
    /// Legal name
    pub full_name: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Gender
    pub gender: Gender,
    /// Declared body weight in kilograms
    pub body_weight_kg: f64,
    /// Belt rank
    pub belt: Belt,
    /// Team / academy
    pub team_name: String,
    /// Set on first successful completion
    #[serde(default)]
    pub profile_locked: bool,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Partial update to an athlete profile. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub body_weight_kg: Option<f64>,
    pub belt: Option<Belt>,
    pub team_name: Option<String>,
}

impl AthleteProfile {
    /// Create a new, unlocked profile
    pub fn new(
        full_name: impl Into<String>,
        birth_date: NaiveDate,
        gender: Gender,
        body_weight_kg: f64,
        belt: Belt,
        team_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            birth_date,
            gender,
            body_weight_kg,
            belt,
            team_name: team_name.into(),
            profile_locked: false,
            updated_at: Utc::now(),
        }
    }

    /// Check that every required field is present and sane
    pub fn validate(&self) -> ProfileResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(ProfileError::MissingField("full_name"));
        }
        if !self.body_weight_kg.is_finite() || self.body_weight_kg <= 0.0 {
            return Err(ProfileError::InvalidWeight(self.body_weight_kg));
        }
        if self.team_name.trim().is_empty() {
            return Err(ProfileError::MissingField("team_name"));
        }
        Ok(())
    }

    /// Validate and lock the profile. Locking is idempotent.
    pub fn complete(mut self) -> ProfileResult<Self> {
        self.validate()?;
        self.profile_locked = true;
        self.updated_at = Utc::now();
        Ok(self)
    }

    /// Apply an update, returning the new profile.
    ///
    /// # Errors
    ///
    /// Returns `LockedField` if a locked profile's name or birth date would
    /// change, or a validation error if the result is incomplete. The original
    /// profile is never modified.
    pub fn apply_update(&self, update: ProfileUpdate) -> ProfileResult<Self> {
        if self.profile_locked {
            if update
                .full_name
                .as_ref()
                .is_some_and(|name| name != &self.full_name)
            {
                return Err(ProfileError::LockedField("full_name"));
            }
            if update.birth_date.is_some_and(|date| date != self.birth_date) {
                return Err(ProfileError::LockedField("birth_date"));
            }
        }

        let mut next = self.clone();
        if let Some(full_name) = update.full_name {
            next.full_name = full_name;
        }
        if let Some(birth_date) = update.birth_date {
            next.birth_date = birth_date;
        }
        if let Some(gender) = update.gender {
            next.gender = gender;
        }
        if let Some(weight) = update.body_weight_kg {
            next.body_weight_kg = weight;
        }
        if let Some(belt) = update.belt {
            next.belt = belt;
        }
        if let Some(team_name) = update.team_name {
            next.team_name = team_name;
        }

        next.validate()?;
        next.updated_at = Utc::now();
        Ok(next)
    }

    /// Whether an update touches a categorization input
    pub fn affects_category(update: &ProfileUpdate) -> bool {
        update.birth_date.is_some() || update.gender.is_some() || update.body_weight_kg.is_some()
    }
}
