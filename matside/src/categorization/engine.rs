//! Category resolution from birth date, gender and body weight.

use super::{
    bands::{AgeBand, WeightBand},
    errors::{CategorizationError, CategorizationResult},
    tables::{AGE_TABLE, weight_table},
};
use crate::athlete::{AthleteProfile, Gender};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Competitive category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Age by the calendar-year method
    pub competitive_age: u32,
    pub age_band: AgeBand,
    pub weight_band: WeightBand,
}

impl Category {
    /// Roster label, e.g. `Adult / Light`
    pub fn label(&self) -> String {
        format!("{} / {}", self.age_band, self.weight_band)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.competitive_age)
    }
}

/// Competitive age: reference year minus birth year. Month and day are ignored.
pub fn competitive_age(birth_date: NaiveDate, as_of: NaiveDate) -> CategorizationResult<u32> {
    if birth_date > as_of {
        return Err(CategorizationError::InvalidInput(format!(
            "birth date {birth_date} is after {as_of}"
        )));
    }
    // birth_date <= as_of, so the year difference is never negative
    Ok(as_of.year().abs_diff(birth_date.year()))
}

/// Classify a competitor as of a reference date.
///
/// # Errors
///
/// Returns `InvalidInput` if the weight is not a positive number or the birth
/// date lies after `as_of`.
pub fn classify(
    birth_date: NaiveDate,
    gender: Gender,
    body_weight_kg: f64,
    as_of: NaiveDate,
) -> CategorizationResult<Category> {
    if !body_weight_kg.is_finite() || body_weight_kg <= 0.0 {
        return Err(CategorizationError::InvalidInput(format!(
            "body weight must be positive, got {body_weight_kg}"
        )));
    }

    let competitive_age = competitive_age(birth_date, as_of)?;
    let age_band = AGE_TABLE.resolve(competitive_age);
    let weight_band = weight_table(gender, age_band).resolve(body_weight_kg);

    Ok(Category {
        competitive_age,
        age_band,
        weight_band,
    })
}

/// Classify from a `YYYY-MM-DD` birth date string
pub fn classify_str(
    birth_date: &str,
    gender: Gender,
    body_weight_kg: f64,
    as_of: NaiveDate,
) -> CategorizationResult<Category> {
    let birth_date = NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d").map_err(|_| {
        CategorizationError::InvalidInput(format!("invalid birth date '{birth_date}'"))
    })?;
    classify(birth_date, gender, body_weight_kg, as_of)
}

/// Classify as of today's UTC date
pub fn classify_now(
    birth_date: NaiveDate,
    gender: Gender,
    body_weight_kg: f64,
) -> CategorizationResult<Category> {
    classify(birth_date, gender, body_weight_kg, Utc::now().date_naive())
}

/// Classify an athlete profile
pub fn classify_profile(
    profile: &AthleteProfile,
    as_of: NaiveDate,
) -> CategorizationResult<Category> {
    classify(
        profile.birth_date,
        profile.gender,
        profile.body_weight_kg,
        as_of,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_vector() {
        let category = classify(date(2000, 1, 1), Gender::Male, 70.0, date(2025, 6, 1)).unwrap();
        assert_eq!(category.competitive_age, 25);
        assert_eq!(category.age_band, AgeBand::Adult);
        assert_eq!(category.weight_band, WeightBand::Light);
        assert_eq!(category.label(), "Adult / Light");
    }

    #[test]
    fn test_calendar_year_ignores_month_and_day() {
        // Born late December, measured early January: still counts the full year
        let age = competitive_age(date(2007, 12, 31), date(2025, 1, 1)).unwrap();
        assert_eq!(age, 18);
    }

    #[test]
    fn test_youth_uses_youth_table() {
        let category = classify(date(2010, 3, 3), Gender::Female, 50.0, date(2025, 1, 1)).unwrap();
        assert_eq!(category.age_band, AgeBand::InfantJuvenileB);
        assert_eq!(category.weight_band, WeightBand::Middle);
    }

    #[test]
    fn test_master_uses_adult_table() {
        let category = classify(date(1965, 7, 7), Gender::Male, 110.0, date(2025, 1, 1)).unwrap();
        assert_eq!(category.competitive_age, 60);
        assert_eq!(category.age_band, AgeBand::Master6);
        assert_eq!(category.weight_band, WeightBand::SuperHeavy);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                classify(date(2000, 1, 1), Gender::Male, weight, date(2025, 1, 1)),
                Err(CategorizationError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_rejects_future_birth_date() {
        assert!(matches!(
            classify(date(2026, 1, 1), Gender::Female, 60.0, date(2025, 1, 1)),
            Err(CategorizationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_born_this_year_is_age_zero() {
        let category = classify(date(2025, 1, 1), Gender::Female, 9.0, date(2025, 1, 1)).unwrap();
        assert_eq!(category.competitive_age, 0);
        assert_eq!(category.age_band, AgeBand::PreMini);
    }

    #[test]
    fn test_classify_str() {
        let category = classify_str("2000-01-01", Gender::Male, 70.0, date(2025, 1, 1)).unwrap();
        assert_eq!(category.weight_band, WeightBand::Light);

        assert!(matches!(
            classify_str("2000-13-01", Gender::Male, 70.0, date(2025, 1, 1)),
            Err(CategorizationError::InvalidInput(_))
        ));
        assert!(matches!(
            classify_str("yesterday", Gender::Male, 70.0, date(2025, 1, 1)),
            Err(CategorizationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let a = classify(date(1990, 5, 5), Gender::Female, 58.5, date(2025, 1, 1));
        let b = classify(date(1990, 5, 5), Gender::Female, 58.5, date(2025, 1, 1));
        assert_eq!(a, b);
    }
}
