//! Federation lookup tables.
//!
//! Each table is a list of inclusive upper bounds sorted ascending, followed
//! by a catch-all band for anything above the last bound.

use super::bands::{AgeBand, WeightBand};
use crate::athlete::Gender;

/// Ordered age table with an open-ended last band
pub struct AgeTable {
    pub bounds: &'static [(u32, AgeBand)],
    pub catch_all: AgeBand,
}

/// Ordered weight table with an open-ended last band
pub struct WeightTable {
    pub bounds: &'static [(f64, WeightBand)],
    pub catch_all: WeightBand,
}

pub static AGE_TABLE: AgeTable = AgeTable {
    bounds: &[
        (5, AgeBand::PreMini),
        (7, AgeBand::Mini),
        (9, AgeBand::InfantA),
        (11, AgeBand::InfantB),
        (13, AgeBand::InfantJuvenileA),
        (15, AgeBand::InfantJuvenileB),
        (17, AgeBand::Juvenile),
        (29, AgeBand::Adult),
        (35, AgeBand::Master1),
        (40, AgeBand::Master2),
        (45, AgeBand::Master3),
        (50, AgeBand::Master4),
        (55, AgeBand::Master5),
    ],
    catch_all: AgeBand::Master6,
};

pub static MALE_ADULT: WeightTable = WeightTable {
    bounds: &[
        (57.5, WeightBand::Rooster),
        (64.0, WeightBand::LightFeather),
        (70.0, WeightBand::Light),
        (76.0, WeightBand::Middle),
        (82.3, WeightBand::MediumHeavy),
        (88.3, WeightBand::Heavy),
        (94.3, WeightBand::ExtraHeavy),
        (100.5, WeightBand::UltraHeavy),
    ],
    catch_all: WeightBand::SuperHeavy,
};

pub static FEMALE_ADULT: WeightTable = WeightTable {
    bounds: &[
        (48.5, WeightBand::Rooster),
        (53.5, WeightBand::LightFeather),
        (58.5, WeightBand::Light),
        (64.0, WeightBand::Middle),
        (69.0, WeightBand::MediumHeavy),
        (74.0, WeightBand::Heavy),
        (79.3, WeightBand::ExtraHeavy),
    ],
    catch_all: WeightBand::SuperHeavy,
};

pub static MALE_YOUTH: WeightTable = WeightTable {
    bounds: &[(50.0, WeightBand::Light), (60.0, WeightBand::Middle)],
    catch_all: WeightBand::SuperHeavy,
};

pub static FEMALE_YOUTH: WeightTable = WeightTable {
    bounds: &[(45.0, WeightBand::Light), (55.0, WeightBand::Middle)],
    catch_all: WeightBand::SuperHeavy,
};

impl AgeTable {
    /// Band for a competitive age
    pub fn resolve(&self, age: u32) -> AgeBand {
        self.bounds
            .iter()
            .find(|(upper, _)| age <= *upper)
            .map_or(self.catch_all, |(_, band)| *band)
    }
}

impl WeightTable {
    /// Band for a body weight in kilograms
    pub fn resolve(&self, weight_kg: f64) -> WeightBand {
        self.bounds
            .iter()
            .find(|(upper, _)| weight_kg <= *upper)
            .map_or(self.catch_all, |(_, band)| *band)
    }
}

/// Select the weight table for a gender and age band
pub fn weight_table(gender: Gender, age_band: AgeBand) -> &'static WeightTable {
    match (gender, age_band.is_adult_or_master()) {
        (Gender::Male, true) => &MALE_ADULT,
        (Gender::Male, false) => &MALE_YOUTH,
        (Gender::Female, true) => &FEMALE_ADULT,
        (Gender::Female, false) => &FEMALE_YOUTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_weight_tables() -> [&'static WeightTable; 4] {
        [&MALE_ADULT, &FEMALE_ADULT, &MALE_YOUTH, &FEMALE_YOUTH]
    }

    #[test]
    fn test_tables_are_sorted() {
        assert!(AGE_TABLE.bounds.windows(2).all(|w| w[0].0 < w[1].0));
        for table in all_weight_tables() {
            assert!(table.bounds.windows(2).all(|w| w[0].0 < w[1].0));
            assert_eq!(table.catch_all, WeightBand::SuperHeavy);
        }
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        assert_eq!(AGE_TABLE.resolve(0), AgeBand::PreMini);
        assert_eq!(AGE_TABLE.resolve(5), AgeBand::PreMini);
        assert_eq!(AGE_TABLE.resolve(6), AgeBand::Mini);
        assert_eq!(AGE_TABLE.resolve(17), AgeBand::Juvenile);
        assert_eq!(AGE_TABLE.resolve(18), AgeBand::Adult);
        assert_eq!(AGE_TABLE.resolve(29), AgeBand::Adult);
        assert_eq!(AGE_TABLE.resolve(30), AgeBand::Master1);
        assert_eq!(AGE_TABLE.resolve(55), AgeBand::Master5);
        assert_eq!(AGE_TABLE.resolve(56), AgeBand::Master6);
        assert_eq!(AGE_TABLE.resolve(u32::MAX), AgeBand::Master6);
    }

    #[test]
    fn test_male_adult_boundaries() {
        assert_eq!(MALE_ADULT.resolve(57.5), WeightBand::Rooster);
        assert_eq!(MALE_ADULT.resolve(57.6), WeightBand::LightFeather);
        assert_eq!(MALE_ADULT.resolve(70.0), WeightBand::Light);
        assert_eq!(MALE_ADULT.resolve(70.1), WeightBand::Middle);
        assert_eq!(MALE_ADULT.resolve(100.5), WeightBand::UltraHeavy);
        assert_eq!(MALE_ADULT.resolve(130.0), WeightBand::SuperHeavy);
    }

    #[test]
    fn test_female_adult_boundaries() {
        assert_eq!(FEMALE_ADULT.resolve(48.5), WeightBand::Rooster);
        assert_eq!(FEMALE_ADULT.resolve(64.0), WeightBand::Middle);
        assert_eq!(FEMALE_ADULT.resolve(79.3), WeightBand::ExtraHeavy);
        assert_eq!(FEMALE_ADULT.resolve(79.4), WeightBand::SuperHeavy);
    }

    #[test]
    fn test_youth_boundaries_share_adult_labels() {
        assert_eq!(MALE_YOUTH.resolve(50.0), WeightBand::Light);
        assert_eq!(MALE_YOUTH.resolve(50.1), WeightBand::Middle);
        assert_eq!(MALE_YOUTH.resolve(60.0), WeightBand::Middle);
        assert_eq!(MALE_YOUTH.resolve(60.1), WeightBand::SuperHeavy);
        assert_eq!(FEMALE_YOUTH.resolve(45.0), WeightBand::Light);
        assert_eq!(FEMALE_YOUTH.resolve(55.0), WeightBand::Middle);
        assert_eq!(FEMALE_YOUTH.resolve(55.1), WeightBand::SuperHeavy);
    }

    #[test]
    fn test_table_selection() {
        assert!(std::ptr::eq(
            weight_table(Gender::Male, AgeBand::Master3),
            &MALE_ADULT
        ));
        assert!(std::ptr::eq(
            weight_table(Gender::Female, AgeBand::Juvenile),
            &FEMALE_YOUTH
        ));
        assert_eq!(
            weight_table(Gender::Male, AgeBand::Mini).resolve(55.0),
            WeightBand::Middle
        );
    }
}
