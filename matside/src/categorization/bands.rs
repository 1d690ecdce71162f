//! Age and weight band labels.

use serde::{Deserialize, Serialize};

/// Age band, youngest to oldest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    PreMini,
    Mini,
    InfantA,
    InfantB,
    InfantJuvenileA,
    InfantJuvenileB,
    Juvenile,
    Adult,
    Master1,
    Master2,
    Master3,
    Master4,
    Master5,
    Master6,
}

impl AgeBand {
    /// Display label used on rosters and brackets
    pub const fn label(self) -> &'static str {
        match self {
            AgeBand::PreMini => "Pre-Mini",
            AgeBand::Mini => "Mini",
            AgeBand::InfantA => "Infant A",
            AgeBand::InfantB => "Infant B",
            AgeBand::InfantJuvenileA => "Infant-Juvenile A",
            AgeBand::InfantJuvenileB => "Infant-Juvenile B",
            AgeBand::Juvenile => "Juvenile",
            AgeBand::Adult => "Adult",
            AgeBand::Master1 => "Master 1",
            AgeBand::Master2 => "Master 2",
            AgeBand::Master3 => "Master 3",
            AgeBand::Master4 => "Master 4",
            AgeBand::Master5 => "Master 5",
            AgeBand::Master6 => "Master 6",
        }
    }

    /// Adult and master bands share the full weight ladder
    pub const fn is_adult_or_master(self) -> bool {
        matches!(
            self,
            AgeBand::Adult
                | AgeBand::Master1
                | AgeBand::Master2
                | AgeBand::Master3
                | AgeBand::Master4
                | AgeBand::Master5
                | AgeBand::Master6
        )
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Weight band, lightest to heaviest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeightBand {
    Rooster,
    LightFeather,
    Light,
    Middle,
    MediumHeavy,
    Heavy,
    ExtraHeavy,
    UltraHeavy,
    SuperHeavy,
}

impl WeightBand {
    pub const fn label(self) -> &'static str {
        match self {
            WeightBand::Rooster => "Rooster",
            WeightBand::LightFeather => "Light-Feather",
            WeightBand::Light => "Light",
            WeightBand::Middle => "Middle",
            WeightBand::MediumHeavy => "Medium-Heavy",
            WeightBand::Heavy => "Heavy",
            WeightBand::ExtraHeavy => "Extra-Heavy",
            WeightBand::UltraHeavy => "Ultra-Heavy",
            WeightBand::SuperHeavy => "Super-Heavy",
        }
    }
}

impl std::fmt::Display for WeightBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
