use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A monitored sampling location. Each location owns exactly one sheet of
/// the workbook.
///
/// Variant order is the sheet order of the persisted workbook.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Power Plant")]
    PowerPlant,
    #[serde(rename = "Plant Garage")]
    PlantGarage,
    #[serde(rename = "Drain A")]
    DrainA,
    #[serde(rename = "Drain B")]
    DrainB,
    #[serde(rename = "Drain C")]
    DrainC,
}

impl Location {
    /// Every location, in sheet order.
    pub const ALL: [Location; 5] = [
        Location::PowerPlant,
        Location::PlantGarage,
        Location::DrainA,
        Location::DrainB,
        Location::DrainC,
    ];

    /// The sheet name / user-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Location::PowerPlant => "Power Plant",
            Location::PlantGarage => "Plant Garage",
            Location::DrainA => "Drain A",
            Location::DrainB => "Drain B",
            Location::DrainC => "Drain C",
        }
    }

    /// Kebab-case form of the label, e.g. `drain-a`.
    pub fn slug(&self) -> String {
        self.label().to_ascii_lowercase().replace(' ', "-")
    }

    /// Look up a location by its exact sheet name.
    pub fn from_sheet_name(name: &str) -> Option<Location> {
        Location::ALL.into_iter().find(|l| l.label() == name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Location {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Location::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(wanted) || l.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownLocation(s.to_string()))
    }
}
