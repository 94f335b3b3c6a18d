//! Body measurement units
//!
//! Weights are stored in kilograms and heights in centimeters. Clients may
//! submit other units; conversion happens once at the API boundary so that
//! the calculator and the database only ever see metric values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KG_PER_LB: f64 = 0.453_592_37;
const KG_PER_STONE: f64 = 6.350_293_18;
const CM_PER_INCH: f64 = 2.54;
const CM_PER_FOOT: f64 = 30.48;

// ============================================================================
// Weight
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
    Stone,
}

impl WeightUnit {
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
            WeightUnit::Stone => value * KG_PER_STONE,
        }
    }

    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg / KG_PER_LB,
            WeightUnit::Stone => kg / KG_PER_STONE,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
            WeightUnit::Stone => "st",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

// ============================================================================
// Height
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    M,
    In,
    Ft,
}

impl HeightUnit {
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::M => value * 100.0,
            HeightUnit::In => value * CM_PER_INCH,
            HeightUnit::Ft => value * CM_PER_FOOT,
        }
    }

    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            HeightUnit::Cm => cm,
            HeightUnit::M => cm / 100.0,
            HeightUnit::In => cm / CM_PER_INCH,
            HeightUnit::Ft => cm / CM_PER_FOOT,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::M => "m",
            HeightUnit::In => "in",
            HeightUnit::Ft => "ft",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            "m" | "meter" | "meters" => Ok(HeightUnit::M),
            "in" | "inch" | "inches" => Ok(HeightUnit::In),
            "ft" | "foot" | "feet" => Ok(HeightUnit::Ft),
            _ => Err(format!("Unknown height unit: {}", s)),
        }
    }
}

// ============================================================================
// Boundary helpers
// ============================================================================

/// Convert a submitted weight to kilograms, defaulting to kg without a unit
pub fn weight_to_kg(value: f64, unit: Option<&str>) -> Result<f64, String> {
    let unit = unit.map(str::parse::<WeightUnit>).transpose()?.unwrap_or_default();
    Ok(unit.to_kg(value))
}

/// Convert a submitted height to centimeters, defaulting to cm without a unit
pub fn height_to_cm(value: f64, unit: Option<&str>) -> Result<f64, String> {
    let unit = unit.map(str::parse::<HeightUnit>).transpose()?.unwrap_or_default();
    Ok(unit.to_cm(value))
}

/// Round to a fixed number of decimal places for display
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
