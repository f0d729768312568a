//! Units of measure

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while parsing a unit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    /// The unit symbol or name is not recognised.
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// The measurement family a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    /// Weighed quantities
    Mass,

    /// Poured quantities
    Volume,

    /// Counted quantities
    Count,
}

/// A unit ingredients are bought, stocked and consumed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    /// Kilograms
    #[serde(alias = "kg")]
    Kilogram,

    /// Litres
    #[serde(alias = "l", alias = "liter")]
    Litre,

    /// Single pieces (eggs, buns, lemons...)
    #[serde(alias = "pc", alias = "pcs")]
    Piece,
}

impl Unit {
    /// Returns the measurement family of this unit.
    pub fn measure(self) -> Measure {
        match self {
            Unit::Kilogram => Measure::Mass,
            Unit::Litre => Measure::Volume,
            Unit::Piece => Measure::Count,
        }
    }

    /// Two units are compatible when they measure the same family.
    pub fn is_compatible_with(self, other: Unit) -> bool {
        self.measure() == other.measure()
    }

    /// Short symbol used when printing quantities.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Litre => "l",
            Unit::Piece => "pc",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" | "kilogram" => Ok(Unit::Kilogram),
            "l" | "litre" | "liter" => Ok(Unit::Litre),
            "pc" | "pcs" | "piece" => Ok(Unit::Piece),
            other => Err(UnitError::UnknownUnit(other.to_string())),
        }
    }
}
