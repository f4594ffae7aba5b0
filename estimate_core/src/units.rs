//! # Unit Types
//!
//! Lightweight newtype wrappers for the lengths the estimator deals with.
//! Internally every dimension is carried in feet and every area in square
//! feet; metres only appear at the input boundary (plot entry) and inside
//! the masonry calculation, which works in cubic metres.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Feet, LengthUnit, Meters};
//!
//! let width: Meters = Feet(10.0).into();
//! assert!((width.0 - 3.048).abs() < 1e-9);
//!
//! assert!((LengthUnit::Meters.to_feet(1.0) - 3.28084).abs() < 1e-5);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Metres per foot (exact by definition)
pub const METERS_PER_FOOT: f64 = 0.3048;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * METERS_PER_FOOT)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 / METERS_PER_FOOT)
    }
}

// ============================================================================
// Unit Selection
// ============================================================================

/// Unit a user typed a length in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "m")]
    Meters,
}

impl LengthUnit {
    /// Convert a value expressed in this unit to feet.
    pub fn to_feet(self, value: f64) -> f64 {
        match self {
            LengthUnit::Feet => value,
            LengthUnit::Meters => Feet::from(Meters(value)).0,
        }
    }

    /// Short unit symbol
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Meters => "m",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ft" | "feet" | "foot" => Ok(LengthUnit::Feet),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::Meters),
            other => Err(format!("unknown length unit '{}' (expected ft or m)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_meters_roundtrip() {
        let ft = Feet(12.0);
        let m: Meters = ft.into();
        let back: Feet = m.into();
        assert!((back.0 - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_feet() {
        assert_eq!(LengthUnit::Feet.to_feet(50.0), 50.0);
        // 15 m plot side is roughly 49.2 ft
        assert!((LengthUnit::Meters.to_feet(15.0) - 49.2126).abs() < 1e-3);
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("ft".parse::<LengthUnit>(), Ok(LengthUnit::Feet));
        assert_eq!(" Metres ".parse::<LengthUnit>(), Ok(LengthUnit::Meters));
        assert!("yd".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_unit_serialization() {
        assert_eq!(serde_json::to_string(&LengthUnit::Meters).unwrap(), "\"m\"");
        let unit: LengthUnit = serde_json::from_str("\"ft\"").unwrap();
        assert_eq!(unit, LengthUnit::Feet);
    }
}
