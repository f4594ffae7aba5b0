//! # Wall Masonry
//!
//! Estimates the brickwork for the four perimeter walls of a single room:
//! brick count, cement bags, sand volume and their cost.
//!
//! ## Assumptions
//!
//! - Walls run the full perimeter, 2 × (length + width), with no openings
//! - About 825 bricks per m³ of wall
//! - About 8 cement bags and 0.42 m³ of sand per m³ of wall
//! - Bricks at 10, cement at 400 per bag, sand at 2000 per m³
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::masonry::{calculate, MasonryInput, WallThickness};
//!
//! let input = MasonryInput {
//!     length_ft: 12.0,
//!     width_ft: 10.0,
//!     height_ft: 9.0,
//!     thickness: WallThickness::NineInch,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.bricks > 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::units::{Feet, Meters};

const BRICKS_PER_M3: f64 = 825.0;
const CEMENT_BAGS_PER_M3: f64 = 8.0;
const SAND_M3_PER_M3: f64 = 0.42;
const COST_PER_BRICK: f64 = 10.0;
const COST_PER_CEMENT_BAG: f64 = 400.0;
const SAND_COST_PER_M3: f64 = 2000.0;

/// Standard wall thicknesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallThickness {
    /// 4 inch wall
    FourInch,
    /// 6 inch wall
    SixInch,
    /// 9 inch wall
    #[default]
    NineInch,
}

impl WallThickness {
    /// Thickness in feet as used for volume (4 in is taken as 0.33 ft)
    pub fn feet(self) -> f64 {
        match self {
            WallThickness::FourInch => 0.33,
            WallThickness::SixInch => 0.5,
            WallThickness::NineInch => 0.75,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WallThickness::FourInch => "4 inch wall",
            WallThickness::SixInch => "6 inch wall",
            WallThickness::NineInch => "9 inch wall",
        }
    }

    /// Look up by nominal inches
    pub fn from_inches(inches: u32) -> Option<Self> {
        match inches {
            4 => Some(WallThickness::FourInch),
            6 => Some(WallThickness::SixInch),
            9 => Some(WallThickness::NineInch),
            _ => None,
        }
    }
}

/// Room dimensions for a masonry estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MasonryInput {
    pub length_ft: f64,
    pub width_ft: f64,
    pub height_ft: f64,
    pub thickness: WallThickness,
}

impl MasonryInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        for (field, value) in [
            ("length_ft", self.length_ft),
            ("width_ft", self.width_ft),
            ("height_ft", self.height_ft),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimateError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Wall volume in cubic metres
    pub fn wall_volume_m3(&self) -> f64 {
        let length = Meters::from(Feet(self.length_ft)).0;
        let width = Meters::from(Feet(self.width_ft)).0;
        let height = Meters::from(Feet(self.height_ft)).0;
        let thickness = Meters::from(Feet(self.thickness.feet())).0;
        2.0 * (length + width) * height * thickness
    }
}

/// Masonry quantities and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasonryResult {
    pub wall_volume_m3: f64,
    pub bricks: u64,
    pub cement_bags: u64,
    pub sand_m3: f64,
    pub brick_cost: f64,
    pub cement_cost: f64,
    pub sand_cost: f64,
    pub total_cost: f64,
}

pub fn calculate(input: &MasonryInput) -> EstimateResult<MasonryResult> {
    input.validate()?;

    let wall_volume_m3 = input.wall_volume_m3();
    let bricks = (wall_volume_m3 * BRICKS_PER_M3).round() as u64;
    let cement_bags = (wall_volume_m3 * CEMENT_BAGS_PER_M3).round() as u64;
    let sand_m3 = wall_volume_m3 * SAND_M3_PER_M3;

    let brick_cost = bricks as f64 * COST_PER_BRICK;
    let cement_cost = cement_bags as f64 * COST_PER_CEMENT_BAG;
    let sand_cost = sand_m3 * SAND_COST_PER_M3;

    Ok(MasonryResult {
        wall_volume_m3,
        bricks,
        cement_bags,
        sand_m3,
        brick_cost,
        cement_cost,
        sand_cost,
        total_cost: brick_cost + cement_cost + sand_cost,
    })
}
