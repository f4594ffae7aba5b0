//! # Rate Card
//!
//! Every constant the cost engine uses lives here: the construction and
//! roofing rates, average room areas, the foundation tiers, the material
//! table and the plumbing allowances. [`RateCard::default`] holds the
//! built-in rates; a card can also be loaded from JSON (see
//! [`file_io::load_rate_card`](crate::file_io::load_rate_card)).
//!
//! ## Structure
//!
//! ```text
//! RateCard
//! ├── construction_cost_per_sqft / roof_cost_per_sqft / room_height_ft
//! ├── room_areas: RoomAreaTable (typed-count average areas)
//! ├── foundations: Vec<FoundationTier> (step function by floor count)
//! ├── materials: Vec<MaterialRate> (usage per 100 sq ft, unit cost)
//! └── plumbing: PlumbingRates
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::rates::{RateCard, DEFAULT_RATES};
//!
//! assert_eq!(DEFAULT_RATES.construction_cost_per_sqft, 1500.0);
//!
//! let mut rates = RateCard::default();
//! rates.construction_cost_per_sqft = 1800.0;
//! assert!(rates.validate().is_ok());
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::building::{RoomType, Workflow};
use crate::calculations::foundation::{FoundationTier, FoundationType};
use crate::calculations::materials::{BuildingMaterial, MaterialRate};
use crate::calculations::plumbing::PlumbingRates;
use crate::errors::{EstimateError, EstimateResult};

/// Current schema version for rate card files
pub const RATE_CARD_VERSION: &str = "0.1.0";

/// Built-in rates, shared by every estimate that does not supply its own card
pub static DEFAULT_RATES: Lazy<RateCard> = Lazy::new(RateCard::default);

/// All rates used by the cost engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Construction cost per square foot of floor area
    pub construction_cost_per_sqft: f64,

    /// Roofing cost per square foot of floor area
    pub roof_cost_per_sqft: f64,

    /// Room height used for room volumes (ft)
    pub room_height_ft: f64,

    /// Average area per room type (typed-count workflow)
    pub room_areas: RoomAreaTable,

    /// Foundation tiers, ordered by `min_floors`
    pub foundations: Vec<FoundationTier>,

    /// Material usage and unit costs, in report order
    pub materials: Vec<MaterialRate>,

    /// Plumbing allowances
    pub plumbing: PlumbingRates,
}

impl Default for RateCard {
    fn default() -> Self {
        RateCard {
            version: RATE_CARD_VERSION.to_string(),
            construction_cost_per_sqft: 1500.0,
            roof_cost_per_sqft: 250.0,
            room_height_ft: 9.0,
            room_areas: RoomAreaTable::default(),
            foundations: vec![
                FoundationTier::new(1, FoundationType::ShallowFooting, 350.0, 7.0, 15_000.0),
                FoundationTier::new(2, FoundationType::RccIsolatedFooting, 500.0, 9.0, 20_000.0),
                FoundationTier::new(3, FoundationType::RaftFoundation, 700.0, 11.0, 25_000.0),
                FoundationTier::new(4, FoundationType::PileFoundation, 900.0, 13.0, 40_000.0),
            ],
            materials: vec![
                // Cement usage differs between the two workflows (5 vs 40 bags
                // per 100 sq ft). Both figures are kept until one is confirmed.
                MaterialRate::new(BuildingMaterial::Cement, 5.0, 350.0, "bag").with_dimensioned_usage(40.0),
                MaterialRate::new(BuildingMaterial::Sand, 0.5, 1500.0, "cum"),
                MaterialRate::new(BuildingMaterial::Steel, 50.0, 80.0, "kg"),
                MaterialRate::new(BuildingMaterial::Bricks, 500.0, 7.0, "pcs"),
                MaterialRate::new(BuildingMaterial::Flooring, 20.0, 150.0, "sq.ft"),
                MaterialRate::new(BuildingMaterial::Paint, 15.0, 120.0, "sq.ft"),
                MaterialRate::new(BuildingMaterial::Aggregate, 1.5, 2000.0, "cum"),
            ],
            plumbing: PlumbingRates::default(),
        }
    }
}

impl RateCard {
    /// Check that every rate is usable.
    ///
    /// Rates must be finite and non-negative, there must be at least one
    /// foundation tier, tiers must start at one floor and increase strictly,
    /// and no material may appear twice.
    pub fn validate(&self) -> EstimateResult<()> {
        check_rate("construction_cost_per_sqft", self.construction_cost_per_sqft)?;
        check_rate("roof_cost_per_sqft", self.roof_cost_per_sqft)?;
        check_rate("room_height_ft", self.room_height_ft)?;

        for room in RoomType::ALL {
            check_rate(&format!("room_areas.{}", room.display_name()), self.room_areas.area_sqft(room))?;
        }

        let first = self.foundations.first().ok_or_else(|| {
            EstimateError::invalid_input("foundations", "[]", "At least one foundation tier is required")
        })?;
        if first.min_floors != 1 {
            return Err(EstimateError::invalid_input(
                "foundations",
                first.min_floors.to_string(),
                "The first foundation tier must start at 1 floor",
            ));
        }
        for pair in self.foundations.windows(2) {
            if pair[1].min_floors <= pair[0].min_floors {
                return Err(EstimateError::invalid_input(
                    "foundations",
                    pair[1].min_floors.to_string(),
                    "Foundation tiers must be in strictly increasing floor order",
                ));
            }
        }
        for tier in &self.foundations {
            let name = tier.foundation_type.display_name();
            check_rate(&format!("{}.cost_per_sqft", name), tier.cost_per_sqft)?;
            check_rate(&format!("{}.beams_per_1000_sqft", name), tier.beams_per_1000_sqft)?;
            check_rate(&format!("{}.cost_per_beam", name), tier.cost_per_beam)?;
        }

        for (index, rate) in self.materials.iter().enumerate() {
            let name = rate.material.display_name();
            if self.materials[..index].iter().any(|other| other.material == rate.material) {
                return Err(EstimateError::invalid_input(
                    "materials",
                    name,
                    "Material listed more than once",
                ));
            }
            check_rate(&format!("{}.usage_per_100_sqft", name), rate.usage_per_100_sqft)?;
            if let Some(usage) = rate.dimensioned_usage_per_100_sqft {
                check_rate(&format!("{}.dimensioned_usage_per_100_sqft", name), usage)?;
            }
            check_rate(&format!("{}.cost_per_unit", name), rate.cost_per_unit)?;
        }

        self.plumbing.validate()
    }

    /// Material rates as they apply to one workflow
    pub fn material_usage(&self, material: BuildingMaterial, workflow: Workflow) -> Option<f64> {
        self.materials
            .iter()
            .find(|rate| rate.material == material)
            .map(|rate| rate.usage_for(workflow))
    }
}

/// Reject NaN, infinities and negative rates.
pub(crate) fn check_rate(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Rate must be a finite, non-negative number",
        ));
    }
    Ok(())
}

/// Average area per room type in square feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomAreaTable {
    #[serde(rename = "Bedroom")]
    pub bedroom_sqft: f64,
    #[serde(rename = "Hall")]
    pub hall_sqft: f64,
    #[serde(rename = "Dining")]
    pub dining_sqft: f64,
    #[serde(rename = "Kitchen")]
    pub kitchen_sqft: f64,
    #[serde(rename = "Washroom")]
    pub washroom_sqft: f64,
    #[serde(rename = "Puja")]
    pub puja_sqft: f64,
}

impl RoomAreaTable {
    pub fn area_sqft(&self, room: RoomType) -> f64 {
        match room {
            RoomType::Bedroom => self.bedroom_sqft,
            RoomType::Hall => self.hall_sqft,
            RoomType::Dining => self.dining_sqft,
            RoomType::Kitchen => self.kitchen_sqft,
            RoomType::Washroom => self.washroom_sqft,
            RoomType::Puja => self.puja_sqft,
        }
    }
}

impl Default for RoomAreaTable {
    fn default() -> Self {
        RoomAreaTable {
            bedroom_sqft: 150.0,
            hall_sqft: 200.0,
            dining_sqft: 120.0,
            kitchen_sqft: 100.0,
            washroom_sqft: 50.0,
            puja_sqft: 30.0,
        }
    }
}
