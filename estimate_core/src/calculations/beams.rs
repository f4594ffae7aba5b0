//! # Beam Estimate
//!
//! Number of structural beams from building area and the foundation tier's
//! beam density:
//!
//! ```text
//! estimated_beams = round(total_area / 1000 * beams_per_1000_sqft)
//! total_cost      = estimated_beams * cost_per_beam
//! ```
//!
//! Rounding is [`f64::round`]: halves round away from zero, which for the
//! non-negative areas the engine accepts means 3.5 beams become 4.

use serde::{Deserialize, Serialize};

use super::foundation::FoundationTier;

/// Beam count and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamEstimate {
    pub beams_per_1000_sqft: f64,
    pub cost_per_beam: f64,
    pub estimated_beams: u64,
    pub total_cost: f64,
}

/// Round a non-negative quantity to the nearest whole item, halves up.
pub(crate) fn round_count(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

pub fn calculate(total_area_sqft: f64, tier: &FoundationTier) -> BeamEstimate {
    let estimated_beams = round_count(total_area_sqft / 1000.0 * tier.beams_per_1000_sqft);
    BeamEstimate {
        beams_per_1000_sqft: tier.beams_per_1000_sqft,
        cost_per_beam: tier.cost_per_beam,
        estimated_beams,
        total_cost: estimated_beams as f64 * tier.cost_per_beam,
    }
}
