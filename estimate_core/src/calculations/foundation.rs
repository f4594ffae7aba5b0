//! # Foundation Selection
//!
//! The foundation is picked by floor count, not by area: a step function
//! over the rate card's tiers with no interpolation between them.
//!
//! | floors | type                 | cost/sq ft | beams/1000 sq ft | cost/beam |
//! |--------|----------------------|-----------:|-----------------:|----------:|
//! | 1      | Shallow Footing      |        350 |                7 |    15,000 |
//! | 2      | RCC Isolated Footing |        500 |                9 |    20,000 |
//! | 3      | Raft Foundation      |        700 |               11 |    25,000 |
//! | 4+     | Pile Foundation      |        900 |               13 |    40,000 |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Foundation systems the estimator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoundationType {
    #[serde(rename = "Shallow Footing")]
    ShallowFooting,
    #[serde(rename = "RCC Isolated Footing")]
    RccIsolatedFooting,
    #[serde(rename = "Raft Foundation")]
    RaftFoundation,
    #[serde(rename = "Pile Foundation")]
    PileFoundation,
}

impl FoundationType {
    pub fn display_name(self) -> &'static str {
        match self {
            FoundationType::ShallowFooting => "Shallow Footing",
            FoundationType::RccIsolatedFooting => "RCC Isolated Footing",
            FoundationType::RaftFoundation => "Raft Foundation",
            FoundationType::PileFoundation => "Pile Foundation",
        }
    }
}

impl fmt::Display for FoundationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One step of the foundation step function.
///
/// A tier applies from `min_floors` up to (not including) the next tier's
/// `min_floors`; the last tier applies to every taller building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoundationTier {
    pub min_floors: usize,
    pub foundation_type: FoundationType,
    pub cost_per_sqft: f64,
    /// Structural beams per 1000 sq ft of building area
    pub beams_per_1000_sqft: f64,
    pub cost_per_beam: f64,
}

impl FoundationTier {
    pub fn new(
        min_floors: usize,
        foundation_type: FoundationType,
        cost_per_sqft: f64,
        beams_per_1000_sqft: f64,
        cost_per_beam: f64,
    ) -> Self {
        FoundationTier {
            min_floors,
            foundation_type,
            cost_per_sqft,
            beams_per_1000_sqft,
            cost_per_beam,
        }
    }
}

/// Pick the tier for a building of `floor_count` floors.
///
/// Tiers must be ordered by `min_floors` (the rate card validates this).
pub fn select_tier(floor_count: usize, tiers: &[FoundationTier]) -> EstimateResult<&FoundationTier> {
    if floor_count == 0 {
        return Err(EstimateError::EmptyDataset);
    }
    tiers
        .iter()
        .rev()
        .find(|tier| tier.min_floors <= floor_count)
        .ok_or_else(|| {
            EstimateError::invalid_input(
                "foundations",
                floor_count.to_string(),
                "No foundation tier covers this floor count",
            )
        })
}

/// Selected foundation and its cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationEstimate {
    pub foundation_type: FoundationType,
    pub floor_count: usize,
    pub cost_per_sqft: f64,
    /// `total_area * cost_per_sqft`
    pub cost: f64,
}

/// Cost the foundation for the whole building area.
pub fn calculate(total_area_sqft: f64, floor_count: usize, tier: &FoundationTier) -> FoundationEstimate {
    FoundationEstimate {
        foundation_type: tier.foundation_type,
        floor_count,
        cost_per_sqft: tier.cost_per_sqft,
        cost: total_area_sqft * tier.cost_per_sqft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateCard;

    #[test]
    fn test_step_function() {
        let rates = RateCard::default();
        let expected = [
            (1, FoundationType::ShallowFooting, 350.0),
            (2, FoundationType::RccIsolatedFooting, 500.0),
            (3, FoundationType::RaftFoundation, 700.0),
            (4, FoundationType::PileFoundation, 900.0),
            (5, FoundationType::PileFoundation, 900.0),
            (40, FoundationType::PileFoundation, 900.0),
        ];
        for (floors, kind, rate) in expected {
            let tier = select_tier(floors, &rates.foundations).unwrap();
            assert_eq!(tier.foundation_type, kind, "{} floors", floors);
            assert_eq!(tier.cost_per_sqft, rate);
        }
    }

    #[test]
    fn test_zero_floors_is_empty() {
        let rates = RateCard::default();
        assert_eq!(select_tier(0, &rates.foundations).unwrap_err(), EstimateError::EmptyDataset);
    }

    #[test]
    fn test_foundation_cost() {
        let rates = RateCard::default();
        let tier = select_tier(1, &rates.foundations).unwrap();
        let estimate = calculate(920.0, 1, tier);
        assert_eq!(estimate.foundation_type, FoundationType::ShallowFooting);
        assert_eq!(estimate.cost, 322_000.0);
    }

    #[test]
    fn test_display_name_serialization() {
        let json = serde_json::to_string(&FoundationType::RccIsolatedFooting).unwrap();
        assert_eq!(json, "\"RCC Isolated Footing\"");
        assert_eq!(FoundationType::RaftFoundation.to_string(), "Raft Foundation");
    }
}
