//! # Plumbing Allowance
//!
//! ```text
//! base     = total_area / 1000 * base_rate_per_1000_sqft
//! points   = round(total_area / sqft_per_point)
//! pipes    = points * pipe_cost_per_point
//! fixtures = points * fixture_cost_per_point
//! tank     = tank_cost (flat)
//! labour   = base * labour_fraction
//! total    = base + pipes + fixtures + tank + labour
//! ```

use serde::{Deserialize, Serialize};

use super::beams::round_count;
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::check_rate;

/// Plumbing rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlumbingRates {
    pub base_rate_per_1000_sqft: f64,
    /// Building area served by one plumbing point
    pub sqft_per_point: f64,
    pub pipe_cost_per_point: f64,
    pub fixture_cost_per_point: f64,
    pub tank_cost: f64,
    /// Labour as a fraction of the base cost
    pub labour_fraction: f64,
}

impl Default for PlumbingRates {
    fn default() -> Self {
        PlumbingRates {
            base_rate_per_1000_sqft: 350.0,
            sqft_per_point: 100.0,
            pipe_cost_per_point: 500.0,
            fixture_cost_per_point: 1200.0,
            tank_cost: 5000.0,
            labour_fraction: 0.25,
        }
    }
}

impl PlumbingRates {
    pub fn validate(&self) -> EstimateResult<()> {
        check_rate("plumbing.base_rate_per_1000_sqft", self.base_rate_per_1000_sqft)?;
        check_rate("plumbing.pipe_cost_per_point", self.pipe_cost_per_point)?;
        check_rate("plumbing.fixture_cost_per_point", self.fixture_cost_per_point)?;
        check_rate("plumbing.tank_cost", self.tank_cost)?;
        check_rate("plumbing.labour_fraction", self.labour_fraction)?;
        check_rate("plumbing.sqft_per_point", self.sqft_per_point)?;
        if self.sqft_per_point == 0.0 {
            return Err(EstimateError::invalid_input(
                "plumbing.sqft_per_point",
                "0",
                "Area per plumbing point must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Plumbing cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlumbingEstimate {
    pub base_cost: f64,
    pub points: u64,
    pub pipe_cost: f64,
    pub fixture_cost: f64,
    pub tank_cost: f64,
    pub labour_cost: f64,
    pub total_cost: f64,
}

pub fn calculate(total_area_sqft: f64, rates: &PlumbingRates) -> PlumbingEstimate {
    let base_cost = total_area_sqft / 1000.0 * rates.base_rate_per_1000_sqft;
    let points = round_count(total_area_sqft / rates.sqft_per_point);
    let pipe_cost = points as f64 * rates.pipe_cost_per_point;
    let fixture_cost = points as f64 * rates.fixture_cost_per_point;
    let tank_cost = rates.tank_cost;
    let labour_cost = base_cost * rates.labour_fraction;

    PlumbingEstimate {
        base_cost,
        points,
        pipe_cost,
        fixture_cost,
        tank_cost,
        labour_cost,
        total_cost: base_cost + pipe_cost + fixture_cost + tank_cost + labour_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plumbing_for_920_sqft() {
        let estimate = calculate(920.0, &PlumbingRates::default());
        assert!((estimate.base_cost - 322.0).abs() < 1e-9);
        assert_eq!(estimate.points, 9);
        assert_eq!(estimate.pipe_cost, 4500.0);
        assert_eq!(estimate.fixture_cost, 10_800.0);
        assert_eq!(estimate.tank_cost, 5000.0);
        assert!((estimate.labour_cost - 80.5).abs() < 1e-9);
        assert!((estimate.total_cost - 20_702.5).abs() < 1e-6);
    }

    #[test]
    fn test_points_round_half_up() {
        // 150 / 100 = 1.5
        assert_eq!(calculate(150.0, &PlumbingRates::default()).points, 2);
        // 140 / 100 = 1.4
        assert_eq!(calculate(140.0, &PlumbingRates::default()).points, 1);
    }

    #[test]
    fn test_tank_is_flat() {
        let small = calculate(10.0, &PlumbingRates::default());
        let large = calculate(10_000.0, &PlumbingRates::default());
        assert_eq!(small.tank_cost, large.tank_cost);
    }

    #[test]
    fn test_zero_area_per_point_rejected() {
        let rates = PlumbingRates {
            sqft_per_point: 0.0,
            ..PlumbingRates::default()
        };
        assert!(rates.validate().is_err());
    }
}
