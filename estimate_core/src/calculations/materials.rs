//! # Material Quantities
//!
//! Bulk material usage scales with building area. For each material in the
//! rate card:
//!
//! ```text
//! usage = total_area / 100 * usage_per_100_sqft
//! cost  = usage * cost_per_unit
//! ```
//!
//! Cement is the one material whose usage rate depends on the workflow
//! (5 bags per 100 sq ft for typed-count estimates, 40 for dimensioned
//! ones); see [`MaterialRate::dimensioned_usage_per_100_sqft`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::building::Workflow;

/// Bulk materials, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingMaterial {
    Cement,
    Sand,
    Steel,
    Bricks,
    Flooring,
    Paint,
    Aggregate,
}

impl BuildingMaterial {
    pub fn display_name(self) -> &'static str {
        match self {
            BuildingMaterial::Cement => "cement",
            BuildingMaterial::Sand => "sand",
            BuildingMaterial::Steel => "steel",
            BuildingMaterial::Bricks => "bricks",
            BuildingMaterial::Flooring => "flooring",
            BuildingMaterial::Paint => "paint",
            BuildingMaterial::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for BuildingMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Usage rate and unit cost for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRate {
    pub material: BuildingMaterial,
    /// Units used per 100 sq ft of building area
    pub usage_per_100_sqft: f64,
    /// Usage rate for dimensioned estimates, when it differs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensioned_usage_per_100_sqft: Option<f64>,
    pub cost_per_unit: f64,
    /// "bag", "cum", "kg", ...
    pub unit: String,
}

impl MaterialRate {
    pub fn new(material: BuildingMaterial, usage_per_100_sqft: f64, cost_per_unit: f64, unit: impl Into<String>) -> Self {
        MaterialRate {
            material,
            usage_per_100_sqft,
            dimensioned_usage_per_100_sqft: None,
            cost_per_unit,
            unit: unit.into(),
        }
    }

    pub fn with_dimensioned_usage(mut self, usage_per_100_sqft: f64) -> Self {
        self.dimensioned_usage_per_100_sqft = Some(usage_per_100_sqft);
        self
    }

    /// Usage rate that applies to `workflow`
    pub fn usage_for(&self, workflow: Workflow) -> f64 {
        match workflow {
            Workflow::TypedCount => self.usage_per_100_sqft,
            Workflow::Dimensioned => self
                .dimensioned_usage_per_100_sqft
                .unwrap_or(self.usage_per_100_sqft),
        }
    }
}

/// Quantity and cost of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub usage: f64,
    pub unit: String,
    pub cost_per_unit: f64,
    pub cost: f64,
}

/// All materials for a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEstimate {
    pub lines: BTreeMap<BuildingMaterial, MaterialLine>,
    pub total_cost: f64,
}

impl MaterialEstimate {
    pub fn line(&self, material: BuildingMaterial) -> Option<&MaterialLine> {
        self.lines.get(&material)
    }
}

pub fn calculate(total_area_sqft: f64, workflow: Workflow, rates: &[MaterialRate]) -> MaterialEstimate {
    let lines: BTreeMap<BuildingMaterial, MaterialLine> = rates
        .iter()
        .map(|rate| {
            let usage = total_area_sqft / 100.0 * rate.usage_for(workflow);
            let line = MaterialLine {
                usage,
                unit: rate.unit.clone(),
                cost_per_unit: rate.cost_per_unit,
                cost: usage * rate.cost_per_unit,
            };
            (rate.material, line)
        })
        .collect();
    let total_cost = lines.values().map(|line| line.cost).sum();

    MaterialEstimate { lines, total_cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateCard;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_materials_for_1000_sqft_typed_count() {
        let rates = RateCard::default();
        let estimate = calculate(1000.0, Workflow::TypedCount, &rates.materials);

        let cement = estimate.line(BuildingMaterial::Cement).unwrap();
        assert!(close(cement.usage, 50.0));
        assert!(close(cement.cost, 17_500.0));
        assert_eq!(cement.unit, "bag");

        let bricks = estimate.line(BuildingMaterial::Bricks).unwrap();
        assert!(close(bricks.usage, 5000.0));
        assert!(close(bricks.cost, 35_000.0));

        // 17500 + 7500 + 40000 + 35000 + 30000 + 18000 + 30000
        assert!(close(estimate.total_cost, 178_000.0));
    }

    #[test]
    fn test_dimensioned_cement_rate() {
        let rates = RateCard::default();
        let estimate = calculate(1000.0, Workflow::Dimensioned, &rates.materials);
        let cement = estimate.line(BuildingMaterial::Cement).unwrap();
        assert!(close(cement.usage, 400.0));
        assert!(close(cement.cost, 140_000.0));
        assert!(close(estimate.total_cost, 300_500.0));
    }

    #[test]
    fn test_report_order_and_keys() {
        let rates = RateCard::default();
        let estimate = calculate(100.0, Workflow::TypedCount, &rates.materials);
        let names: Vec<&str> = estimate.lines.keys().map(|m| m.display_name()).collect();
        assert_eq!(
            names,
            vec!["cement", "sand", "steel", "bricks", "flooring", "paint", "aggregate"]
        );

        let json = serde_json::to_string(&estimate).unwrap();
        assert!(json.contains("\"cement\":{"));
        let roundtrip: MaterialEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.lines.len(), 7);
    }
}
