//! # Cost Derivation
//!
//! Turns a complete [`FloorDataset`] into a [`CostReport`]. The derivation
//! is a pure function: no hidden state, no I/O, and the same dataset always
//! produces the same report, so callers simply recompute after every edit.
//!
//! ## Steps
//!
//! 1. Measure every floor (area per room, per floor)
//! 2. Floor cost and floor roof cost from the per-sqft rates
//! 3. Total building area
//! 4. Foundation tier from the floor count ([`foundation`])
//! 5. Roof cost over the whole building
//! 6. Beam count and cost ([`beams`])
//! 7. Material quantities ([`materials`])
//! 8. Plumbing allowance ([`plumbing`])
//! 9. Grand total
//!
//! An empty dataset, a floor without rooms or a blank dimension is refused
//! outright; a zeroed report is never produced.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::building::{FloorDataset, RoomCounts};
//! use estimate_core::calculations::derive_cost_report;
//!
//! let dataset = FloorDataset::from_floors(vec![RoomCounts::suggested()]);
//! let report = derive_cost_report(&dataset).unwrap();
//!
//! assert_eq!(report.total_area_sqft, 920.0);
//! assert_eq!(report.foundation.cost, 322_000.0);
//! ```
//!
//! The [`masonry`] calculator is independent of the building estimate.

pub mod beams;
pub mod foundation;
pub mod masonry;
pub mod materials;
pub mod plumbing;

use serde::{Deserialize, Serialize};

pub use beams::BeamEstimate;
pub use foundation::{FoundationEstimate, FoundationType};
pub use materials::{BuildingMaterial, MaterialEstimate, MaterialLine};
pub use plumbing::PlumbingEstimate;

use crate::building::{FloorDataset, RoomLayout, Workflow};
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::{RateCard, DEFAULT_RATES};

/// One room line of a floor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLine {
    /// Room type ("Bedroom") or position ("Room 2")
    pub label: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_ft: Option<f64>,
    pub area_per_room_sqft: f64,
    pub area_sqft: f64,
    /// Area times the rate card's room height
    pub volume_cuft: f64,
    /// Area times the construction rate
    pub cost: f64,
}

/// Area and cost of one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorBreakdown {
    /// 1-based floor number
    pub number: usize,
    pub area_sqft: f64,
    pub cost: f64,
    pub roof_cost: f64,
    pub rooms: Vec<RoomLine>,
}

/// Complete, itemized estimate for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub workflow: Workflow,
    pub floor_count: usize,
    pub total_area_sqft: f64,
    /// `total_area * construction_cost_per_sqft`
    pub building_cost: f64,
    /// `total_area * roof_cost_per_sqft`
    pub roof_cost: f64,
    pub floors: Vec<FloorBreakdown>,
    pub foundation: FoundationEstimate,
    pub beams: BeamEstimate,
    pub materials: MaterialEstimate,
    pub plumbing: PlumbingEstimate,
    /// Grand total of every component
    pub total_cost: f64,
}

impl CostReport {
    /// Sum of the per-floor roof costs. Equals `roof_cost` up to rounding.
    pub fn floor_roof_cost_sum(&self) -> f64 {
        self.floors.iter().map(|floor| floor.roof_cost).sum()
    }
}

/// Derive a cost report using the built-in rates.
pub fn derive_cost_report<R: RoomLayout>(dataset: &FloorDataset<R>) -> EstimateResult<CostReport> {
    derive_cost_report_with(dataset, &DEFAULT_RATES)
}

/// Derive a cost report using an explicit rate card.
///
/// # Returns
///
/// * `Ok(CostReport)` - every floor measured and costed
/// * `Err(EstimateError::EmptyDataset)` - the dataset has no floors
/// * `Err(EstimateError::IncompleteInput)` - a floor has no rooms or a blank field
/// * `Err(EstimateError::InvalidNumber)` - a dimension is not a number
/// * `Err(EstimateError::InvalidInput)` - a dimension is not positive, the rate card is invalid,
///   or a figure overflows
pub fn derive_cost_report_with<R: RoomLayout>(dataset: &FloorDataset<R>, rates: &RateCard) -> EstimateResult<CostReport> {
    if dataset.is_empty() {
        return Err(EstimateError::EmptyDataset);
    }
    rates.validate()?;

    let workflow = dataset.workflow();
    let floor_count = dataset.floor_count();

    // Steps 1-3
    let mut floors = Vec::with_capacity(floor_count);
    let mut total_area_sqft = 0.0;
    for floor in dataset.floors() {
        let measured = floor.rooms.measure(floor.number, rates)?;
        let rooms: Vec<RoomLine> = measured
            .into_iter()
            .map(|room| RoomLine {
                volume_cuft: room.area_sqft * rates.room_height_ft,
                cost: room.area_sqft * rates.construction_cost_per_sqft,
                label: room.label,
                quantity: room.quantity,
                length_ft: room.length_ft,
                width_ft: room.width_ft,
                area_per_room_sqft: room.area_per_room_sqft,
                area_sqft: room.area_sqft,
            })
            .collect();
        let area_sqft: f64 = rooms.iter().map(|room| room.area_sqft).sum();

        total_area_sqft += area_sqft;
        floors.push(FloorBreakdown {
            number: floor.number,
            area_sqft,
            cost: area_sqft * rates.construction_cost_per_sqft,
            roof_cost: area_sqft * rates.roof_cost_per_sqft,
            rooms,
        });
    }

    ensure_finite("total_area_sqft", total_area_sqft)?;

    // Step 4
    let tier = foundation::select_tier(floor_count, &rates.foundations)?;
    let foundation = foundation::calculate(total_area_sqft, floor_count, tier);

    // Steps 5-8
    let roof_cost = total_area_sqft * rates.roof_cost_per_sqft;
    let building_cost = total_area_sqft * rates.construction_cost_per_sqft;
    let beams = beams::calculate(total_area_sqft, tier);
    let materials = materials::calculate(total_area_sqft, workflow, &rates.materials);
    let plumbing = plumbing::calculate(total_area_sqft, &rates.plumbing);

    // Step 9
    let total_cost = foundation.cost
        + roof_cost
        + building_cost
        + beams.total_cost
        + materials.total_cost
        + plumbing.total_cost;
    ensure_finite("total_cost", total_cost)?;

    tracing::debug!(
        %workflow,
        floor_count,
        total_area_sqft,
        total_cost,
        foundation = %foundation.foundation_type,
        "derived cost report"
    );

    Ok(CostReport {
        workflow,
        floor_count,
        total_area_sqft,
        building_cost,
        roof_cost,
        floors,
        foundation,
        beams,
        materials,
        plumbing,
        total_cost,
    })
}

/// Reject a figure that overflowed to infinity.
fn ensure_finite(field: &str, value: f64) -> EstimateResult<()> {
    if !value.is_finite() {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Building is too large to estimate",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::{RoomCounts, RoomField, RoomList, RoomType};
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1.0)
    }

    fn one_room(length: f64, width: f64) -> FloorDataset<RoomList> {
        FloorDataset::from_floors(vec![RoomList::from_dimensions(&[(length, width)])])
    }

    #[test]
    fn test_typed_count_round_trip() {
        let dataset = FloorDataset::from_floors(vec![RoomCounts::default()
            .with(RoomType::Bedroom, 2)
            .with(RoomType::Hall, 1)
            .with(RoomType::Dining, 1)
            .with(RoomType::Kitchen, 1)
            .with(RoomType::Washroom, 2)]);

        let report = derive_cost_report(&dataset).unwrap();
        assert_eq!(report.floors[0].area_sqft, 920.0);
        assert_eq!(report.total_area_sqft, 920.0);
        assert_eq!(report.foundation.foundation_type, FoundationType::ShallowFooting);
        assert_eq!(report.foundation.cost, 322_000.0);
        assert_eq!(report.floors[0].cost, 1_380_000.0);
        assert_eq!(report.floors[0].roof_cost, 230_000.0);
        // 920 / 1000 * 7 = 6.44
        assert_eq!(report.beams.estimated_beams, 6);
    }

    #[test]
    fn test_typed_count_grand_total() {
        let dataset = FloorDataset::from_floors(vec![RoomCounts::suggested()]);
        let report = derive_cost_report(&dataset).unwrap();

        let foundation = 322_000.0;
        let roof = 230_000.0;
        let building = 1_380_000.0;
        let beams = 6.0 * 15_000.0;
        // 9.2 * (5*350 + 0.5*1500 + 50*80 + 500*7 + 20*150 + 15*120 + 1.5*2000)
        let materials = 9.2 * 17_800.0;
        let plumbing = 20_702.5;
        let expected = foundation + roof + building + beams + materials + plumbing;

        assert!(close(report.materials.total_cost, materials));
        assert!(close(report.plumbing.total_cost, plumbing));
        assert!(close(report.total_cost, expected));
    }

    #[test]
    fn test_dimensioned_round_trip() {
        let report = derive_cost_report(&one_room(10.0, 12.0)).unwrap();
        assert_eq!(report.workflow, Workflow::Dimensioned);
        assert_eq!(report.floors[0].area_sqft, 120.0);
        assert_eq!(report.floors[0].cost, 180_000.0);
        assert_eq!(report.beams.estimated_beams, 1);
        assert_eq!(report.beams.total_cost, 15_000.0);

        let room = &report.floors[0].rooms[0];
        assert_eq!(room.label, "Room 1");
        assert_eq!(room.length_ft, Some(10.0));
        assert_eq!(room.volume_cuft, 1080.0);
        assert_eq!(room.cost, 180_000.0);
    }

    #[test]
    fn test_dimensioned_uses_its_cement_rate() {
        let report = derive_cost_report(&one_room(10.0, 10.0)).unwrap();
        let cement = report.materials.line(BuildingMaterial::Cement).unwrap();
        assert!(close(cement.usage, 40.0));
    }

    #[test]
    fn test_foundation_by_floor_count() {
        let cases = [
            (1, FoundationType::ShallowFooting, 350.0),
            (2, FoundationType::RccIsolatedFooting, 500.0),
            (3, FoundationType::RaftFoundation, 700.0),
            (5, FoundationType::PileFoundation, 900.0),
        ];
        for (floors, kind, rate) in cases {
            let dataset = FloorDataset::from_floors(vec![RoomCounts::suggested(); floors]);
            let report = derive_cost_report(&dataset).unwrap();
            assert_eq!(report.foundation.foundation_type, kind);
            assert_eq!(report.foundation.cost_per_sqft, rate);
            assert!(close(report.foundation.cost, report.total_area_sqft * rate));
        }
    }

    #[test]
    fn test_area_additivity_and_roof_consistency() {
        let dataset = FloorDataset::from_floors(vec![
            RoomList::from_dimensions(&[(10.5, 12.25), (7.3, 9.1)]),
            RoomList::from_dimensions(&[(20.0, 15.0)]),
            RoomList::from_dimensions(&[(3.3, 3.3), (4.4, 4.4), (5.5, 5.5)]),
        ]);
        let report = derive_cost_report(&dataset).unwrap();

        let floor_sum: f64 = report.floors.iter().map(|f| f.area_sqft).sum();
        assert_eq!(report.total_area_sqft, floor_sum);
        assert!(close(report.roof_cost, report.floor_roof_cost_sum()));
    }

    #[test]
    fn test_determinism() {
        let dataset = FloorDataset::from_floors(vec![
            RoomList::from_dimensions(&[(10.5, 12.25), (7.3, 9.1)]),
            RoomList::from_dimensions(&[(20.0, 15.0)]),
        ]);
        let first = derive_cost_report(&dataset).unwrap();
        let second = derive_cost_report(&dataset).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_cost.to_bits(), second.total_cost.to_bits());
    }

    #[test]
    fn test_total_cost_monotonic_in_room_area() {
        let mut previous = 0.0;
        for step in 1..=60 {
            let width = f64::from(step) * 2.5;
            let report = derive_cost_report(&one_room(12.0, width)).unwrap();
            assert!(report.total_cost >= previous, "width {}", width);
            previous = report.total_cost;
        }
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let dataset: FloorDataset<RoomCounts> = FloorDataset::from_floors(vec![]);
        assert_eq!(derive_cost_report(&dataset).unwrap_err(), EstimateError::EmptyDataset);
    }

    #[test]
    fn test_floor_without_rooms_rejected() {
        let dataset: FloorDataset<RoomList> = FloorDataset::from_floors(vec![RoomList::default()]);
        let err = derive_cost_report(&dataset).unwrap_err();
        assert_eq!(err, EstimateError::incomplete_input(1, "floor has no rooms"));

        let dataset = FloorDataset::from_floors(vec![RoomCounts::suggested(), RoomCounts::default()]);
        let err = derive_cost_report(&dataset).unwrap_err();
        assert_eq!(err, EstimateError::incomplete_input(2, "floor has no rooms"));
    }

    #[test]
    fn test_blank_and_garbage_dimensions_rejected() {
        let mut dataset: FloorDataset<RoomList> = FloorDataset::new(1);
        assert_eq!(
            derive_cost_report(&dataset).unwrap_err().error_code(),
            "INCOMPLETE_INPUT"
        );

        dataset.set_room_field(0, 0, RoomField::Length, "10").unwrap();
        dataset.set_room_field(0, 0, RoomField::Width, "abc").unwrap();
        assert_eq!(
            derive_cost_report(&dataset).unwrap_err().error_code(),
            "INVALID_NUMBER"
        );

        dataset.set_room_field(0, 0, RoomField::Width, "-12").unwrap();
        assert_eq!(
            derive_cost_report(&dataset).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_custom_rates() {
        let mut rates = RateCard::default();
        rates.construction_cost_per_sqft = 2000.0;
        let report = derive_cost_report_with(&one_room(10.0, 12.0), &rates).unwrap();
        assert_eq!(report.building_cost, 240_000.0);

        rates.roof_cost_per_sqft = f64::INFINITY;
        assert!(derive_cost_report_with(&one_room(10.0, 12.0), &rates).is_err());
    }

    #[test]
    fn test_overflowing_figures_rejected() {
        // each room is finite, their sum is not
        let dataset = FloorDataset::from_floors(vec![RoomList::from_dimensions(&[(1e154, 1e154), (1e154, 1e154)])]);
        let err = derive_cost_report(&dataset).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut rates = RateCard::default();
        rates.construction_cost_per_sqft = 1e300;
        let err = derive_cost_report_with(&one_room(1e5, 1e5), &rates).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_huge_room_counts_estimate() {
        let dataset = FloorDataset::from_floors(vec![RoomCounts::default()
            .with(RoomType::Bedroom, u32::MAX)
            .with(RoomType::Hall, 1)]);
        let report = derive_cost_report(&dataset).unwrap();
        assert!(close(report.total_area_sqft, 150.0 * f64::from(u32::MAX) + 200.0));
        assert!(report.total_cost.is_finite());
    }

    #[test]
    fn test_report_serialization() {
        let report = derive_cost_report(&one_room(10.0, 12.0)).unwrap();
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"Shallow Footing\""));
        assert!(json.contains("\"Room 1\""));
        let roundtrip: CostReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.floor_count, 1);
        assert_eq!(roundtrip.beams.estimated_beams, 1);
    }
}
