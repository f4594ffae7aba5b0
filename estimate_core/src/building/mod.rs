//! # Building Data Model
//!
//! A building is an ordered list of floors. What a floor holds depends on
//! the workflow that collected it:
//!
//! - [`RoomCounts`] - how many rooms of each fixed type (typed-count workflow)
//! - [`RoomList`] - rooms with explicit length × width (dimensioned workflow)
//!
//! A [`FloorDataset`] is generic over that choice, so one building can
//! never mix the two.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::building::{FloorDataset, RoomList, RoomField};
//!
//! let mut dataset: FloorDataset<RoomList> = FloorDataset::new(2);
//! assert!(!dataset.is_complete()); // every floor starts with one blank room
//!
//! for floor in 0..2 {
//!     dataset.set_room_field(floor, 0, RoomField::Length, "10").unwrap();
//!     dataset.set_room_field(floor, 0, RoomField::Width, "12").unwrap();
//! }
//! assert!(dataset.is_complete());
//! ```

pub mod room_counts;
pub mod room_list;

pub use room_counts::{RoomCounts, RoomType};
pub use room_list::{RoomEntry, RoomField, RoomList};

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::calculations::{derive_cost_report_with, CostReport};
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::RateCard;

/// Which entry workflow produced a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Workflow {
    /// Room-type headcount per floor ("quick estimation")
    TypedCount,
    /// Explicit room dimensions per floor ("detailed estimation")
    Dimensioned,
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workflow::TypedCount => f.write_str("typed-count"),
            Workflow::Dimensioned => f.write_str("dimensioned"),
        }
    }
}

/// A room (or group of identical rooms) after its numbers have been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredRoom {
    /// "Bedroom", "Room 3", ...
    pub label: String,
    /// Number of rooms this line stands for
    pub quantity: u32,
    pub length_ft: Option<f64>,
    pub width_ft: Option<f64>,
    pub area_per_room_sqft: f64,
    /// `area_per_room_sqft * quantity`
    pub area_sqft: f64,
}

/// What one floor holds. Implemented by [`RoomCounts`] and [`RoomList`].
pub trait RoomLayout: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    /// Workflow this layout belongs to
    const WORKFLOW: Workflow;

    /// Layout a freshly created floor starts from
    fn initial() -> Self;

    /// At least one room, and every required field filled in
    fn is_complete(&self) -> bool;

    /// Parse and validate every room. `floor` is 1-based and only used in
    /// error messages.
    fn measure(&self, floor: usize, rates: &RateCard) -> EstimateResult<Vec<MeasuredRoom>>;
}

/// Read-only view of one floor with its 1-based number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor<'a, R> {
    pub number: usize,
    pub rooms: &'a R,
}

/// Ordered floors of one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "R: RoomLayout")]
pub struct FloorDataset<R> {
    floors: Vec<R>,
}

impl<R: RoomLayout> FloorDataset<R> {
    /// Create `floor_count` floors, each starting from [`RoomLayout::initial`].
    pub fn new(floor_count: usize) -> Self {
        FloorDataset {
            floors: (0..floor_count).map(|_| R::initial()).collect(),
        }
    }

    /// Wrap already-entered floors, first element is floor 1.
    pub fn from_floors(floors: Vec<R>) -> Self {
        FloorDataset { floors }
    }

    pub fn workflow(&self) -> Workflow {
        R::WORKFLOW
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Floors in order with their numbers
    pub fn floors(&self) -> impl Iterator<Item = Floor<'_, R>> {
        self.floors
            .iter()
            .enumerate()
            .map(|(index, rooms)| Floor { number: index + 1, rooms })
    }

    /// Rooms of the floor at 0-based `index`
    pub fn floor(&self, index: usize) -> Option<&R> {
        self.floors.get(index)
    }

    /// True iff there is at least one floor and every floor is complete.
    pub fn is_complete(&self) -> bool {
        !self.floors.is_empty() && self.floors.iter().all(R::is_complete)
    }

    /// First floor that is not complete, as a 1-based number
    pub fn first_incomplete_floor(&self) -> Option<usize> {
        self.floors
            .iter()
            .position(|rooms| !rooms.is_complete())
            .map(|index| index + 1)
    }

    /// Grow or shrink to `floor_count` floors. Existing floors keep their
    /// position and contents; new floors are appended at the top.
    pub fn set_floor_count(&mut self, floor_count: usize) {
        self.floors.resize_with(floor_count, R::initial);
    }

    /// Replace the rooms of the floor at 0-based `index`.
    pub fn replace_floor(&mut self, index: usize, rooms: R) -> EstimateResult<()> {
        let slot = self.floor_slot(index)?;
        *slot = rooms;
        Ok(())
    }

    fn floor_slot(&mut self, index: usize) -> EstimateResult<&mut R> {
        let count = self.floors.len();
        self.floors.get_mut(index).ok_or_else(|| {
            EstimateError::invalid_input(
                "floor",
                (index + 1).to_string(),
                format!("building has {} floor(s)", count),
            )
        })
    }
}

impl FloorDataset<RoomCounts> {
    /// Set a room count on one floor from user text.
    pub fn set_room_count(&mut self, floor_index: usize, room: RoomType, text: &str) -> EstimateResult<()> {
        self.floor_slot(floor_index)?.set_from_text(room, text)
    }
}

impl FloorDataset<RoomList> {
    /// Set one dimension of one room from user text.
    pub fn set_room_field(
        &mut self,
        floor_index: usize,
        room_index: usize,
        field: RoomField,
        text: &str,
    ) -> EstimateResult<()> {
        self.floor_slot(floor_index)?.set_room_field(room_index, field, text)
    }

    /// Append a blank room to a floor, returning its 0-based index.
    pub fn add_room(&mut self, floor_index: usize) -> EstimateResult<usize> {
        Ok(self.floor_slot(floor_index)?.add_room())
    }
}

/// A dataset from either workflow, as stored in a dataset file.
///
/// ```json
/// { "workflow": "Dimensioned", "floors": [ [ { "length": 10, "width": 12 } ] ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "workflow")]
pub enum BuildingDataset {
    TypedCount(FloorDataset<RoomCounts>),
    Dimensioned(FloorDataset<RoomList>),
}

impl BuildingDataset {
    pub fn workflow(&self) -> Workflow {
        match self {
            BuildingDataset::TypedCount(_) => Workflow::TypedCount,
            BuildingDataset::Dimensioned(_) => Workflow::Dimensioned,
        }
    }

    pub fn floor_count(&self) -> usize {
        match self {
            BuildingDataset::TypedCount(d) => d.floor_count(),
            BuildingDataset::Dimensioned(d) => d.floor_count(),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            BuildingDataset::TypedCount(d) => d.is_complete(),
            BuildingDataset::Dimensioned(d) => d.is_complete(),
        }
    }

    /// Run the cost engine on whichever dataset this is.
    pub fn derive_cost_report(&self, rates: &RateCard) -> EstimateResult<CostReport> {
        match self {
            BuildingDataset::TypedCount(d) => derive_cost_report_with(d, rates),
            BuildingDataset::Dimensioned(d) => derive_cost_report_with(d, rates),
        }
    }
}

impl From<FloorDataset<RoomCounts>> for BuildingDataset {
    fn from(dataset: FloorDataset<RoomCounts>) -> Self {
        BuildingDataset::TypedCount(dataset)
    }
}

impl From<FloorDataset<RoomList>> for BuildingDataset {
    fn from(dataset: FloorDataset<RoomList>) -> Self {
        BuildingDataset::Dimensioned(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dataset_uses_initial_layout() {
        let dataset: FloorDataset<RoomCounts> = FloorDataset::new(3);
        assert_eq!(dataset.floor_count(), 3);
        assert_eq!(dataset.workflow(), Workflow::TypedCount);
        assert!(dataset.floors().all(|f| *f.rooms == RoomCounts::suggested()));
        assert!(dataset.is_complete());
    }

    #[test]
    fn test_floor_numbers_are_one_based() {
        let dataset: FloorDataset<RoomList> = FloorDataset::new(2);
        let numbers: Vec<usize> = dataset.floors().map(|f| f.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_empty_dataset_is_incomplete() {
        let dataset: FloorDataset<RoomCounts> = FloorDataset::new(0);
        assert!(dataset.is_empty());
        assert!(!dataset.is_complete());
    }

    #[test]
    fn test_set_floor_count_preserves_existing_floors() {
        let mut dataset = FloorDataset::from_floors(vec![
            RoomList::from_dimensions(&[(10.0, 12.0)]),
            RoomList::from_dimensions(&[(8.0, 8.0)]),
        ]);

        dataset.set_floor_count(3);
        assert_eq!(dataset.floor(0), Some(&RoomList::from_dimensions(&[(10.0, 12.0)])));
        assert_eq!(dataset.floor(1), Some(&RoomList::from_dimensions(&[(8.0, 8.0)])));
        assert_eq!(dataset.floor(2), Some(&RoomList::initial()));
        assert_eq!(dataset.first_incomplete_floor(), Some(3));

        dataset.set_floor_count(1);
        assert_eq!(dataset.floor_count(), 1);
        assert_eq!(dataset.floor(0), Some(&RoomList::from_dimensions(&[(10.0, 12.0)])));
    }

    #[test]
    fn test_mutations_on_missing_floor() {
        let mut dataset: FloorDataset<RoomList> = FloorDataset::new(1);
        assert!(dataset.add_room(4).is_err());
        assert!(dataset.set_room_field(1, 0, RoomField::Width, "3").is_err());

        let mut counts: FloorDataset<RoomCounts> = FloorDataset::new(1);
        assert!(counts.set_room_count(2, RoomType::Hall, "1").is_err());
        counts.set_room_count(0, RoomType::Hall, "4").unwrap();
        assert_eq!(counts.floor(0).unwrap().get(RoomType::Hall), 4);
    }

    #[test]
    fn test_building_dataset_json() {
        let json = r#"{
            "workflow": "Dimensioned",
            "floors": [
                [ { "length": 10, "width": 12 } ],
                [ { "length": "20", "width": "15" }, { "length": 5, "width": 4 } ]
            ]
        }"#;
        let dataset: BuildingDataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.workflow(), Workflow::Dimensioned);
        assert_eq!(dataset.floor_count(), 2);
        assert!(dataset.is_complete());

        let typed = r#"{ "workflow": "TypedCount", "floors": [ { "Bedroom": 1 } ] }"#;
        let dataset: BuildingDataset = serde_json::from_str(typed).unwrap();
        assert_eq!(dataset.workflow(), Workflow::TypedCount);
    }
}
