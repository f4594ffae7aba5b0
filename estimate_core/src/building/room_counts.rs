//! # Typed-Count Rooms
//!
//! A floor described by how many rooms of each type it has. The six room
//! types are a closed set; each maps to a fixed average area in the
//! [`RoomAreaTable`](crate::rates::RoomAreaTable).
//!
//! ## JSON Example
//!
//! ```json
//! { "Bedroom": 2, "Hall": 1, "Dining": 1, "Kitchen": 1, "Washroom": 2, "Puja": 0 }
//! ```
//!
//! Missing labels default to zero; unknown labels are rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{MeasuredRoom, RoomLayout, Workflow};
use crate::entry::parse_count;
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::RateCard;

/// Room types of the typed-count workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomType {
    Bedroom,
    Hall,
    Dining,
    Kitchen,
    Washroom,
    Puja,
}

impl RoomType {
    /// All room types in display order
    pub const ALL: [RoomType; 6] = [
        RoomType::Bedroom,
        RoomType::Hall,
        RoomType::Dining,
        RoomType::Kitchen,
        RoomType::Washroom,
        RoomType::Puja,
    ];

    /// Human-readable label
    pub fn display_name(self) -> &'static str {
        match self {
            RoomType::Bedroom => "Bedroom",
            RoomType::Hall => "Hall",
            RoomType::Dining => "Dining",
            RoomType::Kitchen => "Kitchen",
            RoomType::Washroom => "Washroom",
            RoomType::Puja => "Puja",
        }
    }

    /// Look a room type up by its label (case-insensitive).
    pub fn from_name(name: &str) -> Option<RoomType> {
        let name = name.trim();
        RoomType::ALL
            .into_iter()
            .find(|room| room.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Count of rooms per room type on one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomCounts {
    #[serde(rename = "Bedroom")]
    pub bedroom: u32,
    #[serde(rename = "Hall")]
    pub hall: u32,
    #[serde(rename = "Dining")]
    pub dining: u32,
    #[serde(rename = "Kitchen")]
    pub kitchen: u32,
    #[serde(rename = "Washroom")]
    pub washroom: u32,
    #[serde(rename = "Puja")]
    pub puja: u32,
}

impl RoomCounts {
    /// Layout new floors start from: two bedrooms, a hall, a dining room,
    /// a kitchen and two washrooms.
    pub fn suggested() -> Self {
        RoomCounts {
            bedroom: 2,
            hall: 1,
            dining: 1,
            kitchen: 1,
            washroom: 2,
            puja: 0,
        }
    }

    /// Count for one room type
    pub fn get(&self, room: RoomType) -> u32 {
        match room {
            RoomType::Bedroom => self.bedroom,
            RoomType::Hall => self.hall,
            RoomType::Dining => self.dining,
            RoomType::Kitchen => self.kitchen,
            RoomType::Washroom => self.washroom,
            RoomType::Puja => self.puja,
        }
    }

    /// Set the count for one room type
    pub fn set(&mut self, room: RoomType, count: u32) {
        let slot = match room {
            RoomType::Bedroom => &mut self.bedroom,
            RoomType::Hall => &mut self.hall,
            RoomType::Dining => &mut self.dining,
            RoomType::Kitchen => &mut self.kitchen,
            RoomType::Washroom => &mut self.washroom,
            RoomType::Puja => &mut self.puja,
        };
        *slot = count;
    }

    /// Set a count from user-entered text. The record is left unchanged
    /// when the text is not a whole number.
    pub fn set_from_text(&mut self, room: RoomType, text: &str) -> EstimateResult<()> {
        let count = parse_count(room.display_name(), text)?;
        self.set(room, count);
        Ok(())
    }

    /// Builder-style setter
    pub fn with(mut self, room: RoomType, count: u32) -> Self {
        self.set(room, count);
        self
    }

    /// Iterate `(room type, count)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (RoomType, u32)> + '_ {
        RoomType::ALL.into_iter().map(move |room| (room, self.get(room)))
    }

    /// Total number of rooms on the floor
    pub fn total_rooms(&self) -> u64 {
        self.iter().map(|(_, count)| u64::from(count)).sum()
    }
}

impl RoomLayout for RoomCounts {
    const WORKFLOW: Workflow = Workflow::TypedCount;

    fn initial() -> Self {
        RoomCounts::suggested()
    }

    fn is_complete(&self) -> bool {
        self.iter().any(|(_, count)| count > 0)
    }

    fn measure(&self, floor: usize, rates: &RateCard) -> EstimateResult<Vec<MeasuredRoom>> {
        if !self.is_complete() {
            return Err(EstimateError::incomplete_input(floor, "floor has no rooms"));
        }
        Ok(self
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(room, count)| {
                let area_each = rates.room_areas.area_sqft(room);
                MeasuredRoom {
                    label: room.display_name().to_string(),
                    quantity: count,
                    length_ft: None,
                    width_ft: None,
                    area_per_room_sqft: area_each,
                    area_sqft: area_each * f64::from(count),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_layout() {
        let rooms = RoomCounts::suggested();
        assert_eq!(rooms.get(RoomType::Bedroom), 2);
        assert_eq!(rooms.get(RoomType::Washroom), 2);
        assert_eq!(rooms.get(RoomType::Puja), 0);
        assert_eq!(rooms.total_rooms(), 7);
    }

    #[test]
    fn test_default_is_all_zero_and_incomplete() {
        let rooms = RoomCounts::default();
        assert_eq!(rooms.total_rooms(), 0);
        assert!(!rooms.is_complete());
        let err = rooms.measure(1, &RateCard::default()).unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_INPUT");
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let rooms = RoomCounts::default()
            .with(RoomType::Bedroom, u32::MAX)
            .with(RoomType::Hall, 1);
        assert_eq!(rooms.total_rooms(), u64::from(u32::MAX) + 1);
        assert!(rooms.is_complete());

        let measured = rooms.measure(1, &RateCard::default()).unwrap();
        assert_eq!(measured.len(), 2);
        assert_eq!(measured[0].area_sqft, 150.0 * f64::from(u32::MAX));
    }

    #[test]
    fn test_set_from_text_rejects_garbage() {
        let mut rooms = RoomCounts::suggested();
        let err = rooms.set_from_text(RoomType::Hall, "lots").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_NUMBER");
        assert_eq!(rooms.get(RoomType::Hall), 1);

        rooms.set_from_text(RoomType::Hall, "3").unwrap();
        assert_eq!(rooms.get(RoomType::Hall), 3);
    }

    #[test]
    fn test_measure_uses_area_table() {
        let rates = RateCard::default();
        let rooms = RoomCounts::default()
            .with(RoomType::Bedroom, 2)
            .with(RoomType::Puja, 1);
        let measured = rooms.measure(1, &rates).unwrap();
        assert_eq!(measured.len(), 2);
        assert_eq!(measured[0].label, "Bedroom");
        assert_eq!(measured[0].area_sqft, 300.0);
        assert_eq!(measured[1].label, "Puja");
        assert_eq!(measured[1].area_sqft, 30.0);
    }

    #[test]
    fn test_serialization_uses_labels() {
        let json = serde_json::to_string(&RoomCounts::suggested()).unwrap();
        assert!(json.contains("\"Bedroom\":2"));

        let partial: RoomCounts = serde_json::from_str(r#"{"Kitchen": 1}"#).unwrap();
        assert_eq!(partial.get(RoomType::Kitchen), 1);
        assert_eq!(partial.get(RoomType::Bedroom), 0);

        assert!(serde_json::from_str::<RoomCounts>(r#"{"Garage": 1}"#).is_err());
    }

    #[test]
    fn test_room_type_lookup() {
        assert_eq!(RoomType::from_name("washroom"), Some(RoomType::Washroom));
        assert_eq!(RoomType::from_name("Garage"), None);
    }
}
