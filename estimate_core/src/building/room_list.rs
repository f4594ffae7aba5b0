//! # Dimensioned Rooms
//!
//! A floor described as an ordered list of rooms, each with a length and a
//! width in feet. Rooms have no names of their own; `Room 1`, `Room 2`, ...
//! come from their position, so the list is only ever appended to.
//!
//! Dimensions are kept as the text the user typed until the floor is
//! measured, which is where blank and non-numeric entries are reported.

use serde::{Deserialize, Deserializer, Serialize};

use super::{MeasuredRoom, RoomLayout, Workflow};
use crate::entry::{is_filled, parse_positive};
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::RateCard;

/// Which dimension of a room is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomField {
    Length,
    Width,
}

impl RoomField {
    pub fn name(self) -> &'static str {
        match self {
            RoomField::Length => "length",
            RoomField::Width => "width",
        }
    }
}

/// One room as entered.
///
/// Accepts either strings or numbers when deserialized, so hand-written
/// dataset files can use plain numbers. A missing dimension loads as blank.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomEntry {
    #[serde(deserialize_with = "text_or_number")]
    pub length: String,
    #[serde(deserialize_with = "text_or_number")]
    pub width: String,
}

impl RoomEntry {
    /// A room with both dimensions filled in from numbers
    pub fn new(length_ft: f64, width_ft: f64) -> Self {
        RoomEntry {
            length: length_ft.to_string(),
            width: width_ft.to_string(),
        }
    }

    pub fn field(&self, field: RoomField) -> &str {
        match field {
            RoomField::Length => &self.length,
            RoomField::Width => &self.width,
        }
    }

    pub fn set_field(&mut self, field: RoomField, text: impl Into<String>) {
        match field {
            RoomField::Length => self.length = text.into(),
            RoomField::Width => self.width = text.into(),
        }
    }

    /// Both dimensions have been entered
    pub fn is_filled(&self) -> bool {
        is_filled(&self.length) && is_filled(&self.width)
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(f64),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(value) => value.to_string(),
    })
}

/// Ordered rooms of one floor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomList {
    rooms: Vec<RoomEntry>,
}

impl RoomList {
    pub fn new(rooms: Vec<RoomEntry>) -> Self {
        RoomList { rooms }
    }

    /// Build a floor from `(length, width)` pairs in feet
    pub fn from_dimensions(dimensions: &[(f64, f64)]) -> Self {
        RoomList {
            rooms: dimensions
                .iter()
                .map(|&(length, width)| RoomEntry::new(length, width))
                .collect(),
        }
    }

    pub fn rooms(&self) -> &[RoomEntry] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Append an empty room and return its 0-based index
    pub fn add_room(&mut self) -> usize {
        self.rooms.push(RoomEntry::default());
        self.rooms.len() - 1
    }

    /// Overwrite one dimension of one room with user text.
    pub fn set_room_field(&mut self, room_index: usize, field: RoomField, text: impl Into<String>) -> EstimateResult<()> {
        let count = self.rooms.len();
        let room = self.rooms.get_mut(room_index).ok_or_else(|| {
            EstimateError::invalid_input(
                "room",
                (room_index + 1).to_string(),
                format!("floor has {} room(s)", count),
            )
        })?;
        room.set_field(field, text);
        Ok(())
    }
}

impl RoomLayout for RoomList {
    const WORKFLOW: Workflow = Workflow::Dimensioned;

    /// New floors start with one blank room to fill in
    fn initial() -> Self {
        RoomList {
            rooms: vec![RoomEntry::default()],
        }
    }

    fn is_complete(&self) -> bool {
        !self.rooms.is_empty() && self.rooms.iter().all(RoomEntry::is_filled)
    }

    fn measure(&self, floor: usize, _rates: &RateCard) -> EstimateResult<Vec<MeasuredRoom>> {
        if self.rooms.is_empty() {
            return Err(EstimateError::incomplete_input(floor, "floor has no rooms"));
        }

        let mut measured = Vec::with_capacity(self.rooms.len());
        for (index, room) in self.rooms.iter().enumerate() {
            let label = format!("Room {}", index + 1);
            let mut dims = [0.0; 2];
            for (slot, field) in dims.iter_mut().zip([RoomField::Length, RoomField::Width]) {
                let text = room.field(field);
                if !is_filled(text) {
                    return Err(EstimateError::incomplete_input(
                        floor,
                        format!("{} is missing its {}", label, field.name()),
                    ));
                }
                *slot = parse_positive(&format!("Floor {} / {} / {}", floor, label, field.name()), text)?;
            }
            let [length_ft, width_ft] = dims;
            let area = length_ft * width_ft;
            if !area.is_finite() {
                return Err(EstimateError::invalid_input(
                    format!("Floor {} / {} / area", floor, label),
                    area.to_string(),
                    "Room area is too large to estimate",
                ));
            }
            measured.push(MeasuredRoom {
                label,
                quantity: 1,
                length_ft: Some(length_ft),
                width_ft: Some(width_ft),
                area_per_room_sqft: area,
                area_sqft: area,
            });
        }
        Ok(measured)
    }
}
