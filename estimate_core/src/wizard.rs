//! # Input Wizard
//!
//! Step-by-step assembly of a [`FloorDataset`]:
//!
//! ```text
//! CollectingPlot ──submit_plot──▶ CollectingFloors(0) ──next_floor──▶ CollectingFloors(1) ─ ... ─▶ Result
//!       ▲                               │     ▲                              │
//!       └────────previous_floor─────────┘     └────────previous_floor────────┘
//! ```
//!
//! The floor being edited lives in a scratch buffer. Every navigation edge
//! commits the buffer into the dataset first and then loads the buffer for
//! the floor being moved to, so no edit is lost when going back and forth.
//!
//! `Result` is terminal. The only way out is [`Wizard::restart`], which
//! starts a new session with a new id instead of clearing the old one.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::building::RoomType;
//! use estimate_core::wizard::{PlotField, TypedCountWizard, WizardStep};
//!
//! let mut wizard = TypedCountWizard::new();
//! wizard.set_plot_field(PlotField::Length, "50").unwrap();
//! wizard.set_plot_field(PlotField::Width, "60").unwrap();
//! wizard.set_plot_field(PlotField::Floors, "1").unwrap();
//! wizard.submit_plot().unwrap();
//!
//! wizard.set_room_count(RoomType::Puja, "1").unwrap();
//! wizard.next_floor().unwrap(); // last floor: runs the estimate
//!
//! assert_eq!(wizard.step(), WizardStep::Result);
//! assert_eq!(wizard.report().unwrap().total_area_sqft, 950.0);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::building::{FloorDataset, RoomCounts, RoomField, RoomLayout, RoomList, RoomType};
use crate::calculations::{derive_cost_report_with, CostReport};
use crate::entry::{is_filled, parse_floor_count, parse_positive};
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::RateCard;
use crate::units::LengthUnit;

/// Where the wizard is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    /// Entering plot length, width and floor count
    CollectingPlot,
    /// Entering rooms for the floor at 0-based `index`
    CollectingFloors { index: usize },
    /// Estimate computed
    Result,
}

impl WizardStep {
    fn describe(self) -> String {
        match self {
            WizardStep::CollectingPlot => "collecting plot details".to_string(),
            WizardStep::CollectingFloors { index } => format!("collecting floor {}", index + 1),
            WizardStep::Result => "showing the result".to_string(),
        }
    }
}

/// Plot entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotField {
    Length,
    Width,
    Floors,
}

/// Plot details as typed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotEntry {
    pub length: String,
    pub width: String,
    pub floors: String,
    pub length_unit: LengthUnit,
    pub width_unit: LengthUnit,
}

impl PlotEntry {
    /// All three fields have been entered
    pub fn is_filled(&self) -> bool {
        is_filled(&self.length) && is_filled(&self.width) && is_filled(&self.floors)
    }

    /// Parse into validated plot details, normalising lengths to feet.
    pub fn parse(&self) -> EstimateResult<PlotDetails> {
        let length = parse_positive("plot length", &self.length)?;
        let width = parse_positive("plot width", &self.width)?;
        let floor_count = parse_floor_count("floors", &self.floors)?;
        Ok(PlotDetails {
            length_ft: self.length_unit.to_feet(length),
            width_ft: self.width_unit.to_feet(width),
            floor_count,
        })
    }
}

/// Validated plot details.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotDetails {
    pub length_ft: f64,
    pub width_ft: f64,
    pub floor_count: usize,
}

impl PlotDetails {
    pub fn area_sqft(&self) -> f64 {
        self.length_ft * self.width_ft
    }
}

/// One estimating session.
#[derive(Debug, Clone)]
pub struct Wizard<R: RoomLayout> {
    session_id: Uuid,
    rates: RateCard,
    step: WizardStep,
    plot: PlotEntry,
    details: Option<PlotDetails>,
    dataset: Option<FloorDataset<R>>,
    /// Edits to the current floor, not yet committed to `dataset`
    buffer: R,
    report: Option<CostReport>,
}

/// Wizard for the room-type headcount workflow
pub type TypedCountWizard = Wizard<RoomCounts>;

/// Wizard for the explicit room dimensions workflow
pub type DimensionedWizard = Wizard<RoomList>;

impl<R: RoomLayout> Default for Wizard<R> {
    fn default() -> Self {
        Wizard::new()
    }
}

impl<R: RoomLayout> Wizard<R> {
    /// Start a session with the built-in rates.
    pub fn new() -> Self {
        Wizard::with_rates(RateCard::default())
    }

    /// Start a session with an explicit rate card.
    pub fn with_rates(rates: RateCard) -> Self {
        let session_id = Uuid::new_v4();
        tracing::debug!(%session_id, workflow = %R::WORKFLOW, "wizard session started");
        Wizard {
            session_id,
            rates,
            step: WizardStep::CollectingPlot,
            plot: PlotEntry::default(),
            details: None,
            dataset: None,
            buffer: R::initial(),
            report: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn rates(&self) -> &RateCard {
        &self.rates
    }

    pub fn plot(&self) -> &PlotEntry {
        &self.plot
    }

    /// Plot details once the plot step has been submitted
    pub fn plot_details(&self) -> Option<&PlotDetails> {
        self.details.as_ref()
    }

    /// Committed floors. The floor being edited may have newer edits in
    /// [`Wizard::current_floor`].
    pub fn dataset(&self) -> Option<&FloorDataset<R>> {
        self.dataset.as_ref()
    }

    /// Floor count fixed for this session, once the plot is submitted
    pub fn floor_count(&self) -> Option<usize> {
        self.dataset.as_ref().map(FloorDataset::floor_count)
    }

    /// Rooms of the floor being edited
    pub fn current_floor(&self) -> Option<&R> {
        match self.step {
            WizardStep::CollectingFloors { .. } => Some(&self.buffer),
            _ => None,
        }
    }

    /// Whether the floor being edited is the top floor
    pub fn is_last_floor(&self) -> bool {
        match (self.step, self.floor_count()) {
            (WizardStep::CollectingFloors { index }, Some(count)) => index + 1 == count,
            _ => false,
        }
    }

    /// The estimate, once the wizard has reached `Result`
    pub fn report(&self) -> Option<&CostReport> {
        self.report.as_ref()
    }

    /// Edit a plot field.
    pub fn set_plot_field(&mut self, field: PlotField, text: impl Into<String>) -> EstimateResult<()> {
        self.require_plot_step("edit the plot")?;
        let text = text.into();
        match field {
            PlotField::Length => self.plot.length = text,
            PlotField::Width => self.plot.width = text,
            PlotField::Floors => self.plot.floors = text,
        }
        Ok(())
    }

    /// Choose the unit a plot dimension was typed in.
    pub fn set_plot_unit(&mut self, field: PlotField, unit: LengthUnit) -> EstimateResult<()> {
        self.require_plot_step("edit the plot")?;
        match field {
            PlotField::Length => self.plot.length_unit = unit,
            PlotField::Width => self.plot.width_unit = unit,
            PlotField::Floors => {
                return Err(EstimateError::invalid_input("floors", unit.symbol(), "Floor count has no unit"))
            }
        }
        Ok(())
    }

    /// `CollectingPlot → CollectingFloors(0)`.
    ///
    /// The first submission fixes the floor count for the session. Coming
    /// back to the plot step later allows the plot dimensions to change,
    /// but not the number of floors.
    pub fn submit_plot(&mut self) -> EstimateResult<()> {
        self.require_plot_step("submit the plot")?;
        let details = self.plot.parse().map_err(|e| self.refused("submit the plot", e))?;

        match &self.dataset {
            Some(dataset) if dataset.floor_count() != details.floor_count => {
                let err = EstimateError::invalid_input(
                    "floors",
                    details.floor_count.to_string(),
                    format!(
                        "Floor count is fixed at {} for this session; restart to change it",
                        dataset.floor_count()
                    ),
                );
                return Err(self.refused("submit the plot", err));
            }
            Some(_) => {}
            None => self.dataset = Some(FloorDataset::new(details.floor_count)),
        }

        self.details = Some(details);
        self.enter_floor(0);
        Ok(())
    }

    /// `CollectingFloors(i) → CollectingFloors(i+1)`, or `→ Result` on the
    /// last floor.
    ///
    /// The floor being left must be complete and its numbers valid. On the
    /// last floor the whole dataset is estimated; if that fails the wizard
    /// stays on the last floor.
    pub fn next_floor(&mut self) -> EstimateResult<()> {
        let index = self.require_floor_step("go to the next floor")?;
        if let Err(e) = self.buffer.measure(index + 1, &self.rates) {
            return Err(self.refused("go to the next floor", e));
        }
        self.commit_buffer(index)?;

        if self.is_last_floor() {
            let report = match self.dataset.as_ref() {
                Some(dataset) => derive_cost_report_with(dataset, &self.rates),
                None => Err(EstimateError::EmptyDataset),
            }
            .map_err(|e| self.refused("calculate the estimate", e))?;

            tracing::debug!(
                session_id = %self.session_id,
                total_cost = report.total_cost,
                "wizard reached result"
            );
            self.report = Some(report);
            self.step = WizardStep::Result;
        } else {
            self.enter_floor(index + 1);
        }
        Ok(())
    }

    /// `CollectingFloors(i) → CollectingFloors(i-1)`, or back to the plot
    /// step from the first floor. Edits are kept even if the floor is not
    /// complete yet.
    pub fn previous_floor(&mut self) -> EstimateResult<()> {
        let index = self.require_floor_step("go to the previous floor")?;
        self.commit_buffer(index)?;

        if index == 0 {
            tracing::debug!(session_id = %self.session_id, "wizard back to plot step");
            self.step = WizardStep::CollectingPlot;
        } else {
            self.enter_floor(index - 1);
        }
        Ok(())
    }

    /// Estimate what has been entered so far without changing step.
    ///
    /// While collecting floors the current buffer is included, so the
    /// preview reflects the latest edit.
    pub fn preview_report(&self) -> EstimateResult<CostReport> {
        if let Some(report) = &self.report {
            return Ok(report.clone());
        }
        let dataset = self.dataset.as_ref().ok_or(EstimateError::EmptyDataset)?;
        match self.step {
            WizardStep::CollectingFloors { index } => {
                let mut snapshot = dataset.clone();
                snapshot.replace_floor(index, self.buffer.clone())?;
                derive_cost_report_with(&snapshot, &self.rates)
            }
            _ => derive_cost_report_with(dataset, &self.rates),
        }
    }

    /// Discard this session and start a new one with the same rates.
    pub fn restart(self) -> Self {
        tracing::debug!(session_id = %self.session_id, "wizard session discarded");
        Wizard::with_rates(self.rates)
    }

    fn commit_buffer(&mut self, index: usize) -> EstimateResult<()> {
        let dataset = self.dataset.as_mut().ok_or(EstimateError::EmptyDataset)?;
        dataset.replace_floor(index, self.buffer.clone())
    }

    fn enter_floor(&mut self, index: usize) {
        if let Some(rooms) = self.dataset.as_ref().and_then(|d| d.floor(index)) {
            self.buffer = rooms.clone();
        }
        self.step = WizardStep::CollectingFloors { index };
        tracing::debug!(session_id = %self.session_id, floor = index + 1, "wizard entered floor");
    }

    fn require_plot_step(&self, action: &str) -> EstimateResult<()> {
        match self.step {
            WizardStep::CollectingPlot => Ok(()),
            step => Err(EstimateError::invalid_transition(step.describe(), action)),
        }
    }

    fn require_floor_step(&self, action: &str) -> EstimateResult<usize> {
        match self.step {
            WizardStep::CollectingFloors { index } => Ok(index),
            step => Err(EstimateError::invalid_transition(step.describe(), action)),
        }
    }

    fn buffer_mut(&mut self, action: &str) -> EstimateResult<&mut R> {
        self.require_floor_step(action)?;
        Ok(&mut self.buffer)
    }

    fn refused(&self, action: &str, error: EstimateError) -> EstimateError {
        tracing::warn!(
            session_id = %self.session_id,
            step = %self.step.describe(),
            code = error.error_code(),
            "wizard refused to {}: {}",
            action,
            error
        );
        error
    }
}

impl Wizard<RoomCounts> {
    /// Set a room count on the floor being edited.
    pub fn set_room_count(&mut self, room: RoomType, text: &str) -> EstimateResult<()> {
        self.buffer_mut("edit room counts")?.set_from_text(room, text)
    }
}

impl Wizard<RoomList> {
    /// Append a blank room to the floor being edited, returning its index.
    pub fn add_room(&mut self) -> EstimateResult<usize> {
        Ok(self.buffer_mut("add a room")?.add_room())
    }

    /// Set one dimension of one room on the floor being edited.
    pub fn set_room_field(&mut self, room_index: usize, field: RoomField, text: &str) -> EstimateResult<()> {
        self.buffer_mut("edit a room")?.set_room_field(room_index, field, text)
    }
}
