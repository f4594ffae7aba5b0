//! # estimate_core - Residential Construction Cost Engine
//!
//! `estimate_core` turns a description of a house (plot, floors, rooms) into
//! a cost estimate: floor areas, building and roof cost, foundation, beams,
//! bulk materials and plumbing. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Pure engine**: [`calculations::derive_cost_report`] reads a dataset
//!   and returns a report, nothing else
//! - **Two workflows**: rooms entered as counts per type, or as explicit
//!   length × width; the type system keeps the two apart
//! - **Rich Errors**: Structured error types that name the offending field
//! - **Configurable rates**: every constant lives in a [`rates::RateCard`]
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::building::{FloorDataset, RoomCounts, RoomType};
//! use estimate_core::calculations::derive_cost_report;
//!
//! let ground = RoomCounts::suggested();
//! let first = RoomCounts::default().with(RoomType::Bedroom, 3).with(RoomType::Washroom, 1);
//! let dataset = FloorDataset::from_floors(vec![ground, first]);
//!
//! let report = derive_cost_report(&dataset).unwrap();
//! assert_eq!(report.total_area_sqft, 920.0 + 500.0);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`building`] - Floors, rooms and the two room layouts
//! - [`calculations`] - The cost engine and its components
//! - [`wizard`] - Step-by-step input state machine
//! - [`rates`] - Rate card with the built-in rates
//! - [`entry`] - Parsing of typed-in numbers
//! - [`units`] - Length units
//! - [`errors`] - Structured error types
//! - [`file_io`] - Dataset and rate card loading, atomic report saves

pub mod building;
pub mod calculations;
pub mod entry;
pub mod errors;
pub mod file_io;
pub mod rates;
pub mod units;
pub mod wizard;

// Re-export commonly used types at crate root for convenience
pub use building::{BuildingDataset, FloorDataset, RoomCounts, RoomList, RoomType, Workflow};
pub use calculations::{derive_cost_report, derive_cost_report_with, CostReport};
pub use errors::{EstimateError, EstimateResult};
pub use file_io::{load_dataset, load_rate_card, save_report, ReportDocument};
pub use rates::RateCard;
pub use wizard::{DimensionedWizard, TypedCountWizard, WizardStep};
