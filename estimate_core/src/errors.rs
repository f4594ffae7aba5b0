//! # Error Types
//!
//! Structured error types for estimate_core. Every failure names the field or
//! floor it concerns so that a front end can point the user at the exact
//! input to correct.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_length(length_ft: f64) -> EstimateResult<()> {
//!     if length_ft <= 0.0 {
//!         return Err(EstimateError::invalid_input(
//!             "length",
//!             length_ft.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-2.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// A value parsed but is out of range (negative, zero, not finite, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field was left empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A numeric field holds text that is not a number
    #[error("Invalid number for '{field}': '{value}'")]
    InvalidNumber { field: String, value: String },

    /// The engine was invoked before every floor had its required data
    #[error("Incomplete input on floor {floor}: {reason}")]
    IncompleteInput { floor: usize, reason: String },

    /// A cost report was requested for a dataset with zero floors
    #[error("No floors to estimate")]
    EmptyDataset,

    /// A wizard action was attempted in a state that does not allow it
    #[error("Cannot {action} while {state}")]
    InvalidTransition { state: String, action: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        EstimateError::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an IncompleteInput error. `floor` is 1-based.
    pub fn incomplete_input(floor: usize, reason: impl Into<String>) -> Self {
        EstimateError::IncompleteInput {
            floor,
            reason: reason.into(),
        }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(state: impl Into<String>, action: impl Into<String>) -> Self {
        EstimateError::InvalidTransition {
            state: state.into(),
            action: action.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error comes from user input that can be corrected and
    /// resubmitted, as opposed to an environment problem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EstimateError::InvalidInput { .. }
                | EstimateError::MissingField { .. }
                | EstimateError::InvalidNumber { .. }
                | EstimateError::IncompleteInput { .. }
                | EstimateError::EmptyDataset
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::InvalidNumber { .. } => "INVALID_NUMBER",
            EstimateError::IncompleteInput { .. } => "INCOMPLETE_INPUT",
            EstimateError::EmptyDataset => "EMPTY_DATASET",
            EstimateError::InvalidTransition { .. } => "INVALID_TRANSITION",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(e: serde_json::Error) -> Self {
        EstimateError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::invalid_number("Floor 1 / Room 2 / length", "12ft");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidNumber\""));
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_unit_variant_serialization() {
        let json = serde_json::to_string(&EstimateError::EmptyDataset).unwrap();
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, EstimateError::EmptyDataset);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EstimateError::missing_field("width").error_code(), "MISSING_FIELD");
        assert_eq!(EstimateError::EmptyDataset.error_code(), "EMPTY_DATASET");
        assert_eq!(
            EstimateError::incomplete_input(2, "no rooms").error_code(),
            "INCOMPLETE_INPUT"
        );
    }

    #[test]
    fn test_display_names_floor() {
        let error = EstimateError::incomplete_input(3, "floor has no rooms");
        assert_eq!(error.to_string(), "Incomplete input on floor 3: floor has no rooms");
    }

    #[test]
    fn test_input_errors_are_classified() {
        assert!(EstimateError::invalid_number("floors", "two").is_input_error());
        assert!(!EstimateError::file_error("open", "x.json", "not found").is_input_error());
        assert!(!EstimateError::invalid_transition("showing the result", "add a room").is_input_error());
    }
}
