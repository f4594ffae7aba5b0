//! # User Entry Parsing
//!
//! Numeric fields arrive as the text the user typed. These helpers turn that
//! text into numbers and reject anything that is not one. Non-numeric text is
//! never coerced to zero: an estimate built on a silently zeroed field would
//! understate the cost.

use crate::errors::{EstimateError, EstimateResult};

/// Whether a text field holds anything other than whitespace.
pub fn is_filled(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Parse a real number.
///
/// * blank text → `MissingField`
/// * text that is not a finite number → `InvalidNumber`
pub fn parse_number(field: &str, text: &str) -> EstimateResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EstimateError::missing_field(field));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EstimateError::invalid_number(field, trimmed)),
    }
}

/// Parse a strictly positive real number (lengths, widths).
pub fn parse_positive(field: &str, text: &str) -> EstimateResult<f64> {
    let value = parse_number(field, text)?;
    if value <= 0.0 {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Value must be greater than zero",
        ));
    }
    Ok(value)
}

/// Parse a non-negative whole number (room counts).
///
/// Text that is numeric but negative or fractional is `InvalidInput`;
/// text that is not numeric at all is `InvalidNumber`.
pub fn parse_count(field: &str, text: &str) -> EstimateResult<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EstimateError::missing_field(field));
    }
    if let Ok(count) = trimmed.parse::<u32>() {
        return Ok(count);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Err(EstimateError::invalid_input(
            field,
            trimmed,
            "Count must be a whole number of zero or more",
        )),
        _ => Err(EstimateError::invalid_number(field, trimmed)),
    }
}

/// Parse a floor count: a whole number of at least one.
pub fn parse_floor_count(field: &str, text: &str) -> EstimateResult<usize> {
    let count = parse_count(field, text)?;
    if count == 0 {
        return Err(EstimateError::invalid_input(
            field,
            "0",
            "A building needs at least one floor",
        ));
    }
    Ok(count as usize)
}
