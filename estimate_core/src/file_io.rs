//! # File I/O Module
//!
//! Reading inputs and writing reports:
//! - **Datasets**: a [`BuildingDataset`] as JSON, either workflow
//! - **Rate cards**: a [`RateCard`] as JSON, version-checked and validated
//! - **Reports**: a [`ReportDocument`] written with an atomic save
//!
//! ## Atomic saves
//!
//! Reports are written to a `.tmp` sibling, synced to disk, then renamed
//! over the target, so an interrupted save never leaves a half-written
//! report behind.
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::file_io::{load_dataset, save_report, ReportDocument};
//! use estimate_core::rates::RateCard;
//! use std::path::Path;
//!
//! let dataset = load_dataset(Path::new("house.json"))?;
//! let report = dataset.derive_cost_report(&RateCard::default())?;
//! save_report(&ReportDocument::new(report), Path::new("house.report.json"))?;
//! # Ok::<(), estimate_core::errors::EstimateError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::building::BuildingDataset;
use crate::calculations::CostReport;
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::{RateCard, RATE_CARD_VERSION};

/// Current schema version for saved reports
pub const REPORT_VERSION: &str = "0.1.0";

/// A cost report as saved to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// When the report was generated
    pub generated: DateTime<Utc>,
    pub report: CostReport,
}

impl ReportDocument {
    /// Stamp a report with the current schema version and time.
    pub fn new(report: CostReport) -> Self {
        ReportDocument {
            version: REPORT_VERSION.to_string(),
            generated: Utc::now(),
            report,
        }
    }
}

fn read_text(path: &Path) -> EstimateResult<String> {
    fs::read_to_string(path)
        .map_err(|e| EstimateError::file_error("read", path.display().to_string(), e.to_string()))
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, contents: &str) -> EstimateResult<T> {
    serde_json::from_str(contents).map_err(|e| EstimateError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Load a building dataset.
///
/// The file names its workflow:
///
/// ```json
/// { "workflow": "TypedCount", "floors": [ { "Bedroom": 2, "Hall": 1 } ] }
/// ```
///
/// Loading does not require the dataset to be complete; the cost engine
/// reports incomplete floors when it runs.
pub fn load_dataset(path: &Path) -> EstimateResult<BuildingDataset> {
    let contents = read_text(path)?;
    let dataset: BuildingDataset = parse_json(path, &contents)?;
    tracing::debug!(
        path = %path.display(),
        workflow = %dataset.workflow(),
        floors = dataset.floor_count(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Load a rate card, checking its version and every rate.
pub fn load_rate_card(path: &Path) -> EstimateResult<RateCard> {
    let contents = read_text(path)?;
    let rates: RateCard = parse_json(path, &contents)?;
    validate_version(&rates.version, RATE_CARD_VERSION)?;
    rates.validate()?;
    tracing::debug!(path = %path.display(), version = %rates.version, "loaded rate card");
    Ok(rates)
}

/// Load a previously saved report.
pub fn load_report(path: &Path) -> EstimateResult<ReportDocument> {
    let contents = read_text(path)?;
    let document: ReportDocument = parse_json(path, &contents)?;
    validate_version(&document.version, REPORT_VERSION)?;
    Ok(document)
}

/// Save a report with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_report(document: &ReportDocument, path: &Path) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(document)?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        EstimateError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        EstimateError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), "report saved");
    Ok(())
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// Check that a file version can be read by this build.
///
/// Major versions must match. While the major version is 0, a file with a
/// newer minor version is rejected.
fn validate_version(file_version: &str, expected: &str) -> EstimateResult<()> {
    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: expected.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = expected.split('.').filter_map(|p| p.parse().ok()).collect();

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [major, ..]) if file_major != major => Err(mismatch()),
        ([0, file_minor, ..], [0, minor, ..]) if file_minor > minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}
