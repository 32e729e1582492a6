//! # Building Export
//!
//! Serializes the building collection to the pretty-printed JSON document the
//! download action ships, and parses such documents back. Round-tripping
//! preserves id, coordinates, and color exactly; the transient camera
//! distance is never written.

use chrono::Local;
use thiserror::Error;

use crate::model::Building;

/// Errors from the export/import wire format
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serialize the building collection as a pretty-printed JSON array
pub fn buildings_to_json(buildings: &[Building]) -> Result<String, ExportError> {
    let json = serde_json::to_string_pretty(buildings)?;
    tracing::info!("Exported {} buildings", buildings.len());
    Ok(json)
}

/// Parse a previously exported building collection
pub fn buildings_from_json(json: &str) -> Result<Vec<Building>, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// Suggested download file name: `edificios-{district}-{YYYY-MM-DD}.json`
pub fn export_file_name(district_id: &str) -> String {
    format!(
        "edificios-{}-{}.json",
        district_id,
        Local::now().format("%Y-%m-%d")
    )
}
