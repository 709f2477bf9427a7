//! Loading of user point sets from a JSON file.

use serde::Deserialize;
use std::path::Path;
use tsudoi_core::models::LatLng;
use tsudoi_core::store::PointStore;
use tsudoi_core::{Result, TsudoiError};

/// One entry of the points file.
#[derive(Debug, Deserialize)]
pub struct PointEntry {
    pub lat: f64,
    pub lon: f64,
    /// Number of people at the location; defaults to one
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

/// Read a JSON array of point entries.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<PointEntry>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| TsudoiError::PointsFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| TsudoiError::PointsFile {
        path: path.display().to_string(),
        reason: format!("invalid JSON: {}", e),
    })
}

/// Load a points file into a fresh store, validating weights as each
/// point is registered.
pub fn load_into_store<P: AsRef<Path>>(path: P) -> Result<PointStore> {
    let store = PointStore::new();
    for entry in load(path)? {
        store.add(LatLng::new(entry.lat, entry.lon), entry.weight)?;
    }
    Ok(store)
}
