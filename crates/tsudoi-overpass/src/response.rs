//! Overpass API response types.
//!
//! The Overpass JSON envelope is a flat list of elements. Nodes carry a
//! direct `lat`/`lon`; ways and relations queried with `out center;`
//! carry a `center` object instead. Elements with neither have no usable
//! coordinate and are surfaced with `location: None` so the recommender
//! can discard them.

use serde::Deserialize;
use std::collections::HashMap;
use tsudoi_core::models::{LatLng, RawPoi};

/// Top-level Overpass response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// One raw OSM element.
#[derive(Debug, Deserialize)]
pub struct Element {
    /// Element kind: `"node"`, `"way"`, or `"relation"`.
    #[serde(rename = "type")]
    pub element_type: String,

    /// OSM id, unique within the element kind.
    pub id: u64,

    /// Direct coordinate (nodes).
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    /// Representative centre (ways/relations with `out center;`).
    pub center: Option<Center>,

    /// Free-form tag mapping; absent for untagged members.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Centre coordinate of an area feature.
#[derive(Debug, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl Element {
    /// Resolve the representative coordinate: direct location first,
    /// then the area centre.
    pub fn location(&self) -> Option<LatLng> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(LatLng::new(lat, lon)),
            _ => self.center.as_ref().map(|c| LatLng::new(c.lat, c.lon)),
        }
    }
}

impl From<Element> for RawPoi {
    fn from(element: Element) -> Self {
        let location = element.location();
        RawPoi {
            element_type: element.element_type,
            id: element.id,
            location,
            tags: element.tags,
        }
    }
}
