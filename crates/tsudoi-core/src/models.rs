//! Domain models for points, centroids, and POI records

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Stable identifier for a registered point.
///
/// Assigned from a monotonic counter and never reused, even after the
/// point is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A coordinate in degrees (WGS 84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A registered point with the number of people at that location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub id: PointId,
    pub location: LatLng,
    /// How many people the point represents. Always >= 1.
    pub weight: u32,
}

/// Both centroid variants for one point-set snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentroidPair {
    /// Spherical mean with each point scaled by its weight
    pub weighted: LatLng,
    /// Spherical mean with every weight fixed to 1
    pub unweighted: LatLng,
}

/// Category a point of interest is classified into.
///
/// The variant order here is cosmetic; classification priority lives in
/// the ordered rule table in [`crate::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoiCategory {
    HotSpring,
    Historic,
    SkiResort,
    Leisure,
    Dining,
    Lodging,
    Nightlife,
}

impl PoiCategory {
    /// Human-readable label for display layers.
    pub fn label(&self) -> &'static str {
        match self {
            PoiCategory::HotSpring => "Hot springs",
            PoiCategory::Historic => "Historic sites",
            PoiCategory::SkiResort => "Ski resorts",
            PoiCategory::Leisure => "Leisure",
            PoiCategory::Dining => "Dining",
            PoiCategory::Lodging => "Lodging",
            PoiCategory::Nightlife => "Nightlife",
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A ranked point of interest produced for one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    /// Source composite key, `"{element_type}/{id}"`. Deduplication key.
    pub key: String,
    pub name: String,
    pub location: LatLng,
    pub category: PoiCategory,
    /// Great-circle distance from the request centre, in kilometres
    pub distance_km: f64,
}

/// A raw feature as returned by a POI source, before classification.
///
/// `location` is already resolved by the adapter: a direct coordinate
/// when the source provided one, otherwise the source's area centre.
/// `None` means neither was available and the record must be discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoi {
    pub element_type: String,
    pub id: u64,
    pub location: Option<LatLng>,
    pub tags: HashMap<String, String>,
}

impl RawPoi {
    /// Composite deduplication key, e.g. `"node/42"`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.element_type, self.id)
    }
}

/// Recommendation output: per category, records ascending by distance,
/// truncated to the requested cap.
pub type RecommendationSet = BTreeMap<PoiCategory, Vec<PoiRecord>>;
