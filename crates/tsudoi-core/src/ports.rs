//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

use crate::error::Result;
use crate::models::{LatLng, RawPoi};
use crate::rules::TagSelector;
use async_trait::async_trait;

/// Port for an external point-of-interest query service.
///
/// A request is a bounding search: a centre coordinate, a radius in
/// metres, and the tag selectors describing the feature types wanted.
/// Implementations return raw feature records with their coordinate
/// already resolved (direct location, or the area centre when the source
/// only provides one of those).
#[async_trait]
pub trait PoiSource: Send + Sync {
    /// Query features within `radius_m` metres of `center`.
    async fn query(
        &self,
        center: LatLng,
        radius_m: u32,
        selectors: &[TagSelector],
    ) -> Result<Vec<RawPoi>>;
}

/// Observer notified when the underlying point set changes.
///
/// Point-store mutation is the sole staleness trigger for derived state:
/// components holding a computed centroid or recommendation implement
/// this and discard their state when called.
pub trait Invalidate: Send + Sync {
    fn invalidate(&self);
}
