//! Centroid engine: both centroid variants from one point-set snapshot.

use crate::error::{Result, TsudoiError};
use crate::geo;
use crate::models::{CentroidPair, GeoPoint};

/// Stateless centroid computation over a point-set snapshot.
pub struct CentroidEngine;

impl CentroidEngine {
    /// Compute the weighted and unweighted spherical centroids.
    ///
    /// Fails with [`TsudoiError::EmptyPointSet`] for an empty snapshot;
    /// the zero-point case must be rejected here rather than reaching the
    /// vector mean, which has no defined result for it.
    pub fn compute(points: &[GeoPoint]) -> Result<CentroidPair> {
        if points.is_empty() {
            return Err(TsudoiError::EmptyPointSet);
        }

        let weighted = geo::spherical_centroid(
            points.iter().map(|p| (p.location, f64::from(p.weight))),
        )
        .ok_or(TsudoiError::EmptyPointSet)?;

        let unweighted = geo::unweighted_centroid(points.iter().map(|p| p.location))
            .ok_or(TsudoiError::EmptyPointSet)?;

        Ok(CentroidPair { weighted, unweighted })
    }
}
