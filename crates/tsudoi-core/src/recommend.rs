//! POI recommender: turn a centroid and radius into ranked,
//! categorized, deduplicated nearby points of interest.

use crate::error::Result;
use crate::geo;
use crate::models::{LatLng, PoiRecord, RawPoi, RecommendationSet};
use crate::ports::PoiSource;
use crate::rules;
use std::collections::HashSet;

/// Name substituted for records whose source tags carry no `name`.
pub const UNNAMED_PLACEHOLDER: &str = "(unnamed)";

/// Recommendation pipeline over an abstract POI source.
pub struct Recommender<S: PoiSource> {
    source: S,
}

impl<S: PoiSource> Recommender<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Produce ranked recommendations around `center`.
    ///
    /// A radius of zero or less is a defined edge case: the result is an
    /// empty set and no query is issued. The zero check applies to the
    /// radius in kilometres, before the metre conversion.
    pub async fn recommend(
        &self,
        center: LatLng,
        radius_km: f64,
        max_per_category: usize,
    ) -> Result<RecommendationSet> {
        if radius_km <= 0.0 {
            tracing::debug!(radius_km, "non-positive radius, skipping POI query");
            return Ok(RecommendationSet::new());
        }

        let radius_m = (radius_km * 1000.0).round() as u32;
        let selectors = rules::query_selectors();

        // Phase 1: bounding query against the source
        let raw = self.source.query(center, radius_m, &selectors).await?;
        tracing::debug!(count = raw.len(), "received raw POI records");

        // Phase 2: dedupe, classify, measure
        let records = Self::refine(center, raw);

        // Phase 3: group per category, rank by distance, cap
        let mut grouped = RecommendationSet::new();
        for record in records {
            grouped.entry(record.category).or_default().push(record);
        }
        for list in grouped.values_mut() {
            list.sort_by(|a, b| {
                a.distance_km.partial_cmp(&b.distance_km).unwrap_or(std::cmp::Ordering::Equal)
            });
            list.truncate(max_per_category);
        }

        Ok(grouped)
    }

    /// Discard unusable records, dedupe by composite key (first
    /// occurrence wins), classify, and compute distances.
    fn refine(center: LatLng, raw: Vec<RawPoi>) -> Vec<PoiRecord> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for poi in raw {
            // No resolvable coordinate: nothing to rank
            let Some(location) = poi.location else {
                continue;
            };

            let key = poi.key();
            if !seen.insert(key.clone()) {
                continue;
            }

            // Unmatched tags fall outside every category
            let Some(category) = rules::classify(&poi.tags) else {
                continue;
            };

            let name = poi
                .tags
                .get("name")
                .cloned()
                .unwrap_or_else(|| UNNAMED_PLACEHOLDER.to_string());

            records.push(PoiRecord {
                key,
                name,
                location,
                category,
                distance_km: geo::distance_km(center, location),
            });
        }

        records
    }
}
