//! HTTP source with mirror failover.

use crate::query::build_query;
use crate::response::OverpassResponse;
use async_trait::async_trait;
use std::time::Duration;
use tsudoi_core::error::{Result, TsudoiError};
use tsudoi_core::models::{LatLng, RawPoi};
use tsudoi_core::ports::PoiSource;
use tsudoi_core::rules::TagSelector;

/// Overpass implementation of the POI source port.
///
/// Holds an ordered list of equivalent mirrors. Each call tries the
/// mirrors in order, each at most once; the first success wins and
/// partial data from one mirror is never merged with another attempt.
pub struct OverpassSource {
    endpoints: Vec<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OverpassSource {
    /// Create a source over the given mirrors with a client-side
    /// timeout bounding each attempt.
    pub fn new(endpoints: Vec<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TsudoiError::ConfigInvalid {
                key: "timeout_secs".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { endpoints, timeout_secs, client })
    }

    /// One attempt against one mirror.
    async fn try_endpoint(
        &self,
        endpoint: &str,
        query: &str,
    ) -> std::result::Result<OverpassResponse, String> {
        let response = self
            .client
            .post(endpoint)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", endpoint, e))?;

        if !response.status().is_success() {
            return Err(format!("{} returned HTTP {}", endpoint, response.status()));
        }

        response
            .json::<OverpassResponse>()
            .await
            .map_err(|e| format!("failed to decode response from {}: {}", endpoint, e))
    }
}

#[async_trait]
impl PoiSource for OverpassSource {
    async fn query(
        &self,
        center: LatLng,
        radius_m: u32,
        selectors: &[TagSelector],
    ) -> Result<Vec<RawPoi>> {
        let query = build_query(center, radius_m, selectors, self.timeout_secs);

        let mut last_error = String::from("no endpoints configured");
        for endpoint in &self.endpoints {
            match self.try_endpoint(endpoint, &query).await {
                Ok(response) => {
                    tracing::debug!(
                        endpoint,
                        elements = response.elements.len(),
                        "overpass query succeeded"
                    );
                    return Ok(response.elements.into_iter().map(RawPoi::from).collect());
                }
                Err(message) => {
                    tracing::warn!(endpoint, %message, "overpass mirror failed, trying next");
                    last_error = message;
                }
            }
        }

        Err(TsudoiError::RecommendationFetch { message: last_error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_endpoints_fails_without_network() {
        let source = OverpassSource::new(Vec::new(), 25).unwrap();

        let err = source
            .query(LatLng::new(35.0, 135.0), 10000, &[TagSelector::present("historic")])
            .await
            .unwrap_err();

        match err {
            TsudoiError::RecommendationFetch { message } => {
                assert_eq!(message, "no endpoints configured");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_mirrors_surface_last_error() {
        // Reserved TEST-NET addresses: connections fail fast without
        // depending on external services
        let source = OverpassSource::new(
            vec![
                "http://192.0.2.1:1/api/interpreter".to_string(),
                "http://192.0.2.2:1/api/interpreter".to_string(),
            ],
            1,
        )
        .unwrap();

        let err = source
            .query(LatLng::new(35.0, 135.0), 1000, &[TagSelector::present("historic")])
            .await
            .unwrap_err();

        match err {
            TsudoiError::RecommendationFetch { message } => {
                assert!(message.contains("192.0.2.2"), "last mirror's error wins: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
