use crate::cli::RecommendArgs;
use crate::{output, points_file};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tsudoi_core::cache::RecommendationCache;
use tsudoi_core::centroid::CentroidEngine;
use tsudoi_core::config::{CliConfigOverrides, LayeredConfig};
use tsudoi_core::recommend::Recommender;
use tsudoi_overpass::OverpassSource;

pub async fn run(args: RecommendArgs, config_file: Option<PathBuf>, json: bool) -> Result<()> {
    // Layered config: defaults < file < env < CLI flags
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = config_file {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("loading config from {}", path.display()))?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        endpoints: if args.endpoints.is_empty() { None } else { Some(args.endpoints) },
        radius_km: args.radius_km,
        max_per_category: args.max_per_category,
        timeout_secs: args.timeout_secs,
    });

    let store = points_file::load_into_store(&args.points)
        .with_context(|| format!("loading points from {}", args.points.display()))?;
    let pair = CentroidEngine::compute(&store.points()).context("computing centroids")?;

    let source = OverpassSource::new(config.endpoints.value.clone(), config.timeout_secs.value)?;
    let cache = Arc::new(RecommendationCache::new(
        Recommender::new(source),
        config.max_per_category.value,
    ));
    store.register_observer(cache.clone());

    // Prefetch against the weighted centroid, then await the result
    cache.start(pair.weighted, config.radius_km.value);
    let outcome = cache
        .subscribe()
        .await
        .context("recommendation fetch was cancelled")?;

    match outcome {
        Ok(set) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&set)?);
            } else {
                output::print_centroids(&pair);
                output::print_recommendations(&set);
            }
            Ok(())
        }
        Err(message) => bail!("recommendation fetch failed: {message}"),
    }
}
