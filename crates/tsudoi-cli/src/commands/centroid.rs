use crate::cli::CentroidArgs;
use crate::{output, points_file};
use anyhow::{Context, Result};
use tsudoi_core::centroid::CentroidEngine;

pub fn run(args: &CentroidArgs, json: bool) -> Result<()> {
    let store = points_file::load_into_store(&args.points)
        .with_context(|| format!("loading points from {}", args.points.display()))?;

    let pair = CentroidEngine::compute(&store.points())
        .context("computing centroids")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pair)?);
    } else {
        output::print_centroids(&pair);
    }

    Ok(())
}
