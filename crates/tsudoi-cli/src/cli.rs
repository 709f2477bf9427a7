use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tsudoi - weighted meeting-point and nearby-POI recommendations
#[derive(Parser, Debug)]
#[command(name = "tsudoi")]
#[command(about = "Weighted meeting-point and nearby-POI recommendations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the weighted and unweighted centroids of a point set
    Centroid(CentroidArgs),

    /// Recommend POIs around the weighted centroid
    Recommend(RecommendArgs),
}

#[derive(Parser, Debug)]
pub struct CentroidArgs {
    /// Points file: a JSON array of {"lat", "lon", "weight"} objects
    pub points: PathBuf,
}

#[derive(Parser, Debug)]
pub struct RecommendArgs {
    /// Points file: a JSON array of {"lat", "lon", "weight"} objects
    pub points: PathBuf,

    /// Search radius in kilometres
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Maximum results per category
    #[arg(long)]
    pub max_per_category: Option<usize>,

    /// Overpass endpoint, repeatable; tried in order (failover)
    #[arg(long = "endpoint")]
    pub endpoints: Vec<String>,

    /// Client-side HTTP timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
