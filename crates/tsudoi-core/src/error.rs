//! Error types for Tsudoi

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TsudoiError {
    // Point registration errors
    #[error("Invalid weight {weight}: every point must carry a weight of at least 1")]
    InvalidWeight { weight: i64 },

    // Centroid errors
    #[error("Cannot compute a centroid for an empty point set")]
    EmptyPointSet,

    // Recommendation errors
    #[error("All POI endpoints failed, last error: {message}")]
    RecommendationFetch { message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Input file errors
    #[error("Failed to read points file {path}: {reason}")]
    PointsFile { path: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TsudoiError>;
