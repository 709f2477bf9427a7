//! Layered configuration: defaults, file, environment, CLI overrides.

use crate::error::{Result, TsudoiError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Public Overpass mirrors tried in order when none are configured.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://overpass-api.de/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
    "https://overpass.osm.jp/api/interpreter",
];

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Tsudoi
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// POI endpoints, tried in order (failover)
    pub endpoints: ConfigValue<Vec<String>>,
    /// Search radius around the centroid, in kilometres
    pub radius_km: ConfigValue<f64>,
    /// Result cap per category
    pub max_per_category: ConfigValue<usize>,
    /// Client-side HTTP timeout, in seconds
    pub timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            endpoints: ConfigValue::new(
                DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
                ConfigSource::Default,
            ),
            radius_km: ConfigValue::new(10.0, ConfigSource::Default),
            max_per_category: ConfigValue::new(5, ConfigSource::Default),
            timeout_secs: ConfigValue::new(25, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| TsudoiError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| TsudoiError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(endpoints) = file_config.endpoints {
            self.endpoints.update(endpoints, ConfigSource::File);
        }

        if let Some(radius_km) = file_config.radius_km {
            self.radius_km.update(radius_km, ConfigSource::File);
        }

        if let Some(max_per_category) = file_config.max_per_category {
            self.max_per_category.update(max_per_category, ConfigSource::File);
        }

        if let Some(timeout_secs) = file_config.timeout_secs {
            self.timeout_secs.update(timeout_secs, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // TSUDOI_ENDPOINTS (comma-separated)
        if let Ok(raw) = env::var("TSUDOI_ENDPOINTS") {
            let endpoints: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if endpoints.is_empty() {
                tracing::warn!("TSUDOI_ENDPOINTS is set but contains no endpoints");
            } else {
                self.endpoints.update(endpoints, ConfigSource::Environment);
            }
        }

        // TSUDOI_RADIUS_KM
        if let Ok(raw) = env::var("TSUDOI_RADIUS_KM") {
            match raw.parse::<f64>() {
                Ok(radius) => self.radius_km.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TSUDOI_RADIUS_KM value '{}': expected a number of kilometres",
                    raw
                ),
            }
        }

        // TSUDOI_MAX_PER_CATEGORY
        if let Ok(raw) = env::var("TSUDOI_MAX_PER_CATEGORY") {
            match raw.parse::<usize>() {
                Ok(cap) => self.max_per_category.update(cap, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TSUDOI_MAX_PER_CATEGORY value '{}': expected an integer",
                    raw
                ),
            }
        }

        // TSUDOI_TIMEOUT_SECS
        if let Ok(raw) = env::var("TSUDOI_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) => self.timeout_secs.update(secs, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TSUDOI_TIMEOUT_SECS value '{}': expected whole seconds",
                    raw
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(endpoints) = overrides.endpoints {
            self.endpoints.update(endpoints, ConfigSource::Cli);
        }

        if let Some(radius_km) = overrides.radius_km {
            self.radius_km.update(radius_km, ConfigSource::Cli);
        }

        if let Some(max_per_category) = overrides.max_per_category {
            self.max_per_category.update(max_per_category, ConfigSource::Cli);
        }

        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs.update(timeout_secs, ConfigSource::Cli);
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    endpoints: Option<Vec<String>>,
    radius_km: Option<f64>,
    max_per_category: Option<usize>,
    timeout_secs: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub endpoints: Option<Vec<String>>,
    pub radius_km: Option<f64>,
    pub max_per_category: Option<usize>,
    pub timeout_secs: Option<u64>,
}
