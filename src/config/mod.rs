//! Configuration module for tierwise.

use crate::error::{Result, TierwiseError};
use crate::placement::{WeightProfile, DEFAULT_ALTERNATIVES, DEFAULT_PARALLEL_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TierwiseConfig {
    /// Placement engine configuration.
    pub placement: PlacementConfig,
    /// Defaults applied when building profiles from listings.
    pub ingest: IngestConfig,
    /// Observability configuration.
    pub observability: ObservabilityConfig,
}

impl TierwiseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TierwiseError::Config(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            TierwiseError::Config(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.placement.top_n == 0 {
            return Err(TierwiseError::InvalidConfig {
                field: "placement.top_n".to_string(),
                reason: "At least one recommendation is required".to_string(),
            });
        }

        if let Some(weights) = &self.placement.weights {
            weights.validate().map_err(|e| TierwiseError::InvalidConfig {
                field: "placement.weights".to_string(),
                reason: e.to_string(),
            })?;
        }

        if self.observability.log_level.trim().is_empty() {
            return Err(TierwiseError::InvalidConfig {
                field: "observability.log_level".to_string(),
                reason: "Log level must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Verbose configuration for local runs.
    pub fn development() -> Self {
        Self {
            placement: PlacementConfig {
                top_n: 5,
                parallel_batch: false,
                ..Default::default()
            },
            ingest: IngestConfig::default(),
            observability: ObservabilityConfig {
                log_level: "debug".to_string(),
                json_logs: false,
            },
        }
    }
}

/// Placement engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Ranked alternatives reported per analysis.
    pub top_n: usize,
    /// Fan batch analysis out over the rayon thread pool.
    pub parallel_batch: bool,
    /// Smallest batch that is analyzed in parallel.
    pub parallel_threshold: usize,
    /// Weight profile replacing the per-temperature defaults.
    pub weights: Option<WeightProfile>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_ALTERNATIVES,
            parallel_batch: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            weights: None,
        }
    }
}

/// Telemetry defaults for objects without access data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Assumed accesses over the last 7 days.
    pub default_access_count_7d: u64,
    /// Assumed accesses over the last 30 days.
    pub default_access_count_30d: u64,
    /// Reject objects whose storage class does not map to a tier
    /// instead of treating them as HOT.
    pub strict_storage_class: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level.
    pub log_level: String,
    /// Enable JSON logging.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
