//! Observability module for tierwise.
//!
//! Installs the logging subscriber and records placement metrics through the
//! `metrics` facade. Metrics are no-ops until the embedding application
//! installs a recorder.

use crate::config::ObservabilityConfig;
use crate::error::{Result, TierwiseError};
use crate::types::Temperature;
use metrics::{counter, gauge};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TierwiseError::InvalidConfig {
            field: "observability.log_level".to_string(),
            reason: e.to_string(),
        })?;

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| TierwiseError::Internal(format!("Failed to init logging: {}", e)))?;
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| TierwiseError::Internal(format!("Failed to init logging: {}", e)))?;
    }

    info!(level = %config.log_level, json = config.json_logs, "Observability initialized");
    Ok(())
}

/// Record one analyzed profile.
pub fn record_analysis(temperature: Temperature, is_optimal: bool) {
    counter!("tierwise_profiles_analyzed_total", "temperature" => temperature.as_str()).increment(1);

    if !is_optimal {
        counter!("tierwise_profiles_misplaced_total", "temperature" => temperature.as_str())
            .increment(1);
    }
}

/// Record a cost lookup that fell back to the default pricing.
pub fn record_fallback_pricing() {
    counter!("tierwise_fallback_pricing_total").increment(1);
}

/// Record a completed batch.
pub fn record_batch(objects: usize, potential_monthly_savings: f64) {
    counter!("tierwise_batches_total").increment(1);
    counter!("tierwise_batch_objects_total").increment(objects as u64);
    gauge!("tierwise_fleet_potential_savings_usd").set(potential_monthly_savings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorders_without_installed_recorder() {
        // No recorder installed: every call is a no-op
        record_analysis(Temperature::Cold, false);
        record_analysis(Temperature::Hot, true);
        record_fallback_pricing();
        record_batch(10, 4.2);
    }

    #[test]
    fn test_init_rejects_bad_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = ObservabilityConfig {
            log_level: "tierwise=loud".to_string(),
            json_logs: false,
        };
        assert!(init(&config).is_err());
    }
}
