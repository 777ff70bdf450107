//! Object listings and access telemetry to placement profiles.
//!
//! Provider listing clients and the access-log pipeline live outside this
//! crate; they hand over [`ObjectMetadata`] and, when available,
//! [`AccessTelemetry`]. This is the one place timezone-aware timestamps are
//! converted to naive UTC.

use crate::config::IngestConfig;
use crate::error::{Result, TierwiseError};
use crate::observability;
use crate::placement::CostModel;
use crate::types::{DataProfile, Provider, Temperature};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Bytes per GB (binary).
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// One object as returned by a provider listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub key: String,
    pub size_bytes: u64,
    pub last_modified: DateTime<FixedOffset>,
    pub provider: Provider,
    /// Native storage class; providers omit it for their default class
    #[serde(default)]
    pub storage_class: Option<String>,
}

/// Access counts collected for one object.
///
/// Counts are signed so that corrupt upstream samples can be rejected
/// rather than silently wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessTelemetry {
    pub access_count_7d: i64,
    pub access_count_30d: i64,
    pub last_accessed: DateTime<FixedOffset>,
}

/// A listed object with whatever telemetry exists for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedObject {
    #[serde(flatten)]
    pub metadata: ObjectMetadata,
    #[serde(default)]
    pub telemetry: Option<AccessTelemetry>,
}

/// Converts a timezone-aware instant to naive UTC.
pub fn normalize_to_utc(timestamp: DateTime<FixedOffset>) -> NaiveDateTime {
    timestamp.naive_utc()
}

pub fn bytes_to_gb(size_bytes: u64) -> f64 {
    size_bytes as f64 / BYTES_PER_GB
}

/// Builds [`DataProfile`]s from listings.
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    config: IngestConfig,
}

impl ProfileBuilder {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Canonical tier of a listed object.
    ///
    /// A missing storage class is the provider's default (hot) class. An
    /// unrecognized one is treated as HOT, matching the pricing fallback,
    /// unless `strict_storage_class` is set.
    pub fn resolve_tier(&self, metadata: &ObjectMetadata) -> Result<Temperature> {
        let label = match metadata.storage_class.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => return Ok(Temperature::Hot),
        };

        if let Some(tier) = CostModel::resolve_tier(metadata.provider, label) {
            return Ok(tier);
        }

        if self.config.strict_storage_class {
            return Err(TierwiseError::UnknownTier {
                provider: metadata.provider.to_string(),
                label: label.to_string(),
            });
        }

        warn!(
            key = %metadata.key,
            provider = %metadata.provider,
            storage_class = label,
            "Unknown storage class, treating object as HOT"
        );
        observability::record_fallback_pricing();
        Ok(Temperature::Hot)
    }

    /// Profile for one object as of `now`.
    ///
    /// Without telemetry the configured default counts are used and the
    /// object counts as last accessed when it was last modified.
    pub fn profile_at(
        &self,
        metadata: &ObjectMetadata,
        telemetry: Option<&AccessTelemetry>,
        now: NaiveDateTime,
    ) -> Result<DataProfile> {
        if metadata.size_bytes == 0 {
            return Err(TierwiseError::InvalidProfile {
                field: "size_bytes".to_string(),
                reason: format!("{} is empty", metadata.key),
            });
        }

        let (access_count_7d, access_count_30d, last_accessed) = match telemetry {
            Some(t) => (
                non_negative("access_count_7d", t.access_count_7d)?,
                non_negative("access_count_30d", t.access_count_30d)?,
                normalize_to_utc(t.last_accessed),
            ),
            None => (
                self.config.default_access_count_7d,
                self.config.default_access_count_30d,
                normalize_to_utc(metadata.last_modified),
            ),
        };

        if last_accessed > now {
            return Err(TierwiseError::InvalidProfile {
                field: "last_accessed".to_string(),
                reason: format!("{} is in the future ({} > {})", metadata.key, last_accessed, now),
            });
        }

        let tier = self.resolve_tier(metadata)?;

        debug!(
            key = %metadata.key,
            size_bytes = metadata.size_bytes,
            tier = %tier,
            has_telemetry = telemetry.is_some(),
            "Built profile"
        );

        Ok(DataProfile::new(
            metadata.key.clone(),
            bytes_to_gb(metadata.size_bytes),
            last_accessed,
            metadata.provider,
            tier,
        )
        .with_access_counts(access_count_7d, access_count_30d))
    }

    /// Profiles for a whole listing, in listing order.
    pub fn profiles_at(&self, listing: &[ListedObject], now: NaiveDateTime) -> Result<Vec<DataProfile>> {
        listing
            .iter()
            .map(|object| self.profile_at(&object.metadata, object.telemetry.as_ref(), now))
            .collect()
    }
}

fn non_negative(field: &str, count: i64) -> Result<u64> {
    u64::try_from(count).map_err(|_| TierwiseError::InvalidProfile {
        field: field.to_string(),
        reason: format!("access count must be non-negative, got {}", count),
    })
}
