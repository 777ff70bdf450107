//! Core types shared across the placement engine.

use crate::error::{Result, TierwiseError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cloud provider hosting a storage option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    /// All providers in catalog order.
    pub const ALL: [Provider; 3] = [Provider::Aws, Provider::Azure, Provider::Gcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Azure => "AZURE",
            Provider::Gcp => "GCP",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Provider::Aws => 0,
            Provider::Azure => 1,
            Provider::Gcp => 2,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = TierwiseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AWS" | "S3" => Ok(Provider::Aws),
            "AZURE" => Ok(Provider::Azure),
            "GCP" | "GCS" => Ok(Provider::Gcp),
            _ => Err(TierwiseError::UnknownProvider(s.to_string())),
        }
    }
}

/// Canonical access temperature of a data object.
///
/// Also used as the canonical tier of a storage option: every provider's
/// native storage class maps onto exactly one temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Temperature {
    Hot,
    Warm,
    Cold,
    Archive,
}

impl Temperature {
    /// All temperatures, hottest first. This is also the catalog tier order.
    pub const ALL: [Temperature; 4] = [
        Temperature::Hot,
        Temperature::Warm,
        Temperature::Cold,
        Temperature::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Temperature::Hot => "HOT",
            Temperature::Warm => "WARM",
            Temperature::Cold => "COLD",
            Temperature::Archive => "ARCHIVE",
        }
    }

    /// Row/column position in the per-temperature tables.
    pub(crate) fn index(&self) -> usize {
        match self {
            Temperature::Hot => 0,
            Temperature::Warm => 1,
            Temperature::Cold => 2,
            Temperature::Archive => 3,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Temperature {
    type Err = TierwiseError;

    /// Parses a canonical temperature name. Provider-specific labels such as
    /// Azure's `COOL` go through [`crate::placement::CostModel::resolve_tier`].
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HOT" => Ok(Temperature::Hot),
            "WARM" => Ok(Temperature::Warm),
            "COLD" => Ok(Temperature::Cold),
            "ARCHIVE" => Ok(Temperature::Archive),
            _ => Err(TierwiseError::Validation(format!("unknown temperature: {}", s))),
        }
    }
}

/// Access summary of one data object, the unit of analysis.
///
/// `last_accessed` is a naive UTC instant; conversion from zoned timestamps
/// happens once in [`crate::ingest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataProfile {
    /// Object key or file name.
    pub file_id: String,
    /// Object size in GB.
    pub size_gb: f64,
    /// Accesses during the last 7 days.
    pub access_count_7d: u64,
    /// Accesses during the last 30 days.
    pub access_count_30d: u64,
    /// Last access, naive UTC.
    pub last_accessed: NaiveDateTime,
    /// Provider currently holding the object.
    pub current_provider: Provider,
    /// Canonical tier the object currently sits in.
    pub current_tier: Temperature,
}

impl DataProfile {
    /// Creates a profile with no recorded accesses, last accessed at `last_accessed`.
    pub fn new(
        file_id: impl Into<String>,
        size_gb: f64,
        last_accessed: NaiveDateTime,
        current_provider: Provider,
        current_tier: Temperature,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            size_gb,
            access_count_7d: 0,
            access_count_30d: 0,
            last_accessed,
            current_provider,
            current_tier,
        }
    }

    /// Sets the 7-day and 30-day access counts.
    pub fn with_access_counts(mut self, access_count_7d: u64, access_count_30d: u64) -> Self {
        self.access_count_7d = access_count_7d;
        self.access_count_30d = access_count_30d;
        self
    }

    /// Whole days between the last access and `now`.
    pub fn days_since_access(&self, now: NaiveDateTime) -> i64 {
        (now - self.last_accessed).num_days()
    }

    /// Rejects profiles that cannot be scored.
    pub fn validate_at(&self, now: NaiveDateTime) -> Result<()> {
        if !self.size_gb.is_finite() || self.size_gb <= 0.0 {
            return Err(TierwiseError::ProfileRejected {
                file_id: self.file_id.clone(),
                reason: format!("size_gb must be a positive number, got {}", self.size_gb),
            });
        }

        if self.last_accessed > now {
            return Err(TierwiseError::ProfileRejected {
                file_id: self.file_id.clone(),
                reason: format!(
                    "last_accessed {} is later than the evaluation time {}",
                    self.last_accessed, now
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("aws".parse::<Provider>().unwrap(), Provider::Aws);
        assert_eq!(" Azure ".parse::<Provider>().unwrap(), Provider::Azure);
        assert_eq!("GCS".parse::<Provider>().unwrap(), Provider::Gcp);
        assert!(matches!(
            "oracle".parse::<Provider>(),
            Err(TierwiseError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_temperature_serde_names() {
        let json = serde_json::to_string(&Temperature::Archive).unwrap();
        assert_eq!(json, "\"ARCHIVE\"");
        let back: Temperature = serde_json::from_str("\"WARM\"").unwrap();
        assert_eq!(back, Temperature::Warm);
        assert!("cool".parse::<Temperature>().is_err());
    }

    #[test]
    fn test_days_since_access() {
        let profile = DataProfile::new("a", 1.0, noon() - Duration::days(61), Provider::Aws, Temperature::Hot);
        assert_eq!(profile.days_since_access(noon()), 61);

        let same_day = DataProfile::new("b", 1.0, noon() - Duration::hours(23), Provider::Aws, Temperature::Hot);
        assert_eq!(same_day.days_since_access(noon()), 0);
    }

    #[test]
    fn test_validation() {
        let ok = DataProfile::new("ok", 0.5, noon(), Provider::Gcp, Temperature::Cold);
        assert!(ok.validate_at(noon()).is_ok());

        let zero = DataProfile { size_gb: 0.0, ..ok.clone() };
        assert!(zero.validate_at(noon()).unwrap_err().is_validation());

        let nan = DataProfile { size_gb: f64::NAN, ..ok.clone() };
        assert!(nan.validate_at(noon()).is_err());

        let future = DataProfile {
            last_accessed: noon() + Duration::seconds(1),
            ..ok
        };
        assert!(matches!(
            future.validate_at(noon()),
            Err(TierwiseError::ProfileRejected { .. })
        ));
    }
}
