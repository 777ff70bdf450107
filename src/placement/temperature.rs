// Access temperature classification

use crate::types::{DataProfile, Temperature};
use chrono::NaiveDateTime;

/// Count thresholds for the classification rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureThresholds {
    /// ARCHIVE: no accesses in 7 days and at most this many in 30
    pub archive_max_30d: u64,
    /// COLD: at most this many accesses in 7 days...
    pub cold_max_7d: u64,
    /// ...and fewer than this many in 30
    pub cold_below_30d: u64,
    /// WARM: fewer than this many accesses in 7 days...
    pub warm_below_7d: u64,
    /// ...and fewer than this many in 30
    pub warm_below_30d: u64,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            archive_max_30d: 1,
            cold_max_7d: 1,
            cold_below_30d: 5,
            warm_below_7d: 10,
            warm_below_30d: 15,
        }
    }
}

/// Maps access counts onto a canonical temperature.
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. `ARCHIVE` when there were no accesses in 7 days and at most one in 30
/// 2. `COLD` when there was at most one access in 7 days and fewer than 5 in 30
/// 3. `WARM` when there were fewer than 10 accesses in 7 days and fewer than 15 in 30
/// 4. `HOT` otherwise
///
/// Days since the last access are accepted but never override the counts.
#[derive(Debug, Clone, Default)]
pub struct TemperatureClassifier {
    thresholds: TemperatureThresholds,
}

impl TemperatureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thresholds(&self) -> &TemperatureThresholds {
        &self.thresholds
    }

    pub fn classify(
        &self,
        access_count_7d: u64,
        access_count_30d: u64,
        _days_since_access: i64,
    ) -> Temperature {
        let t = &self.thresholds;

        if access_count_7d == 0 && access_count_30d <= t.archive_max_30d {
            Temperature::Archive
        } else if access_count_7d <= t.cold_max_7d && access_count_30d < t.cold_below_30d {
            Temperature::Cold
        } else if access_count_7d < t.warm_below_7d && access_count_30d < t.warm_below_30d {
            Temperature::Warm
        } else {
            Temperature::Hot
        }
    }

    /// Classifies a profile as of `now`.
    pub fn classify_profile(&self, profile: &DataProfile, now: NaiveDateTime) -> Temperature {
        self.classify(
            profile.access_count_7d,
            profile.access_count_30d,
            profile.days_since_access(now),
        )
    }
}
