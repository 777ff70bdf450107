// Multi-factor placement scoring

use super::catalog::StorageOption;
use crate::error::{Result, TierwiseError};
use crate::types::{DataProfile, Temperature};
use serde::{Deserialize, Serialize};

/// Worst-case storage price used to normalize the cost sub-score ($/GB-month)
pub const COST_CEILING_PER_GB: f64 = 0.05;

/// Tolerance when checking that weights sum to one
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative weights of the four sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub cost: f64,
    pub performance: f64,
    pub access_match: f64,
    pub availability: f64,
}

/// Weight profiles in `Temperature::ALL` order.
const WEIGHT_PROFILES: [WeightProfile; 4] = [
    // HOT: performance dominates
    WeightProfile::new(0.30, 0.40, 0.20, 0.10),
    // WARM
    WeightProfile::new(0.45, 0.25, 0.20, 0.10),
    // COLD
    WeightProfile::new(0.60, 0.05, 0.30, 0.05),
    // ARCHIVE
    WeightProfile::new(0.60, 0.05, 0.30, 0.05),
];

/// Compatibility of data temperature (rows) with a canonical tier (columns),
/// both in `Temperature::ALL` order.
const ACCESS_MATCH: [[f64; 4]; 4] = [
    [100.0, 60.0, 20.0, 0.0],
    [70.0, 100.0, 50.0, 10.0],
    [40.0, 70.0, 100.0, 60.0],
    [0.0, 20.0, 70.0, 100.0],
];

impl WeightProfile {
    pub const fn new(cost: f64, performance: f64, access_match: f64, availability: f64) -> Self {
        Self {
            cost,
            performance,
            access_match,
            availability,
        }
    }

    /// The built-in profile for a data temperature.
    pub fn for_temperature(temperature: Temperature) -> Self {
        WEIGHT_PROFILES[temperature.index()]
    }

    pub fn sum(&self) -> f64 {
        self.cost + self.performance + self.access_match + self.availability
    }

    /// Weights must be finite, non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("cost", self.cost),
            ("performance", self.performance),
            ("access_match", self.access_match),
            ("availability", self.availability),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TierwiseError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(TierwiseError::InvalidWeights(format!(
                "weights must sum to 1.0, got {:.6}",
                sum
            )));
        }

        Ok(())
    }
}

/// Compatibility score of a canonical tier for data of the given temperature.
pub fn access_match_score(temperature: Temperature, tier: Temperature) -> f64 {
    ACCESS_MATCH[temperature.index()][tier.index()]
}

/// The four sub-scores of one option and their weighted total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cost: f64,
    pub performance: f64,
    pub access_match: f64,
    pub availability: f64,
    pub weights: WeightProfile,
    /// Weighted sum rounded to two decimals
    pub total: f64,
}

/// Scores storage options against a data profile.
#[derive(Debug, Clone, Default)]
pub struct PlacementScorer {
    /// Replaces the per-temperature profiles when set
    weights_override: Option<WeightProfile>,
}

impl PlacementScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores every temperature with one custom weight profile.
    pub fn with_weights(weights: WeightProfile) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights_override: Some(weights),
        })
    }

    /// Weight profile used for data of `temperature`.
    pub fn weights_for(&self, temperature: Temperature) -> WeightProfile {
        self.weights_override
            .unwrap_or_else(|| WeightProfile::for_temperature(temperature))
    }

    /// Score in [0, 100], rounded to two decimals.
    pub fn score(&self, profile: &DataProfile, option: &StorageOption, temperature: Temperature) -> f64 {
        self.breakdown(profile, option, temperature).total
    }

    pub fn breakdown(
        &self,
        profile: &DataProfile,
        option: &StorageOption,
        temperature: Temperature,
    ) -> ScoreBreakdown {
        let weights = self.weights_for(temperature);

        let cost = Self::cost_score(profile, option);
        let performance = Self::performance_score(option, temperature);
        let access_match = access_match_score(temperature, option.tier);
        let availability = option.availability_sla;

        let total = cost * weights.cost
            + performance * weights.performance
            + access_match * weights.access_match
            + availability * weights.availability;

        ScoreBreakdown {
            cost,
            performance,
            access_match,
            availability,
            weights,
            total: round2(total),
        }
    }

    /// Cheaper is better; anything at or above the ceiling price scores 0.
    fn cost_score(profile: &DataProfile, option: &StorageOption) -> f64 {
        let monthly = option.monthly_cost(profile);
        let ceiling = profile.size_gb * COST_CEILING_PER_GB;
        (100.0 - (monthly / ceiling) * 100.0).max(0.0)
    }

    /// Latency tolerance grows as data gets colder.
    fn performance_score(option: &StorageOption, temperature: Temperature) -> f64 {
        let penalty = match temperature {
            Temperature::Hot => (option.latency_ms / 100.0) * 100.0,
            Temperature::Warm => (option.latency_ms / 1000.0) * 100.0,
            Temperature::Cold | Temperature::Archive => (option.latency_ms / 10000.0) * 50.0,
        };
        (100.0 - penalty).max(0.0)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
