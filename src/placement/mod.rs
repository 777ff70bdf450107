//! Storage Placement Engine
//!
//! Decides where a data object should live across cloud providers and
//! storage tiers, given what is already known about how it is accessed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Placement Engine                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐ │
//! │  │  Cost    │   │  Scorer  │   │Recommend │   │ Analyzer │ │
//! │  │  Model   │──▶│ 4 factor │──▶│  top-N   │──▶│ savings  │ │
//! │  └──────────┘   └──────────┘   └──────────┘   └──────────┘ │
//! │  ┌──────────┐        ▲                              │       │
//! │  │Temperature│───────┘                              ▼       │
//! │  │Classifier│                               ┌──────────┐   │
//! │  └──────────┘                               │  Batch   │   │
//! │                                             │ Analyzer │   │
//! │                                             └──────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Scoring
//!
//! Every one of the 12 catalog options (AWS, Azure, GCP × HOT, WARM, COLD,
//! ARCHIVE) is scored from 0 to 100 as a weighted sum of:
//!
//! - **Cost**: projected monthly storage + retrieval cost against a $0.05/GB ceiling
//! - **Performance**: latency, judged more leniently the colder the data
//! - **Access match**: how well the tier suits the data's temperature
//! - **Availability**: the provider's SLA percentage
//!
//! The weights depend on the data temperature; cold and archive data weigh
//! cost heaviest, hot data weighs performance heaviest.
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use tierwise::placement::PlacementEngine;
//! use tierwise::{DataProfile, Provider, Temperature};
//!
//! let engine = PlacementEngine::default();
//! let profile = DataProfile::new(
//!     "backups/2023.tar",
//!     50.0,
//!     (Utc::now() - Duration::days(61)).naive_utc(),
//!     Provider::Aws,
//!     Temperature::Hot,
//! )
//! .with_access_counts(0, 1);
//!
//! let record = engine.analyze(&profile).unwrap();
//! assert_eq!(record.temperature, Temperature::Archive);
//! assert!(!record.is_optimal);
//! assert!(record.potential_savings.monthly_usd > 0.0);
//! ```

mod analyzer;
mod batch;
mod catalog;
mod recommender;
mod scorer;
mod temperature;

pub use analyzer::{
    AccessStats, AnalysisRecord, PlacementAnalyzer, PlacementSummary, PotentialSavings,
    RankedAlternative, BASE_CONFIDENCE, BOOSTED_CONFIDENCE, CONFIDENT_SAVINGS_USD,
    DEFAULT_ALTERNATIVES,
};
pub use batch::{BatchAnalyzer, BatchReport, BatchSummary, DEFAULT_PARALLEL_THRESHOLD};
pub use catalog::{CostModel, PricingLookup, PricingRow, StorageOption, TierPricing, FALLBACK_PLACEMENT};
pub use recommender::{PlacementRecommender, Recommendation, ScoredOption};
pub use scorer::{access_match_score, PlacementScorer, ScoreBreakdown, WeightProfile, COST_CEILING_PER_GB};
pub use temperature::{TemperatureClassifier, TemperatureThresholds};

use crate::config::PlacementConfig;
use crate::error::{Result, TierwiseError};
use crate::types::{DataProfile, Provider, Temperature};
use chrono::{Duration, NaiveDateTime, Utc};
use tracing::info;

/// Entry point to the placement engine.
///
/// Built once from configuration and shared by reference; every operation
/// is a pure function of its inputs, the static catalog and the evaluation
/// time. The `*_at` variants take that time explicitly, the others use the
/// current UTC time.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    config: PlacementConfig,
    batch: BatchAnalyzer,
}

impl Default for PlacementEngine {
    fn default() -> Self {
        let config = PlacementConfig::default();
        let batch = Self::build(&config, PlacementScorer::new());
        Self { config, batch }
    }
}

impl PlacementEngine {
    /// Creates an engine, validating any custom weight profile.
    pub fn new(config: PlacementConfig) -> Result<Self> {
        let scorer = match config.weights {
            Some(weights) => PlacementScorer::with_weights(weights)?,
            None => PlacementScorer::new(),
        };
        let batch = Self::build(&config, scorer);

        info!(
            top_n = config.top_n,
            custom_weights = config.weights.is_some(),
            parallel_batch = config.parallel_batch,
            "Placement engine initialized"
        );

        Ok(Self { config, batch })
    }

    fn build(config: &PlacementConfig, scorer: PlacementScorer) -> BatchAnalyzer {
        let recommender = PlacementRecommender::new(CostModel::new(), TemperatureClassifier::new(), scorer);
        let analyzer = PlacementAnalyzer::new(recommender, config.top_n);
        BatchAnalyzer::new(analyzer).with_parallelism(config.parallel_batch, config.parallel_threshold)
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn cost_model(&self) -> &CostModel {
        self.recommender().cost_model()
    }

    fn recommender(&self) -> &PlacementRecommender {
        self.batch.analyzer().recommender()
    }

    /// Classifies raw access counts.
    pub fn classify(&self, access_count_7d: u64, access_count_30d: u64, days_since_access: i64) -> Temperature {
        self.recommender()
            .classifier()
            .classify(access_count_7d, access_count_30d, days_since_access)
    }

    /// Top `top_n` options for `profile`, best first.
    pub fn recommend(&self, profile: &DataProfile, top_n: usize) -> Result<Recommendation> {
        self.recommend_at(profile, top_n, now())
    }

    pub fn recommend_at(&self, profile: &DataProfile, top_n: usize, now: NaiveDateTime) -> Result<Recommendation> {
        self.recommender().recommend_at(profile, top_n, now)
    }

    /// Like [`recommend`](Self::recommend) but scores every temperature with `weights`.
    pub fn recommend_with_weights(
        &self,
        profile: &DataProfile,
        top_n: usize,
        weights: WeightProfile,
    ) -> Result<Recommendation> {
        self.recommend_with_weights_at(profile, top_n, weights, now())
    }

    pub fn recommend_with_weights_at(
        &self,
        profile: &DataProfile,
        top_n: usize,
        weights: WeightProfile,
        now: NaiveDateTime,
    ) -> Result<Recommendation> {
        let recommender = PlacementRecommender::new(
            self.cost_model().clone(),
            self.recommender().classifier().clone(),
            PlacementScorer::with_weights(weights)?,
        );
        recommender.recommend_at(profile, top_n, now)
    }

    /// Recommendation for an object that only exists as a what-if.
    ///
    /// The weekly count is estimated as a quarter of the monthly count and
    /// the object is assumed to sit on AWS HOT today.
    pub fn recommend_hypothetical(
        &self,
        size_gb: f64,
        access_count_30d: u64,
        days_since_access: i64,
        top_n: usize,
    ) -> Result<Recommendation> {
        self.recommend_hypothetical_at(size_gb, access_count_30d, days_since_access, top_n, now())
    }

    pub fn recommend_hypothetical_at(
        &self,
        size_gb: f64,
        access_count_30d: u64,
        days_since_access: i64,
        top_n: usize,
        now: NaiveDateTime,
    ) -> Result<Recommendation> {
        let profile = hypothetical_profile(size_gb, access_count_30d, days_since_access, now)?;
        self.recommend_at(&profile, top_n, now)
    }

    /// Compares the current placement of `profile` with the best option.
    pub fn analyze(&self, profile: &DataProfile) -> Result<AnalysisRecord> {
        self.analyze_at(profile, now())
    }

    pub fn analyze_at(&self, profile: &DataProfile, now: NaiveDateTime) -> Result<AnalysisRecord> {
        self.batch.analyzer().analyze_at(profile, now)
    }

    /// Sub-score breakdown of every catalog option for `profile`, in catalog order.
    pub fn explain(&self, profile: &DataProfile) -> Result<(Temperature, Vec<(StorageOption, ScoreBreakdown)>)> {
        self.explain_at(profile, now())
    }

    pub fn explain_at(
        &self,
        profile: &DataProfile,
        now: NaiveDateTime,
    ) -> Result<(Temperature, Vec<(StorageOption, ScoreBreakdown)>)> {
        profile.validate_at(now)?;
        let temperature = self.recommender().classifier().classify_profile(profile, now);
        Ok((temperature, self.recommender().explain(profile, temperature)))
    }

    /// Analyzes a fleet and aggregates the savings.
    pub fn batch_analyze(&self, profiles: &[DataProfile]) -> Result<BatchReport> {
        self.batch_analyze_at(profiles, now())
    }

    pub fn batch_analyze_at(&self, profiles: &[DataProfile], now: NaiveDateTime) -> Result<BatchReport> {
        self.batch.batch_analyze_at(profiles, now)
    }

    /// The whole catalog as a comparison table.
    pub fn pricing(&self) -> Vec<PricingRow> {
        self.cost_model().comparison()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn hypothetical_profile(
    size_gb: f64,
    access_count_30d: u64,
    days_since_access: i64,
    now: NaiveDateTime,
) -> Result<DataProfile> {
    let last_accessed = Duration::try_days(days_since_access)
        .and_then(|idle| now.checked_sub_signed(idle))
        .ok_or_else(|| TierwiseError::InvalidProfile {
            field: "days_since_access".to_string(),
            reason: format!("{} days is out of range", days_since_access),
        })?;

    Ok(DataProfile::new("hypothetical", size_gb, last_accessed, Provider::Aws, Temperature::Hot)
        .with_access_counts(access_count_30d / 4, access_count_30d))
}
