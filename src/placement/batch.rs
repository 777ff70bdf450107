// Fleet-wide placement analysis

use super::analyzer::{AnalysisRecord, PlacementAnalyzer};
use crate::error::Result;
use crate::observability;
use crate::types::{DataProfile, Temperature};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Batches at least this large are analyzed on the rayon pool by default
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Aggregate statistics over a batch of analyses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_objects: usize,
    pub optimally_placed: usize,
    pub misplaced: usize,
    /// Percentage of objects already in their optimal tier
    pub optimization_rate: f64,
    pub current_monthly_cost: f64,
    pub optimal_monthly_cost: f64,
    pub potential_monthly_savings: f64,
    pub potential_annual_savings: f64,
}

impl BatchSummary {
    /// Aggregates records with sums and counts only, so the order of
    /// `records` does not affect the result beyond float rounding.
    pub fn from_records(records: &[AnalysisRecord]) -> Self {
        let total_objects = records.len();
        let optimally_placed = records.iter().filter(|r| r.is_optimal).count();
        let current_monthly_cost: f64 = records.iter().map(|r| r.current.monthly_cost_usd).sum();
        let optimal_monthly_cost: f64 = records.iter().map(|r| r.recommended.monthly_cost_usd).sum();

        let optimization_rate = if total_objects == 0 {
            0.0
        } else {
            optimally_placed as f64 / total_objects as f64 * 100.0
        };

        // Not clamped: negative when the recommendations cost more than today
        let potential_monthly_savings = current_monthly_cost - optimal_monthly_cost;

        Self {
            total_objects,
            optimally_placed,
            misplaced: total_objects - optimally_placed,
            optimization_rate,
            current_monthly_cost,
            optimal_monthly_cost,
            potential_monthly_savings,
            potential_annual_savings: potential_monthly_savings * 12.0,
        }
    }
}

/// Summary plus the per-object records, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    /// Object count per classified temperature
    pub temperature_distribution: BTreeMap<Temperature, usize>,
    pub records: Vec<AnalysisRecord>,
}

impl BatchReport {
    pub fn from_records(records: Vec<AnalysisRecord>) -> Self {
        let mut temperature_distribution = BTreeMap::new();
        for record in &records {
            *temperature_distribution.entry(record.temperature).or_insert(0) += 1;
        }

        Self {
            summary: BatchSummary::from_records(&records),
            temperature_distribution,
            records,
        }
    }

    /// Records ordered by monthly savings, largest first. Ties keep input order.
    pub fn records_by_savings(&self) -> Vec<&AnalysisRecord> {
        let mut sorted: Vec<&AnalysisRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| {
            b.potential_savings
                .monthly_usd
                .total_cmp(&a.potential_savings.monthly_usd)
        });
        sorted
    }

    /// Records whose current tier differs from the recommended one.
    pub fn misplaced(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.records.iter().filter(|r| !r.is_optimal)
    }
}

/// Runs placement analysis over many profiles.
#[derive(Debug, Clone)]
pub struct BatchAnalyzer {
    analyzer: PlacementAnalyzer,
    parallel: bool,
    parallel_threshold: usize,
}

impl Default for BatchAnalyzer {
    fn default() -> Self {
        Self::new(PlacementAnalyzer::default())
    }
}

impl BatchAnalyzer {
    pub fn new(analyzer: PlacementAnalyzer) -> Self {
        Self {
            analyzer,
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Enables or disables the rayon fan-out and sets the minimum batch size for it.
    pub fn with_parallelism(mut self, parallel: bool, threshold: usize) -> Self {
        self.parallel = parallel;
        self.parallel_threshold = threshold;
        self
    }

    pub fn analyzer(&self) -> &PlacementAnalyzer {
        &self.analyzer
    }

    /// Analyzes every profile as of `now`.
    ///
    /// Profiles are independent; the first one that fails validation rejects
    /// the whole batch.
    pub fn batch_analyze_at(&self, profiles: &[DataProfile], now: NaiveDateTime) -> Result<BatchReport> {
        let start = std::time::Instant::now();
        let parallel = self.parallel && profiles.len() >= self.parallel_threshold;

        let records: Vec<AnalysisRecord> = if parallel {
            profiles
                .par_iter()
                .map(|profile| self.analyzer.analyze_at(profile, now))
                .collect::<Result<_>>()?
        } else {
            profiles
                .iter()
                .map(|profile| self.analyzer.analyze_at(profile, now))
                .collect::<Result<_>>()?
        };

        let report = BatchReport::from_records(records);
        let summary = &report.summary;

        info!(
            objects = summary.total_objects,
            misplaced = summary.misplaced,
            optimization_rate = summary.optimization_rate,
            monthly_savings = summary.potential_monthly_savings,
            parallel,
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch placement analysis complete"
        );
        observability::record_batch(summary.total_objects, summary.potential_monthly_savings);

        Ok(report)
    }
}
