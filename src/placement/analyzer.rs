// Current-versus-optimal placement analysis

use super::recommender::{PlacementRecommender, ScoredOption};
use crate::error::{Result, TierwiseError};
use crate::observability;
use crate::types::{DataProfile, Provider, Temperature};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Confidence reported for every analysis
pub const BASE_CONFIDENCE: f64 = 0.85;

/// Confidence once the monthly savings exceed [`CONFIDENT_SAVINGS_USD`]
pub const BOOSTED_CONFIDENCE: f64 = 0.95;

/// Monthly savings above which confidence is boosted
pub const CONFIDENT_SAVINGS_USD: f64 = 1.0;

/// Default number of ranked alternatives in a record
pub const DEFAULT_ALTERNATIVES: usize = 3;

/// A placement and what it costs per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSummary {
    pub provider: Provider,
    pub tier: Temperature,
    /// Catalog label of the tier (`COOL` for Azure's warm tier)
    pub label: String,
    pub monthly_cost_usd: f64,
    /// Placement score, present for recommended placements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// One entry of the ranked alternative list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// 1-based
    pub rank: usize,
    pub provider: Provider,
    pub tier: Temperature,
    pub label: String,
    pub score: f64,
    pub monthly_cost_usd: f64,
    pub latency_ms: f64,
    pub availability_sla: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialSavings {
    pub monthly_usd: f64,
    pub annual_usd: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessStats {
    pub last_7_days: u64,
    pub last_30_days: u64,
    pub days_since_access: i64,
}

/// Outcome of analyzing one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub file_id: String,
    pub temperature: Temperature,
    pub current: PlacementSummary,
    pub recommended: PlacementSummary,
    /// Best first; the first entry is the recommendation
    pub alternatives: Vec<RankedAlternative>,
    /// Whether the current tier already matches the recommended tier.
    /// The provider is not compared.
    pub is_optimal: bool,
    pub potential_savings: PotentialSavings,
    pub confidence_score: f64,
    pub access_stats: AccessStats,
}

/// Compares a profile's current placement with the best recommendation.
#[derive(Debug, Clone)]
pub struct PlacementAnalyzer {
    recommender: PlacementRecommender,
    alternatives: usize,
}

impl Default for PlacementAnalyzer {
    fn default() -> Self {
        Self::new(PlacementRecommender::default(), DEFAULT_ALTERNATIVES)
    }
}

impl PlacementAnalyzer {
    /// `alternatives` is the length of the ranked list in each record (at least 1).
    pub fn new(recommender: PlacementRecommender, alternatives: usize) -> Self {
        Self {
            recommender,
            alternatives: alternatives.max(1),
        }
    }

    pub fn recommender(&self) -> &PlacementRecommender {
        &self.recommender
    }

    pub fn analyze_at(&self, profile: &DataProfile, now: NaiveDateTime) -> Result<AnalysisRecord> {
        let recommendation = self.recommender.recommend_at(profile, self.alternatives, now)?;
        let best = recommendation
            .best()
            .ok_or_else(|| TierwiseError::Internal("catalog produced no options".to_string()))?;

        let cost_model = self.recommender.cost_model();
        let current_cost = cost_model.current_monthly_cost(profile);
        let optimal_cost = best.option.monthly_cost(profile);

        let is_optimal = profile.current_tier == best.option.tier;
        let potential_savings = savings(current_cost, optimal_cost);
        let confidence_score = if potential_savings.monthly_usd > CONFIDENT_SAVINGS_USD {
            BOOSTED_CONFIDENCE
        } else {
            BASE_CONFIDENCE
        };

        let alternatives = recommendation
            .options
            .iter()
            .enumerate()
            .map(|(i, scored)| alternative(i + 1, scored, profile))
            .collect();

        debug!(
            file_id = %profile.file_id,
            temperature = %recommendation.temperature,
            current = %format!("{}/{}", profile.current_provider, profile.current_tier),
            recommended = %format!("{}/{}", best.option.provider, best.option.tier),
            is_optimal,
            savings = potential_savings.monthly_usd,
            "Analyzed placement"
        );
        observability::record_analysis(recommendation.temperature, is_optimal);

        Ok(AnalysisRecord {
            file_id: profile.file_id.clone(),
            temperature: recommendation.temperature,
            current: PlacementSummary {
                provider: profile.current_provider,
                tier: profile.current_tier,
                label: cost_model
                    .option(profile.current_provider, profile.current_tier)
                    .catalog_label()
                    .to_string(),
                monthly_cost_usd: current_cost,
                score: None,
            },
            recommended: PlacementSummary {
                provider: best.option.provider,
                tier: best.option.tier,
                label: best.option.catalog_label().to_string(),
                monthly_cost_usd: optimal_cost,
                score: Some(best.score),
            },
            alternatives,
            is_optimal,
            potential_savings,
            confidence_score,
            access_stats: AccessStats {
                last_7_days: profile.access_count_7d,
                last_30_days: profile.access_count_30d,
                days_since_access: profile.days_since_access(now),
            },
        })
    }
}

/// Savings never go negative; the percentage is 0 when nothing is spent today.
fn savings(current_cost: f64, optimal_cost: f64) -> PotentialSavings {
    let monthly_usd = (current_cost - optimal_cost).max(0.0);
    let percentage = if current_cost > 0.0 {
        monthly_usd / current_cost * 100.0
    } else {
        0.0
    };

    PotentialSavings {
        monthly_usd,
        annual_usd: monthly_usd * 12.0,
        percentage,
    }
}

fn alternative(rank: usize, scored: &ScoredOption, profile: &DataProfile) -> RankedAlternative {
    let option = &scored.option;
    RankedAlternative {
        rank,
        provider: option.provider,
        tier: option.tier,
        label: option.catalog_label().to_string(),
        score: scored.score,
        monthly_cost_usd: option.monthly_cost(profile),
        latency_ms: option.latency_ms,
        availability_sla: option.availability_sla,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn profile(provider: Provider, tier: Temperature, access_7d: u64, access_30d: u64) -> DataProfile {
        DataProfile::new("logs/2024-04.tar", 50.0, now() - Duration::days(61), provider, tier)
            .with_access_counts(access_7d, access_30d)
    }

    #[test]
    fn test_idle_object_on_hot_storage() {
        let analyzer = PlacementAnalyzer::default();
        let record = analyzer
            .analyze_at(&profile(Provider::Aws, Temperature::Hot, 0, 1), now())
            .unwrap();

        assert_eq!(record.temperature, Temperature::Archive);
        assert!(!record.is_optimal);
        assert!(matches!(record.recommended.tier, Temperature::Cold | Temperature::Archive));
        assert!(record.potential_savings.monthly_usd > 0.0);

        // S3 Standard 1.15/month against Azure cold 1.10/month
        assert!((record.current.monthly_cost_usd - 1.15).abs() < 1e-9);
        assert!((record.recommended.monthly_cost_usd - 1.1).abs() < 1e-9);
        assert!((record.potential_savings.annual_usd - 0.6).abs() < 1e-9);
        assert_eq!(record.confidence_score, BASE_CONFIDENCE);
        assert_eq!(record.access_stats.days_since_access, 61);
        assert_eq!(record.alternatives.len(), DEFAULT_ALTERNATIVES);
        assert_eq!(record.alternatives[0].rank, 1);
        assert_eq!(record.recommended.score, Some(record.alternatives[0].score));
    }

    #[test]
    fn test_tier_match_is_optimal_regardless_of_provider() {
        let analyzer = PlacementAnalyzer::default();
        // Best option for this profile is Azure COLD; GCP COLD still counts as optimal
        let record = analyzer
            .analyze_at(&profile(Provider::Gcp, Temperature::Cold, 0, 1), now())
            .unwrap();

        assert_eq!(record.recommended.provider, Provider::Azure);
        assert_eq!(record.recommended.tier, Temperature::Cold);
        assert!(record.is_optimal);
        // GCP coldline retrieval makes it pricier than the recommendation
        assert!(record.current.monthly_cost_usd > record.recommended.monthly_cost_usd);
        assert!(record.potential_savings.monthly_usd > 0.0);
    }

    #[test]
    fn test_savings_never_negative() {
        let analyzer = PlacementAnalyzer::default();
        // Azure cold is cheaper than whatever wins for hot data
        let record = analyzer
            .analyze_at(&profile(Provider::Azure, Temperature::Cold, 40, 10), now())
            .unwrap();

        assert_eq!(record.temperature, Temperature::Hot);
        assert!(record.recommended.monthly_cost_usd >= 0.0);
        assert!(record.potential_savings.monthly_usd >= 0.0);
        assert!(record.potential_savings.percentage >= 0.0);
    }

    #[test]
    fn test_confidence_boost() {
        let analyzer = PlacementAnalyzer::default();
        let mut big = profile(Provider::Aws, Temperature::Hot, 0, 1);
        big.size_gb = 5000.0;

        let record = analyzer.analyze_at(&big, now()).unwrap();
        assert!(record.potential_savings.monthly_usd > CONFIDENT_SAVINGS_USD);
        assert_eq!(record.confidence_score, BOOSTED_CONFIDENCE);
    }

    #[test]
    fn test_savings_helper_guards_zero_cost() {
        let zero = savings(0.0, 0.0);
        assert_eq!(zero.monthly_usd, 0.0);
        assert_eq!(zero.percentage, 0.0);

        let half = savings(2.0, 1.0);
        assert_eq!(half.percentage, 50.0);
        assert_eq!(half.annual_usd, 12.0);

        assert_eq!(savings(1.0, 3.0).monthly_usd, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let analyzer = PlacementAnalyzer::default();
        let p = profile(Provider::Azure, Temperature::Warm, 3, 12);
        let a = analyzer.analyze_at(&p, now()).unwrap();
        let b = analyzer.analyze_at(&p, now()).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
    }

    #[test]
    fn test_azure_label_in_record() {
        let analyzer = PlacementAnalyzer::default();
        let record = analyzer
            .analyze_at(&profile(Provider::Azure, Temperature::Warm, 3, 12), now())
            .unwrap();
        assert_eq!(record.current.label, "COOL");
        assert_eq!(record.current.score, None);
    }
}
