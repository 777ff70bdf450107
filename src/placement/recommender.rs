// Placement recommendation: score the whole catalog and rank it

use super::catalog::{CostModel, StorageOption};
use super::scorer::{PlacementScorer, ScoreBreakdown};
use super::temperature::TemperatureClassifier;
use crate::error::Result;
use crate::types::{DataProfile, Temperature};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A catalog option together with its placement score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOption {
    pub option: StorageOption,
    pub score: f64,
}

/// Ranked options for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Temperature the options were scored against
    pub temperature: Temperature,
    /// Best first
    pub options: Vec<ScoredOption>,
}

impl Recommendation {
    /// The highest scoring option, if any were requested.
    pub fn best(&self) -> Option<&ScoredOption> {
        self.options.first()
    }
}

/// Ranks every (provider, tier) option for a profile.
#[derive(Debug, Clone, Default)]
pub struct PlacementRecommender {
    cost_model: CostModel,
    classifier: TemperatureClassifier,
    scorer: PlacementScorer,
}

impl PlacementRecommender {
    pub fn new(cost_model: CostModel, classifier: TemperatureClassifier, scorer: PlacementScorer) -> Self {
        Self {
            cost_model,
            classifier,
            scorer,
        }
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    pub fn classifier(&self) -> &TemperatureClassifier {
        &self.classifier
    }

    pub fn scorer(&self) -> &PlacementScorer {
        &self.scorer
    }

    /// Top `top_n` options for `profile` as of `now`, best first.
    pub fn recommend_at(
        &self,
        profile: &DataProfile,
        top_n: usize,
        now: NaiveDateTime,
    ) -> Result<Recommendation> {
        profile.validate_at(now)?;

        let temperature = self.classifier.classify_profile(profile, now);
        let mut options = self.rank(profile, temperature);
        options.truncate(top_n);

        debug!(
            file_id = %profile.file_id,
            temperature = %temperature,
            best = ?options.first().map(|o| (o.option.provider, o.option.tier, o.score)),
            "Ranked storage options"
        );

        Ok(Recommendation { temperature, options })
    }

    /// Scores the full catalog against `temperature`, best first.
    ///
    /// The sort is stable, so equal scores keep catalog order.
    pub fn rank(&self, profile: &DataProfile, temperature: Temperature) -> Vec<ScoredOption> {
        let mut scored: Vec<ScoredOption> = self
            .cost_model
            .options()
            .into_iter()
            .map(|mut option| {
                let score = self.scorer.score(profile, &option, temperature);
                option.score = score;
                ScoredOption { option, score }
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// Sub-score breakdown for every catalog option, in catalog order.
    pub fn explain(&self, profile: &DataProfile, temperature: Temperature) -> Vec<(StorageOption, ScoreBreakdown)> {
        self.cost_model
            .options()
            .into_iter()
            .map(|option| {
                let breakdown = self.scorer.breakdown(profile, &option, temperature);
                (option, breakdown)
            })
            .collect()
    }
}
