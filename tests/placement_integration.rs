//! Placement engine integration tests
//!
//! Exercises classification, scoring, recommendation and analysis through
//! the public engine API.

#[allow(dead_code)]
mod common;

use chrono::Duration;
use common::*;
use tierwise::config::{PlacementConfig, TierwiseConfig};
use tierwise::ingest::{AccessTelemetry, ObjectMetadata, ProfileBuilder};
use tierwise::placement::{CostModel, PlacementEngine, BASE_CONFIDENCE};
use tierwise::{DataProfile, Provider, Temperature, TierwiseError, WeightProfile};

fn engine() -> PlacementEngine {
    PlacementEngine::new(PlacementConfig::default()).unwrap()
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_classification_reference_points() {
    let engine = engine();
    for days in [0, 30, 365] {
        assert_eq!(engine.classify(0, 1, days), Temperature::Archive);
        assert_eq!(engine.classify(1, 4, days), Temperature::Cold);
        assert_eq!(engine.classify(5, 10, days), Temperature::Warm);
        assert_eq!(engine.classify(15, 50, days), Temperature::Hot);
    }
}

// =============================================================================
// Cost model
// =============================================================================

#[test]
fn test_monthly_cost_reference() {
    let model = CostModel::new();
    let now = eval_time();
    let hot = DataProfile::new("ref", 10.0, now, Provider::Aws, Temperature::Hot);
    let mut archive = hot.clone();
    archive.current_tier = Temperature::Archive;

    let hot_cost = model.current_monthly_cost(&hot);
    let archive_cost = model.current_monthly_cost(&archive);

    assert_usd_eq(hot_cost, 0.23);
    assert_usd_eq(archive_cost, 0.0099);
    assert_usd_eq(hot_cost - archive_cost, 0.2201);
}

#[test]
fn test_label_lookup_fallback() {
    let model = CostModel::new();

    let cool = model.lookup("azure", "Cool");
    assert!(!cool.fallback);
    assert_eq!((cool.provider, cool.tier), (Provider::Azure, Temperature::Warm));

    let unknown = model.lookup("oracle", "STANDARD");
    assert!(unknown.fallback);
    assert_eq!((unknown.provider, unknown.tier), (Provider::Aws, Temperature::Hot));
    assert_eq!(unknown.pricing.storage_cost_per_gb_month, 0.023);

    assert!(model.lookup("AWS", "PLATINUM").fallback);
}

// =============================================================================
// Recommendation
// =============================================================================

#[test]
fn test_recommendations_sorted_for_random_fleet() {
    let engine = engine();
    let mut generator = FleetGenerator::default();

    for profile in generator.fleet(100) {
        let rec = engine.recommend_at(&profile, 12, eval_time()).unwrap();
        assert_eq!(rec.options.len(), 12);
        for pair in rec.options.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for scored in &rec.options {
            assert!((0.0..=100.0).contains(&scored.score));
            assert_eq!(scored.option.score, scored.score);
        }
    }
}

#[test]
fn test_busy_data_stays_hot() {
    let engine = engine();
    let mut generator = FleetGenerator::default();

    for _ in 0..20 {
        let profile = generator.busy_on_hot();
        let record = engine.analyze_at(&profile, eval_time()).unwrap();
        assert_eq!(record.temperature, Temperature::Hot);
        assert_eq!(record.recommended.tier, Temperature::Hot);
        assert!(record.is_optimal);
    }
}

#[test]
fn test_custom_weights() {
    let engine = engine();
    let profile = FleetGenerator::default().idle_on_hot();

    let cost_only = engine
        .recommend_with_weights(&profile, 12, WeightProfile::new(1.0, 0.0, 0.0, 0.0))
        .unwrap();
    let cheapest = cost_only.best().unwrap();
    let cheapest_cost = cheapest.option.monthly_cost(&profile);
    for scored in &cost_only.options {
        assert!(scored.option.monthly_cost(&profile) >= cheapest_cost - 1e-9);
    }

    let err = engine
        .recommend_with_weights(&profile, 3, WeightProfile::new(0.5, 0.5, 0.5, 0.0))
        .unwrap_err();
    assert!(matches!(err, TierwiseError::InvalidWeights(_)));
}

#[test]
fn test_config_weights_apply_to_engine() {
    let mut config = TierwiseConfig::default();
    config.placement.weights = Some(WeightProfile::new(0.0, 0.0, 0.0, 1.0));
    config.validate().unwrap();

    let engine = PlacementEngine::new(config.placement).unwrap();
    let profile = FleetGenerator::default().idle_on_hot();
    let rec = engine.recommend_at(&profile, 1, eval_time()).unwrap();

    // Highest SLA in the catalog
    let best = rec.best().unwrap();
    assert_eq!((best.option.provider, best.option.tier), (Provider::Aws, Temperature::Hot));
}

// =============================================================================
// Analysis
// =============================================================================

#[test]
fn test_end_to_end_idle_object() {
    let engine = engine();
    let now = eval_time();
    let profile = DataProfile::new("archive/2022.tar", 50.0, now - Duration::days(61), Provider::Aws, Temperature::Hot)
        .with_access_counts(0, 1);

    let record = engine.analyze_at(&profile, now).unwrap();

    assert_eq!(record.temperature, Temperature::Archive);
    assert!(!record.is_optimal);
    assert!(matches!(record.recommended.tier, Temperature::Cold | Temperature::Archive));
    assert!(record.potential_savings.monthly_usd > 0.0);
    assert_usd_eq(record.potential_savings.annual_usd, record.potential_savings.monthly_usd * 12.0);
    assert_eq!(record.confidence_score, BASE_CONFIDENCE);
    assert_eq!(record.access_stats.days_since_access, 61);
}

#[test]
fn test_analysis_is_idempotent() {
    let engine = engine();
    let mut generator = FleetGenerator::new(7, eval_time());

    for profile in generator.fleet(25) {
        let first = engine.analyze_at(&profile, eval_time()).unwrap();
        let second = engine.analyze_at(&profile, eval_time()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_analysis_never_negative() {
    let engine = engine();
    let mut generator = FleetGenerator::new(99, eval_time());

    for profile in generator.fleet(200) {
        let record = engine.analyze_at(&profile, eval_time()).unwrap();
        assert!(record.current.monthly_cost_usd >= 0.0);
        assert!(record.recommended.monthly_cost_usd >= 0.0);
        assert!(record.potential_savings.monthly_usd >= 0.0);
        assert!(record.potential_savings.percentage >= 0.0);
        assert!(record.potential_savings.percentage <= 100.0 + 1e-9);
        assert_eq!(record.is_optimal, record.current.tier == record.recommended.tier);
    }
}

#[test]
fn test_invalid_profiles_rejected() {
    let engine = engine();
    let now = eval_time();
    let base = DataProfile::new("bad", 1.0, now - Duration::days(1), Provider::Gcp, Temperature::Warm);

    let mut zero = base.clone();
    zero.size_gb = 0.0;
    let mut nan = base.clone();
    nan.size_gb = f64::NAN;
    let mut future = base.clone();
    future.last_accessed = now + Duration::minutes(1);

    for profile in [zero, nan, future] {
        let err = engine.analyze_at(&profile, now).unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_retryable());
    }
}

// =============================================================================
// Ingest to analysis
// =============================================================================

#[test]
fn test_listing_to_analysis() {
    let engine = engine();
    let now = eval_time();
    let utc = chrono::FixedOffset::east_opt(0).unwrap();

    let metadata = ObjectMetadata {
        key: "logs/2023/app.log.gz".to_string(),
        size_bytes: 50 * 1024 * 1024 * 1024,
        last_modified: (now - Duration::days(200)).and_local_timezone(utc).unwrap(),
        provider: Provider::Aws,
        storage_class: Some("STANDARD".to_string()),
    };
    let telemetry = AccessTelemetry {
        access_count_7d: 0,
        access_count_30d: 1,
        last_accessed: (now - Duration::days(61)).and_local_timezone(utc).unwrap(),
    };

    let profile = ProfileBuilder::default()
        .profile_at(&metadata, Some(&telemetry), now)
        .unwrap();
    let record = engine.analyze_at(&profile, now).unwrap();

    assert_eq!(record.current.tier, Temperature::Hot);
    assert_eq!(record.temperature, Temperature::Archive);
    assert_usd_eq(record.current.monthly_cost_usd, 1.15);
}
