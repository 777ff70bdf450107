// Storage option catalog and cost model

use crate::observability;
use crate::types::{DataProfile, Provider, Temperature};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Pricing and performance of one (provider, tier) combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPricing {
    /// Storage cost ($/GB-month)
    pub storage_cost_per_gb_month: f64,
    /// Retrieval cost ($/GB retrieved)
    pub retrieval_cost_per_gb: f64,
    /// Typical first-byte latency in ms (retrieval time for archive classes)
    pub latency_ms: f64,
    /// Availability SLA as a percentage
    pub availability_sla: f64,
}

impl TierPricing {
    const fn new(storage: f64, retrieval: f64, latency_ms: f64, sla: f64) -> Self {
        Self {
            storage_cost_per_gb_month: storage,
            retrieval_cost_per_gb: retrieval,
            latency_ms,
            availability_sla: sla,
        }
    }
}

/// Pricing table, rows in `Provider::ALL` order, columns in `Temperature::ALL` order.
const PRICING: [[TierPricing; 4]; 3] = [
    // AWS: S3 Standard, Standard-IA, Glacier, Deep Archive
    [
        TierPricing::new(0.023, 0.0, 10.0, 99.99),
        TierPricing::new(0.0125, 0.01, 50.0, 99.9),
        TierPricing::new(0.004, 0.03, 3_600_000.0, 99.9),
        TierPricing::new(0.00099, 0.05, 43_200_000.0, 99.9),
    ],
    // Azure: Hot, Cool, Cold, Archive
    [
        TierPricing::new(0.0208, 0.0, 10.0, 99.9),
        TierPricing::new(0.0152, 0.01, 50.0, 99.0),
        TierPricing::new(0.002, 0.02, 3_600_000.0, 99.0),
        TierPricing::new(0.00099, 0.05, 3_600_000.0, 99.0),
    ],
    // GCP: Standard, Nearline, Coldline, Archive
    [
        TierPricing::new(0.020, 0.0, 10.0, 99.95),
        TierPricing::new(0.010, 0.01, 50.0, 99.9),
        TierPricing::new(0.004, 0.05, 1000.0, 99.0),
        TierPricing::new(0.0012, 0.05, 3_600_000.0, 99.0),
    ],
];

/// Catalog tier label per provider, same layout as `PRICING`.
const CATALOG_LABELS: [[&str; 4]; 3] = [
    ["HOT", "WARM", "COLD", "ARCHIVE"],
    ["HOT", "COOL", "COLD", "ARCHIVE"],
    ["HOT", "WARM", "COLD", "ARCHIVE"],
];

/// Native storage class names and the canonical tier they map to.
const NATIVE_LABELS: &[(Provider, &str, Temperature)] = &[
    (Provider::Aws, "STANDARD", Temperature::Hot),
    (Provider::Aws, "INTELLIGENT_TIERING", Temperature::Hot),
    (Provider::Aws, "STANDARD_IA", Temperature::Warm),
    (Provider::Aws, "ONEZONE_IA", Temperature::Warm),
    (Provider::Aws, "GLACIER_IR", Temperature::Cold),
    (Provider::Aws, "GLACIER", Temperature::Cold),
    (Provider::Aws, "DEEP_ARCHIVE", Temperature::Archive),
    (Provider::Azure, "COOL", Temperature::Warm),
    (Provider::Gcp, "STANDARD", Temperature::Hot),
    (Provider::Gcp, "MULTI_REGIONAL", Temperature::Hot),
    (Provider::Gcp, "REGIONAL", Temperature::Hot),
    (Provider::Gcp, "NEARLINE", Temperature::Warm),
    (Provider::Gcp, "COLDLINE", Temperature::Cold),
];

/// Provider and tier whose pricing stands in for labels that do not resolve.
pub const FALLBACK_PLACEMENT: (Provider, Temperature) = (Provider::Aws, Temperature::Hot);

/// One addressable (provider, tier) storage option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageOption {
    pub provider: Provider,
    /// Canonical tier
    pub tier: Temperature,
    pub cost_per_gb_month: f64,
    pub retrieval_cost_per_gb: f64,
    pub latency_ms: f64,
    pub availability_sla: f64,
    /// Placement score, populated during scoring
    pub score: f64,
}

impl StorageOption {
    fn from_pricing(provider: Provider, tier: Temperature, pricing: TierPricing) -> Self {
        Self {
            provider,
            tier,
            cost_per_gb_month: pricing.storage_cost_per_gb_month,
            retrieval_cost_per_gb: pricing.retrieval_cost_per_gb,
            latency_ms: pricing.latency_ms,
            availability_sla: pricing.availability_sla,
            score: 0.0,
        }
    }

    /// Projected monthly cost of keeping `profile` in this option.
    pub fn monthly_cost(&self, profile: &DataProfile) -> f64 {
        CostModel::monthly_cost(
            profile.size_gb,
            self.cost_per_gb_month,
            self.retrieval_cost_per_gb,
            profile.access_count_30d,
        )
    }

    /// The provider's own name for this tier in the catalog (e.g. `COOL` on Azure).
    pub fn catalog_label(&self) -> &'static str {
        CostModel::catalog_label(self.provider, self.tier)
    }
}

/// Result of a label-based pricing lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingLookup {
    pub provider: Provider,
    pub tier: Temperature,
    pub pricing: TierPricing,
    /// True when the labels did not resolve and fallback pricing was used
    pub fallback: bool,
}

/// One row of the catalog comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRow {
    pub provider: Provider,
    pub tier: Temperature,
    pub label: String,
    #[serde(flatten)]
    pub pricing: TierPricing,
}

/// Static multi-cloud cost model.
#[derive(Debug, Clone, Default)]
pub struct CostModel;

impl CostModel {
    pub fn new() -> Self {
        Self
    }

    /// `size * storage + size * retrieval * accesses`, in dollars per month.
    pub fn monthly_cost(
        size_gb: f64,
        storage_cost: f64,
        retrieval_cost: f64,
        access_count_30d: u64,
    ) -> f64 {
        let storage_monthly = size_gb * storage_cost;
        let retrieval_monthly = size_gb * retrieval_cost * access_count_30d as f64;
        storage_monthly + retrieval_monthly
    }

    /// Pricing of a canonical placement. Every (provider, tier) pair is in the catalog.
    pub fn pricing(&self, provider: Provider, tier: Temperature) -> TierPricing {
        PRICING[provider.index()][tier.index()]
    }

    /// A fresh, unscored option for a canonical placement.
    pub fn option(&self, provider: Provider, tier: Temperature) -> StorageOption {
        StorageOption::from_pricing(provider, tier, self.pricing(provider, tier))
    }

    /// The full catalog in enumeration order: providers AWS, AZURE, GCP, each
    /// with tiers HOT, WARM, COLD, ARCHIVE.
    pub fn options(&self) -> Vec<StorageOption> {
        Provider::ALL
            .iter()
            .flat_map(|&provider| {
                Temperature::ALL
                    .iter()
                    .map(move |&tier| self.option(provider, tier))
            })
            .collect()
    }

    /// Monthly cost of keeping `profile` where it currently is.
    pub fn current_monthly_cost(&self, profile: &DataProfile) -> f64 {
        let pricing = self.pricing(profile.current_provider, profile.current_tier);
        Self::monthly_cost(
            profile.size_gb,
            pricing.storage_cost_per_gb_month,
            pricing.retrieval_cost_per_gb,
            profile.access_count_30d,
        )
    }

    /// Catalog label of a canonical placement.
    pub fn catalog_label(provider: Provider, tier: Temperature) -> &'static str {
        CATALOG_LABELS[provider.index()][tier.index()]
    }

    /// Maps a provider tier label onto its canonical tier.
    ///
    /// Accepts canonical names, catalog labels and native storage class names,
    /// case-insensitively.
    pub fn resolve_tier(provider: Provider, label: &str) -> Option<Temperature> {
        let label = label.trim().to_ascii_uppercase().replace(['-', ' '], "_");

        if let Ok(tier) = label.parse::<Temperature>() {
            return Some(tier);
        }

        NATIVE_LABELS
            .iter()
            .find(|(p, name, _)| *p == provider && *name == label)
            .map(|(_, _, tier)| *tier)
    }

    /// Pricing for raw provider/tier labels.
    ///
    /// Labels that do not resolve get AWS HOT pricing ([`FALLBACK_PLACEMENT`])
    /// with `fallback` set, instead of an error.
    pub fn lookup(&self, provider_label: &str, tier_label: &str) -> PricingLookup {
        let resolved = provider_label
            .parse::<Provider>()
            .ok()
            .and_then(|provider| Self::resolve_tier(provider, tier_label).map(|tier| (provider, tier)));

        match resolved {
            Some((provider, tier)) => PricingLookup {
                provider,
                tier,
                pricing: self.pricing(provider, tier),
                fallback: false,
            },
            None => {
                let (provider, tier) = FALLBACK_PLACEMENT;
                warn!(
                    provider = %provider_label,
                    tier = %tier_label,
                    "Unknown placement, using fallback pricing"
                );
                observability::record_fallback_pricing();
                PricingLookup {
                    provider,
                    tier,
                    pricing: self.pricing(provider, tier),
                    fallback: true,
                }
            }
        }
    }

    /// The whole catalog as a comparison table.
    pub fn comparison(&self) -> Vec<PricingRow> {
        self.options()
            .into_iter()
            .map(|option| PricingRow {
                provider: option.provider,
                tier: option.tier,
                label: option.catalog_label().to_string(),
                pricing: self.pricing(option.provider, option.tier),
            })
            .collect()
    }
}
