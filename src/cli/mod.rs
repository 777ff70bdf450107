//! Command-line interface for tierwise.

use crate::placement::{
    AnalysisRecord, BatchSummary, PotentialSavings, RankedAlternative, ScoreBreakdown, StorageOption,
};
use crate::types::Temperature;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tierwise - Storage placement recommendations across AWS, Azure and GCP.
#[derive(Parser)]
#[command(name = "tierwise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (JSON)
    #[arg(short, long, env = "TIERWISE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, env = "TIERWISE_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Classify access counts into a temperature
    Classify {
        /// Accesses during the last 7 days
        #[arg(long)]
        access_7d: u64,

        /// Accesses during the last 30 days
        #[arg(long)]
        access_30d: u64,

        /// Days since the last access
        #[arg(long, default_value_t = 0)]
        days_since_access: i64,
    },

    /// Recommend placements for a hypothetical object
    Recommend {
        /// Object size in GB
        #[arg(long)]
        size_gb: f64,

        /// Accesses during the last 30 days
        #[arg(long)]
        access_30d: u64,

        /// Days since the last access
        #[arg(long, default_value_t = 0)]
        days_since_access: i64,

        /// Number of options to show (defaults to placement.top_n)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Analyze the placement of one profile (JSON file)
    Analyze {
        /// Profile file
        input: PathBuf,

        /// Show the sub-score breakdown of every catalog option
        #[arg(long)]
        explain: bool,
    },

    /// Analyze a fleet of profiles (JSON array file)
    Batch {
        /// Profiles file
        input: PathBuf,

        /// Input is a provider listing with optional access telemetry
        #[arg(long)]
        listing: bool,

        /// Order records by potential savings, largest first
        #[arg(long)]
        sort_by_savings: bool,

        /// Only print misplaced objects
        #[arg(long)]
        misplaced_only: bool,
    },

    /// Show the storage catalog, or look up one provider tier
    Pricing {
        /// Provider name (AWS, AZURE, GCP)
        #[arg(long, requires = "tier")]
        provider: Option<String>,

        /// Tier or native storage class (e.g. GLACIER, COOL, NEARLINE)
        #[arg(long, requires = "provider")]
        tier: Option<String>,
    },

    /// Show version information
    Version,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Rounds to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn round_savings(savings: &PotentialSavings) -> PotentialSavings {
    PotentialSavings {
        monthly_usd: round_to(savings.monthly_usd, 4),
        annual_usd: round_to(savings.annual_usd, 2),
        percentage: round_to(savings.percentage, 2),
    }
}

/// A record with money rounded for display: monthly to 4 places, annual
/// and percentages to 2.
pub fn rounded_record(record: &AnalysisRecord) -> AnalysisRecord {
    let mut rounded = record.clone();
    rounded.current.monthly_cost_usd = round_to(record.current.monthly_cost_usd, 4);
    rounded.recommended.monthly_cost_usd = round_to(record.recommended.monthly_cost_usd, 4);
    rounded.potential_savings = round_savings(&record.potential_savings);
    for alternative in &mut rounded.alternatives {
        alternative.monthly_cost_usd = round_to(alternative.monthly_cost_usd, 4);
    }
    rounded
}

/// A summary rounded the same way as [`rounded_record`].
pub fn rounded_summary(summary: &BatchSummary) -> BatchSummary {
    BatchSummary {
        optimization_rate: round_to(summary.optimization_rate, 2),
        current_monthly_cost: round_to(summary.current_monthly_cost, 4),
        optimal_monthly_cost: round_to(summary.optimal_monthly_cost, 4),
        potential_monthly_savings: round_to(summary.potential_monthly_savings, 4),
        potential_annual_savings: round_to(summary.potential_annual_savings, 2),
        ..summary.clone()
    }
}

/// Human-readable analysis of one object.
pub fn format_record(record: &AnalysisRecord) -> String {
    let r = rounded_record(record);
    let mut out = String::new();

    out.push_str(&format!("{}\n", r.file_id));
    out.push_str(&format!(
        "  Temperature:  {} (7d: {}, 30d: {}, idle {} days)\n",
        r.temperature, r.access_stats.last_7_days, r.access_stats.last_30_days, r.access_stats.days_since_access
    ));
    out.push_str(&format!(
        "  Current:      {}/{}  ${:.4}/month\n",
        r.current.provider, r.current.label, r.current.monthly_cost_usd
    ));
    out.push_str(&format!(
        "  Recommended:  {}/{}  ${:.4}/month  score {:.2}\n",
        r.recommended.provider,
        r.recommended.label,
        r.recommended.monthly_cost_usd,
        r.recommended.score.unwrap_or_default()
    ));
    out.push_str(&format!(
        "  Optimal:      {}\n",
        if r.is_optimal { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "  Savings:      ${:.4}/month, ${:.2}/year ({:.2}%), confidence {:.2}\n",
        r.potential_savings.monthly_usd,
        r.potential_savings.annual_usd,
        r.potential_savings.percentage,
        r.confidence_score
    ));

    if !r.alternatives.is_empty() {
        out.push_str("  Alternatives:\n");
        for alternative in &r.alternatives {
            out.push_str(&format_alternative(alternative));
        }
    }
    out
}

fn format_alternative(a: &RankedAlternative) -> String {
    format!(
        "    {}. {:<6} {:<8} score {:>6.2}  ${:.4}/month  {} ms  {}%\n",
        a.rank, a.provider, a.label, a.score, a.monthly_cost_usd, a.latency_ms, a.availability_sla
    )
}

/// JSON for `analyze`: the rounded record alone, or together with the score
/// breakdown as `{ "record": .., "explain": .. }` so stdout stays one document.
pub fn analysis_json(
    record: &AnalysisRecord,
    explanation: Option<(Temperature, &[(StorageOption, ScoreBreakdown)])>,
) -> serde_json::Value {
    let record = serde_json::json!(rounded_record(record));

    match explanation {
        None => record,
        Some((temperature, breakdowns)) => {
            let options: Vec<serde_json::Value> = breakdowns
                .iter()
                .map(|(option, breakdown)| {
                    serde_json::json!({
                        "provider": option.provider,
                        "label": option.catalog_label(),
                        "breakdown": breakdown,
                    })
                })
                .collect();

            serde_json::json!({
                "record": record,
                "explain": { "temperature": temperature, "options": options },
            })
        }
    }
}

/// Sub-score table for every catalog option.
pub fn format_breakdowns(temperature: Temperature, breakdowns: &[(StorageOption, ScoreBreakdown)]) -> String {
    let mut out = format!("Score breakdown ({} weights):\n", temperature);
    for (option, b) in breakdowns {
        out.push_str(&format!(
            "  {:<6} {:<8} cost {:>6.2}  perf {:>6.2}  match {:>6.2}  avail {:>6.2}  = {:>6.2}\n",
            option.provider,
            option.catalog_label(),
            b.cost,
            b.performance,
            b.access_match,
            b.availability,
            b.total
        ));
    }
    out
}

/// Human-readable fleet summary.
pub fn format_summary(summary: &BatchSummary) -> String {
    let s = rounded_summary(summary);
    format!(
        "Objects:            {}\n\
         Optimally placed:   {}\n\
         Misplaced:          {}\n\
         Optimization rate:  {:.2}%\n\
         Current cost:       ${:.4}/month\n\
         Optimal cost:       ${:.4}/month\n\
         Potential savings:  ${:.4}/month, ${:.2}/year\n",
        s.total_objects,
        s.optimally_placed,
        s.misplaced,
        s.optimization_rate,
        s.current_monthly_cost,
        s.optimal_monthly_cost,
        s.potential_monthly_savings,
        s.potential_annual_savings
    )
}
