//! tierwise CLI - Main entry point.

use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use tierwise::cli::{self, Cli, Commands};
use tierwise::config::TierwiseConfig;
use tierwise::ingest::{ListedObject, ProfileBuilder};
use tierwise::placement::{AnalysisRecord, PlacementEngine};
use tierwise::DataProfile;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let mut config = match &cli.config {
        Some(path) => TierwiseConfig::from_file(path)?,
        None => TierwiseConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    tierwise::observability::init(&config.observability)?;
    let engine = PlacementEngine::new(config.placement.clone())?;

    match cli.command {
        Commands::Classify {
            access_7d,
            access_30d,
            days_since_access,
        } => {
            let temperature = engine.classify(access_7d, access_30d, days_since_access);
            if cli.json {
                print_json(&serde_json::json!({ "temperature": temperature }))?;
            } else {
                println!("{}", temperature);
            }
        }

        Commands::Recommend {
            size_gb,
            access_30d,
            days_since_access,
            top,
        } => {
            let top_n = top.unwrap_or(engine.config().top_n);
            let recommendation = engine.recommend_hypothetical(size_gb, access_30d, days_since_access, top_n)?;

            if cli.json {
                print_json(&recommendation)?;
            } else {
                println!("Temperature: {}", recommendation.temperature);
                for (i, scored) in recommendation.options.iter().enumerate() {
                    let option = &scored.option;
                    println!(
                        "  {}. {} {:<8} score {:>6.2}  ${:.4}/GB-month  retrieval ${:.4}/GB  {} ms  {}%",
                        i + 1,
                        option.provider,
                        option.catalog_label(),
                        scored.score,
                        option.cost_per_gb_month,
                        option.retrieval_cost_per_gb,
                        option.latency_ms,
                        option.availability_sla
                    );
                }
            }
        }

        Commands::Analyze { input, explain } => {
            let profile: DataProfile = read_json(&input)?;
            let now = now();
            let record = engine.analyze_at(&profile, now)?;
            let explanation = if explain {
                Some(engine.explain_at(&profile, now)?)
            } else {
                None
            };
            let explanation = explanation
                .as_ref()
                .map(|(temperature, breakdowns)| (*temperature, breakdowns.as_slice()));

            if cli.json {
                print_json(&cli::analysis_json(&record, explanation))?;
            } else {
                print!("{}", cli::format_record(&record));
                if let Some((temperature, breakdowns)) = explanation {
                    print!("{}", cli::format_breakdowns(temperature, breakdowns));
                }
            }
        }

        Commands::Batch {
            input,
            listing,
            sort_by_savings,
            misplaced_only,
        } => {
            let profiles: Vec<DataProfile> = if listing {
                let objects: Vec<ListedObject> = read_json(&input)?;
                ProfileBuilder::new(config.ingest.clone()).profiles_at(&objects, now())?
            } else {
                read_json(&input)?
            };

            let report = engine.batch_analyze(&profiles)?;

            let mut records: Vec<&AnalysisRecord> = if sort_by_savings {
                report.records_by_savings()
            } else {
                report.records.iter().collect()
            };
            if misplaced_only {
                records.retain(|r| !r.is_optimal);
            }

            if cli.json {
                let records: Vec<AnalysisRecord> = records.into_iter().map(cli::rounded_record).collect();
                print_json(&serde_json::json!({
                    "summary": cli::rounded_summary(&report.summary),
                    "temperature_distribution": report.temperature_distribution,
                    "records": records,
                }))?;
            } else {
                print!("{}", cli::format_summary(&report.summary));
                let distribution: Vec<String> = report
                    .temperature_distribution
                    .iter()
                    .map(|(temperature, count)| format!("{}={}", temperature, count))
                    .collect();
                println!("Temperatures:       {}", distribution.join(", "));
                for record in records {
                    println!();
                    print!("{}", cli::format_record(record));
                }
            }
        }

        Commands::Pricing { provider, tier } => match (provider, tier) {
            (Some(provider), Some(tier)) => {
                let lookup = engine.cost_model().lookup(&provider, &tier);
                if cli.json {
                    print_json(&lookup)?;
                } else {
                    let p = &lookup.pricing;
                    println!(
                        "{} {}{}: ${}/GB-month, retrieval ${}/GB, {} ms, {}%",
                        lookup.provider,
                        lookup.tier,
                        if lookup.fallback { " (fallback)" } else { "" },
                        p.storage_cost_per_gb_month,
                        p.retrieval_cost_per_gb,
                        p.latency_ms,
                        p.availability_sla
                    );
                }
            }
            _ => {
                let rows = engine.pricing();
                if cli.json {
                    print_json(&rows)?;
                } else {
                    println!(
                        "{:<6} {:<8} {:>10} {:>10} {:>12} {:>7}",
                        "CLOUD", "TIER", "$/GB-MO", "RETR $/GB", "LATENCY MS", "SLA %"
                    );
                    for row in rows {
                        println!(
                            "{:<6} {:<8} {:>10} {:>10} {:>12} {:>7}",
                            row.provider.as_str(),
                            row.label,
                            row.pricing.storage_cost_per_gb_month,
                            row.pricing.retrieval_cost_per_gb,
                            row.pricing.latency_ms,
                            row.pricing.availability_sla
                        );
                    }
                }
            }
        },

        Commands::Version => {
            println!("tierwise v{}", env!("CARGO_PKG_VERSION"));
            println!("Storage placement recommendations across AWS, Azure and GCP");
        }
    }

    Ok(())
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
