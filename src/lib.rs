//! tierwise - Storage placement decisions across cloud providers and tiers.
//!
//! Given what is known about how a data object is accessed and where it lives
//! today, tierwise classifies its access temperature, scores every catalog
//! storage option against it, recommends the best placement and reports what
//! moving would save, for one object or a whole fleet.
//!
//! # Features
//!
//! - **Temperature Classification**: HOT, WARM, COLD or ARCHIVE from access counts.
//! - **Multi-Factor Scoring**: Cost, performance, access match and availability.
//! - **Placement Analysis**: Current versus optimal placement with projected savings.
//! - **Fleet Reports**: Batch analysis with optimization rate and total savings.
//! - **Listing Ingest**: Provider object listings and access telemetry to profiles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         tierwise                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Ingest: Object Listing | Access Telemetry | UTC Normalize  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Placement: Catalog | Classifier | Scorer | Recommender     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Reports: Analysis Records | Batch Summary | Distribution   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use tierwise::config::TierwiseConfig;
//! use tierwise::placement::PlacementEngine;
//!
//! fn main() -> tierwise::Result<()> {
//!     let config = TierwiseConfig::development();
//!     let engine = PlacementEngine::new(config.placement)?;
//!
//!     for row in engine.pricing() {
//!         println!("{} {} {}", row.provider, row.label, row.pricing.storage_cost_per_gb_month);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod types;

pub mod cli;
pub mod ingest;
pub mod observability;
pub mod placement;

pub use error::{Result, TierwiseError};
pub use types::*;

pub use placement::{
    AnalysisRecord, BatchReport, BatchSummary, CostModel, PlacementEngine, Recommendation,
    StorageOption, WeightProfile,
};
