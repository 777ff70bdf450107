//! Error types for the tierwise placement engine.
//!
//! This module provides a unified error type [`TierwiseError`] for all tierwise operations,
//! along with a convenient [`Result`] type alias.
//!
//! # Error Categories
//!
//! - **Validation**: A data profile or telemetry sample that cannot be scored
//!   (non-positive size, negative access counts, last access in the future)
//! - **Labels**: Provider names or storage classes that do not parse
//! - **Configuration**: Invalid settings or weight profiles
//! - **IO/Serialization**: Reading profile and config files
//!
//! Cost lookups by raw label never fail: an unresolved label falls back to
//! AWS HOT pricing (see [`crate::placement::CostModel::lookup`]).
//!
//! # Example
//!
//! ```rust
//! use tierwise::error::{Result, TierwiseError};
//!
//! fn check_size(size_gb: f64) -> Result<f64> {
//!     if size_gb <= 0.0 {
//!         return Err(TierwiseError::InvalidProfile {
//!             field: "size_gb".into(),
//!             reason: "must be positive".into(),
//!         });
//!     }
//!     Ok(size_gb)
//! }
//!
//! let err = check_size(0.0).unwrap_err();
//! assert!(err.is_validation());
//! assert!(!err.is_retryable());
//! ```

use std::io;
use thiserror::Error;

/// Main error type for tierwise operations.
#[derive(Error, Debug)]
pub enum TierwiseError {
    // Validation errors
    #[error("Invalid profile: {field}: {reason}")]
    InvalidProfile { field: String, reason: String },

    #[error("Invalid profile {file_id}: {reason}")]
    ProfileRejected { file_id: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    // Label errors
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown storage tier for {provider}: {label}")]
    UnknownTier { provider: String, label: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Invalid weight profile: {0}")]
    InvalidWeights(String),

    // External errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TierwiseError {
    /// Check if error is retryable.
    ///
    /// The engine is a pure computation, so nothing it reports goes away on
    /// a second attempt with the same input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TierwiseError::Io(e) if e.kind() == io::ErrorKind::Interrupted)
    }

    /// True for errors caused by a profile or telemetry sample the caller supplied.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TierwiseError::InvalidProfile { .. }
                | TierwiseError::ProfileRejected { .. }
                | TierwiseError::Validation(_)
        )
    }
}

impl From<serde_json::Error> for TierwiseError {
    fn from(e: serde_json::Error) -> Self {
        TierwiseError::Serialization(e.to_string())
    }
}

/// Result type alias for tierwise operations.
pub type Result<T> = std::result::Result<T, TierwiseError>;
