//! # Error Types
//!
//! Structured error types for slope_core. Every analysis stage returns
//! [`AnalysisResult`], and every variant carries enough context (field path,
//! unknown names, equation counts, moment label) to trace the failure back to
//! the input that caused it.
//!
//! All errors are fatal to the current analysis. The computation is
//! deterministic, so retrying with the same input fails the same way.
//!
//! ## Example
//!
//! ```rust
//! use slope_core::errors::{AnalysisError, AnalysisResult};
//!
//! fn validate_length(length: f64) -> AnalysisResult<()> {
//!     if length <= 0.0 {
//!         return Err(AnalysisError::configuration(
//!             "spans[0].length",
//!             length.to_string(),
//!             "Member length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for slope_core operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum AnalysisError {
    /// Malformed input detected before analysis begins
    /// (non-positive geometry, a + b ≠ L, unsupported topology, ...)
    #[error("Configuration error in '{field}': {value} - {reason}")]
    Configuration {
        field: String,
        value: String,
        reason: String,
    },

    /// The equation count does not match the unknown count
    #[error("Dimension mismatch: {equations} equations for {unknowns} unknowns")]
    DimensionMismatch { equations: usize, unknowns: usize },

    /// The equilibrium system has no unique solution
    #[error("Singular system in unknowns [{}] (determinant {:e})", .unknowns.join(", "), .determinant)]
    SingularSystem {
        unknowns: Vec<String>,
        determinant: f64,
    },

    /// A later stage asked for an end moment that was never resolved
    #[error("Moment table has no entry for '{label}'")]
    IncompleteMomentTable { label: String },
}

impl AnalysisError {
    /// Create a Configuration error
    pub fn configuration(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AnalysisError::Configuration {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error
    pub fn dimension_mismatch(equations: usize, unknowns: usize) -> Self {
        AnalysisError::DimensionMismatch {
            equations,
            unknowns,
        }
    }

    /// Create a SingularSystem error
    pub fn singular_system(unknowns: Vec<String>, determinant: f64) -> Self {
        AnalysisError::SingularSystem {
            unknowns,
            determinant,
        }
    }

    /// Create an IncompleteMomentTable error
    pub fn incomplete_moment_table(label: impl Into<String>) -> Self {
        AnalysisError::IncompleteMomentTable {
            label: label.into(),
        }
    }

    /// Always false: the same input fails the same way every time
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::Configuration { .. } => "CONFIGURATION_ERROR",
            AnalysisError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            AnalysisError::SingularSystem { .. } => "SINGULAR_SYSTEM",
            AnalysisError::IncompleteMomentTable { .. } => "INCOMPLETE_MOMENT_TABLE",
        }
    }
}
