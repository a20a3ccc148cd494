//! # slope_core - Slope-Deflection Analysis Engine
//!
//! `slope_core` analyzes statically indeterminate continuous beams and
//! single-bay portal frames with the slope-deflection method. All inputs and
//! outputs are JSON-serializable, and every intermediate stage (fixed-end
//! moments, symbolic end-moment equations, the equilibrium system, its
//! solution) is returned alongside the final results.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Inspectable**: Each pipeline stage is public and testable on its own
//!
//! ## Quick Start
//!
//! ```rust
//! use slope_core::calculations::{analyze_beam, BeamInput, Span, SupportType};
//! use slope_core::loads::Load;
//!
//! // Two equal spans under a uniform load
//! let input = BeamInput::new(200e6, vec![
//!     Span::new(5.0, 1e-4, Load::uniform(12.0)),
//!     Span::new(5.0, 1e-4, Load::uniform(12.0)),
//! ]);
//! let result = analyze_beam(&input).unwrap();
//!
//! // Hogging moment over the middle support: wL²/8
//! // (end moments are counter-clockwise positive)
//! let m_ba = result.moments.get("MBA").unwrap();
//! assert!((m_ba + 37.5).abs() < 1e-6);
//!
//! // Serialize for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! # assert!(json.contains("\"MBA\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Beam and frame pipelines and their stages
//! - [`loads`] - Load variants and their closed-form member quantities
//! - [`equations`] - Member formulas and linear expressions
//! - [`settings`] - Analysis tolerances and sampling
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod loads;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    analyze_beam, analyze_frame, BeamInput, FrameInput, Structure, StructureAnalysis,
};
pub use errors::{AnalysisError, AnalysisResult};
pub use settings::AnalysisSettings;
