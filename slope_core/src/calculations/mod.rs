//! # Structural Calculations
//!
//! The slope-deflection pipeline, stage by stage:
//!
//! 1. [`fem`] - Fixed-end moments per member
//! 2. [`slope_deflection`] - End-moment expressions and equilibrium equations
//! 3. [`solver`] - Linear solve for joint rotations and sway
//! 4. [`final_moments`] - Substitution back into the end expressions
//! 5. [`reactions`] - Support reactions from member statics
//! 6. [`bmsf`] - Shear and moment diagrams
//! 7. [`critical_points`] - Supports, load points and zero-shear points
//!
//! [`continuous_beam`] and [`portal_frame`] run the whole pipeline for their
//! structure type. Each follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `analyze_*(input) -> AnalysisResult<StructureAnalysis>`

pub mod analysis;
pub mod bmsf;
pub mod continuous_beam;
pub mod critical_points;
pub mod fem;
pub mod final_moments;
pub mod member;
pub mod portal_frame;
pub mod reactions;
pub mod slope_deflection;
pub mod solver;

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisResult;
use crate::settings::AnalysisSettings;

// Re-export commonly used types
pub use analysis::{BeamAnalysis, FrameAnalysis, MemberSummary, StructureAnalysis};
pub use continuous_beam::{analyze_beam, BeamInput};
pub use member::{Column, Member, Span, SupportType};
pub use portal_frame::{analyze_frame, FrameInput};

/// Enum wrapper for all structure types.
///
/// Serializes with a `type` tag so mixed inputs can be read from one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Structure {
    /// Beam over one or more spans
    ContinuousBeam(BeamInput),
    /// Single-bay portal frame
    PortalFrame(FrameInput),
}

impl Structure {
    /// Get the user-provided label
    pub fn label(&self) -> &str {
        match self {
            Structure::ContinuousBeam(b) => &b.label,
            Structure::PortalFrame(f) => &f.label,
        }
    }

    /// Get the structure type as a string
    pub fn structure_type(&self) -> &'static str {
        match self {
            Structure::ContinuousBeam(_) => "Continuous beam",
            Structure::PortalFrame(_) => "Portal frame",
        }
    }

    /// Analysis settings carried by the input
    pub fn settings_mut(&mut self) -> &mut AnalysisSettings {
        match self {
            Structure::ContinuousBeam(b) => &mut b.settings,
            Structure::PortalFrame(f) => &mut f.settings,
        }
    }

    /// Run the analysis for this structure
    pub fn analyze(&self) -> AnalysisResult<StructureAnalysis> {
        match self {
            Structure::ContinuousBeam(b) => analyze_beam(b),
            Structure::PortalFrame(f) => analyze_frame(f),
        }
    }
}
