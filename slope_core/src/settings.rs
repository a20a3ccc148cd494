//! # Analysis Settings
//!
//! Numeric tolerances and diagram resolution shared by every stage of an
//! analysis. Settings travel with the input (`BeamInput::settings`,
//! `FrameInput::settings`) so a JSON structure file can override them; any
//! field left out falls back to its default.

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};

/// Upper bound on `diagram_samples`
pub const MAX_DIAGRAM_SAMPLES: usize = 10_000;

/// Tolerances and output resolution for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Relative determinant threshold for singularity.
    ///
    /// A system is singular when |det| ≤ tolerance × Π‖row‖ (the Hadamard
    /// bound), which keeps the test independent of E and I magnitudes.
    pub singular_tolerance: f64,

    /// Absolute length tolerance (m) for a + b = L checks and for merging
    /// coincident diagram positions.
    pub geometry_tolerance: f64,

    /// Evenly spaced interior samples added to each member profile for
    /// plotting, on top of the supports, load points and zero-shear points.
    pub diagram_samples: usize,
}

impl AnalysisSettings {
    /// Reject tolerances that are negative or not finite, and sample counts
    /// above [`MAX_DIAGRAM_SAMPLES`]
    pub fn validate(&self) -> AnalysisResult<()> {
        for (field, value) in [
            ("settings.singular_tolerance", self.singular_tolerance),
            ("settings.geometry_tolerance", self.geometry_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::configuration(
                    field,
                    value.to_string(),
                    "Tolerance must be a finite, non-negative number",
                ));
            }
        }
        if self.diagram_samples > MAX_DIAGRAM_SAMPLES {
            return Err(AnalysisError::configuration(
                "settings.diagram_samples",
                self.diagram_samples.to_string(),
                format!("At most {} diagram samples per member", MAX_DIAGRAM_SAMPLES),
            ));
        }
        Ok(())
    }

    /// Override the number of plotting samples per member
    pub fn with_diagram_samples(mut self, samples: usize) -> Self {
        self.diagram_samples = samples;
        self
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            singular_tolerance: 1e-10,
            geometry_tolerance: 1e-6,
            diagram_samples: 20,
        }
    }
}
