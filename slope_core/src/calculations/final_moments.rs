//! # Final End Moments
//!
//! Substitutes the solved rotations (and sway) back into each member's end
//! expressions. The 2EI/L stiffness is already carried by each expression, so
//! evaluation gives the end moments directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculations::slope_deflection::MemberEquations;
use crate::calculations::solver::Solution;
use crate::errors::{AnalysisError, AnalysisResult};

/// Final end moments keyed by label (`MAB`, `MBA`, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MomentTable {
    moments: BTreeMap<String, f64>,
}

impl MomentTable {
    /// Moment by label
    ///
    /// # Errors
    ///
    /// [`AnalysisError::IncompleteMomentTable`] if the label is missing.
    pub fn get(&self, label: &str) -> AnalysisResult<f64> {
        self.moments
            .get(label)
            .copied()
            .ok_or_else(|| AnalysisError::incomplete_moment_table(label))
    }

    pub fn insert(&mut self, label: impl Into<String>, moment: f64) {
        self.moments.insert(label.into(), moment);
    }

    pub fn len(&self) -> usize {
        self.moments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.moments.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Evaluate every end moment at the solution
pub fn resolve_moments(members: &[MemberEquations], solution: &Solution) -> MomentTable {
    let mut table = MomentTable::default();
    for member in members {
        table.insert(member.start_label.clone(), member.start.evaluate(solution));
        table.insert(member.end_label.clone(), member.end.evaluate(solution));
    }
    table
}
