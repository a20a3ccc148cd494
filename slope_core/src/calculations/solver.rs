//! # Linear System Solver
//!
//! Assembles the equilibrium equations into `A·x = b` over an ordered set of
//! unknowns and solves with LU decomposition.
//!
//! A system is rejected as singular when
//!
//! ```text
//! |det A| ≤ tolerance · Π ‖rowᵢ‖
//! ```
//!
//! The right-hand side is Hadamard's bound on |det A|, so the test is
//! independent of the units the stiffness coefficients are expressed in.

use std::collections::BTreeMap;
use std::fmt;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::equations::expression::{LinearExpression, Unknown};
use crate::errors::{AnalysisError, AnalysisResult};

// =============================================================================
// UNKNOWNS AND EQUATIONS
// =============================================================================

/// Ordered set of unknowns; the order fixes the matrix columns
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnknownSet {
    unknowns: Vec<Unknown>,
}

impl UnknownSet {
    /// Build from unknowns, dropping duplicates and keeping the canonical order
    pub fn new(unknowns: impl IntoIterator<Item = Unknown>) -> Self {
        let mut unknowns: Vec<Unknown> = unknowns.into_iter().collect();
        unknowns.sort();
        unknowns.dedup();
        Self { unknowns }
    }

    pub fn len(&self) -> usize {
        self.unknowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unknowns.is_empty()
    }

    pub fn contains(&self, unknown: Unknown) -> bool {
        self.unknowns.contains(&unknown)
    }

    /// Column index of an unknown
    pub fn index_of(&self, unknown: Unknown) -> Option<usize> {
        self.unknowns.iter().position(|u| *u == unknown)
    }

    pub fn iter(&self) -> impl Iterator<Item = Unknown> + '_ {
        self.unknowns.iter().copied()
    }

    /// Display names (`θB`, `Δ`)
    pub fn names(&self) -> Vec<String> {
        self.unknowns.iter().map(Unknown::name).collect()
    }
}

/// A labelled equation `expression = 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    /// Where the equation comes from (`Joint B`, `Shear`)
    pub label: String,

    /// The moments summed, e.g. `MBA + MBC`
    pub description: String,

    /// Left-hand side; the right-hand side is zero
    pub expression: LinearExpression,
}

impl Equation {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        expression: LinearExpression,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            expression,
        }
    }

    /// Value of the left-hand side at a solution (zero when satisfied)
    pub fn residual(&self, solution: &Solution) -> f64 {
        self.expression.evaluate(solution)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = 0", self.label, self.expression)
    }
}

// =============================================================================
// SOLUTION
// =============================================================================

/// Solved value of every unknown
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution {
    values: BTreeMap<Unknown, f64>,
}

impl Solution {
    pub fn get(&self, unknown: Unknown) -> Option<f64> {
        self.values.get(&unknown).copied()
    }

    /// Rotation of a joint; zero if the joint was not solved for
    pub fn rotation(&self, joint: char) -> f64 {
        self.get(Unknown::Rotation(joint)).unwrap_or(0.0)
    }

    /// Frame sway; zero if the structure has no sway unknown
    pub fn sway(&self) -> f64 {
        self.get(Unknown::Sway).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Unknown, f64)> + '_ {
        self.values.iter().map(|(u, v)| (*u, *v))
    }
}

impl FromIterator<(Unknown, f64)> for Solution {
    fn from_iter<I: IntoIterator<Item = (Unknown, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// SOLVE
// =============================================================================

/// Solve `equations` for `unknowns`.
///
/// # Errors
///
/// - [`AnalysisError::DimensionMismatch`] when the equation and unknown counts differ
/// - [`AnalysisError::Configuration`] when an equation references an unknown
///   outside `unknowns`
/// - [`AnalysisError::SingularSystem`] when the matrix fails the determinant test
pub fn solve(
    equations: &[Equation],
    unknowns: &UnknownSet,
    singular_tolerance: f64,
) -> AnalysisResult<Solution> {
    if equations.len() != unknowns.len() {
        return Err(AnalysisError::dimension_mismatch(
            equations.len(),
            unknowns.len(),
        ));
    }

    let n = unknowns.len();
    if n == 0 {
        return Ok(Solution::default());
    }

    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut b = DVector::<f64>::zeros(n);

    for (row, equation) in equations.iter().enumerate() {
        let expanded = equation.expression.expanded();
        for (unknown, coefficient) in &expanded.terms {
            let col = unknowns.index_of(*unknown).ok_or_else(|| {
                AnalysisError::configuration(
                    format!("equations[{}]", row),
                    unknown.name(),
                    format!("{} references an unknown outside the system", equation.label),
                )
            })?;
            a[(row, col)] += coefficient;
        }
        b[row] = -expanded.constant;
    }

    log::trace!("stiffness matrix {}", a);

    let bound: f64 = a.row_iter().map(|r| r.norm()).product();
    let lu = a.lu();
    let determinant = lu.determinant();

    if !determinant.is_finite() || determinant.abs() <= singular_tolerance * bound {
        log::debug!(
            "singular system: det = {:e}, row-norm bound = {:e}",
            determinant,
            bound
        );
        return Err(AnalysisError::singular_system(unknowns.names(), determinant));
    }

    let x = lu
        .solve(&b)
        .ok_or_else(|| AnalysisError::singular_system(unknowns.names(), determinant))?;

    let solution: Solution = unknowns.iter().zip(x.iter().copied()).collect();
    log::debug!(
        "solved {} unknowns: {}",
        n,
        solution
            .iter()
            .map(|(u, v)| format!("{} = {:.6e}", u, v))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(solution)
}
