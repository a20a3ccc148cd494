//! # Linear Expressions
//!
//! Structured form of a slope-deflection relation. Each member end moment is
//! a linear function of the unknown joint rotations (and the frame sway):
//!
//! ```text
//! M_near = factor · (Σ cᵢ·uᵢ + offset) + constant
//!          └─2EI/L─┘ └2θn + θf - 3ψ┘     └─FEM─┘
//! ```
//!
//! `factor` keeps the 2EI/L stiffness as a literal scalar so the expression
//! reads like the textbook equation; [`LinearExpression::expanded`] folds it
//! into the coefficients when equations are summed for the solver.
//!
//! Rendering to text ([`fmt::Display`]) is a separate step over this
//! representation and is only used for display.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calculations::solver::Solution;

/// Coefficients smaller than this are dropped from display
const DISPLAY_EPSILON: f64 = 1e-12;

// =============================================================================
// UNKNOWNS
// =============================================================================

/// A named scalar unknown of the equilibrium system.
///
/// Serializes as its display name (`"θB"`, `"Δ"`) so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unknown {
    /// Rotation of the joint with the given letter label
    Rotation(char),
    /// Lateral displacement shared by the sway-participating column tops
    Sway,
}

impl Unknown {
    /// Display name (`θB`, `Δ`)
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unknown::Rotation(joint) => write!(f, "θ{}", joint),
            Unknown::Sway => write!(f, "Δ"),
        }
    }
}

impl FromStr for Unknown {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Δ" {
            return Ok(Unknown::Sway);
        }
        let mut chars = s.strip_prefix('θ').ok_or_else(|| format!("unknown name '{}'", s))?.chars();
        match (chars.next(), chars.next()) {
            (Some(joint), None) if joint.is_ascii_uppercase() => Ok(Unknown::Rotation(joint)),
            _ => Err(format!("unknown name '{}'", s)),
        }
    }
}

impl Serialize for Unknown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Unknown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// LINEAR EXPRESSION
// =============================================================================

/// `factor · (Σ cᵢ·uᵢ + offset) + constant`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearExpression {
    /// Scalar multiplying the bracket (2EI/L for a slope-deflection end)
    pub factor: f64,
    /// Coefficient of each unknown inside the bracket
    pub terms: BTreeMap<Unknown, f64>,
    /// Known value inside the bracket (-3ψ for a settlement chord)
    pub offset: f64,
    /// Value added outside the bracket (the fixed-end moment)
    pub constant: f64,
}

impl LinearExpression {
    /// Empty bracket with the given factor
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            terms: BTreeMap::new(),
            offset: 0.0,
            constant: 0.0,
        }
    }

    /// An expression with no unknowns
    pub fn constant(value: f64) -> Self {
        Self::new(1.0).with_constant(value)
    }

    /// Add `coefficient · unknown` inside the bracket
    pub fn with_term(mut self, unknown: Unknown, coefficient: f64) -> Self {
        *self.terms.entry(unknown).or_insert(0.0) += coefficient;
        self
    }

    /// Add a known value inside the bracket
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset += offset;
        self
    }

    /// Add a value outside the bracket
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    /// Effective coefficient of an unknown (factor applied)
    pub fn coefficient(&self, unknown: Unknown) -> f64 {
        self.factor * self.terms.get(&unknown).copied().unwrap_or(0.0)
    }

    /// Effective constant term (factor applied to the offset)
    pub fn constant_term(&self) -> f64 {
        self.factor * self.offset + self.constant
    }

    /// Unknowns referenced by this expression
    pub fn unknowns(&self) -> impl Iterator<Item = Unknown> + '_ {
        self.terms.keys().copied()
    }

    /// Fold the factor into the coefficients: `Σ (factor·cᵢ)·uᵢ + constant`
    pub fn expanded(&self) -> Self {
        Self {
            factor: 1.0,
            terms: self
                .terms
                .iter()
                .map(|(u, c)| (*u, self.factor * c))
                .collect(),
            offset: 0.0,
            constant: self.constant_term(),
        }
    }

    /// Multiply the whole expression by a scalar
    pub fn scaled(&self, k: f64) -> Self {
        let mut out = self.expanded();
        for c in out.terms.values_mut() {
            *c *= k;
        }
        out.constant *= k;
        out
    }

    /// Divide through by the coefficient of `unknown` so it reads `1·unknown + ...`
    ///
    /// Returns the expanded expression unchanged when the coefficient is zero.
    pub fn normalized_by(&self, unknown: Unknown) -> Self {
        let c = self.coefficient(unknown);
        if c.abs() < DISPLAY_EPSILON {
            return self.expanded();
        }
        self.scaled(1.0 / c)
    }

    /// Substitute solved values; unknowns absent from the solution count as zero
    pub fn evaluate(&self, solution: &Solution) -> f64 {
        let bracket: f64 = self
            .terms
            .iter()
            .map(|(u, c)| c * solution.get(*u).unwrap_or(0.0))
            .sum();
        self.factor * (bracket + self.offset) + self.constant
    }
}

impl Default for LinearExpression {
    fn default() -> Self {
        Self::constant(0.0)
    }
}

impl Add for LinearExpression {
    type Output = LinearExpression;

    fn add(self, rhs: LinearExpression) -> LinearExpression {
        let mut out = self.expanded();
        let rhs = rhs.expanded();
        for (u, c) in rhs.terms {
            *out.terms.entry(u).or_insert(0.0) += c;
        }
        out.constant += rhs.constant;
        out
    }
}

impl<'a> Add<&'a LinearExpression> for LinearExpression {
    type Output = LinearExpression;

    fn add(self, rhs: &'a LinearExpression) -> LinearExpression {
        self + rhs.clone()
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, first: bool, coefficient: f64, name: &str) -> fmt::Result {
    let sign = if coefficient < 0.0 { "-" } else { "+" };
    let magnitude = coefficient.abs();
    if first {
        if coefficient < 0.0 {
            write!(f, "-")?;
        }
    } else {
        write!(f, " {} ", sign)?;
    }
    if (magnitude - 1.0).abs() < DISPLAY_EPSILON && !name.is_empty() {
        write!(f, "{}", name)
    } else if (magnitude - magnitude.round()).abs() < DISPLAY_EPSILON {
        write!(f, "{:.0}{}", magnitude, name)
    } else {
        write!(f, "{:.4}{}", magnitude, name)
    }
}

impl fmt::Display for LinearExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<(Unknown, f64)> = self
            .terms
            .iter()
            .filter(|(_, c)| c.abs() > DISPLAY_EPSILON)
            .map(|(u, c)| (*u, *c))
            .collect();
        let has_bracket = !terms.is_empty() || self.offset.abs() > DISPLAY_EPSILON;

        if !has_bracket {
            return write!(f, "{:.2}", self.constant);
        }

        let bracketed = (self.factor - 1.0).abs() > DISPLAY_EPSILON;
        if bracketed {
            write!(f, "{:.2}(", self.factor)?;
        }
        let mut first = true;
        for (u, c) in &terms {
            write_term(f, first, *c, &u.name())?;
            first = false;
        }
        if self.offset.abs() > DISPLAY_EPSILON {
            write_term(f, first, self.offset, "")?;
        }
        if bracketed {
            write!(f, ")")?;
        }
        if self.constant.abs() > DISPLAY_EPSILON {
            let sign = if self.constant < 0.0 { "-" } else { "+" };
            write!(f, " {} {:.2}", sign, self.constant.abs())?;
        }
        Ok(())
    }
}
