//! # Slope-Deflection Equations
//!
//! Builds the end-moment expression of every member and the equilibrium
//! equations that close the system.
//!
//! ```text
//! M_near = (2EI/L)·(2θ_near + θ_far - 3ψ) + FEM_near
//! ```
//!
//! - Moments, rotations and ψ are counter-clockwise positive
//! - ψ is the chord rotation: `(s_start - s_end)/L` for support settlements
//!   (positive downward) or `-Δ/h` for a swaying frame column
//! - Rotations of fixed joints are zero and are left out of the expression
//! - A cantilever (one end free) is statically determinate; its end moment at
//!   the support is a constant and the free end moment is zero
//!
//! The joint equations sum the end moments meeting at each joint with a
//! rotation unknown. A swaying frame adds one storey shear equation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::member::Member;
use crate::calculations::solver::{Equation, UnknownSet};
use crate::equations::expression::{LinearExpression, Unknown};

/// One end of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum End {
    Start,
    End,
}

/// Source of the chord rotation ψ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chord {
    /// Ends do not translate relative to each other
    #[default]
    None,

    /// Known transverse settlements of the start and end joints
    Settlement { start: f64, end: f64 },

    /// End translates by the frame sway unknown Δ
    Sway,
}

impl Chord {
    /// Known chord rotation (zero for `Sway`, which is carried as an unknown)
    pub fn known_rotation(&self, length: f64) -> f64 {
        match self {
            Chord::Settlement { start, end } => (start - end) / length,
            Chord::None | Chord::Sway => 0.0,
        }
    }
}

// =============================================================================
// MEMBER DEFINITION
// =============================================================================

/// A member placed between two labelled joints, with the information the
/// equation builder needs about its ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDefinition {
    /// Member label (`AB`)
    pub label: String,
    pub start_joint: char,
    pub end_joint: char,
    pub member: Member,
    pub chord: Chord,
    /// Start joint carries a rotation unknown
    pub start_rotates: bool,
    /// End joint carries a rotation unknown
    pub end_rotates: bool,
    /// Free (cantilever) end, if any
    pub free_end: Option<End>,
}

impl MemberDefinition {
    /// A member with both ends rotationally fixed and no chord rotation
    pub fn new(start_joint: char, end_joint: char, member: Member) -> Self {
        Self {
            label: format!("{}{}", start_joint, end_joint),
            start_joint,
            end_joint,
            member,
            chord: Chord::None,
            start_rotates: false,
            end_rotates: false,
            free_end: None,
        }
    }

    pub fn with_rotations(mut self, start: bool, end: bool) -> Self {
        self.start_rotates = start;
        self.end_rotates = end;
        self
    }

    pub fn with_chord(mut self, chord: Chord) -> Self {
        self.chord = chord;
        self
    }

    pub fn with_free_end(mut self, end: End) -> Self {
        self.free_end = Some(end);
        self
    }

    /// Joint at the given end
    pub fn joint(&self, end: End) -> char {
        match end {
            End::Start => self.start_joint,
            End::End => self.end_joint,
        }
    }

    /// Moment label at the given end, near joint first (`MAB`, `MBA`)
    pub fn moment_label(&self, end: End) -> String {
        match end {
            End::Start => format!("M{}{}", self.start_joint, self.end_joint),
            End::End => format!("M{}{}", self.end_joint, self.start_joint),
        }
    }

    /// Unknowns this member introduces
    pub fn unknowns(&self) -> Vec<Unknown> {
        let mut out = Vec::new();
        if self.free_end.is_some() {
            return out;
        }
        if self.start_rotates {
            out.push(Unknown::Rotation(self.start_joint));
        }
        if self.end_rotates {
            out.push(Unknown::Rotation(self.end_joint));
        }
        if self.chord == Chord::Sway {
            out.push(Unknown::Sway);
        }
        out
    }
}

// =============================================================================
// MEMBER EQUATIONS
// =============================================================================

/// End-moment expressions of one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEquations {
    pub member: String,
    pub start_joint: char,
    pub end_joint: char,
    /// Label of the start moment (`MAB`)
    pub start_label: String,
    /// Moment at the start joint
    pub start: LinearExpression,
    /// Label of the end moment (`MBA`)
    pub end_label: String,
    /// Moment at the end joint
    pub end: LinearExpression,
}

impl MemberEquations {
    /// End moments acting at `joint` with their labels
    pub fn at_joint(&self, joint: char) -> Vec<(&str, &LinearExpression)> {
        let mut out = Vec::new();
        if self.start_joint == joint {
            out.push((self.start_label.as_str(), &self.start));
        }
        if self.end_joint == joint {
            out.push((self.end_label.as_str(), &self.end));
        }
        out
    }

    /// Expression at one end
    pub fn expression(&self, end: End) -> &LinearExpression {
        match end {
            End::Start => &self.start,
            End::End => &self.end,
        }
    }
}

fn subscripted(label: &str) -> String {
    match label.strip_prefix('M') {
        Some(ends) => format!("M_{}", ends),
        None => label.to_string(),
    }
}

/// Renders both ends, e.g. `M_BA = 1333.33(θA + 2θB) + 30.00`
impl fmt::Display for MemberEquations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = {}", subscripted(&self.start_label), self.start)?;
        write!(f, "{} = {}", subscripted(&self.end_label), self.end)
    }
}

fn end_expression(
    definition: &MemberDefinition,
    stiffness: f64,
    near: End,
    fem: f64,
) -> LinearExpression {
    let (near_joint, near_rotates, far_joint, far_rotates) = match near {
        End::Start => (
            definition.start_joint,
            definition.start_rotates,
            definition.end_joint,
            definition.end_rotates,
        ),
        End::End => (
            definition.end_joint,
            definition.end_rotates,
            definition.start_joint,
            definition.start_rotates,
        ),
    };

    let mut expression = LinearExpression::new(stiffness).with_constant(fem);
    if near_rotates {
        expression = expression.with_term(Unknown::Rotation(near_joint), 2.0);
    }
    if far_rotates {
        expression = expression.with_term(Unknown::Rotation(far_joint), 1.0);
    }
    let length = definition.member.length;
    match definition.chord {
        Chord::None => {}
        Chord::Settlement { .. } => {
            expression = expression.with_offset(-3.0 * definition.chord.known_rotation(length));
        }
        Chord::Sway => {
            // ψ = -Δ/h
            expression = expression.with_term(Unknown::Sway, 3.0 / length);
        }
    }
    expression
}

/// End-moment expressions of one member for elastic modulus `modulus`
pub fn build_member_equations(definition: &MemberDefinition, modulus: f64) -> MemberEquations {
    let member = &definition.member;
    let length = member.length;

    let (start, end) = match definition.free_end {
        // Cantilever: the support moment balances the load about the support
        Some(End::End) => (
            LinearExpression::constant(member.load.moment_about_start(length)),
            LinearExpression::constant(0.0),
        ),
        Some(End::Start) => (
            LinearExpression::constant(0.0),
            LinearExpression::constant(-member.load.moment_about_end(length)),
        ),
        None => {
            let stiffness = 2.0 * member.ei(modulus) / length;
            let (fem_start, fem_end) = member.load.fixed_end_moments(length);
            (
                end_expression(definition, stiffness, End::Start, fem_start),
                end_expression(definition, stiffness, End::End, fem_end),
            )
        }
    };

    log::trace!("{}: {} = {}", definition.label, definition.moment_label(End::Start), start);
    log::trace!("{}: {} = {}", definition.label, definition.moment_label(End::End), end);

    MemberEquations {
        member: definition.label.clone(),
        start_joint: definition.start_joint,
        end_joint: definition.end_joint,
        start_label: definition.moment_label(End::Start),
        start,
        end_label: definition.moment_label(End::End),
        end,
    }
}

// =============================================================================
// EQUILIBRIUM
// =============================================================================

/// Moment equilibrium at every joint carrying a rotation unknown:
/// the end moments meeting at the joint sum to zero.
pub fn joint_equilibrium_equations(
    members: &[MemberEquations],
    unknowns: &UnknownSet,
) -> Vec<Equation> {
    unknowns
        .iter()
        .filter_map(|unknown| match unknown {
            Unknown::Rotation(joint) => Some(joint),
            Unknown::Sway => None,
        })
        .map(|joint| {
            let mut labels = Vec::new();
            let mut sum = LinearExpression::default();
            for (label, expression) in members.iter().flat_map(|m| m.at_joint(joint)) {
                labels.push(label.to_string());
                sum = sum + expression;
            }
            Equation::new(format!("Joint {}", joint), labels.join(" + "), sum)
        })
        .collect()
}

/// A column as seen by the storey shear equation
#[derive(Debug, Clone, Copy)]
pub struct ColumnShear<'a> {
    pub definition: &'a MemberDefinition,
    pub equations: &'a MemberEquations,
}

/// Storey shear equilibrium of a swaying frame.
///
/// Horizontal equilibrium of the frame with the base shears written from
/// column statics gives, over the sway-participating columns,
///
/// ```text
/// Σ (M_base + M_top)/h - Σ R_top - P = 0
/// ```
///
/// where `R_top` is the simply-supported top reaction of the column's own
/// lateral load and `P` the lateral load at beam level. The result is
/// normalized so that Δ has unit coefficient.
pub fn frame_shear_equation(columns: &[ColumnShear<'_>], lateral_load: f64) -> Equation {
    let mut labels = Vec::new();
    let mut sum = LinearExpression::constant(-lateral_load);

    for column in columns
        .iter()
        .filter(|c| c.definition.chord == Chord::Sway)
    {
        let h = column.definition.member.length;
        let load = &column.definition.member.load;
        let (_, r_top) = load.simple_reactions(h);
        labels.push(format!(
            "({} + {})/{}",
            column.equations.start_label, column.equations.end_label, h
        ));
        sum = sum
            + (column.equations.start.clone() + &column.equations.end).scaled(1.0 / h)
            + LinearExpression::constant(-r_top);
    }

    let mut description = labels.join(" + ");
    if lateral_load != 0.0 {
        description.push_str(" - P");
    }

    Equation::new("Shear", description, sum.normalized_by(Unknown::Sway))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::solver::{solve, Solution};
    use crate::loads::Load;
    use approx::assert_relative_eq;

    #[test]
    fn test_propped_cantilever_expressions() {
        // AB fixed at A, hinged at B, UDL 10 kN/m over 6 m, EI = 1000
        let member = Member::new(6.0, 1.0).with_load(Load::uniform(10.0));
        let definition = MemberDefinition::new('A', 'B', member).with_rotations(false, true);
        let eqs = build_member_equations(&definition, 1000.0);

        assert_eq!(eqs.start_label, "MAB");
        assert_eq!(eqs.end_label, "MBA");
        assert_eq!(eqs.start.to_string(), "333.33(θB) + 30.00");
        assert_eq!(eqs.end.to_string(), "333.33(2θB) - 30.00");
        assert_eq!(
            eqs.to_string(),
            "M_AB = 333.33(θB) + 30.00\nM_BA = 333.33(2θB) - 30.00"
        );

        let unknowns = UnknownSet::new(definition.unknowns());
        let equations = joint_equilibrium_equations(std::slice::from_ref(&eqs), &unknowns);
        assert_eq!(equations.len(), 1);
        assert_eq!(equations[0].description, "MBA");

        let solution = solve(&equations, &unknowns, 1e-10).unwrap();
        // MBA = 0 -> θB = 30 / 666.67
        assert_relative_eq!(solution.rotation('B'), 0.045, epsilon = 1e-12);
        // MAB = wL²/8
        assert_relative_eq!(eqs.start.evaluate(&solution), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_settlement_offset() {
        // B settles 0.01 over 5 m: ψ = -0.002, both ends fixed, M = 6EIΔ/L²
        let definition = MemberDefinition::new('A', 'B', Member::new(5.0, 1.0))
            .with_chord(Chord::Settlement { start: 0.0, end: 0.01 });
        let eqs = build_member_equations(&definition, 1000.0);
        let m = eqs.start.evaluate(&Solution::default());
        assert_relative_eq!(m, 2.4, epsilon = 1e-12);
        assert_relative_eq!(eqs.end.evaluate(&Solution::default()), 2.4, epsilon = 1e-12);
        assert!(definition.unknowns().is_empty());
    }

    #[test]
    fn test_cantilever_is_constant() {
        let member = Member::new(2.0, 1.0).with_load(Load::uniform(5.0));
        let free_right = MemberDefinition::new('B', 'C', member).with_free_end(End::End);
        let eqs = build_member_equations(&free_right, 1000.0);
        assert_eq!(eqs.start, LinearExpression::constant(10.0));
        assert_eq!(eqs.end, LinearExpression::constant(0.0));
        assert!(free_right.unknowns().is_empty());

        let free_left = MemberDefinition::new('A', 'B', member).with_free_end(End::Start);
        let eqs = build_member_equations(&free_left, 1000.0);
        assert_eq!(eqs.end, LinearExpression::constant(-10.0));
    }

    #[test]
    fn test_sway_term() {
        let definition = MemberDefinition::new('A', 'B', Member::new(4.0, 1.0))
            .with_rotations(false, true)
            .with_chord(Chord::Sway);
        let eqs = build_member_equations(&definition, 1000.0);
        // 2EI/L = 500, Δ coefficient 3/4 inside the bracket
        assert_relative_eq!(eqs.start.coefficient(Unknown::Sway), 375.0);
        assert_relative_eq!(eqs.end.coefficient(Unknown::Rotation('B')), 1000.0);
        assert_eq!(
            definition.unknowns(),
            vec![Unknown::Rotation('B'), Unknown::Sway]
        );
    }

    #[test]
    fn test_shear_equation_fixed_columns_stiff_beam() {
        // Two fixed-base columns with rotations held at zero: Δ = Ph³/(24EI)
        let column = Member::new(4.0, 1.0);
        let left = MemberDefinition::new('A', 'B', column).with_chord(Chord::Sway);
        let right = MemberDefinition::new('D', 'C', column).with_chord(Chord::Sway);
        let left_eqs = build_member_equations(&left, 1000.0);
        let right_eqs = build_member_equations(&right, 1000.0);

        let shear = frame_shear_equation(
            &[
                ColumnShear { definition: &left, equations: &left_eqs },
                ColumnShear { definition: &right, equations: &right_eqs },
            ],
            12.0,
        );
        assert_relative_eq!(shear.expression.coefficient(Unknown::Sway), 1.0);
        assert_eq!(shear.description, "(MAB + MBA)/4 + (MDC + MCD)/4 - P");

        let unknowns = UnknownSet::new([Unknown::Sway]);
        let solution = solve(&[shear], &unknowns, 1e-10).unwrap();
        assert_relative_eq!(solution.sway(), 12.0 * 64.0 / 24_000.0, epsilon = 1e-12);
        // Each column end carries Ph/4
        assert_relative_eq!(left_eqs.start.evaluate(&solution), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_braced_column_ignored_by_shear() {
        let column = Member::new(4.0, 1.0).with_load(Load::uniform(3.0));
        let braced = MemberDefinition::new('A', 'B', column);
        let eqs = build_member_equations(&braced, 1000.0);
        let shear = frame_shear_equation(&[ColumnShear { definition: &braced, equations: &eqs }], 0.0);
        assert!(shear.expression.terms.is_empty());
        assert_eq!(shear.expression.constant, 0.0);
    }
}
