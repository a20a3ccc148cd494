//! # Beam Formulas
//!
//! Closed-form equations for a single member under the supported load types:
//! simply-supported reference values (reactions, shear, moment) and fixed-end
//! moments for a member with both ends rigidly clamped.
//!
//! ## Notation
//!
//! - `L` = Member length
//! - `x` = Position along member from its start
//! - `a` = Load position from start, `b = L - a`
//! - `P` = Point load magnitude
//! - `w` = Uniform load intensity (force per unit length)
//! - `R1` = Start reaction, `R2` = End reaction
//!
//! ## Sign Conventions
//!
//! - Loads: Positive in the member's transverse "down" direction
//! - Simply-supported moment: Positive sagging
//! - Shear: Positive when the start side moves up relative to the end side
//! - Reactions: Positive opposing the load
//! - Fixed-end moments: counter-clockwise positive on the member end, so a
//!   downward load gives a positive start and a negative end moment
//!
//! ## References
//!
//! - Structural Analysis by R.C. Hibbeler, Chapter 10 (slope-deflection)
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1

// =============================================================================
// POINT LOAD FORMULAS
// Concentrated load P at distance 'a' from the start
// =============================================================================

/// Calculate simply-supported reactions for point load P at position a on span L
///
/// ```text
///        P
///        ↓
///    ────┬────────────
///    △   a            △
///   R1  ←───────L────→ R2
/// ```
///
/// # Formulas
/// - R1 = Pb/L
/// - R2 = Pa/L
#[inline]
pub fn point_load_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    let r1 = p * (l - a) / l;
    let r2 = p * a / l;
    (r1, r2)
}

/// Calculate shear at position x for point load P at position a
///
/// Right-continuous at the load: the value returned at x = a is the shear
/// just to the right of the load. Use [`point_load_shear_left`] for the
/// other side of the jump.
///
/// - V(x) = Pb/L           for x < a
/// - V(x) = -Pa/L          for x ≥ a
#[inline]
pub fn point_load_shear(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, r2) = point_load_reactions(p, a, l);
    if x < a {
        r1
    } else {
        -r2
    }
}

/// Shear just to the left of x (left-continuous at the load point)
#[inline]
pub fn point_load_shear_left(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, r2) = point_load_reactions(p, a, l);
    if x <= a {
        r1
    } else {
        -r2
    }
}

/// Calculate moment at position x for point load P at position a
///
/// - M(x) = (Pb/L)·x          for x ≤ a
/// - M(x) = (Pa/L)·(L - x)    for x > a
///
/// Maximum at the load point: M_max = Pab/L
#[inline]
pub fn point_load_moment(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, r2) = point_load_reactions(p, a, l);
    if x <= a {
        r1 * x
    } else {
        r2 * (l - x)
    }
}

/// Fixed-end moments for point load P at position a
///
/// ```text
///  ▌      P
///  ▌      ↓
///  ▌──────┬──────────▐
///  ▌  a        b     ▐
/// ```
///
/// # Formulas
/// - FEM_start = +Pab²/L²
/// - FEM_end   = -Pa²b/L²
#[inline]
pub fn fem_point_load(p: f64, a: f64, l: f64) -> (f64, f64) {
    let b = l - a;
    let start = p * a * b * b / (l * l);
    let end = -p * a * a * b / (l * l);
    (start, end)
}

/// Fixed-end moments for point load P at midspan
///
/// - FEM_start = +PL/8
/// - FEM_end   = -PL/8
#[inline]
pub fn fem_midspan_point_load(p: f64, l: f64) -> (f64, f64) {
    let m = p * l / 8.0;
    (m, -m)
}

// =============================================================================
// UNIFORM LOAD FORMULAS
// Uniform load w over the entire member
// =============================================================================

/// Calculate simply-supported reactions for uniform load w over full span L
///
/// ```text
///    ↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓ w
///    ═════════════════
///    △                △
///   R1  ←─────L─────→ R2
/// ```
///
/// R1 = R2 = wL/2
#[inline]
pub fn uniform_load_reactions(w: f64, l: f64) -> (f64, f64) {
    let r = w * l / 2.0;
    (r, r)
}

/// Calculate shear at position x for uniform load w over full span
///
/// V(x) = wL/2 - wx
#[inline]
pub fn uniform_load_shear(w: f64, l: f64, x: f64) -> f64 {
    w * l / 2.0 - w * x
}

/// Calculate moment at position x for uniform load w over full span
///
/// M(x) = (wL/2)·x - wx²/2, with M_max = wL²/8 at x = L/2
#[inline]
pub fn uniform_load_moment(w: f64, l: f64, x: f64) -> f64 {
    w * l / 2.0 * x - w * x * x / 2.0
}

/// Fixed-end moments for uniform load w over full span
///
/// - FEM_start = +wL²/12
/// - FEM_end   = -wL²/12
#[inline]
pub fn fem_uniform_load(w: f64, l: f64) -> (f64, f64) {
    let m = w * l * l / 12.0;
    (m, -m)
}

// =============================================================================
// CHORD ROTATION
// =============================================================================

/// Fixed-end moment produced by a chord rotation ψ alone
///
/// Both ends: M = -6EIψ/L, with ψ counter-clockwise positive. Used to check
/// settlement cases against the slope-deflection equation with both rotations
/// held at zero.
#[inline]
pub fn fem_chord_rotation(e: f64, i: f64, l: f64, psi: f64) -> f64 {
    -6.0 * e * i * psi / l
}

// =============================================================================
// UNIT TESTS
// =============================================================================
