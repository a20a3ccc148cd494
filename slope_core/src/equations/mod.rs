//! # Structural Engineering Equations
//!
//! Closed-form member formulas and the structured linear expressions that the
//! slope-deflection method is assembled from.
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported and fixed-end formulas per load type
//! - [`expression`] - Linear expressions over the unknown rotations and sway
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive in the member's transverse "down" direction
//! - **End moments / rotations**: Counter-clockwise positive; a downward load
//!   gives a positive start FEM and a negative end FEM
//! - **Diagram moment**: Positive sagging
//! - **Shear**: Positive when the start side moves up relative to the end side
//! - **Reactions**: Positive upward (beams) or in +x (frame column bases)

pub mod beam;
pub mod expression;

pub use beam::{
    fem_chord_rotation,
    fem_midspan_point_load,
    fem_point_load,
    fem_uniform_load,
    point_load_moment,
    point_load_reactions,
    point_load_shear,
    point_load_shear_left,
    uniform_load_moment,
    uniform_load_reactions,
    uniform_load_shear,
};

pub use expression::{LinearExpression, Unknown};
