//! # Load Models
//!
//! The load variants a member can carry and, for each, the closed-form
//! quantities the analysis needs:
//!
//! - fixed-end moments for a member clamped at both ends
//! - simply-supported reference shear and moment at any position
//! - positions where the load introduces a discontinuity
//!
//! All positions are measured from the member's local start.
//!
//! # Example
//!
//! ```
//! use slope_core::loads::Load;
//!
//! let udl = Load::uniform(10.0);
//! let (start, end) = udl.fixed_end_moments(6.0);
//! assert_eq!((start, end), (30.0, -30.0));
//! assert_eq!(udl.simple_moment(6.0, 3.0), 45.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::beam::{
    fem_midspan_point_load, fem_point_load, fem_uniform_load, point_load_moment,
    point_load_reactions, point_load_shear, point_load_shear_left, uniform_load_moment,
    uniform_load_reactions, uniform_load_shear,
};
use crate::errors::{AnalysisError, AnalysisResult};

/// Which side of a discontinuity a value is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Limit approaching from smaller x
    Left,
    /// Limit approaching from larger x
    Right,
}

/// Transverse load carried by one member.
///
/// Magnitudes are non-negative and act in the member's transverse "down"
/// direction (gravity for beams, +x for frame columns).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Load {
    /// Unloaded member
    #[default]
    None,

    /// Uniform load w (kN/m) over the full length
    Uniform { w: f64 },

    /// Point load P (kN) at midspan
    PointAtMidspan { p: f64 },

    /// Point load P (kN) at distance a from the start and b from the end
    PointAtDistance { p: f64, a: f64, b: f64 },
}

impl Load {
    /// Create a uniform load
    pub fn uniform(w: f64) -> Self {
        Load::Uniform { w }
    }

    /// Create a midspan point load
    pub fn point_at_midspan(p: f64) -> Self {
        Load::PointAtMidspan { p }
    }

    /// Create a point load at distances a (from start) and b (from end)
    pub fn point_at_distance(p: f64, a: f64, b: f64) -> Self {
        Load::PointAtDistance { p, a, b }
    }

    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::None => "None",
            Load::Uniform { .. } => "Uniform",
            Load::PointAtMidspan { .. } => "Point at midspan",
            Load::PointAtDistance { .. } => "Point at distance",
        }
    }

    /// Load magnitude (w or P)
    pub fn magnitude(&self) -> f64 {
        match self {
            Load::None => 0.0,
            Load::Uniform { w } => *w,
            Load::PointAtMidspan { p } | Load::PointAtDistance { p, .. } => *p,
        }
    }

    /// Check magnitude and point-load geometry against the member length
    ///
    /// `field` is the path of the load in the input, used in error messages.
    pub fn validate(&self, length: f64, tolerance: f64, field: &str) -> AnalysisResult<()> {
        let magnitude = self.magnitude();
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(AnalysisError::configuration(
                field,
                magnitude.to_string(),
                "Load magnitude must be zero or positive",
            ));
        }
        if let Load::PointAtDistance { a, b, .. } = *self {
            if !a.is_finite() || !b.is_finite() {
                return Err(AnalysisError::configuration(
                    format!("{}.a", field),
                    format!("a = {}, b = {}", a, b),
                    "Point load distances must be finite numbers",
                ));
            }
            if a < 0.0 || b < 0.0 {
                return Err(AnalysisError::configuration(
                    format!("{}.a", field),
                    format!("a = {}, b = {}", a, b),
                    "Point load distances must not be negative",
                ));
            }
            if (a + b - length).abs() > tolerance {
                return Err(AnalysisError::configuration(
                    format!("{}.a", field),
                    format!("a + b = {}", a + b),
                    format!("Point load distances must sum to the member length {}", length),
                ));
            }
        }
        Ok(())
    }

    /// Position of the concentrated load, if any
    pub fn point_position(&self, length: f64) -> Option<f64> {
        match self {
            Load::PointAtMidspan { .. } => Some(length / 2.0),
            Load::PointAtDistance { a, .. } => Some(*a),
            _ => None,
        }
    }

    /// Interior positions where shear jumps
    pub fn load_positions(&self, length: f64) -> Vec<f64> {
        self.point_position(length)
            .filter(|x| *x > 0.0 && *x < length)
            .into_iter()
            .collect()
    }

    /// Total applied force
    pub fn total(&self, length: f64) -> f64 {
        match self {
            Load::None => 0.0,
            Load::Uniform { w } => w * length,
            Load::PointAtMidspan { p } | Load::PointAtDistance { p, .. } => *p,
        }
    }

    /// Statical moment of the load about the member start (Σ P·a)
    pub fn moment_about_start(&self, length: f64) -> f64 {
        match self {
            Load::None => 0.0,
            Load::Uniform { w } => w * length * length / 2.0,
            Load::PointAtMidspan { p } => p * length / 2.0,
            Load::PointAtDistance { p, a, .. } => p * a,
        }
    }

    /// Statical moment of the load about the member end (Σ P·b)
    pub fn moment_about_end(&self, length: f64) -> f64 {
        self.total(length) * length - self.moment_about_start(length)
    }

    /// Fixed-end moments (start, end) with both ends clamped
    pub fn fixed_end_moments(&self, length: f64) -> (f64, f64) {
        match self {
            Load::None => (0.0, 0.0),
            Load::Uniform { w } => fem_uniform_load(*w, length),
            Load::PointAtMidspan { p } => fem_midspan_point_load(*p, length),
            Load::PointAtDistance { p, a, .. } => fem_point_load(*p, *a, length),
        }
    }

    /// Simply-supported reactions (start, end)
    pub fn simple_reactions(&self, length: f64) -> (f64, f64) {
        match self {
            Load::None => (0.0, 0.0),
            Load::Uniform { w } => uniform_load_reactions(*w, length),
            Load::PointAtMidspan { p } => point_load_reactions(*p, length / 2.0, length),
            Load::PointAtDistance { p, a, .. } => point_load_reactions(*p, *a, length),
        }
    }

    /// Simply-supported shear at x, taken from the given side of any jump
    pub fn simple_shear(&self, length: f64, x: f64, side: Side) -> f64 {
        let point = |p: f64, a: f64| match side {
            Side::Left => point_load_shear_left(p, a, length, x),
            Side::Right => point_load_shear(p, a, length, x),
        };
        match self {
            Load::None => 0.0,
            Load::Uniform { w } => uniform_load_shear(*w, length, x),
            Load::PointAtMidspan { p } => point(*p, length / 2.0),
            Load::PointAtDistance { p, a, .. } => point(*p, *a),
        }
    }

    /// Simply-supported moment at x
    pub fn simple_moment(&self, length: f64, x: f64) -> f64 {
        match self {
            Load::None => 0.0,
            Load::Uniform { w } => uniform_load_moment(*w, length, x),
            Load::PointAtMidspan { p } => point_load_moment(*p, length / 2.0, length, x),
            Load::PointAtDistance { p, a, .. } => point_load_moment(*p, *a, length, x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_none_load_is_inert() {
        let load = Load::None;
        assert_eq!(load.fixed_end_moments(5.0), (0.0, 0.0));
        assert_eq!(load.simple_shear(5.0, 2.0, Side::Right), 0.0);
        assert_eq!(load.simple_moment(5.0, 2.0), 0.0);
        assert!(load.load_positions(5.0).is_empty());
    }

    #[test]
    fn test_midspan_shear_discontinuity() {
        let load = Load::point_at_midspan(20.0);
        assert!(approx_eq(load.simple_shear(4.0, 2.0, Side::Left), 10.0));
        assert!(approx_eq(load.simple_shear(4.0, 2.0, Side::Right), -10.0));
        // Peak PL/4
        assert!(approx_eq(load.simple_moment(4.0, 2.0), 20.0));
        assert_eq!(load.load_positions(4.0), vec![2.0]);
    }

    #[test]
    fn test_point_at_distance_continuity_with_midspan() {
        let general = Load::point_at_distance(30.0, 2.5, 2.5);
        let midspan = Load::point_at_midspan(30.0);
        let (gs, ge) = general.fixed_end_moments(5.0);
        let (ms, me) = midspan.fixed_end_moments(5.0);
        assert!(approx_eq(gs, ms));
        assert!(approx_eq(ge, me));
        for x in [0.0, 1.0, 2.5, 4.0, 5.0] {
            assert!(approx_eq(general.simple_moment(5.0, x), midspan.simple_moment(5.0, x)));
        }
    }

    #[test]
    fn test_statical_moments() {
        let load = Load::point_at_distance(10.0, 1.0, 3.0);
        assert!(approx_eq(load.moment_about_start(4.0), 10.0));
        assert!(approx_eq(load.moment_about_end(4.0), 30.0));
        let udl = Load::uniform(2.0);
        assert!(approx_eq(udl.moment_about_start(3.0), 9.0));
        assert!(approx_eq(udl.moment_about_end(3.0), 9.0));
    }

    #[test]
    fn test_validate_rejects_bad_distances() {
        let load = Load::point_at_distance(10.0, 2.0, 3.0);
        let err = load.validate(6.0, 1e-6, "spans[0].load").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(load.validate(5.0, 1e-6, "spans[0].load").is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite_distances() {
        for load in [
            Load::point_at_distance(10.0, f64::NAN, 5.0),
            Load::point_at_distance(10.0, 5.0, f64::INFINITY),
        ] {
            let err = load.validate(5.0, 1e-6, "spans[0].load").unwrap_err();
            match err {
                AnalysisError::Configuration { field, reason, .. } => {
                    assert_eq!(field, "spans[0].load.a");
                    assert_eq!(reason, "Point load distances must be finite numbers");
                }
                other => panic!("expected a configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_rejects_negative_magnitude() {
        assert!(Load::uniform(-1.0).validate(5.0, 1e-6, "load").is_err());
        assert!(Load::uniform(0.0).validate(5.0, 1e-6, "load").is_ok());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Load::point_at_distance(10.0, 2.0, 3.0)).unwrap();
        assert_eq!(json, r#"{"type":"point_at_distance","p":10.0,"a":2.0,"b":3.0}"#);
        let back: Load = serde_json::from_str(r#"{"type":"uniform","w":12.5}"#).unwrap();
        assert_eq!(back, Load::uniform(12.5));
    }
}
