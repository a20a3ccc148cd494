//! # Members and Supports
//!
//! Input geometry shared by beams and frames.
//!
//! ## Notation
//!
//! - N spans creates N+1 joints, labelled `A`, `B`, `C`, ... left to right
//! - A member is named by its joints (`AB`), and its end moments by near then
//!   far joint (`MAB` at A, `MBA` at B)
//! - Frame columns run from base (start) to top (end)

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::loads::Load;

/// Most joints a structure may label (`A` to `Z`)
pub const MAX_JOINTS: usize = 26;

/// Letter label for the joint at `index` (0 → `A`)
pub fn joint_label(index: usize) -> char {
    (b'A' + (index % MAX_JOINTS) as u8) as char
}

// =============================================================================
// SUPPORT TYPE
// =============================================================================

/// Support condition at a member end or joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupportType {
    /// Restrains displacement and rotation (θ = 0, never solved for)
    Fixed,

    /// Restrains displacement, allows rotation (M = 0 at a terminal joint)
    #[default]
    Hinged,

    /// Same as hinged for transverse loading
    Roller,

    /// No support; a terminal joint with `none` is a free (cantilever) end
    None,
}

impl SupportType {
    /// Returns true if this support restrains transverse displacement
    pub fn restrains_displacement(&self) -> bool {
        !matches!(self, SupportType::None)
    }

    /// Returns true if this support restrains rotation
    pub fn restrains_rotation(&self) -> bool {
        matches!(self, SupportType::Fixed)
    }

    /// Returns true if the joint carries a rotation unknown
    pub fn has_rotation_unknown(&self) -> bool {
        matches!(self, SupportType::Hinged | SupportType::Roller)
    }

    /// Ranking used when two span ends meet at one joint
    fn restraint_rank(&self) -> u8 {
        match self {
            SupportType::Fixed => 2,
            SupportType::Hinged | SupportType::Roller => 1,
            SupportType::None => 0,
        }
    }

    /// The more restraining of two supports (the first wins ties)
    pub fn stronger(self, other: SupportType) -> SupportType {
        if other.restraint_rank() > self.restraint_rank() {
            other
        } else {
            self
        }
    }

    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportType::Fixed => "Fixed",
            SupportType::Hinged => "Hinged",
            SupportType::Roller => "Roller",
            SupportType::None => "None",
        }
    }
}

impl std::fmt::Display for SupportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// MEMBER
// =============================================================================

/// A prismatic member: length, moment of inertia and its transverse load.
///
/// The elastic modulus E is global and supplied with the structure input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Length (m)
    pub length: f64,

    /// Moment of inertia I (m⁴)
    pub inertia: f64,

    /// Transverse load
    #[serde(default)]
    pub load: Load,
}

impl Member {
    /// Create an unloaded member
    pub fn new(length: f64, inertia: f64) -> Self {
        Self {
            length,
            inertia,
            load: Load::None,
        }
    }

    /// Attach a load
    pub fn with_load(mut self, load: Load) -> Self {
        self.load = load;
        self
    }

    /// Flexural stiffness EI for the given modulus
    pub fn ei(&self, modulus: f64) -> f64 {
        modulus * self.inertia
    }

    /// Validate geometry and load; `field` is the member's path in the input
    pub fn validate(&self, field: &str, tolerance: f64) -> AnalysisResult<()> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(AnalysisError::configuration(
                format!("{}.length", field),
                self.length.to_string(),
                "Member length must be positive",
            ));
        }
        if !self.inertia.is_finite() || self.inertia <= 0.0 {
            return Err(AnalysisError::configuration(
                format!("{}.inertia", field),
                self.inertia.to_string(),
                "Moment of inertia must be positive",
            ));
        }
        self.load
            .validate(self.length, tolerance, &format!("{}.load", field))
    }
}

// =============================================================================
// SPAN (continuous beam member)
// =============================================================================

/// One span of a continuous beam with its end supports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Geometry and load
    #[serde(flatten)]
    pub member: Member,

    /// Support at the span's start (left) joint
    #[serde(default)]
    pub start_support: SupportType,

    /// Support at the span's end (right) joint
    #[serde(default)]
    pub end_support: SupportType,
}

impl Span {
    /// Create a span with hinged supports at both ends
    pub fn new(length: f64, inertia: f64, load: Load) -> Self {
        Self {
            member: Member::new(length, inertia).with_load(load),
            start_support: SupportType::Hinged,
            end_support: SupportType::Hinged,
        }
    }

    /// Set both end supports
    pub fn with_supports(mut self, start: SupportType, end: SupportType) -> Self {
        self.start_support = start;
        self.end_support = end;
        self
    }
}

// =============================================================================
// COLUMN (portal frame member)
// =============================================================================

fn default_base() -> SupportType {
    SupportType::Fixed
}

fn default_sway() -> bool {
    true
}

/// A frame column, running from its base support up to the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Geometry and lateral load (acting in +x)
    #[serde(flatten)]
    pub member: Member,

    /// Support at the column base
    #[serde(default = "default_base")]
    pub base: SupportType,

    /// Whether the column top translates with the frame sway Δ
    #[serde(default = "default_sway")]
    pub sway: bool,
}

impl Column {
    /// Create a fixed-base, swaying column
    pub fn new(height: f64, inertia: f64) -> Self {
        Self {
            member: Member::new(height, inertia),
            base: SupportType::Fixed,
            sway: true,
        }
    }

    /// Set the base support
    pub fn with_base(mut self, base: SupportType) -> Self {
        self.base = base;
        self
    }

    /// Attach a lateral load
    pub fn with_load(mut self, load: Load) -> Self {
        self.member.load = load;
        self
    }

    /// Enable or disable sway participation
    pub fn with_sway(mut self, sway: bool) -> Self {
        self.sway = sway;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_labels() {
        assert_eq!(joint_label(0), 'A');
        assert_eq!(joint_label(3), 'D');
    }

    #[test]
    fn test_support_type_restraints() {
        assert!(SupportType::Fixed.restrains_rotation());
        assert!(!SupportType::Hinged.restrains_rotation());
        assert!(SupportType::Roller.has_rotation_unknown());
        assert!(!SupportType::None.restrains_displacement());
        assert!(!SupportType::None.has_rotation_unknown());
    }

    #[test]
    fn test_stronger_support() {
        assert_eq!(SupportType::Hinged.stronger(SupportType::Fixed), SupportType::Fixed);
        assert_eq!(SupportType::None.stronger(SupportType::Roller), SupportType::Roller);
        assert_eq!(SupportType::Roller.stronger(SupportType::Hinged), SupportType::Roller);
    }

    #[test]
    fn test_member_validation() {
        assert!(Member::new(5.0, 1e-4).validate("spans[0]", 1e-6).is_ok());
        let err = Member::new(0.0, 1e-4).validate("spans[0]", 1e-6).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::configuration("spans[0].length", "0", "Member length must be positive")
        );
        assert!(Member::new(5.0, -1.0).validate("spans[0]", 1e-6).is_err());
    }

    #[test]
    fn test_span_serialization_is_flat() {
        let span = Span::new(6.0, 2e-4, Load::uniform(10.0))
            .with_supports(SupportType::Fixed, SupportType::Roller);
        let json = serde_json::to_value(span).unwrap();
        assert_eq!(json["length"], 6.0);
        assert_eq!(json["start_support"], "fixed");
        assert_eq!(json["load"]["type"], "uniform");

        let parsed: Span = serde_json::from_str(r#"{ "length": 4.0, "inertia": 1.0 }"#).unwrap();
        assert_eq!(parsed.member.load, Load::None);
        assert_eq!(parsed.end_support, SupportType::Hinged);
    }

    #[test]
    fn test_column_defaults() {
        let column: Column = serde_json::from_str(r#"{ "length": 3.0, "inertia": 1.0 }"#).unwrap();
        assert_eq!(column.base, SupportType::Fixed);
        assert!(column.sway);
    }
}
