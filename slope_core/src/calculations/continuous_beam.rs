//! # Continuous Beam Analysis
//!
//! Slope-deflection analysis of a beam over any number of spans, with fixed,
//! hinged, roller or free supports and optional support settlements.
//!
//! ## Joints and Supports
//!
//! N spans create N+1 joints `A`, `B`, ... Each span names the support at its
//! own two ends. Where two spans meet, the joint takes the more restraining of
//! the two (fixed over hinged/roller). An interior joint cannot be free.
//!
//! | Joint support | Rotation unknown | Equation          |
//! |---------------|------------------|-------------------|
//! | Fixed         | no (θ = 0)       | none              |
//! | Hinged/Roller | yes              | ΣM at joint = 0   |
//! | None (end)    | no               | none (cantilever) |
//!
//! ## Example Configurations
//!
//! **Propped cantilever:** one span, `[fixed, hinged]`
//!
//! **Two-span continuous:** two spans, `[hinged, hinged] [hinged, hinged]`
//!
//! **Overhang:** `[hinged, hinged] [hinged, none]`
//!
//! # Example
//!
//! ```
//! use slope_core::calculations::continuous_beam::{analyze_beam, BeamInput};
//! use slope_core::calculations::member::{Span, SupportType};
//! use slope_core::loads::Load;
//!
//! let input = BeamInput::new(200e6, vec![
//!     Span::new(6.0, 1e-4, Load::uniform(10.0))
//!         .with_supports(SupportType::Fixed, SupportType::Hinged),
//! ]);
//! let result = analyze_beam(&input).unwrap();
//! assert!((result.moments.get("MAB").unwrap() - 45.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::analysis::{member_diagrams, BeamAnalysis};
use crate::calculations::fem::FixedEndMoments;
use crate::calculations::final_moments::resolve_moments;
use crate::calculations::member::{joint_label, Span, SupportType, MAX_JOINTS};
use crate::calculations::reactions::beam_reactions;
use crate::calculations::slope_deflection::{
    build_member_equations, joint_equilibrium_equations, Chord, End, MemberDefinition,
};
use crate::calculations::solver::{solve, UnknownSet};
use crate::equations::expression::Unknown;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::settings::AnalysisSettings;

// =============================================================================
// INPUT
// =============================================================================

/// Input for continuous beam analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// User label for this beam
    #[serde(default)]
    pub label: String,

    /// Elastic modulus E, shared by all spans
    #[serde(alias = "e")]
    pub modulus: f64,

    /// Spans, ordered left to right
    pub spans: Vec<Span>,

    /// Downward settlement of each joint; empty means none.
    ///
    /// When given, the length must be exactly `spans.len() + 1`.
    #[serde(default)]
    pub settlements: Vec<f64>,

    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl BeamInput {
    pub fn new(modulus: f64, spans: Vec<Span>) -> Self {
        Self {
            label: String::new(),
            modulus,
            spans,
            settlements: Vec::new(),
            settings: AnalysisSettings::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_settlements(mut self, settlements: Vec<f64>) -> Self {
        self.settlements = settlements;
        self
    }

    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Number of spans
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Number of joints (spans + 1)
    pub fn joint_count(&self) -> usize {
        self.spans.len() + 1
    }

    /// Settlement of joint `index` (zero when none were given)
    pub fn settlement(&self, index: usize) -> f64 {
        self.settlements.get(index).copied().unwrap_or(0.0)
    }

    /// Support of every joint, merging the span ends that meet there
    pub fn joint_supports(&self) -> AnalysisResult<Vec<SupportType>> {
        let n = self.spans.len();
        if n == 0 {
            return Err(AnalysisError::configuration(
                "spans",
                "empty",
                "At least one span is required",
            ));
        }
        let mut supports = Vec::with_capacity(n + 1);
        for j in 0..=n {
            let support = match j {
                0 => self.spans[0].start_support,
                j if j == n => self.spans[n - 1].end_support,
                j => self.spans[j - 1]
                    .end_support
                    .stronger(self.spans[j].start_support),
            };
            if support == SupportType::None && j != 0 && j != n {
                return Err(AnalysisError::configuration(
                    format!("spans[{}].start_support", j),
                    support.to_string(),
                    format!("Interior joint {} must be supported", joint_label(j)),
                ));
            }
            supports.push(support);
        }
        Ok(supports)
    }

    /// Validate the input
    pub fn validate(&self) -> AnalysisResult<()> {
        self.settings.validate()?;
        if !self.modulus.is_finite() || self.modulus <= 0.0 {
            return Err(AnalysisError::configuration(
                "modulus",
                self.modulus.to_string(),
                "Elastic modulus must be positive",
            ));
        }

        if self.spans.is_empty() {
            return Err(AnalysisError::configuration(
                "spans",
                "empty",
                "At least one span is required",
            ));
        }

        if self.joint_count() > MAX_JOINTS {
            return Err(AnalysisError::configuration(
                "spans",
                self.spans.len().to_string(),
                format!("At most {} spans are supported", MAX_JOINTS - 1),
            ));
        }

        for (i, span) in self.spans.iter().enumerate() {
            span.member
                .validate(&format!("spans[{}]", i), self.settings.geometry_tolerance)?;
        }

        if !self.settlements.is_empty() && self.settlements.len() != self.joint_count() {
            return Err(AnalysisError::configuration(
                "settlements",
                self.settlements.len().to_string(),
                format!(
                    "Expected {} settlements for {} spans",
                    self.joint_count(),
                    self.spans.len()
                ),
            ));
        }
        if let Some((i, s)) = self
            .settlements
            .iter()
            .enumerate()
            .find(|(_, s)| !s.is_finite())
        {
            return Err(AnalysisError::configuration(
                format!("settlements[{}]", i),
                s.to_string(),
                "Settlement must be a finite number",
            ));
        }

        let supports = self.joint_supports()?;
        if supports.iter().all(|s| !s.restrains_displacement()) {
            return Err(AnalysisError::configuration(
                "spans",
                "no supports",
                "At least one joint must be supported",
            ));
        }

        Ok(())
    }

    /// Place each span between its joints
    pub fn member_definitions(&self, supports: &[SupportType]) -> Vec<MemberDefinition> {
        self.spans
            .iter()
            .enumerate()
            .map(|(i, span)| {
                let (start, end) = (supports[i], supports[i + 1]);
                let mut definition =
                    MemberDefinition::new(joint_label(i), joint_label(i + 1), span.member)
                        .with_rotations(start.has_rotation_unknown(), end.has_rotation_unknown());

                if end == SupportType::None {
                    definition = definition.with_free_end(End::End);
                } else if start == SupportType::None {
                    definition = definition.with_free_end(End::Start);
                }

                let (s_start, s_end) = (self.settlement(i), self.settlement(i + 1));
                if definition.free_end.is_some() {
                    if s_start != 0.0 || s_end != 0.0 {
                        log::warn!(
                            "span {}: settlement ignored on a cantilever",
                            definition.label
                        );
                    }
                } else if s_start != 0.0 || s_end != 0.0 {
                    definition = definition.with_chord(Chord::Settlement {
                        start: s_start,
                        end: s_end,
                    });
                }
                definition
            })
            .collect()
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Analyze a continuous beam
///
/// # Errors
///
/// - [`AnalysisError::Configuration`] for invalid geometry, loads or supports
/// - [`AnalysisError::SingularSystem`] for unstable support layouts
pub fn analyze_beam(input: &BeamInput) -> AnalysisResult<BeamAnalysis> {
    input.validate()?;
    let settings = &input.settings;

    let supports = input.joint_supports()?;
    let definitions = input.member_definitions(&supports);
    log::debug!(
        "beam '{}': {} spans, supports [{}]",
        input.label,
        input.span_count(),
        supports
            .iter()
            .map(|s| s.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let unloaded = input.spans.iter().all(|s| s.member.load.magnitude() == 0.0);
    if unloaded && input.settlements.iter().all(|s| *s == 0.0) {
        log::warn!("beam '{}': no loads or settlements, all results are zero", input.label);
    }

    let fixed_end_moments: Vec<FixedEndMoments> = definitions
        .iter()
        .map(|d| FixedEndMoments::for_member(d.start_joint, d.end_joint, &d.member))
        .collect();

    let member_equations: Vec<_> = definitions
        .iter()
        .map(|d| build_member_equations(d, input.modulus))
        .collect();

    let unknowns = UnknownSet::new(
        supports
            .iter()
            .enumerate()
            .filter(|(_, s)| s.has_rotation_unknown())
            .map(|(j, _)| Unknown::Rotation(joint_label(j))),
    );
    let equations = joint_equilibrium_equations(&member_equations, &unknowns);
    for equation in &equations {
        log::debug!("{}", equation);
    }

    let solution = solve(&equations, &unknowns, settings.singular_tolerance)?;
    let moments = resolve_moments(&member_equations, &solution);
    let reactions = beam_reactions(&definitions, &supports, &moments)?;
    let (profiles, critical_points) = member_diagrams(&definitions, &moments, settings)?;

    Ok(BeamAnalysis {
        label: input.label.clone(),
        fixed_end_moments,
        member_equations,
        unknowns,
        equations,
        solution,
        moments,
        reactions,
        profiles,
        critical_points,
    })
}
