//! # Portal Frame Analysis
//!
//! Slope-deflection analysis of a single-bay portal frame: two columns and
//! one beam, with an optional sway degree of freedom.
//!
//! ```text
//!      B ═══════════ C   → P (lateral_load)
//!      ║             ║
//!   → w║             ║
//!      ║             ║
//!      A             D
//!     ▀▀▀           ▀▀▀
//! ```
//!
//! - Members are `AB` (left column, base A), `BC` (beam) and `DC` (right
//!   column, base D); columns run base → top
//! - Column loads act in +x (rightward); the beam load acts downward
//! - Joints B and C always rotate. A hinged/roller base adds a rotation unknown
//! - When any column has `sway = true`, the frame gains the unknown Δ and the
//!   storey shear equation; swaying columns get chord rotation ψ = -Δ/h
//!   (Δ positive in +x, moments counter-clockwise positive)
//!
//! Reactions: base shears `HA`, `HD` (+x) and vertical reactions `VA`, `VD`
//! (upward).

use serde::{Deserialize, Serialize};

use crate::calculations::analysis::{member_diagrams, FrameAnalysis};
use crate::calculations::fem::FixedEndMoments;
use crate::calculations::final_moments::resolve_moments;
use crate::calculations::member::{Column, Member, SupportType};
use crate::calculations::reactions::frame_reactions;
use crate::calculations::slope_deflection::{
    build_member_equations, frame_shear_equation, joint_equilibrium_equations, Chord, ColumnShear,
    MemberDefinition,
};
use crate::calculations::solver::{solve, UnknownSet};
use crate::errors::{AnalysisError, AnalysisResult};
use crate::settings::AnalysisSettings;

/// Input for portal frame analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// User label for this frame
    #[serde(default)]
    pub label: String,

    /// Elastic modulus E, shared by all members
    #[serde(alias = "e")]
    pub modulus: f64,

    /// Columns, left then right
    pub columns: Vec<Column>,

    /// Beams; a single bay has exactly one
    pub beams: Vec<Member>,

    /// Horizontal load at beam level, positive in +x
    #[serde(default)]
    pub lateral_load: f64,

    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl FrameInput {
    /// Single-bay frame from its two columns and beam
    pub fn new(modulus: f64, left: Column, beam: Member, right: Column) -> Self {
        Self {
            label: String::new(),
            modulus,
            columns: vec![left, right],
            beams: vec![beam],
            lateral_load: 0.0,
            settings: AnalysisSettings::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_lateral_load(mut self, load: f64) -> Self {
        self.lateral_load = load;
        self
    }

    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    /// True if any column participates in sway
    pub fn has_sway(&self) -> bool {
        self.columns.iter().any(|c| c.sway)
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
        if self.columns.len() != 2 {
            return Err(AnalysisError::configuration(
                "columns",
                self.columns.len().to_string(),
                "A single-bay portal frame has exactly 2 columns",
            ));
        }
        if self.beams.len() != 1 {
            return Err(AnalysisError::configuration(
                "beams",
                self.beams.len().to_string(),
                "A single-bay portal frame has exactly 1 beam",
            ));
        }
        if !self.lateral_load.is_finite() {
            return Err(AnalysisError::configuration(
                "lateral_load",
                self.lateral_load.to_string(),
                "Lateral load must be a finite number",
            ));
        }

        let tolerance = self.settings.geometry_tolerance;
        for (i, column) in self.columns.iter().enumerate() {
            column
                .member
                .validate(&format!("columns[{}]", i), tolerance)?;
            if column.base == SupportType::None {
                return Err(AnalysisError::configuration(
                    format!("columns[{}].base", i),
                    column.base.to_string(),
                    "Column base must be fixed, hinged or roller",
                ));
            }
        }
        self.beams[0].validate("beams[0]", tolerance)
    }

    /// Definitions of AB, BC and DC
    ///
    /// Call after [`validate`](Self::validate).
    pub fn member_definitions(&self) -> [MemberDefinition; 3] {
        let sway = self.has_sway();
        let column = |base: char, top: char, column: &Column| {
            let chord = if sway && column.sway {
                Chord::Sway
            } else {
                Chord::None
            };
            MemberDefinition::new(base, top, column.member)
                .with_rotations(column.base.has_rotation_unknown(), true)
                .with_chord(chord)
        };
        [
            column('A', 'B', &self.columns[0]),
            MemberDefinition::new('B', 'C', self.beams[0]).with_rotations(true, true),
            column('D', 'C', &self.columns[1]),
        ]
    }
}

/// Analyze a single-bay portal frame
///
/// # Errors
///
/// - [`AnalysisError::Configuration`] for invalid members or an unsupported layout
/// - [`AnalysisError::SingularSystem`] for unstable frames
pub fn analyze_frame(input: &FrameInput) -> AnalysisResult<FrameAnalysis> {
    input.validate()?;
    let settings = &input.settings;
    let definitions = input.member_definitions();
    let [left, beam, right] = &definitions;

    log::debug!(
        "frame '{}': bases {}/{}, sway {}",
        input.label,
        input.columns[0].base,
        input.columns[1].base,
        input.has_sway()
    );
    if !input.has_sway() && input.lateral_load != 0.0 {
        log::warn!(
            "frame '{}': lateral load {} ignored without sway",
            input.label,
            input.lateral_load
        );
    }

    if input.lateral_load == 0.0
        && definitions.iter().all(|d| d.member.load.magnitude() == 0.0)
    {
        log::warn!("frame '{}': no loads, all results are zero", input.label);
    }

    let fixed_end_moments: Vec<FixedEndMoments> = definitions
        .iter()
        .map(|d| FixedEndMoments::for_member(d.start_joint, d.end_joint, &d.member))
        .collect();

    let member_equations: Vec<_> = definitions
        .iter()
        .map(|d| build_member_equations(d, input.modulus))
        .collect();

    let unknowns = UnknownSet::new(definitions.iter().flat_map(|d| d.unknowns()));
    let mut equations = joint_equilibrium_equations(&member_equations, &unknowns);
    if input.has_sway() {
        let columns = [
            ColumnShear {
                definition: left,
                equations: &member_equations[0],
            },
            ColumnShear {
                definition: right,
                equations: &member_equations[2],
            },
        ];
        equations.push(frame_shear_equation(&columns, input.lateral_load));
    }
    for equation in &equations {
        log::debug!("{}", equation);
    }

    let solution = solve(&equations, &unknowns, settings.singular_tolerance)?;
    let moments = resolve_moments(&member_equations, &solution);
    let reactions = frame_reactions(left, beam, right, &moments)?;
    let (profiles, critical_points) = member_diagrams(&definitions, &moments, settings)?;

    Ok(FrameAnalysis {
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
