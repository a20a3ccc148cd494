//! # Analysis Result
//!
//! Everything produced by one slope-deflection run, stage by stage, plus a
//! per-member summary of the diagram extremes.

use serde::{Deserialize, Serialize};

use crate::calculations::bmsf::{evaluate_member, BmsfProfile};
use crate::calculations::critical_points::{extract_critical_points, MemberCriticalPoints};
use crate::calculations::fem::FixedEndMoments;
use crate::calculations::final_moments::MomentTable;
use crate::calculations::reactions::ReactionTable;
use crate::calculations::slope_deflection::{End, MemberDefinition, MemberEquations};
use crate::calculations::solver::{Equation, Solution, UnknownSet};
use crate::errors::AnalysisResult;
use crate::settings::AnalysisSettings;

/// Result of analyzing a beam or frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    /// User label of the analyzed structure
    pub label: String,

    /// Fixed-end moments per member
    pub fixed_end_moments: Vec<FixedEndMoments>,

    /// End-moment expressions per member
    pub member_equations: Vec<MemberEquations>,

    /// Unknowns, in matrix column order
    pub unknowns: UnknownSet,

    /// Equilibrium equations (joint equations, then the shear equation)
    pub equations: Vec<Equation>,

    pub solution: Solution,

    /// Final end moments
    pub moments: MomentTable,

    pub reactions: ReactionTable,

    /// Shear and moment diagrams, one per member
    pub profiles: Vec<BmsfProfile>,

    pub critical_points: Vec<MemberCriticalPoints>,
}

/// Result of [`analyze_beam`](crate::calculations::continuous_beam::analyze_beam)
pub type BeamAnalysis = StructureAnalysis;

/// Result of [`analyze_frame`](crate::calculations::portal_frame::analyze_frame)
pub type FrameAnalysis = StructureAnalysis;

/// Extreme values read off one member's diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub member: String,
    /// (position, moment) of the largest sagging moment
    pub max_positive_moment: Option<(f64, f64)>,
    /// (position, moment) of the largest hogging moment
    pub max_negative_moment: Option<(f64, f64)>,
    /// (position, shear) of the largest absolute shear
    pub max_abs_shear: Option<(f64, f64)>,
}

impl StructureAnalysis {
    /// Diagram extremes for every member
    pub fn summary(&self) -> Vec<MemberSummary> {
        self.profiles
            .iter()
            .map(|p| MemberSummary {
                member: p.member.clone(),
                max_positive_moment: p.max_positive_moment().map(|s| (s.position, s.moment)),
                max_negative_moment: p.max_negative_moment().map(|s| (s.position, s.moment)),
                max_abs_shear: p.max_abs_shear().map(|s| (s.position, s.shear)),
            })
            .collect()
    }

    /// Profile of a member by label
    pub fn profile(&self, member: &str) -> Option<&BmsfProfile> {
        self.profiles.iter().find(|p| p.member == member)
    }

    /// Critical points of a member by label
    pub fn critical_points_of(&self, member: &str) -> Option<&MemberCriticalPoints> {
        self.critical_points.iter().find(|c| c.member == member)
    }

    /// Largest |residual| over the equilibrium equations
    pub fn max_residual(&self) -> f64 {
        self.equations
            .iter()
            .map(|e| e.residual(&self.solution).abs())
            .fold(0.0, f64::max)
    }
}

/// Diagrams and critical points for each member
pub(crate) fn member_diagrams(
    definitions: &[MemberDefinition],
    moments: &MomentTable,
    settings: &AnalysisSettings,
) -> AnalysisResult<(Vec<BmsfProfile>, Vec<MemberCriticalPoints>)> {
    let mut profiles = Vec::with_capacity(definitions.len());
    let mut critical = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let m_start = moments.get(&definition.moment_label(End::Start))?;
        let m_end = moments.get(&definition.moment_label(End::End))?;
        let profile = evaluate_member(
            &definition.label,
            &definition.member,
            m_start,
            m_end,
            settings,
        );
        critical.push(extract_critical_points(&profile, settings.geometry_tolerance));
        profiles.push(profile);
    }
    Ok((profiles, critical))
}
