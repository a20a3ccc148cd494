//! # Support Reactions
//!
//! Reactions from member statics. With the end moments known, each member is
//! a simply-supported member plus a linear end-moment correction:
//!
//! ```text
//! d       = (m_right - m_left)/L      m_left = -M_start, m_right = M_end
//! R_start = R1_simple + d
//! R_end   = R2_simple - d
//! ```
//!
//! Beam reactions are upward; frame base shears act in +x.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculations::final_moments::MomentTable;
use crate::calculations::member::{joint_label, Member, SupportType};
use crate::calculations::slope_deflection::{End, MemberDefinition};
use crate::errors::AnalysisResult;

/// Forces the supports exert on a member's ends, opposing its load
pub fn member_end_forces(member: &Member, m_start: f64, m_end: f64) -> (f64, f64) {
    let (r1, r2) = member.load.simple_reactions(member.length);
    let d = (m_end + m_start) / member.length;
    (r1 + d, r2 - d)
}

fn end_forces(definition: &MemberDefinition, moments: &MomentTable) -> AnalysisResult<(f64, f64)> {
    let m_start = moments.get(&definition.moment_label(End::Start))?;
    let m_end = moments.get(&definition.moment_label(End::End))?;
    Ok(member_end_forces(&definition.member, m_start, m_end))
}

/// Support reactions keyed by label
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReactionTable {
    /// Vertical reactions, positive upward (`RA`, `VA`)
    pub vertical: BTreeMap<String, f64>,

    /// Horizontal reactions, positive in +x (`HA`); empty for beams
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub horizontal: BTreeMap<String, f64>,
}

impl ReactionTable {
    /// Reaction by label from either direction
    pub fn get(&self, label: &str) -> Option<f64> {
        self.vertical
            .get(label)
            .or_else(|| self.horizontal.get(label))
            .copied()
    }

    pub fn total_vertical(&self) -> f64 {
        self.vertical.values().sum()
    }

    pub fn total_horizontal(&self) -> f64 {
        self.horizontal.values().sum()
    }
}

/// Vertical reactions of a continuous beam.
///
/// `supports[j]` is the support of joint `j`; joints without support (free
/// cantilever ends) report no reaction.
pub fn beam_reactions(
    definitions: &[MemberDefinition],
    supports: &[SupportType],
    moments: &MomentTable,
) -> AnalysisResult<ReactionTable> {
    let mut at_joint: BTreeMap<char, f64> = BTreeMap::new();
    for definition in definitions {
        let (r_start, r_end) = end_forces(definition, moments)?;
        *at_joint.entry(definition.start_joint).or_insert(0.0) += r_start;
        *at_joint.entry(definition.end_joint).or_insert(0.0) += r_end;
    }

    let mut table = ReactionTable::default();
    for (index, support) in supports.iter().enumerate() {
        if !support.restrains_displacement() {
            continue;
        }
        let joint = joint_label(index);
        let value = at_joint.get(&joint).copied().unwrap_or(0.0);
        table.vertical.insert(format!("R{}", joint), value);
    }
    Ok(table)
}

/// Base reactions of a single-bay portal frame.
///
/// Columns run base → top, so a column's start force is its base shear
/// (reversed into +x). The columns carry no gravity load, so the vertical
/// base reactions are the beam's end forces.
///
/// A `roller` column base is a pin here: it releases rotation and still
/// carries its horizontal reaction. A base free to slide would leave the frame
/// a mechanism under lateral load.
pub fn frame_reactions(
    left_column: &MemberDefinition,
    beam: &MemberDefinition,
    right_column: &MemberDefinition,
    moments: &MomentTable,
) -> AnalysisResult<ReactionTable> {
    let (left_base, _) = end_forces(left_column, moments)?;
    let (right_base, _) = end_forces(right_column, moments)?;
    let (beam_start, beam_end) = end_forces(beam, moments)?;

    let mut table = ReactionTable::default();
    table
        .horizontal
        .insert(format!("H{}", left_column.start_joint), -left_base);
    table
        .horizontal
        .insert(format!("H{}", right_column.start_joint), -right_base);
    table
        .vertical
        .insert(format!("V{}", left_column.start_joint), beam_start);
    table
        .vertical
        .insert(format!("V{}", right_column.start_joint), beam_end);
    Ok(table)
}
