//! # Fixed-End Moments
//!
//! Fixed-end moments for each member under its applied load, computed as if
//! both ends were clamped. Chord rotation is not included here; it enters the
//! slope-deflection equation through the `-3ψ` term.

use serde::{Deserialize, Serialize};

use crate::calculations::member::Member;

/// Fixed-end moments (start, end) of a member
///
/// Counter-clockwise positive: a downward load gives a positive start moment
/// and a negative end moment.
pub fn fixed_end_moments(member: &Member) -> (f64, f64) {
    member.load.fixed_end_moments(member.length)
}

/// One row of the fixed-end moment table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedEndMoments {
    /// Member label (`AB`)
    pub member: String,

    /// Label of the start moment (`MAB`)
    pub start_label: String,

    /// FEM at the start
    pub start: f64,

    /// Label of the end moment (`MBA`)
    pub end_label: String,

    /// FEM at the end
    pub end: f64,
}

impl FixedEndMoments {
    /// Compute the row for a member spanning `start_joint` → `end_joint`
    pub fn for_member(start_joint: char, end_joint: char, member: &Member) -> Self {
        let (start, end) = fixed_end_moments(member);
        Self {
            member: format!("{}{}", start_joint, end_joint),
            start_label: format!("M{}{}", start_joint, end_joint),
            start,
            end_label: format!("M{}{}", end_joint, start_joint),
            end,
        }
    }
}

impl std::fmt::Display for FixedEndMoments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FEM_{} = {:.2}, FEM_{} = {:.2}",
            self.start_label.trim_start_matches('M'),
            self.start,
            self.end_label.trim_start_matches('M'),
            self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::Load;

    #[test]
    fn test_uniform_fem() {
        let member = Member::new(6.0, 1.0).with_load(Load::uniform(10.0));
        assert_eq!(fixed_end_moments(&member), (30.0, -30.0));
    }

    #[test]
    fn test_unloaded_member_has_no_fem() {
        assert_eq!(fixed_end_moments(&Member::new(4.0, 1.0)), (0.0, 0.0));
    }

    #[test]
    fn test_table_row_labels() {
        let member = Member::new(8.0, 1.0).with_load(Load::point_at_midspan(40.0));
        let row = FixedEndMoments::for_member('B', 'C', &member);
        assert_eq!(row.member, "BC");
        assert_eq!(row.start_label, "MBC");
        assert_eq!(row.end_label, "MCB");
        assert_eq!(row.start, 40.0);
        assert_eq!(row.to_string(), "FEM_BC = 40.00, FEM_CB = -40.00");
    }
}
