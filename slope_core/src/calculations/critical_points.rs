//! # Critical Points
//!
//! Reduces a member's shear/moment profile to the points a designer reads
//! off: both supports, each side of a point load, and the zero-shear point of
//! a uniform load. Interior plotting samples are dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::bmsf::{BmsfProfile, BmsfSample, SampleKind};

/// Values closer than this are treated as the same
const VALUE_EPSILON: f64 = 1e-9;

/// Location tag of a critical point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalLocation {
    LeftSupport,
    RightSupport,
    LoadPoint,
    ZeroShear,
}

impl fmt::Display for CriticalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CriticalLocation::LeftSupport => "Left support",
            CriticalLocation::RightSupport => "Right support",
            CriticalLocation::LoadPoint => "Load point",
            CriticalLocation::ZeroShear => "Zero shear",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalPoint {
    pub location: CriticalLocation,
    pub position: f64,
    pub bending_moment: f64,
    pub shear_force: f64,
}

/// Critical points of one member, ordered by position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberCriticalPoints {
    pub member: String,
    pub points: Vec<CriticalPoint>,
}

fn location(sample: &BmsfSample) -> Option<CriticalLocation> {
    match sample.kind {
        SampleKind::Start => Some(CriticalLocation::LeftSupport),
        SampleKind::End => Some(CriticalLocation::RightSupport),
        SampleKind::LoadPoint => Some(CriticalLocation::LoadPoint),
        SampleKind::ZeroShear => Some(CriticalLocation::ZeroShear),
        SampleKind::Interior => None,
    }
}

fn same_point(a: &CriticalPoint, b: &CriticalPoint, tolerance: f64) -> bool {
    (a.position - b.position).abs() <= tolerance
        && (a.bending_moment - b.bending_moment).abs() <= VALUE_EPSILON
        && (a.shear_force - b.shear_force).abs() <= VALUE_EPSILON
}

/// Extract critical points from a profile.
///
/// Coincident points are merged unless their shear differs, so a genuine
/// jump under a point load keeps both of its sides.
pub fn extract_critical_points(profile: &BmsfProfile, tolerance: f64) -> MemberCriticalPoints {
    let mut points: Vec<CriticalPoint> = Vec::new();

    for sample in &profile.samples {
        let Some(location) = location(sample) else {
            continue;
        };
        let point = CriticalPoint {
            location,
            position: sample.position,
            bending_moment: sample.moment,
            shear_force: sample.shear,
        };
        if points.last().is_some_and(|last| same_point(last, &point, tolerance)) {
            continue;
        }
        points.push(point);
    }

    MemberCriticalPoints {
        member: profile.member.clone(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::bmsf::evaluate_member;
    use crate::calculations::member::Member;
    use crate::loads::Load;
    use crate::settings::AnalysisSettings;

    #[test]
    fn test_udl_points() {
        let member = Member::new(6.0, 1.0).with_load(Load::uniform(10.0));
        let settings = AnalysisSettings::default();
        let profile = evaluate_member("AB", &member, 45.0, 0.0, &settings);
        let critical = extract_critical_points(&profile, settings.geometry_tolerance);

        let locations: Vec<CriticalLocation> = critical.points.iter().map(|p| p.location).collect();
        assert_eq!(
            locations,
            vec![
                CriticalLocation::LeftSupport,
                CriticalLocation::ZeroShear,
                CriticalLocation::RightSupport
            ]
        );
        // Zero shear 3L/8 from the hinged end
        assert!((critical.points[1].position - 3.75).abs() < 1e-9);
        assert!((critical.points[1].bending_moment - 25.3125).abs() < 1e-9);
    }

    #[test]
    fn test_point_load_keeps_both_sides() {
        let member = Member::new(4.0, 1.0).with_load(Load::point_at_midspan(20.0));
        let settings = AnalysisSettings::default();
        let profile = evaluate_member("AB", &member, 0.0, 0.0, &settings);
        let critical = extract_critical_points(&profile, settings.geometry_tolerance);
        assert_eq!(critical.points.len(), 4);
        assert_eq!(critical.points[1].location, CriticalLocation::LoadPoint);
        assert_eq!(critical.points[2].location, CriticalLocation::LoadPoint);
        assert!((critical.points[1].shear_force - critical.points[2].shear_force - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_load_point_collapses() {
        let member = Member::new(4.0, 1.0).with_load(Load::point_at_midspan(0.0));
        let settings = AnalysisSettings::default();
        let profile = evaluate_member("AB", &member, 0.0, 0.0, &settings);
        let critical = extract_critical_points(&profile, settings.geometry_tolerance);
        assert_eq!(critical.points.len(), 3);
    }

    #[test]
    fn test_location_display() {
        assert_eq!(CriticalLocation::ZeroShear.to_string(), "Zero shear");
    }
}
