//! # Bending Moment and Shear Force
//!
//! Evaluates shear and moment along a member from its final end moments.
//!
//! ```text
//! m_left  = -M_start
//! m_right = M_end
//! M(x) = M_simple(x) + m_left + (m_right - m_left)·x/L
//! V(x) = V_simple(x) + (m_right - m_left)/L
//! ```
//!
//! End moments are counter-clockwise positive; diagram moments are
//! sagging-positive. Each profile contains the member ends, both
//! sides of every point load, the zero-shear point of a uniform load when it
//! falls inside the member, and evenly spaced interior samples for plotting.

use serde::{Deserialize, Serialize};

use crate::calculations::member::Member;
use crate::loads::{Load, Side};
use crate::settings::AnalysisSettings;

/// Why a sample was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    Start,
    End,
    LoadPoint,
    ZeroShear,
    Interior,
}

/// Shear and moment at one position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmsfSample {
    pub position: f64,
    pub shear: f64,
    pub moment: f64,
    pub kind: SampleKind,
}

/// Shear and moment diagram of one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmsfProfile {
    pub member: String,
    pub length: f64,
    /// Samples ordered by position; a point load contributes two samples at
    /// the same position (left of the load, then right)
    pub samples: Vec<BmsfSample>,
}

impl BmsfProfile {
    fn extreme_by(&self, key: impl Fn(&BmsfSample) -> f64) -> Option<&BmsfSample> {
        self.samples
            .iter()
            .max_by(|a, b| key(a).total_cmp(&key(b)))
    }

    /// Largest sagging moment, if any sample is positive
    pub fn max_positive_moment(&self) -> Option<&BmsfSample> {
        self.extreme_by(|s| s.moment).filter(|s| s.moment > 0.0)
    }

    /// Largest hogging moment, if any sample is negative
    pub fn max_negative_moment(&self) -> Option<&BmsfSample> {
        self.extreme_by(|s| -s.moment).filter(|s| s.moment < 0.0)
    }

    /// Sample with the largest absolute shear
    pub fn max_abs_shear(&self) -> Option<&BmsfSample> {
        self.extreme_by(|s| s.shear.abs())
    }
}

/// Member diagram functions once the end moments are known
#[derive(Debug, Clone, Copy)]
struct Diagram<'a> {
    member: &'a Member,
    m_left: f64,
    m_right: f64,
}

impl Diagram<'_> {
    fn shear(&self, x: f64, side: Side) -> f64 {
        let l = self.member.length;
        self.member.load.simple_shear(l, x, side) + (self.m_right - self.m_left) / l
    }

    fn moment(&self, x: f64) -> f64 {
        let l = self.member.length;
        self.member.load.simple_moment(l, x) + self.m_left + (self.m_right - self.m_left) * x / l
    }

    fn sample(&self, x: f64, side: Side, kind: SampleKind) -> BmsfSample {
        BmsfSample {
            position: x,
            shear: self.shear(x, side),
            moment: self.moment(x),
            kind,
        }
    }

    /// Zero-shear position of a uniform load, if strictly inside the member
    fn zero_shear(&self, tolerance: f64) -> Option<f64> {
        let Load::Uniform { w } = self.member.load else {
            return None;
        };
        if w <= 0.0 {
            return None;
        }
        let x = self.shear(0.0, Side::Right) / w;
        (x > tolerance && x < self.member.length - tolerance).then_some(x)
    }
}

/// Evaluate shear and moment along a member from its end moments
pub fn evaluate_member(
    label: &str,
    member: &Member,
    m_start: f64,
    m_end: f64,
    settings: &AnalysisSettings,
) -> BmsfProfile {
    let length = member.length;
    let tolerance = settings.geometry_tolerance;
    let diagram = Diagram {
        member,
        m_left: -m_start,
        m_right: m_end,
    };

    let mut samples = vec![
        diagram.sample(0.0, Side::Right, SampleKind::Start),
        diagram.sample(length, Side::Left, SampleKind::End),
    ];

    for x in member.load.load_positions(length) {
        samples.push(diagram.sample(x, Side::Left, SampleKind::LoadPoint));
        samples.push(diagram.sample(x, Side::Right, SampleKind::LoadPoint));
    }

    let occupied = |samples: &[BmsfSample], x: f64| {
        samples.iter().any(|s| (s.position - x).abs() <= tolerance)
    };

    if let Some(x) = diagram.zero_shear(tolerance) {
        if !occupied(&samples, x) {
            samples.push(diagram.sample(x, Side::Right, SampleKind::ZeroShear));
        }
    }

    let n = settings.diagram_samples;
    for i in 1..=n {
        let x = length * i as f64 / (n + 1) as f64;
        if !occupied(&samples, x) {
            samples.push(diagram.sample(x, Side::Right, SampleKind::Interior));
        }
    }

    // Stable: the left/right pair at a load point keeps its order
    samples.sort_by(|a, b| a.position.total_cmp(&b.position));

    BmsfProfile {
        member: label.to_string(),
        length,
        samples,
    }
}
