//! End-to-end continuous beam scenarios checked against closed-form results.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use slope_core::calculations::bmsf::SampleKind;
use slope_core::calculations::critical_points::CriticalLocation;
use slope_core::calculations::{analyze_beam, BeamInput, Span, SupportType};
use slope_core::equations::expression::Unknown;
use slope_core::equations::fem_chord_rotation;
use slope_core::loads::Load;
use slope_core::{AnalysisSettings, StructureAnalysis};

const E: f64 = 200e6;
const I: f64 = 1e-4;

fn udl_span(length: f64, w: f64, start: SupportType, end: SupportType) -> Span {
    Span::new(length, I, Load::uniform(w)).with_supports(start, end)
}

fn moment(result: &StructureAnalysis, label: &str) -> f64 {
    result.moments.get(label).unwrap()
}

/// Every joint equation is satisfied by the solution
fn assert_equilibrium(result: &StructureAnalysis) {
    assert!(result.max_residual() < 1e-6, "residual {}", result.max_residual());
}

#[test]
fn three_span_fixed_interior_supports() {
    use SupportType::{Fixed, Hinged};
    let input = BeamInput::new(
        E,
        vec![
            udl_span(6.0, 10.0, Hinged, Fixed),
            udl_span(6.0, 10.0, Fixed, Fixed),
            udl_span(6.0, 10.0, Fixed, Hinged),
        ],
    );
    let result = analyze_beam(&input).unwrap();
    assert_equilibrium(&result);

    assert_eq!(result.unknowns.names(), vec!["θA", "θD"]);
    assert_eq!(result.solution.rotation('B'), 0.0);
    assert_eq!(result.solution.rotation('C'), 0.0);
    assert_relative_eq!(
        result.solution.rotation('A'),
        -result.solution.rotation('D'),
        max_relative = 1e-12
    );

    // Middle span behaves as a fixed-fixed beam: wL²/12 at the ends, wL²/24 at midspan
    assert_relative_eq!(moment(&result, "MBC"), 30.0, epsilon = 1e-9);
    assert_relative_eq!(moment(&result, "MCB"), -30.0, epsilon = 1e-9);
    let middle = result.profile("BC").unwrap();
    assert_relative_eq!(
        middle.max_positive_moment().unwrap().moment,
        15.0,
        epsilon = 1e-9
    );

    // End spans are propped cantilevers: wL²/8 over the fixed support, 9wL²/128 in the span
    assert_abs_diff_eq!(moment(&result, "MAB"), 0.0, epsilon = 1e-9);
    assert_relative_eq!(moment(&result, "MBA"), -45.0, epsilon = 1e-9);
    assert_relative_eq!(moment(&result, "MCD"), 45.0, epsilon = 1e-9);
    for member in ["AB", "CD"] {
        let peak = result.profile(member).unwrap().max_positive_moment().unwrap();
        assert_eq!(peak.kind, SampleKind::ZeroShear);
        assert_relative_eq!(peak.moment, 9.0 * 10.0 * 36.0 / 128.0, epsilon = 1e-9);
    }
}

#[test]
fn three_span_continuous_is_symmetric() {
    let input = BeamInput::new(
        E,
        vec![
            Span::new(6.0, I, Load::uniform(10.0)),
            Span::new(6.0, I, Load::uniform(10.0)),
            Span::new(6.0, I, Load::uniform(10.0)),
        ],
    );
    let result = analyze_beam(&input).unwrap();
    assert_equilibrium(&result);
    assert_eq!(result.unknowns.len(), 4);

    let theta_b = result.solution.rotation('B');
    let theta_c = result.solution.rotation('C');
    assert!(theta_b.abs() > 0.0);
    assert_relative_eq!(theta_b, -theta_c, max_relative = 1e-9);
    assert_relative_eq!(
        result.solution.rotation('A'),
        -3.0 * theta_b,
        max_relative = 1e-9
    );

    // Hogging over the interior supports: wL²/10
    assert_relative_eq!(moment(&result, "MBA"), -36.0, epsilon = 1e-9);
    assert_relative_eq!(moment(&result, "MBC"), 36.0, epsilon = 1e-9);
    assert_relative_eq!(moment(&result, "MCB"), -36.0, epsilon = 1e-9);
    assert_relative_eq!(moment(&result, "MCD"), 36.0, epsilon = 1e-9);

    // RA = 0.4wL, RB = 1.1wL
    assert_relative_eq!(result.reactions.get("RA").unwrap(), 24.0, epsilon = 1e-9);
    assert_relative_eq!(result.reactions.get("RB").unwrap(), 66.0, epsilon = 1e-9);
    assert_relative_eq!(
        result.reactions.get("RA").unwrap(),
        result.reactions.get("RD").unwrap(),
        epsilon = 1e-9
    );
}

#[test]
fn fixed_hinged_single_span() {
    let (w, l) = (10.0, 6.0);
    let input = BeamInput::new(
        E,
        vec![udl_span(l, w, SupportType::Fixed, SupportType::Hinged)],
    );
    let result = analyze_beam(&input).unwrap();
    assert_equilibrium(&result);

    assert_relative_eq!(moment(&result, "MAB"), w * l * l / 8.0, epsilon = 1e-9);
    assert_abs_diff_eq!(moment(&result, "MBA"), 0.0, epsilon = 1e-9);
    assert_relative_eq!(result.reactions.get("RA").unwrap(), 5.0 * w * l / 8.0, epsilon = 1e-9);
    assert_relative_eq!(result.reactions.get("RB").unwrap(), 3.0 * w * l / 8.0, epsilon = 1e-9);

    // Zero shear lies 3L/8 from the hinged end
    let critical = result.critical_points_of("AB").unwrap();
    let zero = critical
        .points
        .iter()
        .find(|p| p.location == CriticalLocation::ZeroShear)
        .unwrap();
    assert_relative_eq!(zero.position, 5.0 * l / 8.0, epsilon = 1e-9);
    assert_abs_diff_eq!(zero.shear_force, 0.0, epsilon = 1e-9);
    assert_relative_eq!(zero.bending_moment, 9.0 * w * l * l / 128.0, epsilon = 1e-9);
}

#[test]
fn vertical_reactions_balance_total_load() {
    use SupportType::{Fixed, Hinged, None, Roller};
    let input = BeamInput::new(
        E,
        vec![
            udl_span(5.0, 8.0, Fixed, Hinged),
            Span::new(4.0, 2.0 * I, Load::point_at_midspan(30.0)),
            Span::new(6.0, I, Load::point_at_distance(25.0, 2.0, 4.0))
                .with_supports(Roller, Roller),
            udl_span(2.0, 5.0, Roller, None),
        ],
    );
    let result = analyze_beam(&input).unwrap();
    assert_equilibrium(&result);

    let total_load = 8.0 * 5.0 + 30.0 + 25.0 + 5.0 * 2.0;
    assert_relative_eq!(result.reactions.total_vertical(), total_load, epsilon = 1e-9);
    assert_eq!(result.reactions.get("RE"), Option::None);

    // The overhang carries its own load back to the last support
    assert_relative_eq!(moment(&result, "MDE"), 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(moment(&result, "MED"), 0.0, epsilon = 1e-12);
}

#[test]
fn shear_integrates_to_moment() {
    let input = BeamInput::new(
        E,
        vec![
            udl_span(6.0, 10.0, SupportType::Fixed, SupportType::Hinged),
            udl_span(4.0, 15.0, SupportType::Hinged, SupportType::Hinged),
        ],
    )
    .with_settings(AnalysisSettings::default().with_diagram_samples(40));
    let result = analyze_beam(&input).unwrap();

    // Shear is linear under a uniform load, so the trapezoid rule is exact
    for profile in &result.profiles {
        for pair in profile.samples.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let integral = 0.5 * (a.shear + b.shear) * (b.position - a.position);
            assert_abs_diff_eq!(b.moment - a.moment, integral, epsilon = 1e-8);
        }
    }
}

#[test]
fn shear_integrates_to_moment_across_point_loads() {
    let input = BeamInput::new(
        E,
        vec![
            Span::new(6.0, I, Load::point_at_distance(30.0, 2.0, 4.0))
                .with_supports(SupportType::Fixed, SupportType::Hinged),
            Span::new(4.0, I, Load::point_at_midspan(20.0)),
        ],
    )
    .with_settings(AnalysisSettings::default().with_diagram_samples(40));
    let result = analyze_beam(&input).unwrap();

    for profile in &result.profiles {
        // The jump sits between the left/right pair at the load
        let jumps = profile
            .samples
            .windows(2)
            .filter(|pair| pair[1].position - pair[0].position == 0.0)
            .count();
        assert_eq!(jumps, 1, "member {}", profile.member);

        // Piecewise constant shear integrates exactly segment by segment
        let start = &profile.samples[0];
        let mut integral = 0.0;
        for pair in profile.samples.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            integral += a.shear * (b.position - a.position);
            assert_abs_diff_eq!(b.moment - start.moment, integral, epsilon = 1e-8);
        }
    }
}

#[test]
fn settlement_alone_induces_moments() {
    let input = BeamInput::new(
        E,
        vec![
            Span::new(5.0, I, Load::None),
            Span::new(5.0, I, Load::None),
        ],
    )
    .with_settlements(vec![0.0, 0.01, 0.0]);
    let result = analyze_beam(&input).unwrap();
    assert_equilibrium(&result);

    assert!(moment(&result, "MBA").abs() > 1.0);
    assert_relative_eq!(moment(&result, "MBA"), -moment(&result, "MBC"), epsilon = 1e-9);
    assert_abs_diff_eq!(result.reactions.total_vertical(), 0.0, epsilon = 1e-9);

    // Each span acts as a propped cantilever under the settlement: 3EIΔ/L²
    let expected = 3.0 * E * I * 0.01 / 25.0;
    assert_relative_eq!(moment(&result, "MBA").abs(), expected, max_relative = 1e-9);
}

#[test]
fn settlement_of_fixed_span_matches_chord_rotation() {
    let input = BeamInput::new(
        E,
        vec![Span::new(5.0, I, Load::None).with_supports(SupportType::Fixed, SupportType::Fixed)],
    )
    .with_settlements(vec![0.0, 0.01]);
    let result = analyze_beam(&input).unwrap();
    let expected = fem_chord_rotation(E, I, 5.0, -0.01 / 5.0);
    assert_relative_eq!(moment(&result, "MAB"), expected, max_relative = 1e-12);
    assert_relative_eq!(moment(&result, "MBA"), expected, max_relative = 1e-12);
    assert_relative_eq!(
        result.reactions.get("RA").unwrap(),
        -result.reactions.get("RB").unwrap(),
        epsilon = 1e-9
    );
}

#[test]
fn equal_settlements_are_rigid_body_motion() {
    let input = BeamInput::new(
        E,
        vec![
            Span::new(5.0, I, Load::None).with_supports(SupportType::Fixed, SupportType::Hinged),
            Span::new(5.0, I, Load::None),
        ],
    )
    .with_settlements(vec![0.02, 0.02, 0.02]);
    let result = analyze_beam(&input).unwrap();
    for (label, m) in result.moments.iter() {
        assert_abs_diff_eq!(m, 0.0, epsilon = 1e-9);
        assert!(label.starts_with('M'));
    }
}

#[test]
fn fixed_fixed_span_has_no_unknowns() {
    let input = BeamInput::new(
        E,
        vec![udl_span(6.0, 10.0, SupportType::Fixed, SupportType::Fixed)],
    );
    let result = analyze_beam(&input).unwrap();
    assert!(result.unknowns.is_empty());
    assert!(result.solution.is_empty());
    assert!(result.equations.is_empty());
    assert_eq!(result.solution.get(Unknown::Rotation('A')), None);
    assert_relative_eq!(moment(&result, "MAB"), 30.0);
}

#[test]
fn point_load_at_midspan_matches_midspan_model() {
    let spans = |load: Load| {
        vec![
            Span::new(8.0, I, load).with_supports(SupportType::Fixed, SupportType::Hinged),
            Span::new(5.0, I, Load::uniform(4.0)),
        ]
    };
    let midspan = analyze_beam(&BeamInput::new(E, spans(Load::point_at_midspan(40.0)))).unwrap();
    let general =
        analyze_beam(&BeamInput::new(E, spans(Load::point_at_distance(40.0, 4.0, 4.0)))).unwrap();

    for ((label, a), (_, b)) in midspan.moments.iter().zip(general.moments.iter()) {
        assert_relative_eq!(a, b, epsilon = 1e-9);
        assert!(!label.is_empty());
    }
}

#[test]
fn summary_reports_extremes() {
    let input = BeamInput::new(
        E,
        vec![udl_span(6.0, 10.0, SupportType::Fixed, SupportType::Fixed)],
    );
    let result = analyze_beam(&input).unwrap();
    let summary = &result.summary()[0];
    assert_eq!(summary.member, "AB");
    let (x, m) = summary.max_positive_moment.unwrap();
    assert_relative_eq!(x, 3.0, epsilon = 1e-9);
    assert_relative_eq!(m, 15.0, epsilon = 1e-9);
    let (_, hog) = summary.max_negative_moment.unwrap();
    assert_relative_eq!(hog, -30.0, epsilon = 1e-9);
    let (_, v) = summary.max_abs_shear.unwrap();
    assert_relative_eq!(v.abs(), 30.0, epsilon = 1e-9);
}
