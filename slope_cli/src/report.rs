//! Plain-text report of an analysis

use std::fmt::Write;

use slope_core::calculations::critical_points::MemberCriticalPoints;
use slope_core::calculations::member::joint_label;
use slope_core::calculations::Member;
use slope_core::{Structure, StructureAnalysis};

const RULE: &str = "═══════════════════════════════════════════════════════";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "─".repeat(title.chars().count()));
}

fn critical_table(out: &mut String, member: &MemberCriticalPoints) {
    let _ = writeln!(out, "  {}:", member.member);
    for point in &member.points {
        let _ = writeln!(
            out,
            "    x = {:>8.3}  {:<14} M = {:>12.3}  V = {:>12.3}",
            point.position,
            point.location.to_string(),
            point.bending_moment,
            point.shear_force
        );
    }
}

fn member_line(out: &mut String, label: &str, member: &Member, ends: String) {
    let _ = write!(
        out,
        "  {:<3} L = {:>7.3}  I = {:>10.4e}  {}",
        label,
        member.length,
        member.inertia,
        member.load.display_name()
    );
    if member.load.magnitude() != 0.0 {
        let _ = write!(out, " {:.3}", member.load.magnitude());
    }
    let _ = writeln!(out, "  [{}]", ends);
}

fn members(out: &mut String, structure: &Structure) {
    match structure {
        Structure::ContinuousBeam(beam) => {
            for (i, span) in beam.spans.iter().enumerate() {
                let label = format!("{}{}", joint_label(i), joint_label(i + 1));
                let ends = format!("{} / {}", span.start_support, span.end_support);
                member_line(out, &label, &span.member, ends);
            }
        }
        Structure::PortalFrame(frame) => {
            let columns = frame.columns.iter().zip(["AB", "DC"]);
            for (column, label) in columns {
                let ends = format!("{} base, sway {}", column.base, column.sway);
                member_line(out, label, &column.member, ends);
            }
            for beam in &frame.beams {
                member_line(out, "BC", beam, "rigid joints".to_string());
            }
            if frame.lateral_load != 0.0 {
                let _ = writeln!(out, "  Lateral load P = {:.3}", frame.lateral_load);
            }
        }
    }
}

/// Render the full report
pub fn render(structure: &Structure, analysis: &StructureAnalysis) -> String {
    let mut out = String::new();
    let title = if structure.label().is_empty() {
        structure.structure_type().to_uppercase()
    } else {
        format!("{}: {}", structure.structure_type().to_uppercase(), structure.label())
    };
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "  End moments counter-clockwise positive; diagram moments sagging positive"
    );

    heading(&mut out, "Members");
    members(&mut out, structure);

    heading(&mut out, "Fixed-end moments");
    for row in &analysis.fixed_end_moments {
        let _ = writeln!(out, "  {}", row);
    }

    heading(&mut out, "Slope-deflection equations");
    for member in &analysis.member_equations {
        for line in member.to_string().lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }

    heading(&mut out, "Equilibrium equations");
    if analysis.equations.is_empty() {
        let _ = writeln!(out, "  (none: all joints restrained)");
    }
    for equation in &analysis.equations {
        let _ = writeln!(out, "  {}  [{}]", equation, equation.description);
    }

    heading(&mut out, "Solution");
    for (unknown, value) in analysis.solution.iter() {
        let _ = writeln!(out, "  {} = {:.6e}", unknown, value);
    }

    heading(&mut out, "Final end moments");
    for (label, moment) in analysis.moments.iter() {
        let _ = writeln!(out, "  {:<5} = {:>12.3}", label, moment);
    }

    heading(&mut out, "Reactions");
    for (label, value) in analysis
        .reactions
        .horizontal
        .iter()
        .chain(analysis.reactions.vertical.iter())
    {
        let _ = writeln!(out, "  {:<5} = {:>12.3}", label, value);
    }

    heading(&mut out, "Critical points");
    for member in &analysis.critical_points {
        critical_table(&mut out, member);
    }

    heading(&mut out, "Summary");
    for summary in analysis.summary() {
        let _ = write!(out, "  {}:", summary.member);
        if let Some((x, m)) = summary.max_positive_moment {
            let _ = write!(out, "  +M {:.3} @ {:.3}", m, x);
        }
        if let Some((x, m)) = summary.max_negative_moment {
            let _ = write!(out, "  -M {:.3} @ {:.3}", m, x);
        }
        if let Some((x, v)) = summary.max_abs_shear {
            let _ = write!(out, "  |V| {:.3} @ {:.3}", v.abs(), x);
        }
        let _ = writeln!(out);
    }

    out
}
