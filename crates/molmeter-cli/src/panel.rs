use molmeter::core::models::measurement::Measurement;
use std::fmt::Write;

/// Renders the measurement panel: a heading with the count, then one line per
/// measurement in creation order. Highlighted rows are starred and degenerate
/// ones are flagged.
pub fn render(measurements: &[Measurement], summary: &str) -> String {
    let mut out = format!("📏 {}\n", summary);
    if measurements.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    for (i, m) in measurements.iter().enumerate() {
        let marker = if m.is_highlighted() { '*' } else { ' ' };
        let _ = write!(out, "{} {:>3}. {}", marker, i + 1, m);
        if let Some(reason) = m.degeneracy() {
            let _ = write!(out, "  [degenerate: {}]", reason);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use molmeter::core::models::atom::AtomInfo;
    use molmeter::engine::mode::ToolMode;
    use molmeter::workflows::session::MeasurementSession;
    use nalgebra::Point3;

    fn atom(residue: &str, number: isize, x: f64, y: f64) -> AtomInfo {
        AtomInfo::new("CA", residue, number, Point3::new(x, y, 0.0))
    }

    #[test]
    fn empty_panel_says_none() {
        let session = MeasurementSession::new();
        let text = render(session.measurements(), &session.summary());
        assert_eq!(text, "📏 0 measurements\n  (none)\n");
    }

    #[test]
    fn rows_are_numbered_and_marked() {
        let mut session = MeasurementSession::with_mode(ToolMode::MeasureDistance);
        session.on_atom_picked(atom("ALA", 1, 0.0, 0.0));
        session.on_atom_picked(atom("GLY", 2, 3.0, 4.0));
        session.set_active_mode(ToolMode::MeasureAngle);
        session.on_atom_picked(atom("ALA", 1, 1.0, 0.0));
        session.on_atom_picked(atom("ALA", 1, 1.0, 0.0));
        session.on_atom_picked(atom("GLY", 2, 0.0, 1.0));
        let first = session.measurements()[0].id();
        session.set_highlighted(first, true).unwrap();

        let text = render(session.measurements(), &session.summary());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "📏 2 measurements");
        assert_eq!(lines[1], "*   1. distance: ALA1.CA - GLY2.CA 5.00 Å");
        assert!(lines[2].starts_with("    2. angle: ALA1.CA - ALA1.CA - GLY2.CA 0.0°"));
        assert!(lines[2].contains("[degenerate:"));
    }
}
