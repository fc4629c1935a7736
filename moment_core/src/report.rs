//! # Text Report
//!
//! Plain-text rendering of a session and its diagram: the force and couple
//! tables, the annotated critical values, and the curve extremes.

use std::fmt;

use crate::calculations::moment_diagram::MomentDiagram;
use crate::loads::{Direction, LoadEntry, LoadSession};
use crate::units::UnitConvention;

/// Format a moment for annotation: sign column (space when non-negative),
/// four fraction digits, signed two-digit exponent.
///
/// # Example
/// ```
/// use moment_core::report::format_annotation;
///
/// assert_eq!(format_annotation(1234.5), " 1.2345e+03");
/// assert_eq!(format_annotation(-0.5), "-5.0000e-01");
/// ```
pub fn format_annotation(value: f64) -> String {
    let sign = if value.is_sign_negative() { '-' } else { ' ' };
    if value.is_nan() {
        return " nan".to_string();
    }
    if value.is_infinite() {
        return format!("{}inf", sign);
    }

    let formatted = format!("{:.4e}", value.abs());
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (formatted.as_str(), 0),
    };
    let exp_sign = if exponent < 0 { '-' } else { '+' };
    format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exponent.abs())
}

/// One load table: heading, column titles, one line per row
struct LoadTable<'a, D> {
    title: &'a str,
    unit: String,
    rows: &'a [LoadEntry<D>],
}

impl<D: Direction> fmt::Display for LoadTable<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.title, self.unit)?;
        if self.rows.is_empty() {
            return writeln!(f, "  (none)");
        }
        writeln!(f, "  {:>3}  {:>12}  {:>10}  {:>12}", "#", "position", "direction", "magnitude")?;
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "  {:>3}  {:>12.3}  {:>10}  {:>12.3}",
                i,
                row.position,
                row.direction.to_string(),
                row.magnitude
            )?;
        }
        Ok(())
    }
}

struct SessionReport<'a> {
    session: &'a LoadSession,
    units: &'a UnitConvention,
}

impl fmt::Display for SessionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let length = self.units.length.symbol();
        let forces = LoadTable {
            title: "Forces",
            unit: format!("{}, {}", length, self.units.force.symbol()),
            rows: self.session.forces(),
        };
        let moments = LoadTable {
            title: "Moments",
            unit: format!("{}, {}", length, self.units.couple_symbol()),
            rows: self.session.moments(),
        };
        write!(f, "{}\n{}", forces, moments)
    }
}

struct DiagramReport<'a> {
    diagram: &'a MomentDiagram,
    units: &'a UnitConvention,
}

impl fmt::Display for DiagramReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagram = self.diagram;
        let length = self.units.length.symbol();
        let moment = UnitConvention::MOMENT_SYMBOL;

        writeln!(f, "═══════════════════════════════════════")?;
        writeln!(f, "  BENDING MOMENT DIAGRAM")?;
        writeln!(f, "═══════════════════════════════════════")?;
        writeln!(f, "  Beam length: {} {}", diagram.beam_length, length)?;
        writeln!(f, "  Samples:     {}", diagram.len())?;
        let (min, max) = diagram.value_range();
        writeln!(f, "  Min moment:  {} {}", format_annotation(min), moment)?;
        writeln!(f, "  Max moment:  {} {}", format_annotation(max), moment)?;
        if let Some((x, m)) = diagram.peak() {
            writeln!(f, "  Peak |M|:    {} {} at {} {}", format_annotation(m), moment, x, length)?;
        }
        writeln!(f)?;
        writeln!(f, "Critical points [{}, {}]", length, moment)?;
        if diagram.critical_points.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for point in diagram.critical_points.iter() {
            writeln!(f, "  {:>12.3}  {}", point.position, format_annotation(point.moment))?;
        }
        Ok(())
    }
}

/// Render the load tables only
pub fn render_session(session: &LoadSession, units: &UnitConvention) -> String {
    SessionReport { session, units }.to_string()
}

/// Render the load tables followed by the diagram summary
pub fn render_text(session: &LoadSession, diagram: &MomentDiagram, units: &UnitConvention) -> String {
    format!(
        "{}\n{}",
        SessionReport { session, units },
        DiagramReport { diagram, units }
    )
}

/// Render critical values and extremes of a diagram
pub fn render_diagram(diagram: &MomentDiagram, units: &UnitConvention) -> String {
    DiagramReport { diagram, units }.to_string()
}
