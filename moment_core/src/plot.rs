//! # SVG Plot
//!
//! Draws a [`MomentDiagram`] as a standalone SVG document: the sampled
//! curve, a grid with tick labels, axis labels with units, and the
//! critical values written at their positions.
//!
//! The x axis spans exactly `[0, beam_length]` and the y axis spans the
//! sampled `[min, max]`, widened symmetrically when the curve is flat.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::moment_diagram::MomentDiagram;
use crate::errors::{CalcError, CalcResult};
use crate::report::format_annotation;
use crate::units::UnitConvention;

/// Figure layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub font_size: u32,
    pub annotation_font_size: u32,
    /// Grid divisions along each axis; 0 disables the grid
    pub grid_divisions: u32,
    pub line_color: String,
    pub annotation_color: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 300,
            margin: 70,
            font_size: 18,
            annotation_font_size: 14,
            grid_divisions: 10,
            line_color: "#1f77b4".to_string(),
            annotation_color: "red".to_string(),
        }
    }
}

/// Maps diagram coordinates onto the drawing area
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn x(&self, position: f64) -> f64 {
        self.left + position / self.x_max * self.width
    }

    fn y(&self, moment: f64) -> f64 {
        self.top + (self.y_max - moment) / (self.y_max - self.y_min) * self.height
    }
}

/// `[min, max]` with a non-zero height
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        return (min, max);
    }
    let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
    (min - pad, max + pad)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn tick_label(value: f64) -> String {
    if value != 0.0 && (value.abs() >= 1e4 || value.abs() < 1e-2) {
        format!("{:.1e}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// A validated diagram ready to be written out as SVG markup
struct SvgDocument<'a> {
    diagram: &'a MomentDiagram,
    options: &'a PlotOptions,
    units: &'a UnitConvention,
    y_min: f64,
    y_max: f64,
}

impl SvgDocument<'_> {
    fn frame(&self) -> Frame {
        let options = self.options;
        let margin = options.margin as f64;
        Frame {
            left: margin,
            top: margin * 0.4,
            width: (options.width as f64 - margin * 1.4).max(1.0),
            height: (options.height as f64 - margin * 1.4).max(1.0),
            x_max: self.diagram.beam_length,
            y_min: self.y_min,
            y_max: self.y_max,
        }
    }

    fn write_grid(&self, f: &mut fmt::Formatter<'_>, frame: &Frame) -> fmt::Result {
        let bottom = frame.top + frame.height;
        let right = frame.left + frame.width;
        let tick_size = self.options.font_size.saturating_sub(6).max(8);
        let divisions = self.options.grid_divisions;
        let tick_count = if divisions > 0 { divisions + 1 } else { 0 };
        for i in 0..tick_count {
            let t = i as f64 / divisions as f64;
            let xv = t * frame.x_max;
            let yv = self.y_min + t * (self.y_max - self.y_min);
            let (gx, gy) = (frame.x(xv), frame.y(yv));
            writeln!(
                f,
                r##"<line class="grid" x1="{gx:.2}" y1="{:.2}" x2="{gx:.2}" y2="{bottom:.2}" stroke="#dddddd"/>"##,
                frame.top
            )?;
            writeln!(
                f,
                r##"<line class="grid" x1="{:.2}" y1="{gy:.2}" x2="{right:.2}" y2="{gy:.2}" stroke="#dddddd"/>"##,
                frame.left
            )?;
            writeln!(
                f,
                r#"<text x="{gx:.2}" y="{:.2}" font-size="{tick_size}" text-anchor="middle">{}</text>"#,
                bottom + tick_size as f64 + 4.0,
                tick_label(xv)
            )?;
            writeln!(
                f,
                r#"<text x="{:.2}" y="{:.2}" font-size="{tick_size}" text-anchor="end">{}</text>"#,
                frame.left - 4.0,
                gy + tick_size as f64 / 3.0,
                tick_label(yv)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (diagram, options) = (self.diagram, self.options);
        let frame = self.frame();

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = options.width,
            h = options.height
        )?;
        writeln!(f, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        self.write_grid(f, &frame)?;

        // axes box
        writeln!(
            f,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black"/>"#,
            frame.left, frame.top, frame.width, frame.height
        )?;

        // curve
        let points: Vec<String> = diagram
            .samples
            .iter()
            .map(|&(x, m)| format!("{:.2},{:.2}", frame.x(x), frame.y(m)))
            .collect();
        writeln!(
            f,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
            points.join(" "),
            escape(&options.line_color)
        )?;

        // critical values
        for point in diagram.critical_points.iter() {
            writeln!(
                f,
                r#"<text class="annotation" x="{:.2}" y="{:.2}" font-size="{}" fill="{}">{}</text>"#,
                frame.x(point.position),
                frame.y(point.moment),
                options.annotation_font_size,
                escape(&options.annotation_color),
                format_annotation(point.moment)
            )?;
        }

        // axis labels
        writeln!(
            f,
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="middle">{}</text>"#,
            frame.left + frame.width / 2.0,
            options.height as f64 - 6.0,
            options.font_size,
            escape(&format!("Position [{}]", self.units.length.symbol()))
        )?;
        let label_y = frame.top + frame.height / 2.0;
        writeln!(
            f,
            r#"<text x="{x:.2}" y="{label_y:.2}" font-size="{}" text-anchor="middle" transform="rotate(-90 {x:.2} {label_y:.2})">{}</text>"#,
            options.font_size,
            escape(&format!("Moment [{}]", UnitConvention::MOMENT_SYMBOL)),
            x = options.font_size as f64,
        )?;

        writeln!(f, "</svg>")
    }
}

/// Render `diagram` as an SVG document
pub fn render_svg(diagram: &MomentDiagram, options: &PlotOptions, units: &UnitConvention) -> CalcResult<String> {
    if diagram.is_empty() {
        return Err(CalcError::invalid_input("diagram", "0 samples", "Nothing to plot"));
    }
    let (min, max) = diagram.value_range();
    if !(min.is_finite() && max.is_finite()) {
        return Err(CalcError::non_finite("diagram.moment", if min.is_finite() { max } else { min }));
    }
    let (y_min, y_max) = padded_range(min, max);

    Ok(SvgDocument {
        diagram,
        options,
        units,
        y_min,
        y_max,
    }
    .to_string())
}

/// Render and write the SVG to `path`
pub fn save_svg(diagram: &MomentDiagram, options: &PlotOptions, units: &UnitConvention, path: &Path) -> CalcResult<()> {
    let svg = render_svg(diagram, options, units)?;
    fs::write(path, svg).map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))?;
    info!(path = %path.display(), samples = diagram.len(), "plot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::moment_diagram::{calculate, CriticalPointMap, MomentDiagramInput};
    use crate::loads::{AppliedMoment, PointLoad};

    fn sample_diagram() -> MomentDiagram {
        calculate(
            &MomentDiagramInput::new(100.0)
                .with_sample_count(51)
                .with_point_load(PointLoad::new(20.0, 1.0))
                .with_point_load(PointLoad::new(50.0, -2.0))
                .with_point_load(PointLoad::new(90.0, 1.0))
                .with_applied_moment(AppliedMoment::new(70.0, 5.0)),
        )
        .unwrap()
    }

    #[test]
    fn test_svg_structure() {
        let svg = render_svg(&sample_diagram(), &PlotOptions::default(), &UnitConvention::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches(r#"class="annotation""#).count(), 2);
        assert!(svg.contains("Position [mm]"));
        assert!(svg.contains("Moment [N·m]"));
    }

    #[test]
    fn test_save_svg_writes_document() {
        let diagram = sample_diagram();
        let path = std::env::temp_dir().join(format!("moment_plot_{}.svg", uuid::Uuid::new_v4()));
        save_svg(&diagram, &PlotOptions::default(), &UnitConvention::default(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        let expected = render_svg(&diagram, &PlotOptions::default(), &UnitConvention::default()).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_save_svg_missing_directory() {
        let path = std::env::temp_dir()
            .join(format!("moment_missing_{}", uuid::Uuid::new_v4()))
            .join("plot.svg");
        let err = save_svg(&sample_diagram(), &PlotOptions::default(), &UnitConvention::default(), &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(!path.exists());
    }

    #[test]
    fn test_grid_toggle() {
        let options = PlotOptions {
            grid_divisions: 0,
            ..PlotOptions::default()
        };
        let svg = render_svg(&sample_diagram(), &options, &UnitConvention::default()).unwrap();
        assert!(!svg.contains(r#"class="grid""#));
    }

    #[test]
    fn test_flat_curve_is_padded() {
        let diagram = calculate(&MomentDiagramInput::new(10.0).with_sample_count(5)).unwrap();
        assert_eq!(padded_range(0.0, 0.0), (-1.0, 1.0));
        assert!(render_svg(&diagram, &PlotOptions::default(), &UnitConvention::default()).is_ok());
        assert_eq!(padded_range(5.0, 5.0), (4.5, 5.5));
    }

    #[test]
    fn test_empty_diagram_rejected() {
        let diagram = MomentDiagram {
            beam_length: 1.0,
            samples: Vec::new(),
            critical_points: CriticalPointMap::new(),
        };
        let err = render_svg(&diagram, &PlotOptions::default(), &UnitConvention::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
