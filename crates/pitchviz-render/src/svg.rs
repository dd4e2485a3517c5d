//! Vector output of a pitch layout.
//!
//! The SVG uses the layout's own coordinate system as its `viewBox`, with
//! band positions written as percentages so the markup scales to any height.

use std::fmt::Write;
use std::str::FromStr;

use pitchviz_config::diagram::DiagramConfig;
use pitchviz_types::{Anchor, PitchLayout};

use crate::error::ExportError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramStyle {
    pub line_color: String,
    pub line_width: f64,
    pub anchor_fill: String,
    pub particle_fill: String,
    pub anchor_stroke: String,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self::from(&DiagramConfig::default())
    }
}

impl From<&DiagramConfig> for DiagramStyle {
    fn from(config: &DiagramConfig) -> Self {
        Self {
            line_color: config.line_color.clone(),
            line_width: config.line_width,
            anchor_fill: config.anchor_fill.clone(),
            particle_fill: config.particle_fill.clone(),
            anchor_stroke: config.anchor_stroke.clone(),
        }
    }
}

impl DiagramStyle {
    /// Every color must be one an SVG renderer accepts
    pub fn validate(&self) -> Result<(), ExportError> {
        for value in [
            &self.line_color,
            &self.anchor_fill,
            &self.particle_fill,
            &self.anchor_stroke,
        ] {
            if svgtypes::Color::from_str(value.trim()).is_err() {
                return Err(ExportError::InvalidStyleColor(value.clone()));
            }
        }
        Ok(())
    }

    pub fn fill_for(&self, anchor: &Anchor) -> &str {
        if anchor.terminal {
            &self.particle_fill
        } else {
            &self.anchor_fill
        }
    }
}

/// A laid out diagram plus the style it is drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct PitchDiagram {
    pub layout: PitchLayout,
    pub style: DiagramStyle,
}

impl PitchDiagram {
    pub fn new(layout: PitchLayout, style: DiagramStyle) -> Self {
        Self { layout, style }
    }

    /// Standalone SVG document.
    ///
    /// Each anchor is emitted after the line leaving it so it sits on top.
    pub fn to_svg(&self) -> String {
        let layout = &self.layout;
        let metrics = &layout.metrics;
        let mut out = String::new();

        let _ = write!(
            out,
            r#"<svg xmlns="{}" xmlns:xlink="{}" viewBox="0 0 {} {}">"#,
            SVG_NS,
            XLINK_NS,
            fmt_num(layout.width),
            fmt_num(layout.height)
        );

        for (i, anchor) in layout.anchors.iter().enumerate() {
            for segment in layout.segments.iter().filter(|s| s.from == i) {
                let Some(to) = layout.anchors.get(segment.to) else {
                    continue;
                };
                let _ = write!(
                    out,
                    r#"<line stroke="{}" stroke-width="{}" x1="{}" y1="{}%" x2="{}" y2="{}%"/>"#,
                    escape_attr(&self.style.line_color),
                    fmt_num(self.style.line_width),
                    fmt_num(anchor.x),
                    fmt_num(metrics.band_fraction(anchor.band) * 100.0),
                    fmt_num(to.x),
                    fmt_num(metrics.band_fraction(to.band) * 100.0),
                );
            }

            let _ = write!(
                out,
                r#"<circle fill="{}" stroke="{}" stroke-width="{}" r="{}" cx="{}" cy="{}%"/>"#,
                escape_attr(self.style.fill_for(anchor)),
                escape_attr(&self.style.anchor_stroke),
                fmt_num(metrics.anchor_stroke_width),
                fmt_num(metrics.anchor_radius),
                fmt_num(anchor.x),
                fmt_num(metrics.band_fraction(anchor.band) * 100.0),
            );
        }

        out.push_str("</svg>");
        out
    }
}

// Trims float noise such as 15.000000000000002
fn fmt_num(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    format!("{}", rounded)
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
