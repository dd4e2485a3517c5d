use pitchviz_types::LayoutMetrics;
use serde::{Deserialize, Serialize};

fn default_horizontal_step() -> f64 {
    36.0
}

fn default_anchor_radius() -> f64 {
    5.0
}

fn default_anchor_stroke_width() -> f64 {
    1.0
}

fn default_line_width() -> f64 {
    2.0
}

fn default_high_band() -> f64 {
    0.15
}

fn default_low_band() -> f64 {
    0.75
}

fn default_height() -> f64 {
    100.0
}

fn default_line_color() -> String {
    "#0cd24d".to_string()
}

fn default_anchor_fill() -> String {
    "#0cd24d".to_string()
}

fn default_particle_fill() -> String {
    "#ffffff".to_string()
}

fn default_anchor_stroke() -> String {
    "#000000".to_string()
}

/// Geometry and colors of the rendered diagram
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DiagramConfig {
    #[serde(default = "default_horizontal_step")]
    pub horizontal_step: f64,
    #[serde(default = "default_anchor_radius")]
    pub anchor_radius: f64,
    #[serde(default = "default_anchor_stroke_width")]
    pub anchor_stroke_width: f64,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_high_band")]
    pub high_band: f64,
    #[serde(default = "default_low_band")]
    pub low_band: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    #[serde(default = "default_anchor_fill")]
    pub anchor_fill: String,
    /// Fill of the particle anchor, distinct from word anchors
    #[serde(default = "default_particle_fill")]
    pub particle_fill: String,
    #[serde(default = "default_anchor_stroke")]
    pub anchor_stroke: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            horizontal_step: default_horizontal_step(),
            anchor_radius: default_anchor_radius(),
            anchor_stroke_width: default_anchor_stroke_width(),
            line_width: default_line_width(),
            high_band: default_high_band(),
            low_band: default_low_band(),
            height: default_height(),
            line_color: default_line_color(),
            anchor_fill: default_anchor_fill(),
            particle_fill: default_particle_fill(),
            anchor_stroke: default_anchor_stroke(),
        }
    }
}

impl DiagramConfig {
    pub fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            horizontal_step: self.horizontal_step,
            anchor_radius: self.anchor_radius,
            anchor_stroke_width: self.anchor_stroke_width,
            high_band: self.high_band,
            low_band: self.low_band,
            height: self.height,
        }
    }
}
