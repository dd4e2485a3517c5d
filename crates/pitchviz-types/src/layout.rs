use serde::{Deserialize, Serialize};

use crate::pitch::PitchSymbol;

/// Fixed geometry of a pitch diagram in its internal coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Horizontal distance between neighbouring anchors
    pub horizontal_step: f64,
    pub anchor_radius: f64,
    pub anchor_stroke_width: f64,
    /// Vertical position of the high band as a fraction of `height`
    pub high_band: f64,
    /// Vertical position of the low band as a fraction of `height`
    pub low_band: f64,
    pub height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            horizontal_step: 36.0,
            anchor_radius: 5.0,
            anchor_stroke_width: 1.0,
            high_band: 0.15,
            low_band: 0.75,
            height: 100.0,
        }
    }
}

impl LayoutMetrics {
    /// Margin keeping the outermost anchors from being clipped
    pub fn base_offset(&self) -> f64 {
        self.anchor_radius + self.anchor_stroke_width
    }

    pub fn band_fraction(&self, band: PitchSymbol) -> f64 {
        match band {
            PitchSymbol::High => self.high_band,
            PitchSymbol::Low => self.low_band,
        }
    }

    pub fn band_y(&self, band: PitchSymbol) -> f64 {
        self.band_fraction(band) * self.height
    }

    /// Width that exactly fits `anchor_count` anchors and their strokes
    pub fn width_for(&self, anchor_count: usize) -> f64 {
        let steps = anchor_count.saturating_sub(1) as f64;
        self.base_offset() * 2.0 + self.horizontal_step * steps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub band: PitchSymbol,
    /// Set on the particle anchor only
    pub terminal: bool,
}

/// Line between two anchors, by index into `PitchLayout::anchors`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchLayout {
    pub anchors: Vec<Anchor>,
    pub segments: Vec<Segment>,
    pub width: f64,
    pub height: f64,
    pub metrics: LayoutMetrics,
}

impl PitchLayout {
    pub fn anchor_y(&self, anchor: &Anchor) -> f64 {
        self.metrics.band_y(anchor.band)
    }

    /// End points of a segment in diagram coordinates
    pub fn segment_points(&self, segment: Segment) -> Option<((f64, f64), (f64, f64))> {
        let from = self.anchors.get(segment.from)?;
        let to = self.anchors.get(segment.to)?;
        Some((
            (from.x, self.anchor_y(from)),
            (to.x, self.anchor_y(to)),
        ))
    }

    pub fn terminal(&self) -> Option<&Anchor> {
        self.anchors.iter().rev().find(|a| a.terminal)
    }

    /// `H`/`L` text of the word anchors, particle excluded
    pub fn word_pattern(&self) -> String {
        self.anchors
            .iter()
            .filter(|a| !a.terminal)
            .map(|a| a.band.as_char())
            .collect()
    }
}
