use pitchviz_types::{LayoutMetrics, PitchLayout, PitchSequence, PitchSymbol, SearchHit};

use crate::layout::PitchLayoutEngine;
use crate::pitch_accent::{PitchPattern, PitchSequenceDeriver};

/// Pitch shape of a dictionary word under one accent type
#[derive(Debug, Clone)]
pub struct WordPitch {
    pub word: String,
    pub pattern: PitchPattern,
    pub sequence: PitchSequence,
}

impl WordPitch {
    pub fn new(word: &str, accent: u32) -> Self {
        let sequence = PitchSequenceDeriver::derive_for_word(word, accent);
        Self {
            word: word.to_string(),
            pattern: PitchPattern::new(word.chars().count(), accent),
            sequence,
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{} {} {}",
            self.word,
            self.pattern.to_notation(),
            self.pattern.type_name()
        )
    }
}

/// Japanese pitch processor: dictionary hits and raw patterns to layouts
#[derive(Debug, Clone, Default)]
pub struct PitchProcessor {
    engine: PitchLayoutEngine,
}

impl PitchProcessor {
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self {
            engine: PitchLayoutEngine::new(metrics),
        }
    }

    pub fn engine(&self) -> &PitchLayoutEngine {
        &self.engine
    }

    /// Normalized pattern text and its layout
    pub fn render_pattern(&self, text: &str, particle: PitchSymbol) -> (String, PitchLayout) {
        let normalized = self.engine.normalize(text);
        let layout = self.engine.layout(&normalized, particle);
        (normalized, layout)
    }

    /// Resolves a selected hit through its first accent type only.
    ///
    /// Further alternatives of homographs are not offered here.
    pub fn resolve(&self, hit: &SearchHit) -> Option<WordPitch> {
        let accent = hit.primary_accent()?;
        if hit.accents.len() > 1 {
            tracing::debug!(
                "'{}' has {} accent alternatives, using the first ({})",
                hit.word,
                hit.accents.len(),
                accent
            );
        }
        Some(WordPitch::new(&hit.word, accent))
    }

    pub fn layout_word(&self, word: &WordPitch) -> PitchLayout {
        self.engine.layout_sequence(&word.sequence)
    }
}
