use pitchviz_core::preprocess::{DefaultNormalizer, PatternNormalizer};
use pitchviz_types::{Anchor, LayoutMetrics, PitchLayout, PitchSequence, PitchSymbol, Segment};

/// Places pitch symbols on a two-band diagram
#[derive(Debug, Clone, Default)]
pub struct PitchLayoutEngine {
    metrics: LayoutMetrics,
}

impl PitchLayoutEngine {
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Text as it is written back into the pattern field
    pub fn normalize(&self, text: &str) -> String {
        DefaultNormalizer.normalize(text)
    }

    /// Layout free pattern text followed by one particle anchor
    pub fn layout(&self, text: &str, particle: PitchSymbol) -> PitchLayout {
        let word = DefaultNormalizer.symbols(text);
        self.layout_symbols(&word, particle)
    }

    pub fn layout_sequence(&self, sequence: &PitchSequence) -> PitchLayout {
        self.layout_symbols(sequence.word(), sequence.particle())
    }

    fn layout_symbols(&self, word: &[PitchSymbol], particle: PitchSymbol) -> PitchLayout {
        let sequence = PitchSequence::with_particle(word, particle);
        let count = sequence.len();
        let base = self.metrics.base_offset();

        let anchors: Vec<Anchor> = sequence
            .symbols()
            .iter()
            .enumerate()
            .map(|(i, &band)| Anchor {
                x: base + self.metrics.horizontal_step * i as f64,
                band,
                terminal: i == count - 1,
            })
            .collect();

        let segments = (1..count)
            .map(|to| Segment { from: to - 1, to })
            .collect();

        tracing::trace!("Laid out {} anchors for {}", count, sequence);

        PitchLayout {
            anchors,
            segments,
            width: self.metrics.width_for(count),
            height: self.metrics.height,
            metrics: self.metrics,
        }
    }
}
