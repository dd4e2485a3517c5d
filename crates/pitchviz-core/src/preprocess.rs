use std::ops::RangeInclusive;

use pitchviz_types::PitchSymbol;
use unicode_normalization::UnicodeNormalization;

// Full-width forms of the printable ASCII characters
const FULL_WIDTH_ASCII: RangeInclusive<char> = '\u{FF01}'..='\u{FF5E}';

pub trait PatternNormalizer {
    // Default: fold full-width input, keep only H/L, uppercase
    fn normalize(&self, text: &str) -> String {
        self.symbols(text).into_iter().map(PitchSymbol::as_char).collect()
    }

    fn symbols(&self, text: &str) -> Vec<PitchSymbol> {
        text.chars()
            .map(fold_full_width)
            .filter_map(PitchSymbol::from_char)
            .collect()
    }
}

/// NFKC only inside the full-width block, so compatibility characters
/// such as `℡` never turn into pitch letters
fn fold_full_width(c: char) -> char {
    if FULL_WIDTH_ASCII.contains(&c) {
        std::iter::once(c).nfkc().next().unwrap_or(c)
    } else {
        c
    }
}

pub struct DefaultNormalizer;
impl PatternNormalizer for DefaultNormalizer {}

/// Empty or whitespace-only search text
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}
