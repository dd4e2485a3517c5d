use pitchviz_types::{PitchSequence, PitchSymbol};

/// Maps a word length and an accent type to High/Low pitches
pub struct PitchSequenceDeriver;

impl PitchSequenceDeriver {
    /// Pitch of `length` morae plus the trailing particle.
    ///
    /// Accent types above `length` are treated as `length`.
    pub fn derive(length: usize, accent: u32) -> PitchSequence {
        let drop = effective_accent(length, accent);

        let pitch_at = |i: usize| {
            let high = match drop {
                0 => i > 0,
                1 => i == 0,
                n => i > 0 && i < n,
            };
            if high {
                PitchSymbol::High
            } else {
                PitchSymbol::Low
            }
        };

        let word: Vec<PitchSymbol> = (0..length).map(pitch_at).collect();
        PitchSequence::with_particle(&word, pitch_at(length))
    }

    /// One mora per character of `word`
    pub fn derive_for_word(word: &str, accent: u32) -> PitchSequence {
        Self::derive(word.chars().count(), accent)
    }
}

fn effective_accent(length: usize, accent: u32) -> usize {
    let accent = accent as usize;
    if accent >= 2 { accent.min(length.max(1)) } else { accent }
}

#[derive(Debug, Clone)]
pub struct PitchPattern {
    /// Accent type as given by the dictionary (0 = heiban, 1 = atamadaka, 2+ = nakadaka/odaka)
    pub accent: u32,
    pub length: usize,
    pub pattern_type: PatternType,
}

impl PitchPattern {
    pub fn new(length: usize, accent: u32) -> Self {
        Self {
            accent,
            length,
            pattern_type: PatternType::classify(length, accent),
        }
    }

    /// Dictionary-style circled accent number
    pub fn to_notation(&self) -> String {
        match self.accent {
            0 => "⓪".to_string(),
            n @ 1..=20 => char::from_u32(0x2460 + n - 1)
                .map(String::from)
                .unwrap_or_else(|| format!("[{n}]")),
            n => format!("[{n}]"),
        }
    }

    /// Get pattern type name
    pub fn type_name(&self) -> &'static str {
        self.pattern_type.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    Heiban,    // 平板型 - flat (no drop)
    Atamadaka, // 頭高型 - head-high (drop after 1st mora)
    Nakadaka,  // 中高型 - mid-high (drop in middle)
    Odaka,     // 尾高型 - tail-high (drop before the particle)
}

impl PatternType {
    pub fn classify(length: usize, accent: u32) -> Self {
        match effective_accent(length, accent) {
            0 => PatternType::Heiban,
            1 => PatternType::Atamadaka,
            n if n >= length => PatternType::Odaka,
            _ => PatternType::Nakadaka,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Heiban => "Heiban (Flat)",
            PatternType::Atamadaka => "Atamadaka (Head-high)",
            PatternType::Nakadaka => "Nakadaka (Mid-high)",
            PatternType::Odaka => "Odaka (Tail-high)",
        }
    }
}
