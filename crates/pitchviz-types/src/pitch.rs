use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Relative pitch of one mora (or of the trailing particle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchSymbol {
    High,
    Low,
}

impl PitchSymbol {
    /// Accepts `H`/`L` in either case, anything else is not a pitch
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'H' | 'h' => Some(PitchSymbol::High),
            'L' | 'l' => Some(PitchSymbol::Low),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            PitchSymbol::High => 'H',
            PitchSymbol::Low => 'L',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PitchSymbol::High => "high",
            PitchSymbol::Low => "low",
        }
    }
}

impl fmt::Display for PitchSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pitch '{0}', expected high or low")]
pub struct ParsePitchError(pub String);

impl FromStr for PitchSymbol {
    type Err = ParsePitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(PitchSymbol::High),
            "low" | "l" => Ok(PitchSymbol::Low),
            _ => Err(ParsePitchError(s.to_string())),
        }
    }
}

/// Pitch of every mora of a word followed by the pitch of its particle.
///
/// Never empty: the particle position always exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<PitchSymbol>")]
pub struct PitchSequence(Vec<PitchSymbol>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("A pitch sequence needs at least the particle position")]
pub struct EmptySequenceError;

impl TryFrom<Vec<PitchSymbol>> for PitchSequence {
    type Error = EmptySequenceError;

    fn try_from(symbols: Vec<PitchSymbol>) -> Result<Self, Self::Error> {
        Self::new(symbols).ok_or(EmptySequenceError)
    }
}

impl PitchSequence {
    /// Returns `None` for an empty symbol list
    pub fn new(symbols: Vec<PitchSymbol>) -> Option<Self> {
        if symbols.is_empty() {
            None
        } else {
            Some(Self(symbols))
        }
    }

    /// Word positions followed by a particle
    pub fn with_particle(word: &[PitchSymbol], particle: PitchSymbol) -> Self {
        let mut symbols = Vec::with_capacity(word.len() + 1);
        symbols.extend_from_slice(word);
        symbols.push(particle);
        Self(symbols)
    }

    pub fn symbols(&self) -> &[PitchSymbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Positions belonging to the word itself
    pub fn word(&self) -> &[PitchSymbol] {
        &self.0[..self.0.len() - 1]
    }

    pub fn particle(&self) -> PitchSymbol {
        self.0[self.0.len() - 1]
    }

    /// `H`/`L` text of the word positions only, the form a pattern input holds
    pub fn word_pattern(&self) -> String {
        self.word().iter().map(|s| s.as_char()).collect()
    }
}

impl fmt::Display for PitchSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}
