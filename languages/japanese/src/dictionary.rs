use std::fmt;

use pitchviz_core::dictionary::{AccentDictionary, DictionaryMetadata};
use pitchviz_core::preprocess::is_blank_query;
use pitchviz_types::SearchHit;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// One word of the accent table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchEntry {
    pub word: String,
    /// Alternative accent types, primary first
    pub accents: Vec<u32>,
}

impl PitchEntry {
    fn to_hit(&self) -> SearchHit {
        SearchHit {
            word: self.word.clone(),
            accents: self.accents.clone(),
        }
    }
}

// Keeps document order and repeated keys, which a map type would lose
struct OrderedEntries(Vec<PitchEntry>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping words to lists of accent types")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((word, accents)) = map.next_entry::<String, Vec<u32>>()? {
                    entries.push(PitchEntry { word, accents });
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// In-memory accent table, immutable once built
pub struct PitchDictionary {
    entries: Vec<PitchEntry>,
    source: String,
}

impl PitchDictionary {
    pub fn from_entries(entries: Vec<PitchEntry>, source: impl Into<String>) -> Self {
        Self {
            entries,
            source: source.into(),
        }
    }

    /// Parse a `{"word": [accent, ...], ...}` document
    pub fn from_json(json_str: &str, source: impl Into<String>) -> Result<Self, serde_json::Error> {
        let OrderedEntries(entries) = serde_json::from_str(json_str)?;
        Ok(Self::from_entries(entries, source))
    }

    /// Get the number of entries in the dictionary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl AccentDictionary for PitchDictionary {
    fn search(&self, query: &str) -> Vec<SearchHit> {
        if is_blank_query(query) {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|e| e.word.contains(query))
            .map(PitchEntry::to_hit)
            .collect()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "pitch-table".to_string(),
            source: self.source.clone(),
            entry_count: self.entries.len(),
        }
    }
}
