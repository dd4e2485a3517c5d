use std::fmt;
use std::path::PathBuf;

use pitchviz_types::SearchHit;

/// Read-only word -> accent type lookup
pub trait AccentDictionary: Send + Sync {
    /// Entries whose word contains `query` literally, in source order
    fn search(&self, query: &str) -> Vec<SearchHit>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    pub source: String,
    pub entry_count: usize,
}

/// Where the accent table is retrieved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    Url(String),
    File(PathBuf),
}

impl DictionarySource {
    /// `http://` and `https://` are fetched, anything else is a file path
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DictionarySource::Url(trimmed.to_string())
        } else {
            DictionarySource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::Url(url) => f.write_str(url),
            DictionarySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
