use std::sync::{Arc, OnceLock};

use pitchviz_config::Config;
use pitchviz_types::{PitchLayout, PitchSymbol, SearchHit};
use tokio::sync::RwLock;

use crate::dictionary::AccentDictionary;
use crate::preprocess::is_blank_query;

/// Contents of the pattern field and the particle selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternState {
    pub pattern: String,
    pub particle: PitchSymbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query, shown results untouched
    Suppressed,
    /// No dictionary loaded, shown results untouched
    Unavailable,
    Shown(Vec<SearchHit>),
}

/// Process-scoped state.
///
/// The dictionary is written once, after the startup load. The shown search
/// results are written only by [`AppState::search`] and
/// [`AppState::dismiss_results`].
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub pattern: RwLock<PatternState>,
    dictionary: OnceLock<Arc<dyn AccentDictionary>>,
    results: RwLock<Vec<SearchHit>>,
    last_layout: RwLock<Option<PitchLayout>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let pattern = PatternState {
            pattern: String::new(),
            particle: config.default_particle,
        };

        Self {
            config: Arc::new(RwLock::new(config)),
            pattern: RwLock::new(pattern),
            dictionary: OnceLock::new(),
            results: RwLock::new(Vec::new()),
            last_layout: RwLock::new(None),
        }
    }

    /// Returns false if a dictionary was already installed
    pub fn install_dictionary(&self, dictionary: Arc<dyn AccentDictionary>) -> bool {
        let metadata = dictionary.metadata();
        let installed = self.dictionary.set(dictionary).is_ok();
        if installed {
            tracing::info!(
                "Installed pitch dictionary '{}' ({} entries)",
                metadata.name,
                metadata.entry_count
            );
        }
        installed
    }

    pub fn dictionary(&self) -> Option<Arc<dyn AccentDictionary>> {
        self.dictionary.get().cloned()
    }

    pub async fn search(&self, query: &str) -> SearchOutcome {
        if is_blank_query(query) {
            return SearchOutcome::Suppressed;
        }

        let Some(dictionary) = self.dictionary.get() else {
            return SearchOutcome::Unavailable;
        };

        let hits = dictionary.search(query);
        tracing::debug!("Query '{}' matched {} entries", query, hits.len());
        *self.results.write().await = hits.clone();
        SearchOutcome::Shown(hits)
    }

    pub async fn dismiss_results(&self) {
        self.results.write().await.clear();
    }

    pub async fn results(&self) -> Vec<SearchHit> {
        self.results.read().await.clone()
    }

    pub async fn result(&self, index: usize) -> Option<SearchHit> {
        self.results.read().await.get(index).cloned()
    }

    pub async fn set_last_layout(&self, layout: PitchLayout) {
        *self.last_layout.write().await = Some(layout);
    }

    /// Last successfully rendered layout, kept across failed exports
    pub async fn last_layout(&self) -> Option<PitchLayout> {
        self.last_layout.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryMetadata;

    struct FixedDictionary(Vec<SearchHit>);

    impl AccentDictionary for FixedDictionary {
        fn search(&self, query: &str) -> Vec<SearchHit> {
            self.0
                .iter()
                .filter(|hit| hit.word.contains(query))
                .cloned()
                .collect()
        }

        fn metadata(&self) -> DictionaryMetadata {
            DictionaryMetadata {
                name: "fixed".to_string(),
                source: "memory".to_string(),
                entry_count: self.0.len(),
            }
        }
    }

    fn state_with_tree() -> AppState {
        let state = AppState::new(Config::default());
        let dictionary = FixedDictionary(vec![SearchHit {
            word: "tree".to_string(),
            accents: vec![2],
        }]);
        assert!(state.install_dictionary(Arc::new(dictionary)));
        state
    }

    #[tokio::test]
    async fn test_blank_query_keeps_previous_results() {
        let state = state_with_tree();

        let outcome = state.search("tre").await;
        assert!(matches!(outcome, SearchOutcome::Shown(ref hits) if hits.len() == 1));

        assert_eq!(state.search("").await, SearchOutcome::Suppressed);
        assert_eq!(state.search("   ").await, SearchOutcome::Suppressed);
        assert_eq!(state.results().await.len(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_clears_results() {
        let state = state_with_tree();
        state.search("tree").await;
        state.dismiss_results().await;
        assert!(state.results().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_dictionary_is_noop() {
        let state = AppState::new(Config::default());
        assert_eq!(state.search("tree").await, SearchOutcome::Unavailable);
        assert!(state.results().await.is_empty());
    }

    #[tokio::test]
    async fn test_dictionary_is_write_once() {
        let state = state_with_tree();
        let other = FixedDictionary(vec![]);
        assert!(!state.install_dictionary(Arc::new(other)));
        assert_eq!(state.dictionary().unwrap().metadata().entry_count, 1);
    }

    #[tokio::test]
    async fn test_non_matching_search_replaces_results() {
        let state = state_with_tree();
        state.search("tre").await;
        assert_eq!(state.search("zzz").await, SearchOutcome::Shown(vec![]));
        assert!(state.results().await.is_empty());
    }
}
