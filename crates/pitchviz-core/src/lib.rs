pub mod dictionary;
pub mod error;
pub mod preprocess;
pub mod state;

pub use dictionary::{AccentDictionary, DictionaryMetadata, DictionarySource};
pub use error::DictionaryLoadError;
pub use preprocess::{DefaultNormalizer, PatternNormalizer};
pub use state::{AppState, PatternState, SearchOutcome};
