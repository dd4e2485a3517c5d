pub mod dictionary;
pub mod layout;
pub mod loader;
pub mod pitch_accent;
pub mod processor;

pub use dictionary::{PitchDictionary, PitchEntry};
pub use layout::PitchLayoutEngine;
pub use loader::PitchDictionaryLoader;
pub use pitch_accent::{PatternType, PitchPattern, PitchSequenceDeriver};
pub use processor::{PitchProcessor, WordPitch};
