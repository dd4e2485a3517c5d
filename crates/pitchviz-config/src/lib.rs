use std::env;

use pitchviz_types::PitchSymbol;
use serde::{Deserialize, Serialize};

use self::diagram::DiagramConfig;
use self::dictionary::DictionaryConfig;
use self::export::ExportConfig;

pub mod diagram;
pub mod dictionary;
pub mod export;

pub use export::BackgroundStyle;

fn default_particle() -> PitchSymbol {
    PitchSymbol::Low
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub diagram: DiagramConfig,
    pub export: ExportConfig,

    /// Particle pitch selected before the user picks one
    #[serde(default = "default_particle")]
    pub default_particle: PitchSymbol,
    /// Capacity of the app <-> ui channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            diagram: DiagramConfig::default(),
            export: ExportConfig::default(),
            default_particle: default_particle(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    /// Environment wins over values read from a profile file
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(source) = env::var("PITCH_DICTIONARY_SOURCE") {
            self.dictionary.source = source;
        }

        if let Ok(dir) = env::var("PITCH_EXPORT_DIR") {
            self.export.output_dir = dir;
        }

        if let Some(particle) = env::var("PITCH_DEFAULT_PARTICLE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.default_particle = particle;
        }

        if let Some(capacity) = env::var("PITCH_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.channel_capacity = capacity;
        }

        self
    }
}
