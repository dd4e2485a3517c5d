use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_source() -> String {
    "pitch-table.json".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `http(s)://` URL or a local file path of the accent table
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            source: default_source(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
