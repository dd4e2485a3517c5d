use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use pitchviz_config::Config;
use serde::{Deserialize, Serialize};

/// Name plus config, the on-disk profile format
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Read a JSON config. Both a bare `Config` and a `Profile` wrapper are
/// accepted; missing fields fall back to defaults.
pub fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;

    if value.get("value").is_some() && value.get("name").is_some() {
        let profile: Profile = serde_json::from_value(value)?;
        tracing::info!("Using profile '{}'", profile.name);
        return Ok(profile.value);
    }

    Ok(serde_json::from_value(value)?)
}

/// Config for this run: file (if any) or defaults, then environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => load_config_file(path)?,
        None => Config::default(),
    };
    Ok(config.with_env_overrides())
}
