use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    #[default]
    Transparent,
    Color,
}

fn default_background_color() -> String {
    "#ffffff".to_string()
}

fn default_file_name() -> String {
    "pitch.png".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_pixel_height() -> u32 {
    100
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ExportConfig {
    pub background: BackgroundStyle,
    /// Only read when `background` is `color`
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Height of exported bitmaps, width follows the diagram aspect
    #[serde(default = "default_pixel_height")]
    pub pixel_height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background: BackgroundStyle::default(),
            background_color: default_background_color(),
            file_name: default_file_name(),
            output_dir: default_output_dir(),
            pixel_height: default_pixel_height(),
        }
    }
}

impl ExportConfig {
    pub fn default_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.file_name)
    }
}
