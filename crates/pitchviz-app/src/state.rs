use std::sync::Arc;

use pitchviz_config::Config;
use pitchviz_lang_japanese::PitchProcessor;
use pitchviz_render::{DiagramStyle, Rasterizer, SvgRasterizer};

pub use pitchviz_core::state::AppState;

/// Stateless collaborators shared by the event handlers
pub struct Services {
    pub processor: PitchProcessor,
    pub style: DiagramStyle,
    pub rasterizer: Arc<dyn Rasterizer>,
}

impl Services {
    pub fn new(config: &Config) -> Self {
        Self {
            processor: PitchProcessor::new(config.diagram.metrics()),
            style: DiagramStyle::from(&config.diagram),
            rasterizer: Arc::new(SvgRasterizer),
        }
    }
}
