use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use pitchviz_config::Config;
use pitchviz_core::AccentDictionary;
use pitchviz_core::dictionary::DictionarySource;
use pitchviz_lang_japanese::{PitchDictionaryLoader, WordPitch};
use pitchviz_render::{ExportOptions, PitchDiagram};
use pitchviz_types::{ExportTarget, PitchLayout};

use crate::events::export::run_export;
use crate::state::Services;
use crate::ui::{contour, format_results};

/// Where a one-shot diagram goes
#[derive(Debug, Default, Clone)]
pub struct Outputs {
    pub svg: Option<PathBuf>,
    pub png: Option<PathBuf>,
    pub copy: bool,
}

impl Outputs {
    fn is_empty(&self) -> bool {
        self.svg.is_none() && self.png.is_none() && !self.copy
    }
}

pub async fn draw(
    config: &Config,
    pattern: &str,
    particle: pitchviz_types::PitchSymbol,
    outputs: &Outputs,
) -> anyhow::Result<()> {
    let services = Services::new(config);
    let (normalized, layout) = services.processor.render_pattern(pattern, particle);
    tracing::debug!("Drawing '{}' as '{}'", pattern, normalized);

    println!("pattern: {} particle: {}", normalized, particle);
    emit(config, &services, layout, outputs).await
}

pub async fn word(config: &Config, word: &str, accent: u32, outputs: &Outputs) -> anyhow::Result<()> {
    let services = Services::new(config);
    let word = WordPitch::new(word, accent);
    let layout = services.processor.layout_word(&word);

    println!("{} {}", word.label(), word.sequence);
    emit(config, &services, layout, outputs).await
}

pub async fn search(config: &Config, query: &str) -> anyhow::Result<()> {
    let source = DictionarySource::parse(&config.dictionary.source);
    let loader =
        PitchDictionaryLoader::new(Duration::from_secs(config.dictionary.timeout_seconds));
    let dictionary = loader
        .load(&source)
        .await
        .with_context(|| format!("loading pitch dictionary from {source}"))?;

    println!("{}", format_results(&dictionary.search(query)));
    Ok(())
}

async fn emit(
    config: &Config,
    services: &Services,
    layout: PitchLayout,
    outputs: &Outputs,
) -> anyhow::Result<()> {
    println!("{}", contour(&layout));

    let diagram = PitchDiagram::new(layout, services.style.clone());

    if outputs.is_empty() {
        println!("{}", diagram.to_svg());
        return Ok(());
    }

    if let Some(path) = &outputs.svg {
        pitchviz_io::file::write_svg(path, &diagram.to_svg())
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Saved SVG to {}", path.display());
    }

    let mut targets = Vec::new();
    if let Some(path) = &outputs.png {
        targets.push(ExportTarget::File(path.clone()));
    }
    if outputs.copy {
        targets.push(ExportTarget::Clipboard);
    }
    if targets.is_empty() {
        return Ok(());
    }

    let options = ExportOptions::from_config(&config.export, &services.style)?;
    for target in targets {
        let detail = run_export(services.rasterizer.as_ref(), &diagram, &options, &target).await?;
        println!("{detail}");
    }

    Ok(())
}
