use std::path::PathBuf;

use kanal::AsyncReceiver;
use pitchviz_lang_japanese::PitchPattern;
use pitchviz_types::{AppEvent, DiagramView, ExportTarget, PitchLayout, PitchSymbol, SearchHit};
use tokio_util::sync::CancellationToken;

/// Console front end: prints whatever the app sends.
///
/// When `svg_output` is set every new diagram is also written there.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    svg_output: Option<PathBuf>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            event = app_to_ui_rx.recv() => {
                match event {
                    Ok(event) => show(event, svg_output.as_ref()).await,
                    Err(_) => break,
                }
            }
            _ = cancel.cancelled() => {
                // Print what is already queued, e.g. the last export result
                while let Ok(Some(event)) = app_to_ui_rx.try_recv() {
                    show(event, svg_output.as_ref()).await;
                }
                break;
            }
        }
    }

    tracing::debug!("UI loop stopped");
    Ok(())
}

async fn show(event: AppEvent, svg_output: Option<&PathBuf>) {
    match event {
        AppEvent::ShowDiagram(view) => {
            println!("{}", format_diagram(&view));
            if let Some(path) = svg_output {
                if let Err(e) = pitchviz_io::file::write_svg(path, &view.svg).await {
                    tracing::error!("Failed to write SVG to {}: {}", path.display(), e);
                }
            }
        }
        AppEvent::ShowResults(hits) => println!("{}", format_results(&hits)),
        AppEvent::HideResults => tracing::debug!("Results hidden"),
        AppEvent::ExportFinished { detail, .. } => println!("{detail}"),
        AppEvent::ExportFailed { target, error } => {
            eprintln!("Export to {} failed: {}", describe_target(&target), error)
        }
        AppEvent::StatusUpdate(text) => println!("{text}"),
        AppEvent::DictionaryReady { entries } => {
            println!("Pitch dictionary ready ({entries} entries)")
        }
        AppEvent::DictionaryUnavailable(reason) => {
            println!("Pitch dictionary unavailable, search disabled ({reason})")
        }
        other => tracing::debug!("UI ignoring {:?}", std::mem::discriminant(&other)),
    }
}

fn describe_target(target: &ExportTarget) -> String {
    match target {
        ExportTarget::File(path) => path.display().to_string(),
        ExportTarget::Clipboard => "clipboard".to_string(),
    }
}

pub fn format_diagram(view: &DiagramView) -> String {
    let mut out = String::new();
    if let Some(label) = &view.label {
        out.push_str(label);
        out.push('\n');
    }
    out.push_str(&format!(
        "pattern: {} particle: {}\n",
        if view.pattern.is_empty() { "-" } else { view.pattern.as_str() },
        view.particle
    ));
    out.push_str(&contour(&view.layout));
    out
}

/// Two text rows, high band on top. The particle is drawn hollow.
pub fn contour(layout: &PitchLayout) -> String {
    let mut high = String::new();
    let mut low = String::new();

    for anchor in &layout.anchors {
        let mark = if anchor.terminal { '○' } else { '●' };
        let (hit, miss) = match anchor.band {
            PitchSymbol::High => (&mut high, &mut low),
            PitchSymbol::Low => (&mut low, &mut high),
        };
        hit.push(mark);
        hit.push(' ');
        miss.push_str("  ");
    }

    format!("{}\n{}", high.trim_end(), low.trim_end())
}

/// Numbered list with every accent alternative in circled notation
pub fn format_results(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No matches".to_string();
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let length = hit.word.chars().count();
            let notation: Vec<String> = hit
                .accents
                .iter()
                .map(|&accent| PitchPattern::new(length, accent).to_notation())
                .collect();
            format!("{:>3}. {} {}", i + 1, hit.word, notation.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
