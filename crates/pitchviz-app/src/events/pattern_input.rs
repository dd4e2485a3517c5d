use kanal::AsyncSender;
use pitchviz_render::PitchDiagram;
use pitchviz_types::{AppEvent, DiagramView, PitchSymbol};

use crate::state::{AppState, Services};

pub async fn handle_pattern_input(
    text: String,
    state: &AppState,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let normalized = services.processor.engine().normalize(&text);
    tracing::debug!("Normalized pattern: '{}' -> '{}'", text, normalized);

    state.pattern.write().await.pattern = normalized;
    render_current(state, services, app_to_ui_tx, None).await
}

pub async fn handle_particle_change(
    particle: PitchSymbol,
    state: &AppState,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.pattern.write().await.particle = particle;
    render_current(state, services, app_to_ui_tx, None).await
}

/// Lay out the current pattern and particle and send the diagram to the UI
pub(crate) async fn render_current(
    state: &AppState,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    label: Option<String>,
) -> anyhow::Result<()> {
    let current = state.pattern.read().await.clone();
    let (pattern, layout) = services
        .processor
        .render_pattern(&current.pattern, current.particle);

    let diagram = PitchDiagram::new(layout, services.style.clone());
    let svg = diagram.to_svg();
    state.set_last_layout(diagram.layout.clone()).await;

    app_to_ui_tx
        .send(AppEvent::ShowDiagram(DiagramView {
            pattern,
            particle: current.particle,
            layout: diagram.layout,
            svg,
            label,
        }))
        .await?;

    Ok(())
}
