use kanal::AsyncSender;
use pitchviz_types::AppEvent;

use super::pattern_input::render_current;
use crate::state::{AppState, Services};

pub async fn handle_select_result(
    index: usize,
    state: &AppState,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(hit) = state.result(index).await else {
        app_to_ui_tx
            .send(AppEvent::StatusUpdate(format!("No result #{}", index + 1)))
            .await?;
        return Ok(());
    };

    // Only the first accent alternative is used
    let Some(word) = services.processor.resolve(&hit) else {
        tracing::warn!("'{}' has no accent types", hit.word);
        app_to_ui_tx
            .send(AppEvent::StatusUpdate(format!("'{}' has no accent data", hit.word)))
            .await?;
        return Ok(());
    };

    tracing::info!("Selected {} -> {}", word.label(), word.sequence);

    let particle = word.sequence.particle();
    let previous_particle = {
        let mut pattern = state.pattern.write().await;
        pattern.pattern = word.sequence.word_pattern();
        std::mem::replace(&mut pattern.particle, particle)
    };

    state.dismiss_results().await;
    app_to_ui_tx.send(AppEvent::HideResults).await?;

    render_current(state, services, app_to_ui_tx, Some(word.label())).await?;

    // The particle selector follows the word, say so when that changed it
    if previous_particle != particle {
        app_to_ui_tx
            .send(AppEvent::StatusUpdate(format!(
                "Particle set to {} to match {}",
                particle, word.word
            )))
            .await?;
    }

    Ok(())
}
