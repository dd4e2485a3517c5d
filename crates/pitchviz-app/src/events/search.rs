use kanal::AsyncSender;
use pitchviz_core::state::SearchOutcome;
use pitchviz_types::AppEvent;

use crate::state::AppState;

pub async fn handle_search_text(
    query: String,
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match state.search(&query).await {
        SearchOutcome::Suppressed => {
            tracing::debug!("Blank search suppressed");
        }
        SearchOutcome::Unavailable => {
            tracing::debug!("Search for '{}' ignored, no dictionary", query);
            app_to_ui_tx
                .send(AppEvent::StatusUpdate(
                    "Pitch dictionary unavailable, search disabled".to_string(),
                ))
                .await?;
        }
        SearchOutcome::Shown(hits) => {
            tracing::debug!("Search '{}': {} results", query, hits.len());
            app_to_ui_tx.send(AppEvent::ShowResults(hits)).await?;
        }
    }

    Ok(())
}

pub async fn handle_dismiss(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.dismiss_results().await;
    app_to_ui_tx.send(AppEvent::HideResults).await?;
    Ok(())
}
