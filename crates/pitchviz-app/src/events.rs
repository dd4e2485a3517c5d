use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use pitchviz_types::AppEvent;
use tokio::task::JoinSet;

use crate::state::{AppState, Services};

pub mod export;
pub mod pattern_input;
pub mod search;
pub mod select_result;

use export::handle_export;
use pattern_input::{handle_particle_change, handle_pattern_input};
use search::{handle_dismiss, handle_search_text};
use select_result::handle_select_result;

/// App's main loop, the only writer of pattern and result state
pub async fn event_loop(
    state: Arc<AppState>,
    services: Arc<Services>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut exports: JoinSet<()> = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    let result = run_events(&state, &services, &ui_to_app_rx, &app_to_ui_tx, &mut exports).await;
    if let Err(e) = &result {
        tracing::error!("[EVENT_LOOP] Stopping on error: {}", e);
    }

    // Exports are never cancelled, let the running ones finish on every exit path
    drain_exports(&mut exports).await;

    tracing::info!("[EVENT_LOOP] Quit");
    result
}

async fn run_events(
    state: &AppState,
    services: &Services,
    ui_to_app_rx: &AsyncReceiver<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    exports: &mut JoinSet<()>,
) -> anyhow::Result<()> {
    loop {
        let event = ui_to_app_rx.recv().await?;

        // Reap finished exports
        while exports.try_join_next().is_some() {}

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        if matches!(event, AppEvent::Quit) {
            return Ok(());
        }

        handle_events(state, services, app_to_ui_tx, exports, event).await?;
    }
}

async fn drain_exports(exports: &mut JoinSet<()>) {
    if !exports.is_empty() {
        tracing::info!("Waiting for {} export(s) to finish", exports.len());
    }
    while let Some(result) = exports.join_next().await {
        if let Err(e) = result {
            tracing::error!("Export task panicked: {}", e);
        }
    }
}

async fn handle_events(
    state: &AppState,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    exports: &mut JoinSet<()>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::PatternInput(text) => {
            handle_pattern_input(text, state, services, app_to_ui_tx).await?;
        }
        AppEvent::ParticleChanged(particle) => {
            handle_particle_change(particle, state, services, app_to_ui_tx).await?;
        }
        AppEvent::SearchText(query) => {
            handle_search_text(query, state, app_to_ui_tx).await?;
        }
        AppEvent::SelectResult(index) => {
            handle_select_result(index, state, services, app_to_ui_tx).await?;
        }
        AppEvent::DismissResults => {
            handle_dismiss(state, app_to_ui_tx).await?;
        }
        AppEvent::Export(target) => {
            handle_export(target, state, services, app_to_ui_tx, exports).await?;
        }
        AppEvent::ShowDiagram(_)
        | AppEvent::ShowResults(_)
        | AppEvent::HideResults
        | AppEvent::ExportFinished { .. }
        | AppEvent::ExportFailed { .. }
        | AppEvent::StatusUpdate(_)
        | AppEvent::DictionaryReady { .. }
        | AppEvent::DictionaryUnavailable(_) => {
            // UI-only event, ignore in backend
        }
        AppEvent::Quit => {}
    }

    Ok(())
}
