use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use pitchviz_core::dictionary::DictionarySource;
use pitchviz_lang_japanese::PitchDictionaryLoader;
use pitchviz_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// One-shot startup load. The app keeps working without a dictionary,
/// search is just disabled.
pub async fn load_dictionary(
    state: Arc<AppState>,
    cancel: CancellationToken,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (enabled, source, timeout) = {
        let config = state.config.read().await;
        (
            config.dictionary.enabled,
            config.dictionary.source.clone(),
            Duration::from_secs(config.dictionary.timeout_seconds),
        )
    };

    if !enabled {
        tracing::info!("Pitch dictionary disabled");
        app_to_ui_tx
            .send(AppEvent::DictionaryUnavailable(
                "disabled in config".to_string(),
            ))
            .await?;
        return Ok(());
    }

    let source = DictionarySource::parse(&source);
    let loader = PitchDictionaryLoader::new(timeout);

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("Dictionary load cancelled");
            return Ok(());
        }
        result = loader.load(&source) => result,
    };

    let event = match result {
        Ok(dictionary) => {
            let entries = dictionary.entry_count();
            if !state.install_dictionary(Arc::new(dictionary)) {
                tracing::warn!("Pitch dictionary already installed, keeping the first one");
            }
            AppEvent::DictionaryReady { entries }
        }
        Err(e) => {
            tracing::error!("Failed to load pitch dictionary from {}: {}", source, e);
            AppEvent::DictionaryUnavailable(e.to_string())
        }
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}
