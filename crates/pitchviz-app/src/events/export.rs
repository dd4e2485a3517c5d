use std::sync::Arc;

use kanal::AsyncSender;
use pitchviz_render::{ExportError, ExportOptions, PitchDiagram, Rasterizer, render_bitmap};
use pitchviz_types::{AppEvent, ExportTarget};
use tokio::task::JoinSet;

use crate::state::{AppState, Services};

/// Validates synchronously, then renders and writes on a separate task
pub async fn handle_export(
    target: ExportTarget,
    state: &AppState,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    exports: &mut JoinSet<()>,
) -> anyhow::Result<()> {
    let options = {
        let config = state.config.read().await;
        ExportOptions::from_config(&config.export, &services.style)
    };

    let prepared = match options {
        Ok(options) => match state.last_layout().await {
            Some(layout) => Ok((options, layout)),
            None => Err(ExportError::NoDiagram),
        },
        Err(e) => Err(e),
    };

    let (options, layout) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::warn!("Export rejected: {}", e);
            app_to_ui_tx
                .send(AppEvent::ExportFailed {
                    target,
                    error: e.to_string(),
                })
                .await?;
            return Ok(());
        }
    };

    let diagram = PitchDiagram::new(layout, services.style.clone());
    let rasterizer = Arc::clone(&services.rasterizer);
    let tx = app_to_ui_tx.clone();

    exports.spawn(async move {
        let event = match run_export(rasterizer.as_ref(), &diagram, &options, &target).await {
            Ok(detail) => {
                tracing::info!("{}", detail);
                AppEvent::ExportFinished { target, detail }
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                AppEvent::ExportFailed {
                    target,
                    error: e.to_string(),
                }
            }
        };

        if let Err(e) = tx.send(event).await {
            tracing::error!("Failed to report export result: {}", e);
        }
    });

    Ok(())
}

/// Rasterize `diagram` and hand the bitmap to the target sink
pub async fn run_export(
    rasterizer: &dyn Rasterizer,
    diagram: &PitchDiagram,
    options: &ExportOptions,
    target: &ExportTarget,
) -> Result<String, ExportError> {
    let image = render_bitmap(rasterizer, diagram, options).await?;
    let (width, height) = image.dimensions();

    match target {
        ExportTarget::File(path) => {
            let bytes = pitchviz_io::file::write_png(path, &image).await?;
            Ok(format!(
                "Saved {}x{} PNG ({} bytes) to {}",
                width,
                height,
                bytes,
                path.display()
            ))
        }
        ExportTarget::Clipboard => {
            pitchviz_io::clipboard::write_image(image).await?;
            Ok(format!("Copied {}x{} image to clipboard", width, height))
        }
    }
}
