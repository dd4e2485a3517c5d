use std::borrow::Cow;

use arboard::{Clipboard, ImageData};
use image::RgbaImage;
use pitchviz_render::ExportError;

/// Put a bitmap on the system clipboard
pub async fn write_image(image: RgbaImage) -> Result<(), ExportError> {
    tokio::task::spawn_blocking(move || {
        let mut clipboard = Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
        let (width, height) = image.dimensions();

        clipboard
            .set_image(ImageData {
                width: width as usize,
                height: height as usize,
                bytes: Cow::Owned(image.into_raw()),
            })
            .map_err(|e| ExportError::Clipboard(e.to_string()))?;

        tracing::debug!("Copied {}x{} image to clipboard", width, height);
        Ok(())
    })
    .await?
}
