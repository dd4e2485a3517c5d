use std::path::Path;

use image::RgbaImage;
use pitchviz_render::{ExportError, encode_png};

/// Encode as PNG and write to `path`, returns the byte count
pub async fn write_png(path: &Path, image: &RgbaImage) -> Result<usize, ExportError> {
    let bytes = encode_png(image)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, &bytes).await?;
    Ok(bytes.len())
}

pub async fn write_svg(path: &Path, svg: &str) -> anyhow::Result<()> {
    tokio::fs::write(path, svg).await?;
    Ok(())
}
