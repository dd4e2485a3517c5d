use image::RgbaImage;
use resvg::{tiny_skia, usvg};

use crate::error::ExportError;

/// Turns an SVG document into pixels
#[async_trait::async_trait]
pub trait Rasterizer: Send + Sync {
    /// Transparent RGBA bitmap `pixel_height` pixels tall, width keeps the aspect
    async fn rasterize(&self, svg: &str, pixel_height: u32) -> Result<RgbaImage, ExportError>;
}

/// resvg backed rasterizer
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRasterizer;

#[async_trait::async_trait]
impl Rasterizer for SvgRasterizer {
    async fn rasterize(&self, svg: &str, pixel_height: u32) -> Result<RgbaImage, ExportError> {
        let svg = svg.to_string();
        tokio::task::spawn_blocking(move || Self::draw(&svg, pixel_height)).await?
    }
}

impl SvgRasterizer {
    pub fn draw(svg: &str, pixel_height: u32) -> Result<RgbaImage, ExportError> {
        let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;
        let size = tree.size();

        let scale = pixel_height as f32 / size.height();
        let width = ((size.width() * scale).ceil() as u32).max(1);
        let mut pixmap = tiny_skia::Pixmap::new(width, pixel_height).ok_or(ExportError::Bitmap {
            width,
            height: pixel_height,
        })?;

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        // tiny-skia keeps premultiplied alpha
        let bytes: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        tracing::debug!("Rasterized diagram to {}x{}", width, pixel_height);
        RgbaImage::from_raw(width, pixel_height, bytes).ok_or(ExportError::Bitmap {
            width,
            height: pixel_height,
        })
    }
}
