use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use pitchviz_config::BackgroundStyle;
use pitchviz_config::export::ExportConfig;

use crate::color::parse_hex_color;
use crate::error::ExportError;
use crate::raster::Rasterizer;
use crate::svg::{DiagramStyle, PitchDiagram};

/// Tallest bitmap an export may request
pub const MAX_PIXEL_HEIGHT: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Transparent,
    Color(Rgba<u8>),
}

/// Validated export settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub background: Background,
    pub pixel_height: u32,
}

impl ExportOptions {
    /// Runs before any rendering starts so bad settings fail synchronously
    pub fn from_config(config: &ExportConfig, style: &DiagramStyle) -> Result<Self, ExportError> {
        style.validate()?;

        let background = match config.background {
            BackgroundStyle::Transparent => Background::Transparent,
            BackgroundStyle::Color => parse_hex_color(&config.background_color)
                .map(Background::Color)
                .ok_or_else(|| ExportError::InvalidBackgroundColor(config.background_color.clone()))?,
        };

        if !(1..=MAX_PIXEL_HEIGHT).contains(&config.pixel_height) {
            return Err(ExportError::InvalidPixelHeight {
                height: config.pixel_height,
                max: MAX_PIXEL_HEIGHT,
            });
        }

        Ok(Self {
            background,
            pixel_height: config.pixel_height,
        })
    }
}

/// Rasterize the diagram's SVG through the port and put the background underneath
pub async fn render_bitmap(
    rasterizer: &dyn Rasterizer,
    diagram: &PitchDiagram,
    options: &ExportOptions,
) -> Result<RgbaImage, ExportError> {
    let svg = diagram.to_svg();
    let image = rasterizer.rasterize(&svg, options.pixel_height).await?;
    Ok(flatten(image, options.background))
}

fn flatten(image: RgbaImage, background: Background) -> RgbaImage {
    let Background::Color(color) = background else {
        return image;
    };

    let (width, height) = image.dimensions();
    let mut out = RgbaImage::from_pixel(width, height, color);
    for (x, y, px) in image.enumerate_pixels() {
        if px[3] > 0 {
            let coverage = px[3] as f64 / 255.0;
            let opaque = Rgba([px[0], px[1], px[2], 255]);
            blend_pixel(out.get_pixel_mut(x, y), opaque, coverage);
        }
    }
    out
}

/// Source-over compositing of `color` at `coverage` onto `dst`
fn blend_pixel(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f64) {
    let sa = color[3] as f64 / 255.0 * coverage;
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }

    for c in 0..3 {
        let sc = color[c] as f64;
        let dc = dst[c] as f64;
        dst[c] = ((sc * sa + dc * da * (1.0 - sa)) / out_a).round() as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
