pub mod color;
pub mod error;
pub mod export;
pub mod raster;
pub mod svg;

pub use error::ExportError;
pub use export::{Background, ExportOptions, MAX_PIXEL_HEIGHT, encode_png, render_bitmap};
pub use raster::{Rasterizer, SvgRasterizer};
pub use svg::{DiagramStyle, PitchDiagram};
