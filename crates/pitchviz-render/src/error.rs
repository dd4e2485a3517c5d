#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Background color must be a hex string: {0}")]
    InvalidBackgroundColor(String),

    #[error("Not a valid SVG color: {0}")]
    InvalidStyleColor(String),

    #[error("Export height must be between 1 and {max}, got {height}")]
    InvalidPixelHeight { height: u32, max: u32 },

    #[error("Nothing has been rendered yet")]
    NoDiagram,

    #[error("SVG error: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("Cannot allocate a {width}x{height} bitmap")]
    Bitmap { width: u32, height: u32 },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Export task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
