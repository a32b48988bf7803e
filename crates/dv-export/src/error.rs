use thiserror::Error;

/// Everything that can go wrong between rasterizing the canvas and
/// handing back PDF bytes.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rasterized canvas is empty ({width}x{height})")]
    EmptyBitmap { width: u32, height: u32 },

    #[error("bitmap holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BitmapSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}
