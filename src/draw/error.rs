//! Errors raised while committing shapes or exporting previews.

use thiserror::Error;

/// Errors that can occur while painting.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    SurfaceData(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No bitmap font loaded for size {0}px")]
    MissingBitmapFont(u32),

    #[error("No bitmap fonts loaded")]
    NoBitmapFonts,
}
