//! Errors raised while importing external images.

use thiserror::Error;

/// Errors that can occur while fetching, decoding or dithering an image.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to fetch image from {source_name}: {error}")]
    Fetch {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to decode PNG: {0}")]
    Decode(#[from] cairo::IoError),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    SurfaceData(#[from] cairo::BorrowError),

    #[error("Invalid target box {width}x{height}")]
    InvalidTarget { width: i32, height: i32 },

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Image task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
