//! Dithering importer for photographic content.
//!
//! Images are fetched through an [`ImageSource`], decoded with Cairo, scaled
//! into a target box and reduced to 1-bit with ordered (Bayer) dithering.
//! The result is composited into a frame through a [`PaintEngine`](crate::draw::PaintEngine).

pub mod bayer;
pub mod error;
pub mod importer;
pub mod source;

pub use bayer::BayerMatrix;
pub use error::ImportError;
pub use importer::{DitherOptions, DitheredImage, FitMode, import, import_png};
pub use source::{FileImageSource, ImageSource, MemoryImageSource};
