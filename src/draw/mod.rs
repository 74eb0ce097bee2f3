//! 1-bit rendering primitives and shape builders.
//!
//! This module defines the core drawing types used to compose a display frame:
//! - [`PixelBuffer`]: logical 1-bit raster with the packed wire export
//! - [`FillStyle`] / [`MixMode`]: dither patterns and write rules
//! - [`PaintEngine`]: area-bound drawing surface handing out shape builders
//! - [`Frame`]: compositor running [`Renderer`]s with failure isolation
//! - [`PangoRasterizer`]: high-resolution text backend and PNG previews

pub mod anchor;
pub mod bitmap_text;
pub mod buffer;
pub mod error;
pub mod font;
pub mod frame;
pub mod icon;
pub mod paint;
pub mod pattern;
pub mod rect;
pub mod render;
pub mod text;
pub mod triangle;

// Re-export commonly used types at module level
pub use anchor::{Anchor, HAlign, VAlign};
pub use bitmap_text::{BitmapFont, BitmapFontSet, BitmapText};
pub use buffer::{IntensityRaster, PixelBuffer};
pub use error::PaintError;
pub use font::FontDescriptor;
pub use frame::{DrawOutcome, Frame, Renderer};
pub use icon::Icon;
pub use paint::{PaintEngine, PaintResources};
pub use pattern::{FillStyle, MixMode};
pub use rect::RectShape;
pub use render::{PangoRasterizer, encode_preview, write_preview};
pub use text::{TextRasterizer, TextRequest, TextShape};
pub use triangle::Triangle;
