//! Stateful drawing surface bound to one area of a [`PixelBuffer`].

use std::sync::Arc;

use super::bitmap_text::{BitmapFontSet, BitmapText};
use super::buffer::PixelBuffer;
use super::font::FontDescriptor;
use super::icon::Icon;
use super::pattern::{FillStyle, MixMode};
use super::rect::RectShape;
use super::text::{TextRasterizer, TextShape};
use super::triangle::Triangle;
use crate::util::Rect;

/// Default fraction of full coverage a text pixel needs to be painted.
pub const DEFAULT_TEXT_THRESHOLD: f64 = 0.9;

/// Shared, read-only resources handed to every paint engine of a frame.
#[derive(Clone)]
pub struct PaintResources {
    /// High-resolution rasterizer used by [`TextShape`]
    pub text: Arc<dyn TextRasterizer>,
    /// Pre-rasterized glyph tables used by [`BitmapText`]
    pub bitmap_fonts: Arc<BitmapFontSet>,
    /// Font used when a text shape does not pick one
    pub font: FontDescriptor,
    /// Coverage threshold used when a text shape does not pick one
    pub text_threshold: f64,
}

impl PaintResources {
    pub fn new(text: Arc<dyn TextRasterizer>) -> Self {
        Self {
            text,
            bitmap_fonts: Arc::new(BitmapFontSet::default()),
            font: FontDescriptor::default(),
            text_threshold: DEFAULT_TEXT_THRESHOLD,
        }
    }

    pub fn with_bitmap_fonts(mut self, fonts: BitmapFontSet) -> Self {
        self.bitmap_fonts = Arc::new(fonts);
        self
    }
}

/// Drawing surface for one renderer callback.
///
/// Coordinates passed to shapes are relative to the bound area plus the
/// current translation. Writes outside the area are clipped, and fill
/// patterns are evaluated at absolute frame coordinates so neighbouring
/// widgets dither seamlessly.
pub struct PaintEngine<'a> {
    buffer: &'a mut PixelBuffer,
    area: Rect,
    offset: (i32, i32),
    resources: PaintResources,
}

impl<'a> PaintEngine<'a> {
    pub fn new(buffer: &'a mut PixelBuffer, area: Rect, resources: PaintResources) -> Self {
        Self {
            buffer,
            area,
            offset: (0, 0),
            resources,
        }
    }

    /// Engine covering the whole buffer.
    pub fn full(buffer: &'a mut PixelBuffer, resources: PaintResources) -> Self {
        let area = Rect {
            x: 0,
            y: 0,
            width: buffer.width() as i32,
            height: buffer.height() as i32,
        };
        Self::new(buffer, area, resources)
    }

    /// Width of the bound area.
    pub fn width(&self) -> i32 {
        self.area.width
    }

    /// Height of the bound area.
    pub fn height(&self) -> i32 {
        self.area.height
    }

    /// Bound area in absolute frame coordinates.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn resources(&self) -> &PaintResources {
        &self.resources
    }

    // ------------------------------------------------------------------
    // Translation
    // ------------------------------------------------------------------

    /// Adds `(dx, dy)` to the translation applied to every following write.
    pub fn transform(&mut self, dx: i32, dy: i32) -> &mut Self {
        self.offset.0 += dx;
        self.offset.1 += dy;
        self
    }

    /// Resets the translation to zero.
    pub fn clear_transform(&mut self) -> &mut Self {
        self.offset = (0, 0);
        self
    }

    /// Current accumulated translation.
    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    // ------------------------------------------------------------------
    // Pixel writes
    // ------------------------------------------------------------------

    /// Writes a raw value at area-relative `(x, y)`.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u8, mix: MixMode) {
        if let Some((ax, ay)) = self.resolve(x, y) {
            self.buffer.set_pixel(ax, ay, value, mix);
        }
    }

    /// Writes the value of `style` at area-relative `(x, y)`.
    pub fn paint(&mut self, x: i32, y: i32, style: FillStyle, mix: MixMode) {
        if let Some((ax, ay)) = self.resolve(x, y) {
            self.buffer.set_pixel(ax, ay, style.pattern(ax, ay), mix);
        }
    }

    fn resolve(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let ax = self.area.x + self.offset.0 + x;
        let ay = self.area.y + self.offset.1 + y;
        self.area.contains(ax, ay).then_some((ax, ay))
    }

    // ------------------------------------------------------------------
    // Shape builders
    // ------------------------------------------------------------------

    /// Starts a rectangle at `(x, y)` sized `width × height`.
    pub fn rect(&self, x: i32, y: i32, width: i32, height: i32) -> RectShape {
        RectShape::new(x, y, width, height)
    }

    /// Starts a high-resolution text shape using the frame's default font.
    pub fn text(&self, text: impl Into<String>) -> TextShape {
        TextShape::new(text)
            .font(self.resources.font.clone())
            .threshold(self.resources.text_threshold)
    }

    /// Starts a fixed bitmap-font text shape.
    pub fn bit_text(&self, text: impl Into<String>) -> BitmapText {
        BitmapText::new(text)
    }

    /// Starts a triangle with its apex at `(x, y)`.
    pub fn triangle(&self, x: i32, y: i32, size: i32) -> Triangle {
        Triangle::new(x, y, size)
    }

    /// Starts a square icon blit.
    pub fn icon(&self, bits: &[u8]) -> Icon {
        Icon::new(bits)
    }
}
