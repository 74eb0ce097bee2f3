//! Free-form text drawn from a high-resolution coverage raster.

use super::anchor::{Anchor, HAlign, VAlign};
use super::buffer::IntensityRaster;
use super::error::PaintError;
use super::font::FontDescriptor;
use super::paint::PaintEngine;
use super::pattern::{FillStyle, MixMode};
use super::rect::RectShape;

/// Parameters for one text rasterization.
#[derive(Debug, Clone, Copy)]
pub struct TextRequest<'a> {
    pub text: &'a str,
    pub font: &'a FontDescriptor,
    /// Point size
    pub size: f64,
    /// Wrap width in pixels, if the text should break into lines
    pub max_width: Option<i32>,
}

/// Renders text at full precision.
///
/// Implementations return a coverage raster cropped to the ink bounding
/// box: `255` is fully covered by a glyph, `0` is untouched paper.
pub trait TextRasterizer: Send + Sync {
    fn rasterize(&self, request: &TextRequest<'_>) -> Result<IntensityRaster, PaintError>;
}

/// Thresholded 1-bit glyph coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMask {
    pub width: i32,
    pub height: i32,
    bits: Vec<bool>,
}

impl TextMask {
    /// Keeps pixels whose coverage reaches `threshold` of full intensity.
    pub fn from_coverage(raster: &IntensityRaster, threshold: f64) -> Self {
        let cutoff = threshold.clamp(0.0, 1.0) * 255.0;
        let bits = raster
            .data
            .iter()
            .map(|&coverage| coverage > 0 && coverage as f64 >= cutoff)
            .collect();
        Self {
            width: raster.width as i32,
            height: raster.height as i32,
            bits,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Morphological dilation with a filled disk of `radius`.
    ///
    /// The result grows by `radius` on every side; its origin sits at
    /// `(-radius, -radius)` relative to the source mask.
    pub fn dilate(&self, radius: i32) -> TextMask {
        let radius = radius.max(0);
        let width = self.width + radius * 2;
        let height = self.height + radius * 2;
        let mut bits = vec![false; (width.max(0) * height.max(0)) as usize];
        for sy in 0..self.height {
            for sx in 0..self.width {
                if !self.get(sx, sy) {
                    continue;
                }
                for oy in -radius..=radius {
                    for ox in -radius..=radius {
                        if ox * ox + oy * oy > radius * radius {
                            continue;
                        }
                        let tx = sx + radius + ox;
                        let ty = sy + radius + oy;
                        bits[(ty * width + tx) as usize] = true;
                    }
                }
            }
        }
        TextMask {
            width,
            height,
            bits,
        }
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }
}

/// Reconfigurable free-form text shape.
#[derive(Debug, Clone)]
pub struct TextShape {
    text: String,
    x: i32,
    y: i32,
    anchor: Anchor,
    size: f64,
    font: FontDescriptor,
    threshold: f64,
    max_width: Option<i32>,
}

impl TextShape {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: 0,
            y: 0,
            anchor: Anchor::default(),
            size: 16.0,
            font: FontDescriptor::default(),
            threshold: super::paint::DEFAULT_TEXT_THRESHOLD,
            max_width: None,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn anchor(mut self, h: HAlign, v: VAlign) -> Self {
        self.anchor = Anchor::new(h, v);
        self
    }

    /// Point size.
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn font(mut self, font: FontDescriptor) -> Self {
        self.font = font;
        self
    }

    pub fn font_family(mut self, family: &str) -> Self {
        self.font = self.font.with_family(family);
        self
    }

    /// Fraction of full coverage (0.0-1.0) a pixel needs to be painted.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn max_width(mut self, width: i32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn translate(mut self, dx: i32, dy: i32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Rasterizes with the current configuration and resolves the anchor.
    ///
    /// Returns the mask and its top-left corner in area coordinates.
    pub fn layout(&self, paint: &PaintEngine<'_>) -> Result<(TextMask, i32, i32), PaintError> {
        let request = TextRequest {
            text: &self.text,
            font: &self.font,
            size: self.size,
            max_width: self.max_width,
        };
        let raster = paint.resources().text.rasterize(&request)?;
        let mask = TextMask::from_coverage(&raster, self.threshold);
        let (left, top) = self.anchor.place(self.x, self.y, mask.width, mask.height);
        Ok((mask, left, top))
    }

    /// Measured placement as a rectangle builder.
    pub fn rect(&self, paint: &PaintEngine<'_>) -> Result<RectShape, PaintError> {
        let (mask, left, top) = self.layout(paint)?;
        Ok(RectShape::new(left, top, mask.width, mask.height))
    }

    /// Hands the measured rectangle to `f`, e.g. to paint a backdrop first.
    pub fn use_rect<F>(self, paint: &mut PaintEngine<'_>, f: F) -> Result<Self, PaintError>
    where
        F: FnOnce(RectShape, &mut PaintEngine<'_>),
    {
        let rect = self.rect(paint)?;
        f(rect, paint);
        Ok(self)
    }

    /// Paints every covered pixel with `style`.
    pub fn render(
        self,
        paint: &mut PaintEngine<'_>,
        style: FillStyle,
        mix: MixMode,
    ) -> Result<Self, PaintError> {
        let (mask, left, top) = self.layout(paint)?;
        stamp(paint, &mask, left, top, style, mix);
        Ok(self)
    }

    /// Paints the glyphs grown by a disk of `radius`, approximating a stroke.
    pub fn render_outline(
        self,
        paint: &mut PaintEngine<'_>,
        style: FillStyle,
        radius: i32,
        mix: MixMode,
    ) -> Result<Self, PaintError> {
        let (mask, left, top) = self.layout(paint)?;
        let grown = mask.dilate(radius);
        let radius = radius.max(0);
        stamp(paint, &grown, left - radius, top - radius, style, mix);
        Ok(self)
    }
}

fn stamp(
    paint: &mut PaintEngine<'_>,
    mask: &TextMask,
    left: i32,
    top: i32,
    style: FillStyle,
    mix: MixMode,
) {
    for y in 0..mask.height {
        for x in 0..mask.width {
            if mask.get(x, y) {
                paint.paint(left + x, top + y, style, mix);
            }
        }
    }
}
