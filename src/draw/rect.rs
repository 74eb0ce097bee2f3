//! Rectangle builder with product-of-distances corner rounding.

use super::paint::PaintEngine;
use super::pattern::{FillStyle, MixMode};
use crate::util::Rect;

/// Returns true if a pixel `dx`/`dy` pixels away from a corner's two edges
/// is cut away by rounding `radius`.
///
/// Only pixels inside the `|radius|`-sized corner square are candidates.
/// Positive radii test `sqrt(dx²·dy²) < r`; negative radii test
/// `sqrt(dx³·dy³) < r²`, which carves a deeper notch.
pub fn corner_excluded(dx: i32, dy: i32, radius: i32) -> bool {
    if radius == 0 {
        return false;
    }
    let reach = radius.abs();
    if dx < 0 || dy < 0 || dx >= reach || dy >= reach {
        return false;
    }
    let (dx, dy) = (dx as f64, dy as f64);
    if radius > 0 {
        (dx * dx * dy * dy).sqrt() < radius as f64
    } else {
        (dx.powi(3) * dy.powi(3)).sqrt() < (radius * radius) as f64
    }
}

/// Reconfigurable rectangle.
///
/// Configuration methods consume and return the builder; `fill` and
/// `outline` paint with the geometry held at the time of the call, so a
/// single chain can layer a shadow, a body and a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectShape {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    radius: i32,
}

impl RectShape {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            w: width,
            h: height,
            radius: 0,
        }
    }

    /// Moves the origin, keeping the size.
    pub fn from(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Moves only the vertical origin.
    pub fn from_y(mut self, y: i32) -> Self {
        self.y = y;
        self
    }

    pub fn sized(mut self, width: i32, height: i32) -> Self {
        self.w = width;
        self.h = height;
        self
    }

    /// Resizes so the exclusive far corner lands on `(x, y)`.
    pub fn to(mut self, x: i32, y: i32) -> Self {
        self.w = x - self.x;
        self.h = y - self.y;
        self
    }

    /// Shrinks by `d` on every side (negative values grow).
    pub fn inset(self, d: i32) -> Self {
        self.inset_xy(d, d)
    }

    pub fn inset_xy(mut self, dx: i32, dy: i32) -> Self {
        self.x += dx;
        self.y += dy;
        self.w -= dx * 2;
        self.h -= dy * 2;
        self
    }

    pub fn translate(mut self, dx: i32, dy: i32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Sets the corner rounding; see [`corner_excluded`].
    pub fn round(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    pub fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Geometry as a [`Rect`], if it has a positive area.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Returns true if `(x, y)` lies inside the rectangle and survives the
    /// corner test.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        if x < self.x || y < self.y || x >= self.x + self.w || y >= self.y + self.h {
            return false;
        }
        let dx = (x - self.x).min(self.x + self.w - 1 - x);
        let dy = (y - self.y).min(self.y + self.h - 1 - y);
        !corner_excluded(dx, dy, self.radius)
    }

    /// Paints every covered pixel with `style`.
    pub fn fill(self, paint: &mut PaintEngine<'_>, style: FillStyle, mix: MixMode) -> Self {
        for y in self.y..self.y + self.h {
            for x in self.x..self.x + self.w {
                if self.covers(x, y) {
                    paint.paint(x, y, style, mix);
                }
            }
        }
        self
    }

    /// Paints a border band `width` pixels wide.
    pub fn outline(
        self,
        paint: &mut PaintEngine<'_>,
        style: FillStyle,
        width: i32,
        mix: MixMode,
    ) -> Self {
        if width < 0 {
            return self;
        }
        for y in self.y..self.y + self.h {
            for x in self.x..self.x + self.w {
                let in_band = x < self.x + width
                    || x >= self.x + self.w - width
                    || y < self.y + width
                    || y >= self.y + self.h - width;
                if in_band && self.covers(x, y) {
                    paint.paint(x, y, style, mix);
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::buffer::PixelBuffer;
    use crate::draw::paint::tests::test_resources;

    #[test]
    fn positive_radius_uses_product_of_distances() {
        // sqrt(2² · 2²) = 4 < 5
        assert!(corner_excluded(2, 2, 5));
        // sqrt(3² · 1²) = 3 < 5
        assert!(corner_excluded(3, 1, 5));
        // sqrt(4² · 2²) = 8, not < 5
        assert!(!corner_excluded(4, 2, 5));
        assert!(!corner_excluded(4, 4, 5));
        // outside the corner square
        assert!(!corner_excluded(5, 0, 5));
        assert!(!corner_excluded(2, 2, 0));
    }

    #[test]
    fn negative_radius_uses_cubed_product() {
        // sqrt(1³ · 2³) ≈ 2.83 < 9
        assert!(corner_excluded(1, 2, -3));
        // sqrt(2³ · 2³) = 8 < 9
        assert!(corner_excluded(2, 2, -3));
        // sqrt(2³ · 1³) vs r² = 16 for r = -4, and (3, 3): 27 > 16
        assert!(corner_excluded(2, 1, -4));
        assert!(!corner_excluded(3, 3, -4));
    }

    #[test]
    fn fill_skips_rounded_corners() {
        let mut buffer = PixelBuffer::new(12, 12);
        let mut paint = PaintEngine::full(&mut buffer, test_resources());
        paint
            .rect(0, 0, 12, 12)
            .round(5)
            .fill(&mut paint, FillStyle::Black, MixMode::Default);
        assert_eq!(buffer.get(0, 0), Some(1));
        assert_eq!(buffer.get(2, 2), Some(1));
        assert_eq!(buffer.get(11, 11), Some(1));
        assert_eq!(buffer.get(9, 9), Some(1));
        assert_eq!(buffer.get(4, 4), Some(0));
        assert_eq!(buffer.get(6, 0), Some(0));
    }

    #[test]
    fn outline_paints_only_the_band() {
        let mut buffer = PixelBuffer::new(10, 10);
        let mut paint = PaintEngine::full(&mut buffer, test_resources());
        paint
            .rect(1, 1, 8, 8)
            .outline(&mut paint, FillStyle::Black, 2, MixMode::Default);
        assert_eq!(buffer.get(1, 1), Some(0));
        assert_eq!(buffer.get(2, 5), Some(0));
        assert_eq!(buffer.get(3, 3), Some(1));
        assert_eq!(buffer.get(7, 7), Some(0));
        assert_eq!(buffer.get(0, 0), Some(1));
    }

    #[test]
    fn each_commit_reads_current_geometry() {
        let mut buffer = PixelBuffer::new(10, 10);
        let mut paint = PaintEngine::full(&mut buffer, test_resources());
        paint
            .rect(0, 0, 4, 4)
            .fill(&mut paint, FillStyle::Black, MixMode::Default)
            .translate(5, 5)
            .fill(&mut paint, FillStyle::Black, MixMode::Default)
            .inset(1)
            .fill(&mut paint, FillStyle::White, MixMode::Default);
        assert_eq!(buffer.get(0, 0), Some(0));
        assert_eq!(buffer.get(5, 5), Some(0));
        assert_eq!(buffer.get(6, 6), Some(1));
        assert_eq!(buffer.get(4, 4), Some(1));
    }

    #[test]
    fn geometry_helpers() {
        let rect = RectShape::new(10, 10, 5, 5).to(20, 30);
        assert_eq!(rect.size(), (10, 20));
        let rect = rect.inset_xy(2, 3);
        assert_eq!(rect.origin(), (12, 13));
        assert_eq!(rect.size(), (6, 14));
        assert!(RectShape::new(0, 0, 0, 3).bounds().is_none());
    }
}
