//! Square 1-bit icons blitted with anchor alignment.

use super::anchor::{Anchor, HAlign, VAlign};
use super::paint::PaintEngine;
use super::pattern::{FillStyle, MixMode};

/// Square bitmap; the side is the integer square root of the bit count.
///
/// Source entries equal to `1` are painted, everything else is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    bits: Vec<u8>,
    side: i32,
    x: i32,
    y: i32,
    anchor: Anchor,
}

impl Icon {
    pub fn new(bits: &[u8]) -> Self {
        Self {
            bits: bits.to_vec(),
            side: bits.len().isqrt() as i32,
            x: 0,
            y: 0,
            anchor: Anchor::default(),
        }
    }

    pub fn side(&self) -> i32 {
        self.side
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

    pub fn translate(mut self, dx: i32, dy: i32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Paints every set source bit with `style`.
    pub fn fill(self, paint: &mut PaintEngine<'_>, style: FillStyle, mix: MixMode) -> Self {
        let (left, top) = self.anchor.place(self.x, self.y, self.side, self.side);
        for row in 0..self.side {
            for col in 0..self.side {
                if self.bits[(row * self.side + col) as usize] == 1 {
                    paint.paint(left + col, top + row, style, mix);
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

    #[rustfmt::skip]
    const ARROW: [u8; 9] = [
        0, 1, 0,
        1, 1, 1,
        0, 1, 0,
    ];

    #[test]
    fn side_is_integer_square_root() {
        assert_eq!(Icon::new(&ARROW).side(), 3);
        assert_eq!(Icon::new(&[1; 17]).side(), 4);
    }

    #[test]
    fn fill_blits_centered() {
        let mut buffer = PixelBuffer::new(10, 10);
        let mut paint = PaintEngine::full(&mut buffer, test_resources());
        paint
            .icon(&ARROW)
            .at(5, 5)
            .anchor(HAlign::Center, VAlign::Center)
            .fill(&mut paint, FillStyle::Black, MixMode::Default);
        assert_eq!(buffer.get(5, 4), Some(0));
        assert_eq!(buffer.get(4, 4), Some(1));
        assert_eq!(buffer.get(4, 5), Some(0));
        assert_eq!(buffer.get(6, 6), Some(1));
    }
}
