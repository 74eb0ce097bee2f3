//! Logical 1-bit raster and its packed wire representation.

use super::pattern::MixMode;

/// 8-bit grayscale staging raster (0 = black, 255 = white).
///
/// Used when importing content produced at higher precision, such as text
/// coverage masks or debug previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityRaster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl IntensityRaster {
    /// Creates a raster filled with `value`.
    pub fn new(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Logical W×H grid of 1-bit pixels (`1` white, `0` black).
///
/// Created per render pass and discarded after export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    bits: Vec<u8>,
}

impl PixelBuffer {
    /// Creates an all-white buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 1)
    }

    /// Creates a buffer with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            bits: vec![value.min(1); width * height],
        }
    }

    /// Thresholds each intensity at the midpoint (>= 128 is white).
    pub fn from_intensity_raster(raster: &IntensityRaster) -> Self {
        let bits = raster
            .data
            .iter()
            .map(|&luma| if luma >= 128 { 1 } else { 0 })
            .collect();
        Self {
            width: raster.width,
            height: raster.height,
            bits,
        }
    }

    /// Rebuilds a buffer from its packed form (see [`PixelBuffer::export_packed`]).
    ///
    /// Missing trailing bytes read as black.
    pub fn from_packed(packed: &[u8], width: usize, height: usize) -> Self {
        let bits = (0..width * height)
            .map(|i| {
                packed
                    .get(i / 8)
                    .map(|byte| (byte >> (i % 8)) & 1)
                    .unwrap_or(0)
            })
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.bits[i])
    }

    /// Writes one pixel through `mix`. Out-of-range writes are ignored.
    ///
    /// Returns true if the write was applied.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u8, mix: MixMode) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        match mix.apply(self.bits[index], value.min(1)) {
            Some(next) => {
                self.bits[index] = next;
                true
            }
            None => false,
        }
    }

    /// Sets every pixel to `value` without mixing.
    pub fn clear(&mut self, value: u8) {
        self.bits.fill(value.min(1));
    }

    /// Row-major, one bit per pixel, `ceil(W*H/8)` bytes.
    ///
    /// Bit `j` of byte `i` holds pixel `i*8 + j`.
    pub fn export_packed(&self) -> Vec<u8> {
        let mut packed = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, &bit) in self.bits.iter().enumerate() {
            packed[i / 8] |= bit << (i % 8);
        }
        packed
    }

    /// Expands to a two-tone intensity raster (1 → 255, 0 → 0).
    pub fn to_intensity_raster(&self) -> IntensityRaster {
        IntensityRaster {
            width: self.width,
            height: self.height,
            data: self.bits.iter().map(|&bit| bit * 255).collect(),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }
}
