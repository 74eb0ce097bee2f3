//! Ordered-dither threshold matrices.

use crate::draw::{IntensityRaster, PixelBuffer};

#[rustfmt::skip]
const BAYER4: [[u8; 4]; 4] = [
    [ 0,  8,  2, 10],
    [12,  4, 14,  6],
    [ 3, 11,  1,  9],
    [15,  7, 13,  5],
];

#[rustfmt::skip]
const BAYER8: [[u8; 8]; 8] = [
    [ 0, 32,  8, 40,  2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44,  4, 36, 14, 46,  6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [ 3, 35, 11, 43,  1, 33,  9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47,  7, 39, 13, 45,  5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Bayer threshold matrix size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BayerMatrix {
    #[default]
    Bayer4,
    Bayer8,
}

impl BayerMatrix {
    /// Side length `N` of the matrix.
    pub fn size(self) -> usize {
        match self {
            BayerMatrix::Bayer4 => 4,
            BayerMatrix::Bayer8 => 8,
        }
    }

    /// Threshold at `(x, y)`: `matrix[y % N][x % N] * 255 / N²`.
    pub fn threshold(self, x: usize, y: usize) -> f64 {
        let n = self.size();
        let entry = match self {
            BayerMatrix::Bayer4 => BAYER4[y % n][x % n],
            BayerMatrix::Bayer8 => BAYER8[y % n][x % n],
        };
        entry as f64 * 255.0 / (n * n) as f64
    }
}

/// Dithers a luma raster; a pixel turns white when its luma exceeds the
/// threshold at its position.
pub fn dither(luma: &IntensityRaster, matrix: BayerMatrix) -> PixelBuffer {
    let mut out = PixelBuffer::filled(luma.width, luma.height, 0);
    for y in 0..luma.height {
        for x in 0..luma.width {
            if luma.get(x, y) as f64 > matrix.threshold(x, y) {
                out.set_pixel(x as i32, y as i32, 1, Default::default());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_count(buffer: &PixelBuffer) -> usize {
        (0..buffer.height() as i32)
            .flat_map(|y| (0..buffer.width() as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.get(x, y) == Some(1))
            .count()
    }

    #[test]
    fn extremes_stay_solid() {
        let black = dither(&IntensityRaster::new(8, 8, 0), BayerMatrix::Bayer4);
        let white = dither(&IntensityRaster::new(8, 8, 255), BayerMatrix::Bayer8);
        assert_eq!(white_count(&black), 0);
        assert_eq!(white_count(&white), 64);
    }

    #[test]
    fn mid_gray_is_roughly_half() {
        let out = dither(&IntensityRaster::new(4, 4, 128), BayerMatrix::Bayer4);
        // entries 0..=8 sit at or below 127.5
        assert_eq!(white_count(&out), 9);
        let out = dither(&IntensityRaster::new(8, 8, 128), BayerMatrix::Bayer8);
        assert_eq!(white_count(&out), 33);
    }

    #[test]
    fn matrices_cover_every_level_once() {
        for matrix in [BayerMatrix::Bayer4, BayerMatrix::Bayer8] {
            let n = matrix.size();
            let mut seen: Vec<u64> = (0..n * n)
                .map(|i| (matrix.threshold(i % n, i / n) * (n * n) as f64 / 255.0).round() as u64)
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..(n * n) as u64).collect::<Vec<_>>());
        }
    }
}
