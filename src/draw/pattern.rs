//! Dithered fill styles and pixel compositing modes.
//!
//! A pixel value of `1` is white (paper) and `0` is black (ink).

/// Named dithering pattern used to approximate gray levels with 1-bit pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillStyle {
    /// Solid white
    White,
    /// One ink pixel in sixteen
    Lightest,
    /// One ink pixel in eight
    Lighter,
    /// One ink pixel in four
    Light,
    /// Alternating pixels (50%)
    Medium,
    /// Three ink pixels in four
    Dark,
    /// Solid black
    Black,
    /// 4x4 pixel checkerboard blocks
    Checker,
}

impl FillStyle {
    /// Every style, lightest first. Handy for tests and demo swatches.
    pub const ALL: [FillStyle; 8] = [
        FillStyle::White,
        FillStyle::Lightest,
        FillStyle::Lighter,
        FillStyle::Light,
        FillStyle::Medium,
        FillStyle::Dark,
        FillStyle::Black,
        FillStyle::Checker,
    ];

    /// Returns the pixel value of this style at absolute frame coordinates.
    pub fn pattern(self, x: i32, y: i32) -> u8 {
        pattern(self, x, y)
    }
}

/// Returns the bit (`1` white, `0` black) painted by `style` at `(x, y)`.
///
/// Pure function of its arguments; every pattern tiles with a period of at
/// most 16 pixels in either direction.
pub fn pattern(style: FillStyle, x: i32, y: i32) -> u8 {
    let ink = match style {
        FillStyle::White => false,
        FillStyle::Black => true,
        FillStyle::Lightest => (x + y * 6).rem_euclid(16) == 0,
        FillStyle::Lighter => (x + y * 19).rem_euclid(8) == 0,
        FillStyle::Light => (x + y * 2).rem_euclid(4) == 0,
        FillStyle::Medium => (x + y).rem_euclid(2) == 0,
        FillStyle::Dark => (x + y * 2).rem_euclid(4) != 0,
        FillStyle::Checker => (x.div_euclid(4) + y.div_euclid(4)).rem_euclid(2) == 0,
    };
    if ink { 0 } else { 1 }
}

/// Compositing rule applied when a single pixel is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MixMode {
    /// Overwrite unconditionally
    #[default]
    Default,
    /// Only ink (`0`) is written; white never covers existing content
    Darken,
    /// Only white (`1`) is written
    Lighten,
    /// An incoming `0` flips the existing pixel; an incoming `1` is ignored
    Invert,
}

impl MixMode {
    /// Combines an incoming value with the existing pixel.
    ///
    /// Returns `None` when the write is refused and the pixel stays as is.
    pub fn apply(self, existing: u8, incoming: u8) -> Option<u8> {
        match self {
            MixMode::Default => Some(incoming),
            MixMode::Darken if incoming == 1 => None,
            MixMode::Darken => Some(incoming),
            MixMode::Lighten if incoming == 0 => None,
            MixMode::Lighten => Some(incoming),
            MixMode::Invert if incoming == 1 => None,
            MixMode::Invert => Some(1 - existing),
        }
    }
}
