//! Anchor alignment for shapes positioned by a reference point.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Which point of a measured box sits on the shape's reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub h: HAlign,
    pub v: VAlign,
}

impl Anchor {
    pub fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }

    /// Returns the top-left corner of a `width × height` box anchored at `(x, y)`.
    pub fn place(&self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        let left = match self.h {
            HAlign::Left => x,
            HAlign::Center => x - width / 2,
            HAlign::Right => x - width,
        };
        let top = match self.v {
            VAlign::Top => y,
            VAlign::Center => y - height / 2,
            VAlign::Bottom => y - height,
        };
        (left, top)
    }
}
