//! Geometry utilities shared by the paint engine and the diff engine.
//!
//! This module provides:
//! - [`Rect`], the axis-aligned rectangle used for widget areas and changed regions
//! - Integer rounding helpers for byte-grid alignment

// ============================================================================
// Rectangle
// ============================================================================

/// Axis-aligned rectangle in pixel coordinates (inclusive min, exclusive max).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Number of pixels covered.
    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns the overlapping part of two rectangles, if any.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        Self::from_min_max(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }
}

// ============================================================================
// Integer Rounding
// ============================================================================

/// Rounds `value` down to a multiple of `step` (towards negative infinity).
pub fn floor_to_multiple(value: i32, step: i32) -> i32 {
    value.div_euclid(step) * step
}

/// Rounds `value` up to a multiple of `step`.
pub fn ceil_to_multiple(value: i32, step: i32) -> i32 {
    floor_to_multiple(value + step - 1, step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_rejects_empty_dimensions() {
        assert!(Rect::new(0, 0, 0, 5).is_none());
        assert!(Rect::new(0, 0, 5, -1).is_none());
        assert!(Rect::new(3, 4, 1, 1).is_some());
    }

    #[test]
    fn intersect_clips_to_overlap() {
        let a = Rect::new(0, 0, 10, 10).unwrap();
        let b = Rect::new(5, 8, 10, 10).unwrap();
        assert_eq!(a.intersect(&b), Rect::new(5, 8, 5, 2));
        let far = Rect::new(20, 20, 2, 2).unwrap();
        assert!(a.intersect(&far).is_none());
    }

    #[test]
    fn rounding_helpers_handle_negatives() {
        assert_eq!(floor_to_multiple(50, 8), 48);
        assert_eq!(floor_to_multiple(-3, 8), -8);
        assert_eq!(ceil_to_multiple(1, 8), 8);
        assert_eq!(ceil_to_multiple(16, 8), 16);
        assert_eq!(ceil_to_multiple(0, 8), 0);
    }
}
