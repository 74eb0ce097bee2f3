//! Filled triangles via the three-edge-function half-space test.

use super::paint::PaintEngine;
use super::pattern::{FillStyle, MixMode};

/// Reconfigurable isosceles triangle.
///
/// The apex sits at `(x, y)` and the base `size` pixels below it; the base
/// is `size * stretch` wide. Rotation turns the shape about its centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    x: i32,
    y: i32,
    size: i32,
    stretch: f64,
    rotation: f64,
}

fn edge(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    (p.0 - a.0) * (b.1 - a.1) - (p.1 - a.1) * (b.0 - a.0)
}

impl Triangle {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self {
            x,
            y,
            size,
            stretch: 1.0,
            rotation: 0.0,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    /// Horizontal stretch factor applied to the base width.
    pub fn stretch(mut self, factor: f64) -> Self {
        self.stretch = factor;
        self
    }

    /// Rotation in degrees (clockwise in screen space) about the centroid.
    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn translate(mut self, dx: i32, dy: i32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Vertices after rotation: apex, base right, base left.
    pub fn vertices(&self) -> [(f64, f64); 3] {
        let (x, y, size) = (self.x as f64, self.y as f64, self.size as f64);
        let half_base = size * self.stretch / 2.0;
        let points = [(x, y), (x + half_base, y + size), (x - half_base, y + size)];

        let cx = (points[0].0 + points[1].0 + points[2].0) / 3.0;
        let cy = (points[0].1 + points[1].1 + points[2].1) / 3.0;
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        points.map(|(px, py)| {
            let (dx, dy) = (px - cx, py - cy);
            (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
        })
    }

    /// Returns true if the pixel at `(px, py)` lies inside the triangle.
    pub fn covers(&self, px: i32, py: i32) -> bool {
        let [mut a, b, mut c] = self.vertices();
        // orient so inside points give non-negative edge values
        if edge(a, b, c) < 0.0 {
            std::mem::swap(&mut a, &mut c);
        }
        let p = (px as f64, py as f64);
        edge(a, b, p) >= 0.0 && edge(b, c, p) >= 0.0 && edge(c, a, p) >= 0.0
    }

    /// Paints every pixel inside the rotated triangle.
    pub fn fill(self, paint: &mut PaintEngine<'_>, style: FillStyle, mix: MixMode) -> Self {
        let vertices = self.vertices();
        let min_x = vertices.iter().map(|v| v.0).fold(f64::INFINITY, f64::min);
        let max_x = vertices.iter().map(|v| v.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = vertices.iter().map(|v| v.1).fold(f64::INFINITY, f64::min);
        let max_y = vertices.iter().map(|v| v.1).fold(f64::NEG_INFINITY, f64::max);

        for py in min_y.floor() as i32..=max_y.ceil() as i32 {
            for px in min_x.floor() as i32..=max_x.ceil() as i32 {
                if self.covers(px, py) {
                    paint.paint(px, py, style, mix);
                }
            }
        }
        self
    }
}
