//! Rectangles and affine matrices in PDF user space.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its lower-left and upper-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    /// Create a rectangle from two corners, normalizing so `x0 <= x1` and `y0 <= y1`.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Rectangle `(0, 0, width, height)`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Whether the lower-left corner sits at the origin.
    pub fn is_at_origin(&self) -> bool {
        self.x0 == 0.0 && self.y0 == 0.0
    }

    /// Corners as `[x0, y0, x1, y1]`, the order PDF box arrays use.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// A 2D affine transform `[a b c d e f]`, mapping `(x, y)` to
/// `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Uniform scale followed by a translation, as one matrix.
    pub fn scale_translate(scale: f64, dx: f64, dy: f64) -> Self {
        Self::new(scale, 0.0, 0.0, scale, dx, dy)
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Components in content-stream operand order.
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_normalizes_corners() {
        let rect = Rect::new(100.0, 50.0, 0.0, 0.0);
        assert_eq!(rect.to_array(), [0.0, 0.0, 100.0, 50.0]);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
        assert!(rect.is_at_origin());
    }

    #[test]
    fn test_scale_translate_maps_corners() {
        let m = Matrix::scale_translate(0.5, 10.0, 20.0);
        assert_eq!(m.transform_point(0.0, 0.0), (10.0, 20.0));
        assert_eq!(m.transform_point(100.0, 200.0), (60.0, 120.0));
        assert!(!m.is_identity());
        assert!(Matrix::default().is_identity());
    }
}
