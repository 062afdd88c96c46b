//! Image-space geometry: points and axis-aligned regions.
//!
//! All coordinates are in the backing bitmap's pixel space. A `Region` may
//! hold reversed corners while it is being dragged; it is normalized when
//! committed.

use serde::{Deserialize, Serialize};

/// Default degeneracy threshold in image pixels.
///
/// A region whose width or height is at or below this value is rejected at
/// commit time.
pub const MIN_REGION_SIZE: f64 = 4.0;

/// A point in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Region {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Zero-size region with both corners at `p`.
    pub const fn at(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Region spanned by two arbitrary corners, already normalized.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Copy with `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(&self) -> Self {
        Self::spanning(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }

    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    /// True when either side is `<= eps`.
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.width() <= eps || self.height() <= eps
    }

    /// Inclusive containment on all four edges. Expects a normalized region.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Top-left corner (for a normalized region).
    pub fn origin(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// `[x1, y1, x2, y2]`, the tuple layout consumed by processing backends.
    pub fn as_tuple(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl From<[f64; 4]> for Region {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}
