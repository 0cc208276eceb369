use serde::{Deserialize, Serialize};

/// A pixel coordinate in image space. `y` grows downwards, so a smaller `y` is
/// higher on screen.
pub type Point = nalgebra::Point2<i32>;

/// Euclidean distance between two pixel coordinates.
pub fn distance(a: &Point, b: &Point) -> f64 {
    nalgebra::distance(&a.cast::<f64>(), &b.cast::<f64>())
}

/// An axis-aligned pixel rectangle, `(x1, y1)` top-left and `(x2, y2)`
/// bottom-right.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whether `p` lies strictly inside the rectangle. Points on any edge are
    /// outside.
    pub fn contains_strict(&self, p: &Point) -> bool {
        self.x1 < p.x && p.x < self.x2 && self.y1 < p.y && p.y < self.y2
    }
}
