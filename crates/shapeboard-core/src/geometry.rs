//! Axis-aligned geometry primitives.
//!
//! Rectangles are stored as an ordered pair of corner points and are not
//! required to be normalized; callers normalize before comparing corners.

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by the given deltas.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height of a shape or viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle given by two corner points.
///
/// The corners may arrive in any order (a marquee dragged up-left stores its
/// anchor as `a` and the cursor as `b`). Use [`Rect::normalized`] before
/// comparing corners directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub a: Point,
    pub b: Point,
}

impl Rect {
    /// Creates a rectangle from two corner points.
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Creates a degenerate rectangle with both corners at `point`.
    pub fn degenerate(point: Point) -> Self {
        Self::new(point, point)
    }

    /// Returns the rectangle with `a` as the min corner and `b` as the max
    /// corner. Idempotent.
    pub fn normalized(&self) -> Rect {
        Rect::new(
            Point::new(self.a.x.min(self.b.x), self.a.y.min(self.b.y)),
            Point::new(self.a.x.max(self.b.x), self.a.y.max(self.b.y)),
        )
    }

    /// Tests whether two rectangles overlap.
    ///
    /// Both inputs are normalized internally. Intervals are closed, so
    /// rectangles that merely touch along an edge count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        let r1 = self.normalized();
        let r2 = other.normalized();

        r1.a.x <= r2.b.x && r2.a.x <= r1.b.x && r1.a.y <= r2.b.y && r2.a.y <= r1.b.y
    }
}
