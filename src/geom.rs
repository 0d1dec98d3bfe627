//! Planar geometry shared by every engine module.
//!
//! All coordinates are world units with +y pointing down. Connectivity is
//! geometric: two things are connected when their points coincide within a
//! tolerance, so the comparison helpers here are the basis of the whole graph.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether `other` lies strictly within `eps` of `self` on both axes.
    #[must_use]
    pub fn near(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() < eps && (self.y - other.y).abs() < eps
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn dist(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Translate by a delta.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Round a coordinate to the nearest multiple of `grid`, halves away from zero.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    (value / grid).round() * grid
}

/// Round both axes of a point to the grid independently.
#[must_use]
pub fn snap_point(p: Point, grid: f64) -> Point {
    Point::new(snap_to_grid(p.x, grid), snap_to_grid(p.y, grid))
}

/// Distance from `p` to the closed segment `a`-`b` using clamped projection.
///
/// A zero-length segment degrades to the distance to `a`.
#[must_use]
pub fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let cx = b.x - a.x;
    let cy = b.y - a.y;
    let len_sq = cx * cx + cy * cy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * cx + (p.y - a.y) * cy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.dist(Point::new(a.x + t * cx, a.y + t * cy))
}

/// Axis-aligned rectangle given by two opposite corners in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Inclusive containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
