//! Wire geometry: segment decomposition, distances, and sub-segment queries.
//!
//! A straight wire is a single segment. A bent wire is two legs joined at a
//! corner: H-then-V turns at `(end.x, start.y)`, V-then-H turns at
//! `(start.x, end.y)`. Every query here treats the wire as the union of its
//! legs, in start-to-end order.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ALIGN_EPS, COINCIDENCE_EPS, DEGENERATE_LEN};
use crate::doc::{Bend, Endpoint, Wire};
use crate::geom::{Point, point_to_segment_distance};

/// A physical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One straight leg of a wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
    pub axis: Axis,
}

impl Segment {
    /// Whether `p` lies on this leg, strictly between its ends.
    #[must_use]
    pub fn contains_interior(&self, p: Point) -> bool {
        let (along, across, lo, hi) = match self.axis {
            Axis::Horizontal => (p.x, p.y - self.a.y, self.a.x.min(self.b.x), self.a.x.max(self.b.x)),
            Axis::Vertical => (p.y, p.x - self.a.x, self.a.y.min(self.b.y), self.a.y.max(self.b.y)),
        };
        let margin = COINCIDENCE_EPS / 2.0;
        across.abs() < COINCIDENCE_EPS && along > lo + margin && along < hi - margin
    }

    #[must_use]
    pub fn distance_to(&self, p: Point) -> f64 {
        point_to_segment_distance(p, self.a, self.b)
    }
}

/// Which part of a wire a point is closest to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireSegment {
    /// The whole of a straight wire.
    Straight(Axis),
    /// The leg touching the start of a bent wire.
    First(Axis),
    /// The leg touching the end of a bent wire.
    Second(Axis),
}

impl WireSegment {
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Straight(a) | Self::First(a) | Self::Second(a) => a,
        }
    }
}

impl Bend {
    /// The bend whose leg at `end` runs along `axis`.
    #[must_use]
    pub fn with_leg_at(end: Endpoint, axis: Axis) -> Self {
        match (end, axis) {
            (Endpoint::Start, Axis::Horizontal) | (Endpoint::End, Axis::Vertical) => Self::HorizontalFirst,
            (Endpoint::Start, Axis::Vertical) | (Endpoint::End, Axis::Horizontal) => Self::VerticalFirst,
        }
    }
}

impl Wire {
    /// Both ends share a y coordinate.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        (self.start.y - self.end.y).abs() < ALIGN_EPS
    }

    /// Both ends share an x coordinate.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        (self.start.x - self.end.x).abs() < ALIGN_EPS
    }

    /// Straight wires ignore their bend tag.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        self.is_horizontal() || self.is_vertical()
    }

    /// Near-zero extent on both axes.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        (self.start.x - self.end.x).abs() <= DEGENERATE_LEN && (self.start.y - self.end.y).abs() <= DEGENERATE_LEN
    }

    /// Axis of a straight wire; `None` when bent.
    #[must_use]
    pub fn straight_axis(&self) -> Option<Axis> {
        if self.is_horizontal() {
            Some(Axis::Horizontal)
        } else if self.is_vertical() {
            Some(Axis::Vertical)
        } else {
            None
        }
    }

    /// The corner of a bent wire; `None` when straight.
    #[must_use]
    pub fn corner(&self) -> Option<Point> {
        if self.is_straight() {
            return None;
        }
        Some(match self.bend {
            Bend::HorizontalFirst => Point::new(self.end.x, self.start.y),
            Bend::VerticalFirst => Point::new(self.start.x, self.end.y),
        })
    }

    /// Legs in start-to-end order.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        match (self.straight_axis(), self.corner()) {
            (Some(axis), _) => vec![Segment { a: self.start, b: self.end, axis }],
            (None, Some(c)) => {
                let (first, second) = match self.bend {
                    Bend::HorizontalFirst => (Axis::Horizontal, Axis::Vertical),
                    Bend::VerticalFirst => (Axis::Vertical, Axis::Horizontal),
                };
                vec![
                    Segment { a: self.start, b: c, axis: first },
                    Segment { a: c, b: self.end, axis: second },
                ]
            }
            (None, None) => Vec::new(),
        }
    }

    /// Minimum distance from `p` to any leg.
    #[must_use]
    pub fn distance_to(&self, p: Point) -> f64 {
        self.segments()
            .iter()
            .map(|s| s.distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Whether `p` lies strictly inside one of the legs (not at an end or the corner).
    #[must_use]
    pub fn passes_through(&self, p: Point) -> bool {
        self.segments().iter().any(|s| s.contains_interior(p))
    }

    /// Whether `p` is one of the wire's ends or its corner.
    #[must_use]
    pub fn touches_at(&self, p: Point, eps: f64) -> bool {
        self.start.near(p, eps) || self.end.near(p, eps) || self.corner().is_some_and(|c| c.near(p, eps))
    }

    /// The leg `p` is closest to. Ties on a bent wire go to the second leg.
    #[must_use]
    pub fn segment_at(&self, p: Point) -> WireSegment {
        if let Some(axis) = self.straight_axis() {
            return WireSegment::Straight(axis);
        }
        let segs = self.segments();
        match segs.as_slice() {
            [first, second] if first.distance_to(p) < second.distance_to(p) => WireSegment::First(first.axis),
            [_, second] => WireSegment::Second(second.axis),
            _ => WireSegment::Straight(Axis::Horizontal),
        }
    }

    /// Axis of the leg that touches `end`.
    #[must_use]
    pub fn axis_at(&self, end: Endpoint) -> Axis {
        if let Some(axis) = self.straight_axis() {
            return axis;
        }
        match (self.bend, end) {
            (Bend::HorizontalFirst, Endpoint::Start) | (Bend::VerticalFirst, Endpoint::End) => Axis::Horizontal,
            (Bend::HorizontalFirst, Endpoint::End) | (Bend::VerticalFirst, Endpoint::Start) => Axis::Vertical,
        }
    }

    /// Which end, if any, sits within `eps` of `p`. The start is checked first.
    #[must_use]
    pub fn end_at(&self, p: Point, eps: f64) -> Option<Endpoint> {
        if self.start.near(p, eps) {
            Some(Endpoint::Start)
        } else if self.end.near(p, eps) {
            Some(Endpoint::End)
        } else {
            None
        }
    }

    /// Move both ends by a delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.offset(dx, dy);
        self.end = self.end.offset(dx, dy);
    }
}
