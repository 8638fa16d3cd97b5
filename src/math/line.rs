use super::{Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// Two segments whose directions have a cross product smaller than this are parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

/// A bounded line segment in the horizontal plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSegment2d {
    ends: [Point2d; 2],
}

impl LineSegment2d {
    /// Creates a line segment between two points.
    pub const fn from_ends(start: Point2d, end: Point2d) -> Self {
        Self { ends: [start, end] }
    }

    /// The first end of the segment.
    pub fn start(&self) -> Point2d {
        self.ends[0]
    }

    /// The second end of the segment.
    pub fn end(&self) -> Point2d {
        self.ends[1]
    }

    /// The vector from the start of the segment to its end.
    pub fn vector(&self) -> Vector2d {
        self.ends[1] - self.ends[0]
    }

    /// The length of the segment in m.
    pub fn length(&self) -> f64 {
        self.vector().magnitude()
    }

    /// Samples the segment, where `t = 0` is the start and `t = 1` is the end.
    pub fn sample(&self, t: f64) -> Point2d {
        self.ends[0] + self.vector() * t
    }

    /// Returns a copy of the segment lengthened by `length` at both ends,
    /// along the segment's own direction.
    ///
    /// A degenerate segment has no direction and is returned unchanged.
    pub fn extended(&self, length: f64) -> Self {
        let magnitude = self.length();
        if magnitude == 0.0 {
            return *self;
        }
        let pad = self.vector() * (length / magnitude);
        Self::from_ends(self.ends[0] - pad, self.ends[1] + pad)
    }

    /// Finds the intersection of two bounded segments.
    ///
    /// # Returns
    /// The parameters `(t, u)` such that `self.sample(t) == other.sample(u)`,
    /// both in `[0, 1]`, or `None` when the segments do not meet.
    /// Parallel and collinear segments never intersect.
    pub fn intersect(&self, other: &LineSegment2d) -> Option<(f64, f64)> {
        let r = self.vector();
        let s = other.vector();
        let denom = r.perp_dot(s);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let qp = other.start() - self.start();
        let t = qp.perp_dot(s) / denom;
        let u = qp.perp_dot(r) / denom;

        let unit = Interval::new(0.0, 1.0);
        (unit.contains(t) && unit.contains(u)).then_some((t, u))
    }

    /// Projects a point onto the segment.
    ///
    /// # Returns
    /// The parameter of the nearest point on the segment, clamped to `[0, 1]`.
    pub fn project(&self, point: Point2d) -> f64 {
        let v = self.vector();
        let len2 = v.magnitude2();
        if len2 == 0.0 {
            return 0.0;
        }
        Interval::new(0.0, 1.0).clamp((point - self.start()).dot(v) / len2)
    }
}
