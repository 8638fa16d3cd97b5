use super::{Point2d, Point3d};
use cgmath::prelude::*;

/// Drops the height of a point, leaving its position in the horizontal plane.
#[inline(always)]
pub fn horizontal(point: Point3d) -> Point2d {
    Point2d::new(point.x, point.y)
}

/// Linearly interpolates between two points in 3D space.
#[inline(always)]
pub fn lerp_point(a: Point3d, b: Point3d, t: f64) -> Point3d {
    Point3d::from_vec(a.to_vec().lerp(b.to_vec(), t))
}

/// The mid-point of two points in 3D space.
pub fn midpoint(a: Point3d, b: Point3d) -> Point3d {
    lerp_point(a, b, 0.5)
}
