//! Mathematical structs and functions.

use cgmath::{Point2, Point3, Vector2, Vector3};
pub use line::LineSegment2d;
pub use pose::Pose;
pub use util::*;

mod line;
mod pose;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;

/// A 3D point
pub type Point3d = Point3<f64>;

/// A 3D vector
pub type Vector3d = Vector3<f64>;
