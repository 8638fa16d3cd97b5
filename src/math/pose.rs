use super::{Point3d, Vector3d};
use cgmath::prelude::*;
use cgmath::{Quaternion, Rad};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position and orientation in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub position: Point3d,
    pub orientation: Quaternion<f64>,
}

impl Pose {
    /// Creates a pose at `position` facing `yaw` radians anticlockwise from the x-axis.
    pub fn from_yaw(position: Point3d, yaw: f64) -> Self {
        Self {
            position,
            orientation: Quaternion::from_angle_z(Rad(yaw)),
        }
    }

    /// The heading of the pose in the horizontal plane, in radians.
    pub fn yaw(&self) -> f64 {
        let q = self.orientation;
        let siny_cosp = 2.0 * (q.s * q.v.z + q.v.x * q.v.y);
        let cosy_cosp = 1.0 - 2.0 * (q.v.y * q.v.y + q.v.z * q.v.z);
        siny_cosp.atan2(cosy_cosp)
    }

    /// Returns a copy of the pose moved `distance` m along its heading.
    pub fn forward(&self, distance: f64) -> Self {
        let yaw = self.yaw();
        let offset = Vector3d::new(yaw.cos(), yaw.sin(), 0.0) * distance;
        Self {
            position: self.position + offset,
            ..*self
        }
    }

    /// Interpolates between two poses; positions linearly, orientations spherically.
    pub fn interpolate(&self, other: &Pose, t: f64) -> Self {
        Self {
            position: super::lerp_point(self.position, other.position, t),
            orientation: self.orientation.slerp(other.orientation, t),
        }
    }
}
