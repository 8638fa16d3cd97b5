//! Status records reported to the rest of the planner.

use crate::math::{Point3d, Pose};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The behaviour that a velocity factor is attributed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlanningBehavior {
    StopSign,
}

/// What the vehicle is doing with respect to the event being reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VelocityFactorStatus {
    Approaching,
    Stopped,
}

/// Reports how far ahead an event that limits the vehicle's velocity is.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VelocityFactor {
    pub behavior: PlanningBehavior,
    /// `None` until the first report.
    pub status: Option<VelocityFactorStatus>,
    /// The distance from the vehicle to the event, in m.
    pub distance: f64,
}

impl VelocityFactor {
    pub fn new(behavior: PlanningBehavior) -> Self {
        Self {
            behavior,
            status: None,
            distance: 0.0,
        }
    }

    /// Updates the report.
    pub fn set(&mut self, distance: f64, status: VelocityFactorStatus) {
        self.distance = distance;
        self.status = Some(status);
    }
}

/// Where and why a module wants the vehicle to stop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StopFactor {
    /// The pose of the base link when stopped.
    pub stop_pose: Pose,
    /// The points that caused the stop.
    pub stop_factor_points: SmallVec<[Point3d; 2]>,
}

/// The stop factors of one kind of stop, collected across every active module.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StopReason {
    pub reason: String,
    pub stop_factors: Vec<StopFactor>,
}

impl StopReason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            stop_factors: vec![],
        }
    }

    /// Adds a stop factor, keeping those of other modules.
    pub fn append(&mut self, factor: StopFactor) {
        self.stop_factors.push(factor);
    }
}
