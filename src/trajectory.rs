//! A path of discrete points, parametrised by arc length.

use crate::error::TrajectoryError;
use crate::math::{horizontal, LineSegment2d, Point2d, Point3d, Pose};
use crate::util::Interval;
use cgmath::prelude::*;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// A single point of a planned path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathPoint {
    /// The pose of the vehicle's base link at this point.
    pub pose: Pose,
    /// The target longitudinal velocity in m/s.
    pub longitudinal_velocity_mps: f64,
    /// The target lateral velocity in m/s.
    pub lateral_velocity_mps: f64,
    /// The target heading rate in rad/s.
    pub heading_rate_rps: f64,
    /// The lanes this point belongs to.
    pub lane_ids: SmallVec<[i64; 2]>,
}

impl PathPoint {
    /// Creates a path point on a single lane.
    pub fn new(pose: Pose, longitudinal_velocity_mps: f64, lane_id: i64) -> Self {
        Self {
            pose,
            longitudinal_velocity_mps,
            lateral_velocity_mps: 0.0,
            heading_rate_rps: 0.0,
            lane_ids: smallvec![lane_id],
        }
    }

    fn is_finite(&self) -> bool {
        let p = self.pose.position;
        let q = self.pose.orientation;
        [p.x, p.y, p.z, q.s, q.v.x, q.v.y, q.v.z, self.longitudinal_velocity_mps]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// A path whose points are addressed by their arc length from the first point.
///
/// Arc length is measured in the horizontal plane and strictly increases
/// from one point to the next.
#[derive(Clone, Debug)]
pub struct Trajectory {
    /// The path points, in order.
    points: Vec<PathPoint>,
    /// The arc length of each point in m.
    bases: Vec<f64>,
}

/// A mutable view of the velocities of the points within an arc length range.
pub struct VelocityRange<'a> {
    trajectory: &'a mut Trajectory,
    range: Interval<f64>,
}

impl Trajectory {
    /// Builds a trajectory from a sequence of path points.
    pub fn build(points: &[PathPoint]) -> Result<Self, TrajectoryError> {
        if points.len() < 2 {
            return Err(TrajectoryError::TooFewPoints(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TrajectoryError::NonFinite { index });
        }

        let mut bases = Vec::with_capacity(points.len());
        bases.push(0.0);
        for (index, (a, b)) in points.iter().tuple_windows().enumerate() {
            let step = horizontal(a.pose.position).distance(horizontal(b.pose.position));
            if step <= 0.0 {
                return Err(TrajectoryError::NonMonotonic { index: index + 1 });
            }
            bases.push(bases[index] + step);
        }

        Ok(Self {
            points: points.to_vec(),
            bases,
        })
    }

    /// The total arc length of the trajectory in m.
    pub fn length(&self) -> f64 {
        self.bases[self.bases.len() - 1]
    }

    /// The number of points in the trajectory.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a trajectory has at least two points.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The arc length of each point.
    pub fn bases(&self) -> &[f64] {
        &self.bases
    }

    /// The points of the trajectory, including any modifications.
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Finds the arc length of the point on the trajectory nearest to `position`,
    /// ignoring height. Ties go to the smaller arc length.
    pub fn closest(&self, position: Point3d) -> f64 {
        let position = horizontal(position);
        let mut best_dist = f64::INFINITY;
        let mut best_s = 0.0;
        for (range, segment) in self.segments() {
            let t = segment.project(position);
            let dist = segment.sample(t).distance2(position);
            if dist < best_dist {
                best_dist = dist;
                best_s = range.lerp(t);
            }
        }
        best_s
    }

    /// Finds the smallest arc length at which the trajectory crosses the
    /// segment between `start` and `end`.
    pub fn crossed(&self, start: Point2d, end: Point2d) -> Option<f64> {
        let line = LineSegment2d::from_ends(start, end);
        self.segments()
            .find_map(|(range, segment)| segment.intersect(&line).map(|(t, _)| range.lerp(t)))
    }

    /// Selects the points whose arc length lies within `[from, to]`.
    pub fn velocity_range(&mut self, from: f64, to: f64) -> VelocityRange<'_> {
        VelocityRange {
            trajectory: self,
            range: Interval::new(from, to),
        }
    }

    /// Evaluates the trajectory at an arc length, which is clamped to `[0, length]`.
    ///
    /// Positions and velocities are interpolated linearly and orientations spherically.
    /// Lane IDs are those of the preceding point.
    pub fn compute(&self, s: f64) -> PathPoint {
        let s = Interval::new(0.0, self.length()).clamp(s);
        let idx = self
            .bases
            .partition_point(|base| *base <= s)
            .clamp(1, self.bases.len() - 1);

        let (a, b) = (&self.points[idx - 1], &self.points[idx]);
        let t = Interval::new(self.bases[idx - 1], self.bases[idx]).inv_lerp(s);
        let lerp = |x: f64, y: f64| x + (y - x) * t;

        PathPoint {
            pose: a.pose.interpolate(&b.pose, t),
            longitudinal_velocity_mps: lerp(a.longitudinal_velocity_mps, b.longitudinal_velocity_mps),
            lateral_velocity_mps: lerp(a.lateral_velocity_mps, b.lateral_velocity_mps),
            heading_rate_rps: lerp(a.heading_rate_rps, b.heading_rate_rps),
            lane_ids: a.lane_ids.clone(),
        }
    }

    /// Converts the trajectory back into a sequence of path points.
    pub fn restore(&self) -> Vec<PathPoint> {
        self.points.clone()
    }

    /// Iterates over the segments between consecutive points, with their arc length ranges.
    fn segments(&self) -> impl Iterator<Item = (Interval<f64>, LineSegment2d)> + '_ {
        self.bases
            .iter()
            .zip(&self.points)
            .tuple_windows()
            .map(|((s1, p1), (s2, p2))| {
                let segment = LineSegment2d::from_ends(
                    horizontal(p1.pose.position),
                    horizontal(p2.pose.position),
                );
                (Interval::new(*s1, *s2), segment)
            })
    }
}

impl<'a> VelocityRange<'a> {
    /// Sets the longitudinal velocity of every point in the range.
    pub fn set(self, velocity: f64) {
        let Trajectory { points, bases } = self.trajectory;
        for (point, base) in points.iter_mut().zip(bases.iter()) {
            if self.range.contains(*base) {
                point.longitudinal_velocity_mps = velocity;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};

    fn path(coords: &[(f64, f64)]) -> Vec<PathPoint> {
        coords
            .iter()
            .map(|&(x, y)| PathPoint::new(Pose::from_yaw(Point3d::new(x, y, 0.0), 0.0), 10.0, 7))
            .collect()
    }

    fn straight(n: usize) -> Vec<PathPoint> {
        let coords = (0..n).map(|i| (i as f64, 0.0)).collect::<Vec<_>>();
        path(&coords)
    }

    #[test]
    fn build_rejects_degenerate_paths() {
        assert_eq!(
            Trajectory::build(&[]).unwrap_err(),
            TrajectoryError::TooFewPoints(0)
        );
        assert_eq!(
            Trajectory::build(&straight(1)).unwrap_err(),
            TrajectoryError::TooFewPoints(1)
        );
        assert_eq!(
            Trajectory::build(&path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0)])).unwrap_err(),
            TrajectoryError::NonMonotonic { index: 2 }
        );
        assert_eq!(
            Trajectory::build(&path(&[(0.0, 0.0), (f64::NAN, 0.0)])).unwrap_err(),
            TrajectoryError::NonFinite { index: 1 }
        );
    }

    #[test]
    fn build_rejects_non_finite_orientation() {
        let mut points = straight(4);
        points[2].pose.orientation.v.z = f64::NAN;
        assert_eq!(
            Trajectory::build(&points).unwrap_err(),
            TrajectoryError::NonFinite { index: 2 }
        );
        points[2].pose.orientation.v.z = 0.0;
        points[3].pose.orientation.s = f64::INFINITY;
        assert_eq!(
            Trajectory::build(&points).unwrap_err(),
            TrajectoryError::NonFinite { index: 3 }
        );
    }

    #[test]
    fn bases_are_cumulative_horizontal_distance() {
        let trajectory = Trajectory::build(&path(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)])).unwrap();
        assert_eq!(trajectory.bases(), &[0.0, 5.0, 11.0]);
        assert_eq!(trajectory.length(), 11.0);
        assert_eq!(trajectory.len(), 3);
        assert!(!trajectory.is_empty());
        assert_eq!(trajectory.points().len(), trajectory.bases().len());
    }

    #[test]
    fn closest_projects_onto_segments() {
        let trajectory = Trajectory::build(&straight(11)).unwrap();
        assert_approx_eq!(trajectory.closest(Point3d::new(4.5, 2.0, 9.0)), 4.5);
        assert_approx_eq!(trajectory.closest(Point3d::new(-100.0, 40.0, 0.0)), 0.0);
        assert_approx_eq!(trajectory.closest(Point3d::new(1e6, -1e6, 0.0)), 10.0);
    }

    #[test]
    fn closest_prefers_earliest_on_ties() {
        // A hairpin where the query is equidistant from both legs
        let trajectory =
            Trajectory::build(&path(&[(0.0, 0.0), (10.0, 0.0), (10.0, 2.0), (0.0, 2.0)])).unwrap();
        assert_approx_eq!(trajectory.closest(Point3d::new(5.0, 1.0, 0.0)), 5.0);
    }

    #[test]
    fn closest_is_always_within_bounds() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        let coords = (0..20)
            .map(|i| (i as f64 * 2.0, rng.gen_range(-3.0..3.0)))
            .collect::<Vec<_>>();
        let trajectory = Trajectory::build(&path(&coords)).unwrap();
        for _ in 0..200 {
            let query = Point3d::new(
                rng.gen_range(-1000.0..1000.0),
                rng.gen_range(-1000.0..1000.0),
                0.0,
            );
            let s = trajectory.closest(query);
            assert!(Interval::new(0.0, trajectory.length()).contains(s));
        }
    }

    #[test]
    fn crossed_returns_first_crossing_by_arc_length() {
        // Goes right along y = 0, then comes back along y = 4
        let trajectory =
            Trajectory::build(&path(&[(0.0, 0.0), (10.0, 0.0), (10.0, 4.0), (0.0, 4.0)])).unwrap();
        let s = trajectory
            .crossed(Point2d::new(6.0, -1.0), Point2d::new(6.0, 5.0))
            .unwrap();
        assert_approx_eq!(s, 6.0);

        let s = trajectory
            .crossed(Point2d::new(6.0, 5.0), Point2d::new(6.0, 2.0))
            .unwrap();
        assert_approx_eq!(s, 18.0);

        assert!(trajectory
            .crossed(Point2d::new(20.0, -1.0), Point2d::new(20.0, 5.0))
            .is_none());
    }

    #[test]
    fn velocity_range_is_inclusive_and_idempotent() {
        let mut trajectory = Trajectory::build(&straight(11)).unwrap();
        let length = trajectory.length();
        trajectory.velocity_range(4.0, length).set(0.0);
        let once = trajectory.restore();
        assert_eq!(trajectory.points(), once.as_slice());
        trajectory.velocity_range(4.0, length).set(0.0);
        assert_eq!(trajectory.restore(), once);

        let velocities = once
            .iter()
            .map(|p| p.longitudinal_velocity_mps)
            .collect::<Vec<_>>();
        assert_eq!(&velocities[..4], &[10.0; 4]);
        assert_eq!(&velocities[4..], &[0.0; 7]);
    }

    #[test]
    fn restore_without_changes_is_identity() {
        let points = path(&[(0.0, 0.0), (0.5, 0.25), (1.7, 0.1), (3.0, -2.0)]);
        let trajectory = Trajectory::build(&points).unwrap();
        assert_eq!(trajectory.restore(), points);
    }

    #[test]
    fn compute_interpolates_and_clamps() {
        let mut points = straight(3);
        points[1].longitudinal_velocity_mps = 0.0;
        points[2].lane_ids = smallvec![8];
        let trajectory = Trajectory::build(&points).unwrap();

        let mid = trajectory.compute(0.25);
        assert_approx_eq!(mid.pose.position.x, 0.25);
        assert_approx_eq!(mid.longitudinal_velocity_mps, 7.5);
        assert_eq!(mid.lane_ids.as_slice(), &[7]);

        assert_approx_eq!(trajectory.compute(-3.0).pose.position.x, 0.0);
        let end = trajectory.compute(99.0);
        assert_approx_eq!(end.pose.position.x, 2.0);
        assert_eq!(end.lane_ids.as_slice(), &[7]);
    }
}
