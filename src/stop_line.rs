use crate::math::{horizontal, midpoint, LineSegment2d, Point3d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A line across the road at which vehicles must stop.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StopLine {
    pub start: Point3d,
    pub end: Point3d,
}

impl StopLine {
    /// Creates a stop line between two points.
    pub const fn new(start: Point3d, end: Point3d) -> Self {
        Self { start, end }
    }

    /// The centre of the stop line.
    pub fn center(&self) -> Point3d {
        midpoint(self.start, self.end)
    }

    /// The stop line in the horizontal plane, lengthened by `length` m at both ends.
    pub fn extended(&self, length: f64) -> LineSegment2d {
        LineSegment2d::from_ends(horizontal(self.start), horizontal(self.end)).extended(length)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn extended_stays_in_horizontal_plane() {
        let line = StopLine::new(Point3d::new(50.0, -2.0, 1.0), Point3d::new(50.0, 2.0, 3.0));
        let center = line.center();
        assert_approx_eq!(center.y, 0.0);
        assert_approx_eq!(center.z, 2.0);

        let extended = line.extended(1.5);
        assert_approx_eq!(extended.start().y, -3.5);
        assert_approx_eq!(extended.end().y, 3.5);
        assert_approx_eq!(extended.end().x, 50.0);
    }
}
