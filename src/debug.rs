use crate::math::Pose;
#[cfg(feature = "debug")]
use serde_json::json;

/// Debugging information from the most recent planning cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebugData {
    /// The distance from the base link to the front of the vehicle, in m.
    pub base_link2front: f64,
    /// The pose at which the base link will stop, if the module is holding the vehicle.
    pub stop_pose: Option<Pose>,
}

impl DebugData {
    /// The pose of the front of the vehicle when it has stopped, where a
    /// virtual wall is drawn.
    pub fn virtual_wall(&self) -> Option<Pose> {
        self.stop_pose.map(|pose| pose.forward(self.base_link2front))
    }

    /// Renders the debug data as visualisation markers.
    #[cfg(feature = "debug")]
    pub fn to_json(&self) -> serde_json::Value {
        let markers = self
            .virtual_wall()
            .map(|wall| {
                let p = wall.position;
                vec![json!({
                    "type": "virtual_wall",
                    "name": "stop_line",
                    "pos": [p.x, p.y, p.z],
                    "yaw": wall.yaw(),
                })]
            })
            .unwrap_or_default();
        json!({
            "base_link2front": self.base_link2front,
            "markers": markers,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point3d;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn virtual_wall_is_at_vehicle_front() {
        let debug = DebugData {
            base_link2front: 4.0,
            stop_pose: Some(Pose::from_yaw(Point3d::new(47.0, 0.0, 0.0), 0.0)),
        };
        assert_approx_eq!(debug.virtual_wall().unwrap().position.x, 51.0);
        assert_eq!(DebugData::default().virtual_wall(), None);
    }

    #[cfg(feature = "debug")]
    #[test]
    fn json_has_one_marker_per_wall() {
        let debug = DebugData {
            base_link2front: 1.0,
            stop_pose: Some(Pose::from_yaw(Point3d::new(2.0, 0.0, 0.0), 0.0)),
        };
        assert_eq!(debug.to_json()["markers"].as_array().unwrap().len(), 1);
        assert!(DebugData::default().to_json()["markers"]
            .as_array()
            .unwrap()
            .is_empty());
    }
}
