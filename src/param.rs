//! Tunable parameters of the stop line module.

use crate::error::ParamError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The parameters of a [StopLineModule](crate::StopLineModule), fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerParam {
    /// Extra distance to keep between the vehicle's front and the stop line, in m.
    pub stop_margin: f64,
    /// The vehicle counts as stopped at the line if it halts within this distance
    /// of the stop point, in m.
    pub hold_stop_margin_distance: f64,
    /// How long to hold the vehicle at the line, in s.
    pub stop_duration_sec: f64,
    /// How far the stop line is lengthened at both ends before it is
    /// intersected with the path, in m.
    pub stop_line_extend_length: f64,
}

impl Default for PlannerParam {
    fn default() -> Self {
        Self {
            stop_margin: 0.0,
            hold_stop_margin_distance: 2.0,
            stop_duration_sec: 1.0,
            stop_line_extend_length: 5.0,
        }
    }
}

impl PlannerParam {
    /// Parses and validates parameters from JSON. Missing fields take their default values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ParamError> {
        let param: Self = serde_json::from_str(json)?;
        param.validate()?;
        Ok(param)
    }

    /// Checks that every parameter is finite and non-negative.
    pub fn validate(&self) -> Result<(), ParamError> {
        let fields = [
            ("stop_margin", self.stop_margin),
            ("hold_stop_margin_distance", self.hold_stop_margin_distance),
            ("stop_duration_sec", self.stop_duration_sec),
            ("stop_line_extend_length", self.stop_line_extend_length),
        ];
        match fields.iter().find(|(_, value)| !(value.is_finite() && *value >= 0.0)) {
            Some(&(name, value)) => Err(ParamError::OutOfRange { name, value }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_use_defaults() {
        let param = PlannerParam::from_json(r#"{ "stop_margin": 2.0, "stop_duration_sec": 3.5 }"#)
            .unwrap();
        assert_eq!(param.stop_margin, 2.0);
        assert_eq!(param.stop_duration_sec, 3.5);
        assert_eq!(param.hold_stop_margin_distance, 2.0);
        assert_eq!(param.stop_line_extend_length, 5.0);
    }

    #[test]
    fn negative_and_non_finite_values_are_rejected() {
        let param = PlannerParam {
            hold_stop_margin_distance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            param.validate(),
            Err(ParamError::OutOfRange {
                name: "hold_stop_margin_distance",
                ..
            })
        ));
        let param = PlannerParam {
            stop_duration_sec: f64::NAN,
            ..Default::default()
        };
        assert!(param.validate().is_err());
        assert!(PlannerParam::default().validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn malformed_json_is_rejected() {
        let err = PlannerParam::from_json(r#"{ "stop_margin": "far" }"#).unwrap_err();
        assert!(matches!(err, ParamError::Parse(_)));
    }
}
