use crate::param::PlannerParam;
use std::fmt;

/// The state of a [StopLineModule](crate::StopLineModule).
///
/// A module starts in `Approach`, moves to `Stopped` once the vehicle halts
/// near the stop point, and to `Start` once it has been held long enough.
/// `Start` is final.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum State {
    /// The vehicle is driving towards the stop line.
    Approach,
    /// The vehicle is being held at the stop line.
    Stopped {
        /// The time at which the vehicle was first held, in s.
        since: f64,
    },
    /// The vehicle has been released.
    Start,
}

/// A [State] without its data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateKind {
    Approach,
    Stopped,
    Start,
}

impl State {
    /// The kind of state.
    pub fn kind(&self) -> StateKind {
        match self {
            State::Approach => StateKind::Approach,
            State::Stopped { .. } => StateKind::Stopped,
            State::Start => StateKind::Start,
        }
    }

    /// The time at which the vehicle was first held, present only while `Stopped`.
    pub fn stopped_time(&self) -> Option<f64> {
        match self {
            State::Stopped { since } => Some(*since),
            State::Approach | State::Start => None,
        }
    }

    /// Determines the state to move to, if any.
    ///
    /// # Parameters
    /// * `param` - The module parameters
    /// * `now` - The current time in s
    /// * `distance_to_stop` - The distance from the vehicle to the stop point in m
    /// * `is_vehicle_stopped` - Whether the vehicle is stationary
    pub fn next(
        &self,
        param: &PlannerParam,
        now: f64,
        distance_to_stop: f64,
        is_vehicle_stopped: bool,
    ) -> Option<State> {
        match *self {
            State::Approach => (distance_to_stop < param.hold_stop_margin_distance
                && is_vehicle_stopped)
                .then_some(State::Stopped { since: now }),
            State::Stopped { since } => (now - since > param.stop_duration_sec).then_some(State::Start),
            State::Start => None,
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateKind::Approach => "APPROACH",
            StateKind::Stopped => "STOPPED",
            StateKind::Start => "START",
        };
        f.write_str(name)
    }
}
