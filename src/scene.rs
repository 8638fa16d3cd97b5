use crate::debug::DebugData;
use crate::factor::{PlanningBehavior, StopFactor, StopReason, VelocityFactor, VelocityFactorStatus};
use crate::math::Pose;
use crate::param::PlannerParam;
use crate::stop_line::StopLine;
use crate::trajectory::{PathPoint, Trajectory};
use log::{debug, info, warn};
use smallvec::smallvec;
use std::borrow::Cow;

pub use state::{State, StateKind};

mod state;

/// The state of the vehicle and planner for one planning cycle.
#[derive(Clone, Copy, Debug)]
pub struct PlannerContext {
    /// The pose of the vehicle's base link.
    pub current_pose: Pose,
    /// Whether the vehicle is stationary.
    pub is_vehicle_stopped: bool,
    /// The distance from the base link to the front of the vehicle, in m.
    pub front_overhang: f64,
    /// The current time in s.
    pub now: f64,
}

/// Stops the vehicle at a stop line, holds it there, then lets it go.
///
/// A module handles a single stop line, and once it has released the
/// vehicle it has no further effect.
#[derive(Clone, Debug)]
pub struct StopLineModule {
    /// The module ID.
    module_id: i64,
    /// The stop line.
    stop_line: StopLine,
    /// The module parameters.
    param: PlannerParam,
    /// The current state.
    state: State,
    /// The latest velocity factor report.
    velocity_factor: VelocityFactor,
    /// Debugging information from the latest planning cycle.
    debug_data: DebugData,
}

impl StopLineModule {
    /// Creates a new module for the given stop line.
    pub fn new(module_id: i64, stop_line: StopLine, param: PlannerParam) -> Self {
        Self {
            module_id,
            stop_line,
            param,
            state: State::Approach,
            velocity_factor: VelocityFactor::new(PlanningBehavior::StopSign),
            debug_data: DebugData::default(),
        }
    }

    /// Gets the module's ID.
    pub fn module_id(&self) -> i64 {
        self.module_id
    }

    /// Gets the stop line.
    pub fn stop_line(&self) -> &StopLine {
        &self.stop_line
    }

    /// Gets the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Gets the latest velocity factor report.
    ///
    /// No report is made once the vehicle has been released, so from then on
    /// this is the last report made while it was held, with status `Stopped`.
    pub fn velocity_factor(&self) -> &VelocityFactor {
        &self.velocity_factor
    }

    /// Gets debugging information from the latest planning cycle.
    pub fn debug_data(&self) -> &DebugData {
        &self.debug_data
    }

    /// Runs one planning cycle.
    ///
    /// Returns the path with its velocity set to zero from the stop point to
    /// the end, or the path untouched if the module has nothing to do.
    /// A stop factor is appended to `stop_reason` whenever the path is modified.
    ///
    /// The stop point is found using the state from before this cycle's
    /// transition, so a transition only takes effect from the next cycle.
    pub fn modify_path_velocity<'a>(
        &mut self,
        path: &'a [PathPoint],
        ctx: &PlannerContext,
        stop_reason: &mut StopReason,
    ) -> Cow<'a, [PathPoint]> {
        let mut trajectory = match Trajectory::build(path) {
            Ok(trajectory) => trajectory,
            Err(err) => {
                debug!("[stop_line {}] ignoring path: {}", self.module_id, err);
                return Cow::Borrowed(path);
            }
        };

        let (ego_s, stop_s) = match self.resolve(&trajectory, ctx) {
            (ego_s, Some(stop_s)) => (ego_s, stop_s),
            (_, None) => return Cow::Borrowed(path),
        };

        let length = trajectory.length();
        trajectory.velocity_range(stop_s, length).set(0.0);

        let distance_to_stop = stop_s - ego_s;
        self.update_velocity_factor(distance_to_stop);
        self.update_state(ctx, distance_to_stop);

        let stop_pose = trajectory.compute(stop_s).pose;
        self.update_stop_reason(stop_reason, stop_pose);
        self.update_debug_data(ctx, stop_pose);

        Cow::Owned(trajectory.restore())
    }

    /// Finds the arc length of the vehicle along the trajectory, and of
    /// the point at which it must stop, if it must stop.
    pub fn resolve(&self, trajectory: &Trajectory, ctx: &PlannerContext) -> (f64, Option<f64>) {
        let ego_s = trajectory.closest(ctx.current_pose.position);

        let stop_s = match self.state {
            State::Approach => {
                let line = self.stop_line.extended(self.param.stop_line_extend_length);
                trajectory
                    .crossed(line.start(), line.end())
                    .map(|s| s - (ctx.front_overhang + self.param.stop_margin))
                    .filter(|s| *s >= 0.0)
            }
            State::Stopped { .. } => Some(ego_s),
            State::Start => None,
        };

        (ego_s, stop_s)
    }

    fn update_velocity_factor(&mut self, distance_to_stop: f64) {
        match self.state {
            State::Approach => self
                .velocity_factor
                .set(distance_to_stop, VelocityFactorStatus::Approaching),
            State::Stopped { .. } => self
                .velocity_factor
                .set(distance_to_stop, VelocityFactorStatus::Stopped),
            State::Start => {}
        }
    }

    fn update_state(&mut self, ctx: &PlannerContext, distance_to_stop: f64) {
        let next = self
            .state
            .next(&self.param, ctx.now, distance_to_stop, ctx.is_vehicle_stopped);
        if let Some(next) = next {
            info!(
                "[stop_line {}] {} -> {}",
                self.module_id,
                self.state.kind(),
                next.kind()
            );
            if next.kind() == StateKind::Stopped && distance_to_stop < 0.0 {
                warn!(
                    "[stop_line {}] Vehicle cannot stop before stop line ({:.2} m past)",
                    self.module_id, -distance_to_stop
                );
            }
            self.state = next;
        }
    }

    fn update_stop_reason(&self, stop_reason: &mut StopReason, stop_pose: Pose) {
        stop_reason.append(StopFactor {
            stop_pose,
            stop_factor_points: smallvec![self.stop_line.center()],
        });
    }

    fn update_debug_data(&mut self, ctx: &PlannerContext, stop_pose: Pose) {
        self.debug_data.base_link2front = ctx.front_overhang;
        self.debug_data.stop_pose = match self.state {
            State::Approach | State::Stopped { .. } => Some(stop_pose),
            State::Start => None,
        };
    }
}
