pub use cgmath;
pub use debug::DebugData;
pub use error::{ParamError, TrajectoryError};
pub use factor::{
    PlanningBehavior, StopFactor, StopReason, VelocityFactor, VelocityFactorStatus,
};
pub use param::PlannerParam;
pub use scene::{PlannerContext, State, StateKind, StopLineModule};
pub use stop_line::StopLine;
pub use trajectory::{PathPoint, Trajectory, VelocityRange};
pub use util::Interval;

mod debug;
mod error;
mod factor;
pub mod math;
mod param;
mod scene;
mod stop_line;
mod trajectory;
mod util;
