use stop_line::math::{Point3d, Pose};
use stop_line::{PathPoint, PlannerContext, PlannerParam, StopLine, StopLineModule, StopReason};

/// The planning cycle period in s.
const CYCLE_SEC: f64 = 0.1;

/// The cruising speed of the simulated vehicle in m/s.
const CRUISE_SPEED: f64 = 8.0;

/// The deceleration of the simulated vehicle in m/s^2.
const DECELERATION: f64 = 3.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let param = match std::env::args().nth(1) {
        Some(json) => match PlannerParam::from_json(&json) {
            Ok(param) => param,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => PlannerParam::default(),
    };

    let line = StopLine::new(Point3d::new(60.0, -3.0, 0.0), Point3d::new(60.0, 3.0, 0.0));
    let mut module = StopLineModule::new(1, line, param);
    let path = (0..=120)
        .map(|i| {
            let pose = Pose::from_yaw(Point3d::new(i as f64, 0.0, 0.0), 0.0);
            PathPoint::new(pose, CRUISE_SPEED, 1)
        })
        .collect::<Vec<_>>();

    let (mut pos, mut vel) = (0.0, CRUISE_SPEED);
    for frame in 0..600 {
        let ctx = PlannerContext {
            current_pose: Pose::from_yaw(Point3d::new(pos, 0.0, 0.0), 0.0),
            is_vehicle_stopped: vel < 0.01,
            front_overhang: 3.8,
            now: frame as f64 * CYCLE_SEC,
        };
        let mut reason = StopReason::new("StopLine");
        let out = module.modify_path_velocity(&path, &ctx, &mut reason);

        // Brake towards the first zero-velocity point ahead, otherwise cruise
        let stop = out
            .iter()
            .find(|p| p.pose.position.x >= pos && p.longitudinal_velocity_mps == 0.0)
            .map(|p| p.pose.position.x);
        let target = match stop {
            Some(x) if (x - pos) <= vel.powi(2) / (2.0 * DECELERATION) + 0.5 => 0.0,
            _ => CRUISE_SPEED,
        };
        vel = if target < vel {
            f64::max(vel - DECELERATION * CYCLE_SEC, 0.0)
        } else {
            target
        };
        pos += vel * CYCLE_SEC;

        if frame % 10 == 0 {
            println!(
                "t = {:5.1} s  pos = {:6.2} m  vel = {:5.2} m/s  state = {}",
                ctx.now,
                pos,
                vel,
                module.state().kind()
            );
        }
        if pos >= 115.0 {
            break;
        }
    }
}
