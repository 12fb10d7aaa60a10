// vehicles_core/src/models/vehicles/steered_car.rs

use super::{require_positive, CarLaw};
use crate::commands::CommandSpec;
use crate::error::{DynamicsError, StepError};
use crate::manifold::{twist_in_frame, Se2};
use crate::models::dynamics::{
    unsupported_joint, CompositeState, Dynamics, LieState, SimpleKinematics,
};
use crate::types::{Commands, JointState, StateRecord, StateSpace};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use rand::RngCore;
use tracing::debug;

/// The steering angle of the front axle, in radians. Positive turns left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringState {
    pub angle: f64,
}

pub type SteeredCarState = CompositeState<LieState<Se2>, SteeringState>;

/// A car whose steering angle is a state variable instead of a command.
///
/// The steering command sets a target angle; the wheels turn toward it at a bounded
/// rate. The wrapped car model is then integrated with the actual angle. Besides the
/// body (joint 0, rear-axle centre) the car exposes its four wheels:
///
/// | joint | wheel | offset in the body frame |
/// |---|---|---|
/// | 1 | front left | `(L, +w/2, 0)`, yawed by the steering angle |
/// | 2 | front right | `(L, -w/2, 0)`, yawed by the steering angle |
/// | 3 | rear left | `(0, +w/2, 0)` |
/// | 4 | rear right | `(0, -w/2, 0)` |
#[derive(Debug, Clone)]
pub struct SteeredCar {
    base: SimpleKinematics<CarLaw>,
    name: String,
    commands_spec: CommandSpec,
    max_steering_rate: f64,
    track_width: f64,
}

impl SteeredCar {
    pub const NUM_JOINTS: usize = 5;

    pub fn new(
        base: SimpleKinematics<CarLaw>,
        max_steering_rate: f64,
        track_width: f64,
    ) -> Result<Self, DynamicsError> {
        let name = format!("Steered{}", base.name());
        let max_steering_rate = require_positive(&name, "max_steering_rate", max_steering_rate)?;
        let track_width = require_positive(&name, "track_width", track_width)?;

        let mut commands_spec = base
            .get_commands_spec()
            .clone()
            .with_parameter("max_steering_rate", &[max_steering_rate])
            .with_parameter("track_width", &[track_width]);
        commands_spec.desc = "Car with rate-limited front-wheel steering".to_string();
        commands_spec.validate(&name)?;

        debug!(model = %name, max_steering_rate, track_width, "Built steered car.");

        Ok(Self {
            base,
            name,
            commands_spec,
            max_steering_rate,
            track_width,
        })
    }

    pub fn base(&self) -> &SimpleKinematics<CarLaw> {
        &self.base
    }

    fn max_steering_angle(&self) -> f64 {
        self.base.law().max_steering_angle()
    }

    /// Moves `angle` toward the commanded target by at most `max_steering_rate · dt`.
    pub fn steering_update(&self, angle: f64, command: f64, dt: f64) -> f64 {
        let max_angle = self.max_steering_angle();
        let target = command.clamp(-1.0, 1.0) * max_angle;
        let max_change = self.max_steering_rate * dt;
        (angle + (target - angle).clamp(-max_change, max_change)).clamp(-max_angle, max_angle)
    }

    /// Fixed transform from the body frame to a wheel joint.
    fn joint_offset(&self, joint: usize, steering: f64) -> Option<Isometry3<f64>> {
        let wheelbase = self.base.law().wheelbase();
        let half_track = 0.5 * self.track_width;
        let (x, y, yaw) = match joint {
            1 => (wheelbase, half_track, steering),
            2 => (wheelbase, -half_track, steering),
            3 => (0.0, half_track, 0.0),
            4 => (0.0, -half_track, 0.0),
            _ => return None,
        };
        Some(Isometry3::from_parts(
            Translation3::new(x, y, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw),
        ))
    }
}

impl Dynamics for SteeredCar {
    type State = SteeredCarState;

    fn name(&self) -> &str {
        &self.name
    }

    fn get_state_space(&self) -> StateSpace {
        StateSpace::Extended {
            base: Box::new(self.base.get_state_space()),
            extra: vec!["steering_angle".to_string()],
        }
    }

    fn get_commands_spec(&self) -> &CommandSpec {
        &self.commands_spec
    }

    fn pose_to_state(&self, pose: &Isometry3<f64>) -> Self::State {
        CompositeState::new(self.base.pose_to_state(pose), SteeringState::default())
    }

    fn joint_state(&self, state: &Self::State, joint: usize) -> Result<JointState, DynamicsError> {
        if joint == 0 {
            return self.base.joint_state(&state.base, 0);
        }
        let offset = self
            .joint_offset(joint, state.extra.angle)
            .ok_or_else(|| unsupported_joint(self.name(), joint, self.num_joints()))?;
        let body = state.base.embed();
        Ok(JointState {
            pose: body.pose * offset,
            velocity: twist_in_frame(&offset, &body.velocity),
        })
    }

    fn num_joints(&self) -> usize {
        Self::NUM_JOINTS
    }

    fn step(
        &self,
        state: &Self::State,
        commands: &Commands,
        dt: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Self::State, StepError> {
        let angle = self.steering_update(state.extra.angle, commands[1], dt);
        let effective = Commands::from_vec(vec![commands[0], angle / self.max_steering_angle()]);
        let base = self.base.step(&state.base, &effective, dt, rng)?;
        Ok(CompositeState::new(base, SteeringState { angle }))
    }

    fn state_to_record(&self, state: &Self::State) -> Result<StateRecord, DynamicsError> {
        let mut record = state.base.to_record(self.name());
        record.extra = vec![state.extra.angle];
        Ok(record)
    }

    fn state_from_record(&self, record: &StateRecord) -> Result<Self::State, DynamicsError> {
        let base = LieState::from_record(self.name(), record)?;
        let angle = match record.extra.as_slice() {
            [angle] if angle.is_finite() && angle.abs() <= self.max_steering_angle() => *angle,
            other => {
                return Err(DynamicsError::InvalidState {
                    model: self.name.clone(),
                    reason: format!("expected one steering angle within limits, got {other:?}"),
                })
            }
        };
        Ok(CompositeState::new(base, SteeringState { angle }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::FRAC_PI_2;

    fn car() -> SteeredCar {
        let law = CarLaw::simple(2.0, 0.5, 2.5).unwrap();
        SteeredCar::new(SimpleKinematics::new(law).unwrap(), 1.0, 1.5).unwrap()
    }

    #[test]
    fn test_steering_is_rate_limited() {
        let car = car();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut state = car.pose_to_state(&Isometry3::identity());
        let commands = Commands::from_vec(vec![0.0, 1.0]);

        state = car.integrate(&state, &commands, 0.1, &mut rng).unwrap();
        assert_abs_diff_eq!(state.extra.angle, 0.1, epsilon = 1e-12);

        for _ in 0..10 {
            state = car.integrate(&state, &commands, 0.1, &mut rng).unwrap();
        }
        assert_abs_diff_eq!(state.extra.angle, 0.5, epsilon = 1e-12);

        // Standing still, the body did not move while the wheels turned.
        assert_abs_diff_eq!(state.base.pose.translation.vector, Vector2::zeros());
    }

    #[test]
    fn test_straight_drive_uses_actual_angle() {
        let car = car();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let state = car.pose_to_state(&Isometry3::identity());

        // Full steering requested, but the wheels are still straight after a zero step.
        let next = car
            .integrate(&state, &Commands::from_vec(vec![1.0, 1.0]), 0.0, &mut rng)
            .unwrap();
        assert_abs_diff_eq!(next.extra.angle, 0.0);
        assert_abs_diff_eq!(next.base.velocity, Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_wheel_joints_geometry() {
        let car = car();
        let mut state = car.pose_to_state(&Isometry3::rotation(Vector3::new(0.0, 0.0, FRAC_PI_2)));
        state.extra.angle = 0.3;

        assert_eq!(car.num_joints(), 5);

        // Body yawed by 90 degrees: body +x is world +y, body +y is world -x.
        let front_left = car.joint_state(&state, 1).unwrap();
        assert_abs_diff_eq!(
            front_left.pose.translation.vector,
            Vector3::new(-0.75, 2.5, 0.0),
            epsilon = 1e-12
        );
        let yaw = front_left.pose.rotation.scaled_axis().z;
        assert_abs_diff_eq!(yaw, FRAC_PI_2 + 0.3, epsilon = 1e-12);

        let rear_right = car.joint_state(&state, 4).unwrap();
        assert_abs_diff_eq!(
            rear_right.pose.translation.vector,
            Vector3::new(0.75, 0.0, 0.0),
            epsilon = 1e-12
        );

        assert!(matches!(
            car.joint_state(&state, 5),
            Err(DynamicsError::UnsupportedJoint {
                joint: 5,
                num_joints: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_wheel_velocity_includes_lever_arm() {
        let car = car();
        let mut state = car.pose_to_state(&Isometry3::identity());
        state.base.velocity = Vector3::new(1.0, 0.0, 2.0);

        // Rear-left wheel at (0, 0.75): v + ω × p = (1 - 2 · 0.75, 0, 0).
        let rear_left = car.joint_state(&state, 3).unwrap();
        assert_abs_diff_eq!(
            rear_left.velocity,
            nalgebra::Vector6::new(-0.5, 0.0, 0.0, 0.0, 0.0, 2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_record_keeps_steering_angle() {
        let car = car();
        let mut state = car.pose_to_state(&Isometry3::translation(1.0, 2.0, 0.0));
        state.extra.angle = -0.2;

        let record = car.state_to_record(&state).unwrap();
        assert_eq!(record.model, "SteeredSimpleCar");
        assert_eq!(record.extra, vec![-0.2]);

        let back = car.state_from_record(&record).unwrap();
        assert_abs_diff_eq!(back.extra.angle, -0.2);
        assert_abs_diff_eq!(
            back.base.pose.translation.vector,
            Vector2::new(1.0, 2.0),
            epsilon = 1e-12
        );

        let mut bad = record.clone();
        bad.extra = vec![];
        assert!(matches!(
            car.state_from_record(&bad),
            Err(DynamicsError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_state_space_has_the_extra_variable() {
        let car = car();
        assert_eq!(car.get_state_space().dimension(), 7);
        assert_eq!(car.get_commands_spec().dimension(), 2);
        assert_eq!(car.get_commands_spec().parameters["track_width"], vec![1.5]);
    }

    #[test]
    fn test_base_is_the_wrapped_car() {
        let car = car();
        assert_eq!(car.base().name(), "SimpleCar");
        assert_abs_diff_eq!(car.base().law().wheelbase(), 2.5);
        assert_abs_diff_eq!(car.base().law().max_steering_angle(), 0.5);
        // The wrapped car keeps its own single body joint.
        assert_eq!(car.base().num_joints(), 1);
    }
}
