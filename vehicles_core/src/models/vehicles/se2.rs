// vehicles_core/src/models/vehicles/se2.rs

use super::{require_all_positive, require_positive};
use crate::commands::CommandSpec;
use crate::error::DynamicsError;
use crate::manifold::Se2;
use crate::models::dynamics::VelocityLaw;
use crate::types::Commands;
use nalgebra::{Vector2, Vector3};

/// A planar body commanded directly in body-frame velocity `[vx, vy, ω]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Se2Velocity {
    max_linear_velocity: Vector2<f64>,
    max_angular_velocity: f64,
}

impl Se2Velocity {
    pub const NAME: &'static str = "Se2Velocity";

    pub fn new(
        max_linear_velocity: [f64; 2],
        max_angular_velocity: f64,
    ) -> Result<Self, DynamicsError> {
        let max_linear_velocity =
            require_all_positive(Self::NAME, "max_linear_velocity", max_linear_velocity)?;
        let max_angular_velocity =
            require_positive(Self::NAME, "max_angular_velocity", max_angular_velocity)?;
        Ok(Self {
            max_linear_velocity,
            max_angular_velocity,
        })
    }
}

impl VelocityLaw for Se2Velocity {
    type Group = Se2;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous("Planar body controlled in velocity", ["vx", "vy", "omega"])
            .with_parameter("max_linear_velocity", self.max_linear_velocity.as_slice())
            .with_parameter("max_angular_velocity", &[self.max_angular_velocity])
    }

    fn compute_velocities(&self, commands: &Commands) -> Vector3<f64> {
        let linear = Vector2::new(
            commands[0] * self.max_linear_velocity.x,
            commands[1] * self.max_linear_velocity.y,
        );
        Se2::algebra_from_linear_angular(linear, commands[2] * self.max_angular_velocity)
    }
}

/// A "kinematic fly": constant forward speed, only the turn rate is commanded.
#[derive(Debug, Clone, PartialEq)]
pub struct Se2Forward {
    linear_velocity: f64,
    max_angular_velocity: f64,
}

impl Se2Forward {
    pub const NAME: &'static str = "Se2Forward";

    pub fn new(linear_velocity: f64, max_angular_velocity: f64) -> Result<Self, DynamicsError> {
        let linear_velocity = require_positive(Self::NAME, "linear_velocity", linear_velocity)?;
        let max_angular_velocity =
            require_positive(Self::NAME, "max_angular_velocity", max_angular_velocity)?;
        Ok(Self {
            linear_velocity,
            max_angular_velocity,
        })
    }
}

impl VelocityLaw for Se2Forward {
    type Group = Se2;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous("Kinematic fly: fixed forward speed", ["angular velocity"])
            .with_parameter("linear_velocity", &[self.linear_velocity])
            .with_parameter("max_angular_velocity", &[self.max_angular_velocity])
    }

    fn compute_velocities(&self, commands: &Commands) -> Vector3<f64> {
        Se2::algebra_from_linear_angular(
            Vector2::new(self.linear_velocity, 0.0),
            commands[0] * self.max_angular_velocity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifold::LieGroup;
    use crate::models::dynamics::{Dynamics, LieState, NoiseModel, SimpleKinematics};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_se2_velocity_scales_each_axis() {
        let law = Se2Velocity::new([2.0, 0.5], 3.0).unwrap();
        assert_abs_diff_eq!(
            law.compute_velocities(&Commands::from_vec(vec![0.5, -1.0, 1.0])),
            Vector3::new(1.0, -0.5, 3.0)
        );
        assert!(Se2Velocity::new([1.0, 0.0], 1.0).is_err());
        assert!(Se2Velocity::new([1.0, 1.0], -1.0).is_err());
    }

    #[test]
    fn test_forward_flyer_never_stops() {
        let model = SimpleKinematics::new(Se2Forward::new(2.0, 1.0).unwrap()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let state = LieState::<Se2>::at_rest(Se2::from_xy_theta(0.0, 0.0, FRAC_PI_2));

        let rest = Commands::zeros(1);
        let next = model.integrate(&state, &rest, 0.5, &mut rng).unwrap();
        let ahead = Vector2::new(0.0, 1.0);
        assert_abs_diff_eq!(next.pose.translation.vector, ahead, epsilon = 1e-12);
        assert_abs_diff_eq!(next.velocity, Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_forward_flyer_accepts_noise() {
        let noise = NoiseModel::from_slices(&[0.0, 0.0, 0.01], &[0.1, 0.0, 0.0]);
        let law = Se2Forward::new(1.0, 1.0).unwrap();
        let model = SimpleKinematics::with_noise(law, noise).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let state = LieState::<Se2>::at_rest(Se2::identity());

        let rest = Commands::zeros(1);
        let next = model.integrate(&state, &rest, 0.1, &mut rng).unwrap();
        assert_ne!(next.velocity.x, 1.0);
        assert_eq!(next.velocity.y, 0.0);
        assert_ne!(next.velocity.z, 0.0);
    }
}
