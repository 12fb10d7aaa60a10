// vehicles_core/src/models/vehicles/differential_drive.rs

use super::require_positive;
use crate::commands::CommandSpec;
use crate::error::DynamicsError;
use crate::manifold::Se2;
use crate::models::dynamics::VelocityLaw;
use crate::types::Commands;
use nalgebra::{Vector2, Vector3};

/// Two independently driven wheels on a common axle, commanded in wheel speed.
///
/// For left/right commands `l, r` and maximum wheel speed `m`, the body moves at
/// `v = m (l + r) / 2` and turns at `ω = m (r - l) / b`, `b` being the wheel separation.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialDrive {
    max_wheel_velocity: f64,
    wheel_separation: f64,
}

impl DifferentialDrive {
    pub const NAME: &'static str = "DifferentialDrive";

    pub fn new(max_wheel_velocity: f64, wheel_separation: f64) -> Result<Self, DynamicsError> {
        let max_wheel_velocity =
            require_positive(Self::NAME, "max_wheel_velocity", max_wheel_velocity)?;
        let wheel_separation = require_positive(Self::NAME, "wheel_separation", wheel_separation)?;
        Ok(Self {
            max_wheel_velocity,
            wheel_separation,
        })
    }

    pub fn wheel_separation(&self) -> f64 {
        self.wheel_separation
    }
}

impl VelocityLaw for DifferentialDrive {
    type Group = Se2;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous("Differential drive robot", ["left", "right"])
            .with_parameter("max_wheel_velocity", &[self.max_wheel_velocity])
            .with_parameter("wheel_separation", &[self.wheel_separation])
    }

    fn compute_velocities(&self, commands: &Commands) -> Vector3<f64> {
        let left = commands[0] * self.max_wheel_velocity;
        let right = commands[1] * self.max_wheel_velocity;
        Se2::algebra_from_linear_angular(
            Vector2::new(0.5 * (left + right), 0.0),
            (right - left) / self.wheel_separation,
        )
    }
}
