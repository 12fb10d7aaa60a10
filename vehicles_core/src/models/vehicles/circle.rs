// vehicles_core/src/models/vehicles/circle.rs

use super::require_positive;
use crate::commands::CommandSpec;
use crate::error::DynamicsError;
use crate::manifold::So2;
use crate::models::dynamics::{ForceLaw, VelocityLaw};
use crate::types::Commands;
use nalgebra::Vector1;

/// A particle on SO(2) controlled in angular velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleVelocity {
    max_velocity: f64,
}

impl CircleVelocity {
    pub const NAME: &'static str = "CircleVelocity";

    pub fn new(max_velocity: f64) -> Result<Self, DynamicsError> {
        Ok(Self {
            max_velocity: require_positive(Self::NAME, "max_velocity", max_velocity)?,
        })
    }
}

impl VelocityLaw for CircleVelocity {
    type Group = So2;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous("Particle on SO(2) controlled in velocity", ["omega"])
            .with_parameter("max_velocity", &[self.max_velocity])
    }

    fn compute_velocities(&self, commands: &Commands) -> Vector1<f64> {
        Vector1::new(self.max_velocity * commands[0])
    }
}

/// A particle on SO(2) controlled in torque.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleForce {
    max_force: f64,
}

impl CircleForce {
    pub const NAME: &'static str = "CircleForce";

    pub fn new(max_force: f64) -> Result<Self, DynamicsError> {
        Ok(Self {
            max_force: require_positive(Self::NAME, "max_force", max_force)?,
        })
    }
}

impl ForceLaw for CircleForce {
    type Group = So2;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous("Particle on SO(2) controlled in force", ["torque"])
            .with_parameter("max_force", &[self.max_force])
    }

    fn compute_forces(&self, commands: &Commands) -> Vector1<f64> {
        Vector1::new(self.max_force * commands[0])
    }
}
