// vehicles_core/src/models/vehicles/so3.rs

use super::{require_all_positive, scaled};
use crate::commands::CommandSpec;
use crate::error::DynamicsError;
use crate::manifold::So3;
use crate::models::dynamics::{ForceLaw, VelocityLaw};
use crate::types::Commands;
use nalgebra::Vector3;

/// A body free to rotate about its centre, controlled in body angular velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct So3Velocity {
    max_angular_velocity: Vector3<f64>,
}

impl So3Velocity {
    pub const NAME: &'static str = "So3Velocity";

    pub fn new(max_angular_velocity: [f64; 3]) -> Result<Self, DynamicsError> {
        Ok(Self {
            max_angular_velocity: require_all_positive(
                Self::NAME,
                "max_angular_velocity",
                max_angular_velocity,
            )?,
        })
    }
}

impl VelocityLaw for So3Velocity {
    type Group = So3;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous("Particle in SO3 controlled in velocity", ["w1", "w2", "w3"])
            .with_parameter("max_angular_velocity", self.max_angular_velocity.as_slice())
    }

    fn compute_velocities(&self, commands: &Commands) -> Vector3<f64> {
        scaled(&self.max_angular_velocity, commands)
    }
}

/// A body free to rotate about its centre, controlled in body torque.
#[derive(Debug, Clone, PartialEq)]
pub struct So3Force {
    max_torque: Vector3<f64>,
}

impl So3Force {
    pub const NAME: &'static str = "So3Force";

    pub fn new(max_torque: [f64; 3]) -> Result<Self, DynamicsError> {
        Ok(Self {
            max_torque: require_all_positive(Self::NAME, "max_torque", max_torque)?,
        })
    }
}

impl ForceLaw for So3Force {
    type Group = So3;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous("Particle in SO3 controlled in force", ["t1", "t2", "t3"])
            .with_parameter("max_torque", self.max_torque.as_slice())
    }

    fn compute_forces(&self, commands: &Commands) -> Vector3<f64> {
        scaled(&self.max_torque, commands)
    }
}
