// vehicles_core/src/models/vehicles/rigid_body.rs

use super::{require_all_positive, scaled};
use crate::commands::CommandSpec;
use crate::error::DynamicsError;
use crate::manifold::{twist, Se3};
use crate::models::dynamics::{ForceLaw, VelocityLaw};
use crate::types::Commands;
use nalgebra::Vector6;

/// A free-flying rigid body commanded in body twist `[vx, vy, vz, wx, wy, wz]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyVelocity {
    max_twist: Vector6<f64>,
}

impl RigidBodyVelocity {
    pub const NAME: &'static str = "RigidBodyVelocity";

    pub fn new(
        max_linear_velocity: [f64; 3],
        max_angular_velocity: [f64; 3],
    ) -> Result<Self, DynamicsError> {
        let linear = require_all_positive(Self::NAME, "max_linear_velocity", max_linear_velocity)?;
        let angular =
            require_all_positive(Self::NAME, "max_angular_velocity", max_angular_velocity)?;
        Ok(Self {
            max_twist: twist(linear, angular),
        })
    }
}

impl VelocityLaw for RigidBodyVelocity {
    type Group = Se3;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous(
            "Rigid body controlled in velocity",
            ["vx", "vy", "vz", "wx", "wy", "wz"],
        )
        .with_parameter("max_linear_velocity", &self.max_twist.as_slice()[..3])
        .with_parameter("max_angular_velocity", &self.max_twist.as_slice()[3..])
    }

    fn compute_velocities(&self, commands: &Commands) -> Vector6<f64> {
        scaled(&self.max_twist, commands)
    }
}

/// A free-flying rigid body commanded in body wrench `[fx, fy, fz, tx, ty, tz]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyForce {
    max_wrench: Vector6<f64>,
}

impl RigidBodyForce {
    pub const NAME: &'static str = "RigidBodyForce";

    pub fn new(max_force: [f64; 3], max_torque: [f64; 3]) -> Result<Self, DynamicsError> {
        let force = require_all_positive(Self::NAME, "max_force", max_force)?;
        let torque = require_all_positive(Self::NAME, "max_torque", max_torque)?;
        Ok(Self {
            max_wrench: twist(force, torque),
        })
    }
}

impl ForceLaw for RigidBodyForce {
    type Group = Se3;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn commands_spec(&self) -> CommandSpec {
        CommandSpec::continuous(
            "Rigid body controlled in force",
            ["fx", "fy", "fz", "tx", "ty", "tz"],
        )
        .with_parameter("max_force", &self.max_wrench.as_slice()[..3])
        .with_parameter("max_torque", &self.max_wrench.as_slice()[3..])
    }

    fn compute_forces(&self, commands: &Commands) -> Vector6<f64> {
        scaled(&self.max_wrench, commands)
    }
}
