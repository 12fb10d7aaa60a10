// vehicles_core/src/models/vehicles/euclidean.rs

use super::{require_all_positive, scaled};
use crate::commands::CommandSpec;
use crate::error::DynamicsError;
use crate::manifold::Tran;
use crate::models::dynamics::{ForceLaw, VelocityLaw};
use crate::types::Commands;
use nalgebra::SVector;

/// A particle in `N`-dimensional Euclidean space controlled in velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct EuclideanVelocity<const N: usize> {
    name: String,
    max_velocity: SVector<f64, N>,
}

impl<const N: usize> EuclideanVelocity<N> {
    pub fn new(max_velocity: [f64; N]) -> Result<Self, DynamicsError> {
        let name = format!("EuclideanVelocity{N}");
        let max_velocity = require_all_positive(&name, "max_velocity", max_velocity)?;
        Ok(Self { name, max_velocity })
    }

    pub fn max_velocity(&self) -> &SVector<f64, N> {
        &self.max_velocity
    }
}

/// A particle in `N`-dimensional Euclidean space controlled in force. Mass and
/// damping belong to the [`SimpleDynamics`](crate::models::dynamics::SimpleDynamics)
/// wrapping it.
#[derive(Debug, Clone, PartialEq)]
pub struct EuclideanForce<const N: usize> {
    name: String,
    max_force: SVector<f64, N>,
}

impl<const N: usize> EuclideanForce<N> {
    pub fn new(max_force: [f64; N]) -> Result<Self, DynamicsError> {
        let name = format!("EuclideanForce{N}");
        let max_force = require_all_positive(&name, "max_force", max_force)?;
        Ok(Self { name, max_force })
    }

    pub fn max_force(&self) -> &SVector<f64, N> {
        &self.max_force
    }
}

fn numbered(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|d| format!("{prefix}{d}")).collect()
}

macro_rules! impl_euclidean_laws {
    ($($n:literal),*) => {$(
        impl VelocityLaw for EuclideanVelocity<$n> {
            type Group = Tran<$n>;

            fn name(&self) -> &str {
                &self.name
            }

            fn commands_spec(&self) -> CommandSpec {
                CommandSpec::continuous(
                    "Particle in Euclidean space controlled in velocity",
                    numbered("vel", $n),
                )
                .with_parameter("max_velocity", self.max_velocity.as_slice())
            }

            fn compute_velocities(&self, commands: &Commands) -> SVector<f64, $n> {
                scaled(&self.max_velocity, commands)
            }
        }

        impl ForceLaw for EuclideanForce<$n> {
            type Group = Tran<$n>;

            fn name(&self) -> &str {
                &self.name
            }

            fn commands_spec(&self) -> CommandSpec {
                CommandSpec::continuous(
                    "Particle in Euclidean space controlled in force",
                    numbered("force", $n),
                )
                .with_parameter("max_force", self.max_force.as_slice())
            }

            fn compute_forces(&self, commands: &Commands) -> SVector<f64, $n> {
                scaled(&self.max_force, commands)
            }
        }
    )*};
}

impl_euclidean_laws!(1, 2, 3);
