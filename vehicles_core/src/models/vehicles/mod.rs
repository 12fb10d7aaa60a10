// vehicles_core/src/models/vehicles/mod.rs

//! Concrete vehicles: thin parameter packs implementing [`VelocityLaw`] or
//! [`ForceLaw`], meant to be wrapped in [`SimpleKinematics`] or [`SimpleDynamics`].
//!
//! [`VelocityLaw`]: crate::models::dynamics::VelocityLaw
//! [`ForceLaw`]: crate::models::dynamics::ForceLaw
//! [`SimpleKinematics`]: crate::models::dynamics::SimpleKinematics
//! [`SimpleDynamics`]: crate::models::dynamics::SimpleDynamics

use crate::error::DynamicsError;
use crate::types::Commands;
use nalgebra::SVector;

pub mod cars;
pub mod circle;
pub mod differential_drive;
pub mod euclidean;
pub mod rigid_body;
pub mod se2;
pub mod so3;
pub mod steered_car;

pub use cars::{CarKind, CarLaw};
pub use circle::{CircleForce, CircleVelocity};
pub use differential_drive::DifferentialDrive;
pub use euclidean::{EuclideanForce, EuclideanVelocity};
pub use rigid_body::{RigidBodyForce, RigidBodyVelocity};
pub use se2::{Se2Forward, Se2Velocity};
pub use so3::{So3Force, So3Velocity};
pub use steered_car::{SteeredCar, SteeredCarState, SteeringState};

// --- Parameter validation shared by the catalog ---

pub(crate) fn require_positive(
    model: &str,
    parameter: &str,
    value: f64,
) -> Result<f64, DynamicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DynamicsError::construction(
            model,
            format!("{parameter} must be finite and positive, got {value}"),
        ))
    }
}

pub(crate) fn require_all_positive<const N: usize>(
    model: &str,
    parameter: &str,
    values: [f64; N],
) -> Result<SVector<f64, N>, DynamicsError> {
    if values.iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(SVector::from(values))
    } else {
        Err(DynamicsError::construction(
            model,
            format!("{parameter} must be finite and positive, got {values:?}"),
        ))
    }
}

/// `max ⊙ commands`, for laws that scale each command component independently.
pub(crate) fn scaled<const N: usize>(
    max: &SVector<f64, N>,
    commands: &Commands,
) -> SVector<f64, N> {
    SVector::from_fn(|i, _| max[i] * commands[i])
}
