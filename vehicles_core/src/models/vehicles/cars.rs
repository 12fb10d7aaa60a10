// vehicles_core/src/models/vehicles/cars.rs

use super::require_positive;
use crate::commands::CommandSpec;
use crate::error::DynamicsError;
use crate::manifold::Se2;
use crate::models::dynamics::VelocityLaw;
use crate::types::Commands;
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

const REEDS_SHEPP_SPEEDS: &[f64] = &[-1.0, 0.0, 1.0];
const DUBINS_SPEEDS: &[f64] = &[0.0, 1.0];

/// Which speeds a car may be commanded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarKind {
    /// Any speed in `[-1, 1]`.
    Simple,
    /// Full speed forward, full speed backward, or stopped.
    ReedsShepp,
    /// Full speed forward or stopped.
    Dubins,
}

impl CarKind {
    pub fn name(self) -> &'static str {
        match self {
            CarKind::Simple => "SimpleCar",
            CarKind::ReedsShepp => "ReedsSheppCar",
            CarKind::Dubins => "DubinsCar",
        }
    }

    fn allowed_speeds(self) -> Option<&'static [f64]> {
        match self {
            CarKind::Simple => None,
            CarKind::ReedsShepp => Some(REEDS_SHEPP_SPEEDS),
            CarKind::Dubins => Some(DUBINS_SPEEDS),
        }
    }
}

/// Kinematic bicycle model. The body frame sits on the rear axle.
///
/// Commands are `[speed, steering]`; the yaw rate is `tan(δ) · v / L`.
#[derive(Debug, Clone, PartialEq)]
pub struct CarLaw {
    kind: CarKind,
    max_linear_velocity: f64,
    max_steering_angle: f64,
    wheelbase: f64,
}

impl CarLaw {
    /// `max_steering_angle` must lie in `(0, π/2)`; the other parameters must be positive.
    pub fn new(
        kind: CarKind,
        max_linear_velocity: f64,
        max_steering_angle: f64,
        wheelbase: f64,
    ) -> Result<Self, DynamicsError> {
        let model = kind.name();
        let max_linear_velocity =
            require_positive(model, "max_linear_velocity", max_linear_velocity)?;
        let wheelbase = require_positive(model, "wheelbase", wheelbase)?;
        let max_steering_angle = require_positive(model, "max_steering_angle", max_steering_angle)?;
        if max_steering_angle >= FRAC_PI_2 {
            return Err(DynamicsError::construction(
                model,
                format!("max_steering_angle must be below π/2, got {max_steering_angle}"),
            ));
        }
        Ok(Self {
            kind,
            max_linear_velocity,
            max_steering_angle,
            wheelbase,
        })
    }

    pub fn simple(
        max_linear_velocity: f64,
        max_steering_angle: f64,
        wheelbase: f64,
    ) -> Result<Self, DynamicsError> {
        Self::new(
            CarKind::Simple,
            max_linear_velocity,
            max_steering_angle,
            wheelbase,
        )
    }

    pub fn reeds_shepp(
        max_linear_velocity: f64,
        max_steering_angle: f64,
        wheelbase: f64,
    ) -> Result<Self, DynamicsError> {
        Self::new(
            CarKind::ReedsShepp,
            max_linear_velocity,
            max_steering_angle,
            wheelbase,
        )
    }

    pub fn dubins(
        max_linear_velocity: f64,
        max_steering_angle: f64,
        wheelbase: f64,
    ) -> Result<Self, DynamicsError> {
        Self::new(
            CarKind::Dubins,
            max_linear_velocity,
            max_steering_angle,
            wheelbase,
        )
    }

    pub fn kind(&self) -> CarKind {
        self.kind
    }

    pub fn max_steering_angle(&self) -> f64 {
        self.max_steering_angle
    }

    pub fn wheelbase(&self) -> f64 {
        self.wheelbase
    }
}

impl VelocityLaw for CarLaw {
    type Group = Se2;

    fn name(&self) -> &str {
        self.kind.name()
    }

    fn commands_spec(&self) -> CommandSpec {
        let spec = CommandSpec::continuous("Car with front-wheel steering", ["speed", "steering"])
            .with_parameter("max_linear_velocity", &[self.max_linear_velocity])
            .with_parameter("max_steering_angle", &[self.max_steering_angle])
            .with_parameter("wheelbase", &[self.wheelbase]);
        match self.kind.allowed_speeds() {
            Some(speeds) => spec.with_discrete(0, speeds),
            None => spec,
        }
    }

    fn compute_velocities(&self, commands: &Commands) -> Vector3<f64> {
        let linear_velocity = commands[0] * self.max_linear_velocity;
        let steering_angle = commands[1] * self.max_steering_angle;
        let angular_velocity = steering_angle.tan() * linear_velocity / self.wheelbase;
        Se2::algebra_from_linear_angular(Vector2::new(linear_velocity, 0.0), angular_velocity)
    }
}
