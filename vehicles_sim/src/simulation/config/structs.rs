// vehicles_sim/src/simulation/config/structs.rs

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use vehicles_core::prelude::{CarKind, NoiseModel};

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)] // Use defaults if the [simulation] section is missing
    pub simulation: SimulationConfig,

    // The TOML has `[[agents]]`, which becomes a Vec of AgentConfig structs.
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Seed for the pseudo-random number generator. Runs with the same seed are identical.
    #[serde(default)]
    pub seed: u64,
    /// Fixed time step in seconds.
    pub dt: f64,
    /// Number of steps to run.
    pub steps: usize,
    /// Keep one state record every `record_every` steps (the final state is always kept).
    #[serde(default = "default_record_every")]
    pub record_every: usize,
}

fn default_record_every() -> usize {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            dt: 0.1,
            steps: 100,
            record_every: default_record_every(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub starting_pose: Pose,
    pub vehicle: VehicleConfig,
    /// Constant commands applied on every step. Empty means the model's rest commands.
    #[serde(default)]
    pub commands: Vec<f64>,
    /// Process noise, for kinematic vehicles only.
    #[serde(default)]
    pub noise: Option<NoiseConfig>,
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

/// A pose given as a translation and roll/pitch/yaw angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pose {
    #[serde(default)]
    pub translation: [f64; 3],
    #[serde(default)]
    pub rotation_deg: [f64; 3],
}

impl Pose {
    pub fn to_isometry(&self) -> Isometry3<f64> {
        let [roll, pitch, yaw] = self.rotation_deg.map(f64::to_radians);
        Isometry3::from_parts(
            Translation3::from(Vector3::from(self.translation)),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseConfig {
    pub drift: Vec<f64>,
    pub mult: Vec<f64>,
}

impl NoiseConfig {
    pub fn to_model(&self) -> NoiseModel {
        NoiseModel::from_slices(&self.drift, &self.mult)
    }
}

fn default_mass() -> f64 {
    1.0
}

/// Which vehicle an agent drives, with its parameters. Angles are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")] // The "type" field decides which variant to parse
#[serde(rename_all = "PascalCase")] // e.g., "DifferentialDrive" in TOML maps to `DifferentialDrive`
pub enum VehicleConfig {
    EuclideanVelocity { max_velocity: Vec<f64> },
    EuclideanForce {
        max_force: Vec<f64>,
        #[serde(default = "default_mass")]
        mass: f64,
        #[serde(default)]
        damping: f64,
    },
    CircleVelocity { max_velocity: f64 },
    CircleForce {
        max_force: f64,
        #[serde(default = "default_mass")]
        mass: f64,
        #[serde(default)]
        damping: f64,
    },
    Se2Velocity {
        max_linear_velocity: [f64; 2],
        max_angular_velocity: f64,
    },
    Se2Forward {
        linear_velocity: f64,
        max_angular_velocity: f64,
    },
    Car {
        kind: CarKind,
        max_linear_velocity: f64,
        max_steering_angle: f64,
        wheelbase: f64,
    },
    SteeredCar {
        kind: CarKind,
        max_linear_velocity: f64,
        max_steering_angle: f64,
        wheelbase: f64,
        max_steering_rate: f64,
        track_width: f64,
    },
    DifferentialDrive {
        max_wheel_velocity: f64,
        wheel_separation: f64,
    },
    So3Velocity { max_angular_velocity: [f64; 3] },
    So3Force {
        max_torque: [f64; 3],
        #[serde(default = "default_mass")]
        mass: f64,
        #[serde(default)]
        damping: f64,
    },
    RigidBodyVelocity {
        max_linear_velocity: [f64; 3],
        max_angular_velocity: [f64; 3],
    },
    RigidBodyForce {
        max_force: [f64; 3],
        max_torque: [f64; 3],
        #[serde(default = "default_mass")]
        mass: f64,
        #[serde(default)]
        damping: f64,
    },
}

impl VehicleConfig {
    pub fn get_type_str(&self) -> &'static str {
        match self {
            VehicleConfig::EuclideanVelocity { .. } => "EuclideanVelocity",
            VehicleConfig::EuclideanForce { .. } => "EuclideanForce",
            VehicleConfig::CircleVelocity { .. } => "CircleVelocity",
            VehicleConfig::CircleForce { .. } => "CircleForce",
            VehicleConfig::Se2Velocity { .. } => "Se2Velocity",
            VehicleConfig::Se2Forward { .. } => "Se2Forward",
            VehicleConfig::Car { .. } => "Car",
            VehicleConfig::SteeredCar { .. } => "SteeredCar",
            VehicleConfig::DifferentialDrive { .. } => "DifferentialDrive",
            VehicleConfig::So3Velocity { .. } => "So3Velocity",
            VehicleConfig::So3Force { .. } => "So3Force",
            VehicleConfig::RigidBodyVelocity { .. } => "RigidBodyVelocity",
            VehicleConfig::RigidBodyForce { .. } => "RigidBodyForce",
        }
    }
}
