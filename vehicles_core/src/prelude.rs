// vehicles_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::manifold::{LieGroup, PoseGroup};
pub use crate::models::dynamics::{Dynamics, ForceLaw, VelocityLaw};

// --- Core Data Structures ---
pub use crate::commands::{CommandFormat, CommandSpec};
pub use crate::error::{DynamicsError, StepError};
pub use crate::manifold::{GroupKind, Se2, Se3, So2, So3, Tran1, Tran2, Tran3, Twist};
pub use crate::models::dynamics::{CompositeState, LieState, NoiseModel};
pub use crate::types::{Commands, JointState, StateRecord, StateSpace};

// --- Integrators ---
pub use crate::models::dynamics::{SimpleDynamics, SimpleKinematics};

// --- Concrete Vehicles (Export common ones for convenience) ---
pub use crate::models::vehicles::{
    CarKind, CarLaw, CircleForce, CircleVelocity, DifferentialDrive, EuclideanForce,
    EuclideanVelocity, RigidBodyForce, RigidBodyVelocity, Se2Forward, Se2Velocity, So3Force,
    So3Velocity, SteeredCar, SteeredCarState, SteeringState,
};
