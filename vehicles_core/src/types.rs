// vehicles_core/src/types.rs

use crate::manifold::{GroupKind, Twist};
use nalgebra::{DVector, Isometry3};
use serde::{Deserialize, Serialize};

// --- Core Type Aliases ---
/// A command vector, one entry per component declared by the model's `CommandSpec`.
pub type Commands = DVector<f64>;

// --- State space descriptors ---

/// Describes the state space of a model. Pure metadata for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateSpace {
    /// Pairs `(pose, velocity)` with the velocity in the pose space's algebra.
    TangentBundle {
        pose_space: GroupKind,
        dimension: usize,
    },
    /// A base state space augmented with named scalar joint variables.
    Extended {
        base: Box<StateSpace>,
        extra: Vec<String>,
    },
}

impl StateSpace {
    pub fn tangent_bundle(pose_space: GroupKind) -> Self {
        StateSpace::TangentBundle {
            pose_space,
            dimension: pose_space.dimension(),
        }
    }

    /// The group the body pose lives on.
    pub fn pose_space(&self) -> GroupKind {
        match self {
            StateSpace::TangentBundle { pose_space, .. } => *pose_space,
            StateSpace::Extended { base, .. } => base.pose_space(),
        }
    }

    /// Total number of scalar degrees of freedom (pose + velocity + extra variables).
    pub fn dimension(&self) -> usize {
        match self {
            StateSpace::TangentBundle { dimension, .. } => 2 * dimension,
            StateSpace::Extended { base, extra } => base.dimension() + extra.len(),
        }
    }
}

// --- Ambient representations ---

/// Pose and body-frame velocity of a joint, expressed in SE(3) / se(3).
#[derive(Debug, Clone, PartialEq)]
pub struct JointState {
    pub pose: Isometry3<f64>,
    pub velocity: Twist,
}

/// The serializable form of a state: the ambient embedding of the body joint plus
/// any extra joint variables of composite models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub model: String,
    pub pose: Isometry3<f64>,
    pub velocity: Twist,
    #[serde(default)]
    pub extra: Vec<f64>,
}
