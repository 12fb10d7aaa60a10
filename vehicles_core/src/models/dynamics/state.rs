// vehicles_core/src/models/dynamics/state.rs

use crate::error::DynamicsError;
use crate::manifold::{LieGroup, PoseGroup};
use crate::types::{JointState, StateRecord};
use nalgebra::Isometry3;

/// A point of the tangent bundle of `G`: a pose and a body-frame velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct LieState<G: LieGroup> {
    pub pose: G::Element,
    pub velocity: G::Algebra,
}

impl<G: LieGroup> LieState<G> {
    pub fn new(pose: G::Element, velocity: G::Algebra) -> Self {
        Self { pose, velocity }
    }

    pub fn at_rest(pose: G::Element) -> Self {
        Self::new(pose, G::algebra_zero())
    }

    pub fn is_finite(&self) -> bool {
        G::element_is_finite(&self.pose) && G::algebra_is_finite(&self.velocity)
    }
}

impl<G: PoseGroup> LieState<G> {
    /// Projects an SE(3) pose onto `G` and puts the body at rest.
    pub fn from_ambient(pose: &Isometry3<f64>) -> Self {
        Self::at_rest(G::project(pose))
    }

    /// The body joint, embedded in SE(3).
    pub fn embed(&self) -> JointState {
        JointState {
            pose: G::embed(&self.pose),
            velocity: G::embed_algebra(&self.velocity),
        }
    }

    pub fn to_record(&self, model: &str) -> StateRecord {
        let joint = self.embed();
        StateRecord {
            model: model.to_string(),
            pose: joint.pose,
            velocity: joint.velocity,
            extra: Vec::new(),
        }
    }

    /// Inverse of [`LieState::to_record`]. The record must come from the same model
    /// and hold finite values.
    pub fn from_record(model: &str, record: &StateRecord) -> Result<Self, DynamicsError> {
        if record.model != model {
            return Err(DynamicsError::InvalidState {
                model: model.to_string(),
                reason: format!("record belongs to '{}'", record.model),
            });
        }
        let state = Self::new(
            G::project(&record.pose),
            G::project_algebra(&record.velocity),
        );
        if !state.is_finite() {
            return Err(DynamicsError::InvalidState {
                model: model.to_string(),
                reason: "record holds non-finite values".to_string(),
            });
        }
        Ok(state)
    }
}
