// vehicles_core/src/error.rs

use crate::manifold::ManifoldError;
use thiserror::Error;

/// Everything that can go wrong while building or stepping a dynamics model.
/// Each variant names the model it came from.
#[derive(Debug, Error)]
pub enum DynamicsError {
    /// Invalid parameters at construction time (noise length, mass, command spec...).
    #[error("cannot construct {model}: {reason}")]
    InvalidConstruction { model: String, reason: String },

    #[error("invalid commands for {model}: expected {expected} components, got {got}")]
    InvalidCommands {
        model: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid time step for {model}: dt = {dt} (must be finite and >= 0)")]
    InvalidTimeStep { model: String, dt: f64 },

    /// A failure inside the per-step law, with the full context of the failing call.
    #[error("{model} step failed (dt = {dt})\n   state: {state}\ncommands: {commands:?}\n{source}")]
    IntegrationFailure {
        model: String,
        state: String,
        commands: Vec<f64>,
        dt: f64,
        #[source]
        source: StepError,
    },

    #[error("{model} has no joint {joint} (it has {num_joints})")]
    UnsupportedJoint {
        model: String,
        joint: usize,
        num_joints: usize,
    },

    #[error("{model} does not support {operation}")]
    UnsupportedOperation {
        model: String,
        operation: &'static str,
    },

    #[error("invalid state for {model}: {reason}")]
    InvalidState { model: String, reason: String },
}

impl DynamicsError {
    pub(crate) fn construction(model: &str, reason: impl Into<String>) -> Self {
        DynamicsError::InvalidConstruction {
            model: model.to_string(),
            reason: reason.into(),
        }
    }
}

/// Low-level failure of a single integration step. Wrapped into
/// [`DynamicsError::IntegrationFailure`] by `Dynamics::integrate`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error("non-finite {quantity}: {values:?}")]
    NonFinite {
        quantity: &'static str,
        values: Vec<f64>,
    },

    #[error(transparent)]
    Manifold(#[from] ManifoldError),
}
