// vehicles_core/src/models/dynamics/mod.rs

use crate::commands::CommandSpec;
use crate::error::{DynamicsError, StepError};
use crate::types::{Commands, JointState, StateRecord, StateSpace};
use nalgebra::Isometry3;
use rand::RngCore;
use std::fmt::Debug;
use tracing::error;

pub mod composite;
pub mod inertial;
pub mod kinematics;
pub mod noise;
pub mod state;

pub use composite::CompositeState;
pub use inertial::{ForceLaw, SimpleDynamics};
pub use kinematics::{SimpleKinematics, VelocityLaw};
pub use noise::NoiseModel;
pub use state::LieState;

/// The contract every vehicle model fulfils towards a simulator.
///
/// A model is immutable once built. States are plain values owned by the caller;
/// the model only ever reads them and hands back new ones, so one model can be
/// shared across threads (`&self` everywhere, `Send + Sync`).
pub trait Dynamics: Debug + Send + Sync {
    /// The opaque state the caller carries between ticks.
    type State: Clone + Debug + Send + Sync;

    /// Name used in logs and in every error this model produces.
    fn name(&self) -> &str;

    /// Describes the state space. Pure metadata.
    fn get_state_space(&self) -> StateSpace;

    /// Describes the command vector `integrate` expects.
    fn get_commands_spec(&self) -> &CommandSpec;

    /// Builds a state at rest from an arbitrary SE(3) pose, projected onto the
    /// model's pose space.
    fn pose_to_state(&self, pose: &Isometry3<f64>) -> Self::State;

    /// Pose and body-frame velocity of a joint, embedded in SE(3). Joint 0 is the body.
    fn joint_state(&self, state: &Self::State, joint: usize) -> Result<JointState, DynamicsError>;

    fn num_joints(&self) -> usize {
        1
    }

    /// Hook for range-checking commands before a step. Accepts everything by default.
    fn check_commands(&self, commands: &Commands) -> Result<(), DynamicsError> {
        let _ = commands;
        Ok(())
    }

    /// The model-specific per-step law. Callers go through [`Dynamics::integrate`],
    /// which validates the arguments first.
    ///
    /// # Panics
    /// Implementations index `commands` directly and may panic when it is shorter
    /// than the command spec's dimension. `integrate` rejects such vectors with
    /// [`DynamicsError::InvalidCommands`] before calling `step`.
    fn step(
        &self,
        state: &Self::State,
        commands: &Commands,
        dt: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Self::State, StepError>;

    /// Advances `state` by `dt` under `commands`.
    ///
    /// # Errors
    /// * [`DynamicsError::InvalidTimeStep`] if `dt` is negative or not finite.
    /// * [`DynamicsError::InvalidCommands`] if the command vector has the wrong length.
    /// * Whatever [`Dynamics::check_commands`] rejects.
    /// * [`DynamicsError::IntegrationFailure`] if the step itself fails. The failing
    ///   state, commands and time step are logged and carried in the error.
    fn integrate(
        &self,
        state: &Self::State,
        commands: &Commands,
        dt: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Self::State, DynamicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(DynamicsError::InvalidTimeStep {
                model: self.name().to_string(),
                dt,
            });
        }

        let expected = self.get_commands_spec().dimension();
        if commands.len() != expected {
            return Err(DynamicsError::InvalidCommands {
                model: self.name().to_string(),
                expected,
                got: commands.len(),
            });
        }

        self.check_commands(commands)?;

        self.step(state, commands, dt, rng).map_err(|source| {
            error!(
                model = self.name(),
                dt,
                state = ?state,
                commands = ?commands.as_slice(),
                error = %source,
                "Error while integrating."
            );
            DynamicsError::IntegrationFailure {
                model: self.name().to_string(),
                state: format!("{state:?}"),
                commands: commands.iter().copied().collect(),
                dt,
                source,
            }
        })
    }

    /// The serializable form of `state`.
    fn state_to_record(&self, state: &Self::State) -> Result<StateRecord, DynamicsError>;

    /// Rebuilds a state from its serializable form.
    fn state_from_record(&self, record: &StateRecord) -> Result<Self::State, DynamicsError>;
}

/// Shared error for joints a model does not have.
pub(crate) fn unsupported_joint(model: &str, joint: usize, num_joints: usize) -> DynamicsError {
    DynamicsError::UnsupportedJoint {
        model: model.to_string(),
        joint,
        num_joints,
    }
}
