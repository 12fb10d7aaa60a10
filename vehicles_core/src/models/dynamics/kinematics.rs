// vehicles_core/src/models/dynamics/kinematics.rs

use super::{unsupported_joint, Dynamics, LieState, NoiseModel};
use crate::commands::CommandSpec;
use crate::error::{DynamicsError, StepError};
use crate::manifold::{LieGroup, PoseGroup};
use crate::types::{Commands, JointState, StateRecord, StateSpace};
use nalgebra::Isometry3;
use rand::RngCore;
use std::fmt::Debug;
use tracing::debug;

/// A vehicle whose commands map directly to a body-frame velocity.
pub trait VelocityLaw: Debug + Send + Sync {
    /// The pose space the vehicle moves on.
    type Group: PoseGroup;

    fn name(&self) -> &str;

    fn commands_spec(&self) -> CommandSpec;

    /// Maps a command vector (of the command spec's dimension) to an algebra element.
    fn compute_velocities(&self, commands: &Commands) -> <Self::Group as LieGroup>::Algebra;
}

/// First-order integrator: the commanded velocity is applied for the whole step,
/// `pose2 = pose1 · exp(v · dt)`, optionally perturbed by a [`NoiseModel`].
#[derive(Debug, Clone)]
pub struct SimpleKinematics<L> {
    law: L,
    commands_spec: CommandSpec,
    noise: NoiseModel,
}

impl<L: VelocityLaw> SimpleKinematics<L> {
    /// A noiseless model.
    pub fn new(law: L) -> Result<Self, DynamicsError> {
        Self::with_noise(law, NoiseModel::none(<L::Group as LieGroup>::DIM))
    }

    pub fn with_noise(law: L, noise: NoiseModel) -> Result<Self, DynamicsError> {
        let commands_spec = law.commands_spec();
        commands_spec.validate(law.name())?;
        noise.validate(law.name(), <L::Group as LieGroup>::DIM)?;

        let group = <L::Group as LieGroup>::KIND;
        debug!(
            model = law.name(),
            group = %group,
            commands = commands_spec.dimension(),
            noisy = !noise.is_zero(),
            "Built kinematic model."
        );

        Ok(Self {
            law,
            commands_spec,
            noise,
        })
    }

    pub fn law(&self) -> &L {
        &self.law
    }

    pub fn noise(&self) -> &NoiseModel {
        &self.noise
    }

    /// The noiseless velocity for `commands`.
    pub fn compute_velocities(&self, commands: &Commands) -> <L::Group as LieGroup>::Algebra {
        self.law.compute_velocities(commands)
    }
}

impl<L: VelocityLaw> Dynamics for SimpleKinematics<L> {
    type State = LieState<L::Group>;

    fn name(&self) -> &str {
        self.law.name()
    }

    fn get_state_space(&self) -> StateSpace {
        StateSpace::tangent_bundle(<L::Group as LieGroup>::KIND)
    }

    fn get_commands_spec(&self) -> &CommandSpec {
        &self.commands_spec
    }

    fn pose_to_state(&self, pose: &Isometry3<f64>) -> Self::State {
        LieState::from_ambient(pose)
    }

    fn joint_state(&self, state: &Self::State, joint: usize) -> Result<JointState, DynamicsError> {
        if joint != 0 {
            return Err(unsupported_joint(self.name(), joint, self.num_joints()));
        }
        Ok(state.embed())
    }

    fn step(
        &self,
        state: &Self::State,
        commands: &Commands,
        dt: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Self::State, StepError> {
        let noiseless = self.law.compute_velocities(commands);

        // Noiseless models never touch the generator.
        let velocity = if self.noise.is_zero() {
            noiseless
        } else {
            let w0 = <L::Group as LieGroup>::vector_from_algebra(&noiseless);
            <L::Group as LieGroup>::algebra_from_vector(&self.noise.perturb(&w0, rng))?
        };
        advance::<L::Group>(&state.pose, velocity, velocity, dt)
    }

    fn state_to_record(&self, state: &Self::State) -> Result<StateRecord, DynamicsError> {
        Ok(state.to_record(self.name()))
    }

    fn state_from_record(&self, record: &StateRecord) -> Result<Self::State, DynamicsError> {
        LieState::from_record(self.name(), record)
    }
}

/// Moves `pose` along `motion` for `dt` and pairs the result with `velocity`.
/// Shared by both integrators; rejects non-finite results.
pub(crate) fn advance<G: PoseGroup>(
    pose: &G::Element,
    motion: G::Algebra,
    velocity: G::Algebra,
    dt: f64,
) -> Result<LieState<G>, StepError> {
    for (quantity, v) in [("velocity", &velocity), ("motion", &motion)] {
        if !G::algebra_is_finite(v) {
            return Err(StepError::NonFinite {
                quantity,
                values: G::vector_from_algebra(v).iter().copied().collect(),
            });
        }
    }

    let pose = G::compose(pose, &G::exp(&(motion * dt)));
    if !G::element_is_finite(&pose) {
        return Err(StepError::NonFinite {
            quantity: "pose",
            values: G::embed(&pose).to_homogeneous().iter().copied().collect(),
        });
    }

    Ok(LieState::new(pose, velocity))
}
