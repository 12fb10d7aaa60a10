// vehicles_core/src/models/dynamics/inertial.rs

use super::kinematics::advance;
use super::{unsupported_joint, Dynamics, LieState};
use crate::commands::CommandSpec;
use crate::error::{DynamicsError, StepError};
use crate::manifold::{LieGroup, PoseGroup};
use crate::types::{Commands, JointState, StateRecord, StateSpace};
use nalgebra::Isometry3;
use rand::RngCore;
use std::fmt::Debug;
use tracing::debug;

/// A vehicle whose commands map to a body-frame force (or torque).
pub trait ForceLaw: Debug + Send + Sync {
    type Group: PoseGroup;

    fn name(&self) -> &str;

    fn commands_spec(&self) -> CommandSpec;

    fn compute_forces(&self, commands: &Commands) -> <Self::Group as LieGroup>::Algebra;
}

/// Second-order integrator for a damped body of scalar mass.
///
/// Each step:
/// ```text
/// acc   = (F - v1 * damping) / mass
/// v2    = v1 + acc * dt
/// pose2 = pose1 · exp(½ (v1 + v2) · dt)
/// ```
/// The mid-point velocity moves the pose; `v2` is the new velocity. No noise.
#[derive(Debug, Clone)]
pub struct SimpleDynamics<F> {
    law: F,
    commands_spec: CommandSpec,
    mass: f64,
    damping: f64,
}

impl<F: ForceLaw> SimpleDynamics<F> {
    /// `mass` must be finite and positive, `damping` finite and non-negative.
    pub fn new(law: F, mass: f64, damping: f64) -> Result<Self, DynamicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(DynamicsError::construction(
                law.name(),
                format!("mass must be finite and positive, got {mass}"),
            ));
        }
        if !(damping.is_finite() && damping >= 0.0) {
            return Err(DynamicsError::construction(
                law.name(),
                format!("damping must be finite and non-negative, got {damping}"),
            ));
        }
        let commands_spec = law
            .commands_spec()
            .with_parameter("mass", &[mass])
            .with_parameter("damping", &[damping]);
        commands_spec.validate(law.name())?;

        let group = <F::Group as LieGroup>::KIND;
        debug!(model = law.name(), group = %group, mass, damping, "Built dynamic model.");

        Ok(Self {
            law,
            commands_spec,
            mass,
            damping,
        })
    }

    pub fn law(&self) -> &F {
        &self.law
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn compute_forces(&self, commands: &Commands) -> <F::Group as LieGroup>::Algebra {
        self.law.compute_forces(commands)
    }

    /// Commands do not map to velocities for a body with inertia.
    pub fn compute_velocities(
        &self,
        _commands: &Commands,
    ) -> Result<<F::Group as LieGroup>::Algebra, DynamicsError> {
        Err(DynamicsError::UnsupportedOperation {
            model: self.law.name().to_string(),
            operation: "compute_velocities",
        })
    }
}

impl<F: ForceLaw> Dynamics for SimpleDynamics<F> {
    type State = LieState<F::Group>;

    fn name(&self) -> &str {
        self.law.name()
    }

    fn get_state_space(&self) -> StateSpace {
        StateSpace::tangent_bundle(<F::Group as LieGroup>::KIND)
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
        _rng: &mut dyn RngCore,
    ) -> Result<Self::State, StepError> {
        let forces = self.law.compute_forces(commands);
        let v1 = state.velocity;

        let acceleration = (forces - v1 * self.damping) / self.mass;
        let v2 = v1 + acceleration * dt;
        let midpoint = (v1 + v2) * 0.5;

        advance::<F::Group>(&state.pose, midpoint, v2, dt)
    }

    fn state_to_record(&self, state: &Self::State) -> Result<StateRecord, DynamicsError> {
        Ok(state.to_record(self.name()))
    }

    fn state_from_record(&self, record: &StateRecord) -> Result<Self::State, DynamicsError> {
        LieState::from_record(self.name(), record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifold::{Se2, Tran1};
    use approx::assert_abs_diff_eq;
    use nalgebra::{Vector1, Vector3};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Debug)]
    struct Thruster;

    impl ForceLaw for Thruster {
        type Group = Tran1;

        fn name(&self) -> &str {
            "Thruster"
        }

        fn commands_spec(&self) -> CommandSpec {
            CommandSpec::continuous("1D thruster", ["force"])
        }

        fn compute_forces(&self, commands: &Commands) -> Vector1<f64> {
            Vector1::new(commands[0])
        }
    }

    #[derive(Debug)]
    struct Planar;

    impl ForceLaw for Planar {
        type Group = Se2;

        fn name(&self) -> &str {
            "Planar"
        }

        fn commands_spec(&self) -> CommandSpec {
            CommandSpec::continuous("planar", ["fx", "fy", "torque"])
        }

        fn compute_forces(&self, commands: &Commands) -> Vector3<f64> {
            Vector3::new(commands[0], commands[1], commands[2])
        }
    }

    #[test]
    fn test_midpoint_step_from_rest() {
        let model = SimpleDynamics::new(Thruster, 2.0, 0.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let state = LieState::<Tran1>::at_rest(Vector1::new(0.0));

        let next = model
            .integrate(&state, &Commands::from_vec(vec![1.0]), 1.0, &mut rng)
            .unwrap();
        // acc = 0.5, v2 = 0.5, moved by the mid-point velocity 0.25.
        assert_abs_diff_eq!(next.velocity[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(next.pose[0], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_damping_slows_a_coasting_body() {
        let model = SimpleDynamics::new(Thruster, 1.0, 0.5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let state = LieState::<Tran1>::new(Vector1::new(0.0), Vector1::new(2.0));

        let next = model
            .integrate(&state, &Commands::zeros(1), 0.1, &mut rng)
            .unwrap();
        // acc = -1.0, v2 = 1.9, mid = 1.95.
        assert_abs_diff_eq!(next.velocity[0], 1.9, epsilon = 1e-12);
        assert_abs_diff_eq!(next.pose[0], 0.195, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_force_at_rest_stays_put() {
        let model = SimpleDynamics::new(Planar, 3.0, 0.2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let state = LieState::<Se2>::at_rest(Se2::from_xy_theta(1.0, 2.0, 3.0));

        let next = model
            .integrate(&state, &Commands::zeros(3), 0.5, &mut rng)
            .unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_invalid_parameters() {
        let invalid = [
            (0.0, 0.0),
            (-1.0, 0.0),
            (f64::NAN, 0.0),
            (1.0, -0.1),
            (1.0, f64::INFINITY),
        ];
        for (mass, damping) in invalid {
            assert!(matches!(
                SimpleDynamics::new(Thruster, mass, damping),
                Err(DynamicsError::InvalidConstruction { .. })
            ));
        }
    }

    #[test]
    fn test_compute_velocities_is_unsupported() {
        let model = SimpleDynamics::new(Thruster, 1.0, 0.0).unwrap();
        assert!(matches!(
            model.compute_velocities(&Commands::zeros(1)),
            Err(DynamicsError::UnsupportedOperation {
                operation: "compute_velocities",
                ..
            })
        ));
        assert_abs_diff_eq!(model.compute_forces(&Commands::from_vec(vec![0.5]))[0], 0.5);
    }

    #[test]
    fn test_parameters_are_published_in_the_spec() {
        let model = SimpleDynamics::new(Thruster, 4.0, 0.1).unwrap();
        let spec = model.get_commands_spec();
        assert_eq!(spec.parameters["mass"], vec![4.0]);
        assert_eq!(spec.parameters["damping"], vec![0.1]);
    }
}
