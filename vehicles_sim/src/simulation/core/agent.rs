// vehicles_sim/src/simulation/core/agent.rs

use nalgebra::Isometry3;
use rand::RngCore;
use tracing::warn;
use vehicles_core::prelude::*;

/// A type-erased agent, so one simulation can hold vehicles with different state types.
pub trait SimAgent: Send {
    fn name(&self) -> &str;

    fn model_name(&self) -> &str;

    /// Advances the agent by `dt` with its own commands.
    fn step(&mut self, dt: f64, rng: &mut dyn RngCore) -> Result<(), DynamicsError>;

    /// The pose and velocity of every joint, body first.
    fn joints(&self) -> Result<Vec<JointState>, DynamicsError>;

    fn record(&self) -> Result<StateRecord, DynamicsError>;
}

/// A model, the state it owns and the commands it is driven with.
#[derive(Debug)]
pub struct Agent<D: Dynamics> {
    name: String,
    model: D,
    state: D::State,
    commands: Commands,
}

impl<D: Dynamics> Agent<D> {
    /// Places the model at `pose`, at rest. Empty `commands` means the model's rest commands.
    pub fn new(
        name: &str,
        model: D,
        pose: &Isometry3<f64>,
        commands: &[f64],
    ) -> Result<Self, DynamicsError> {
        let spec = model.get_commands_spec();
        let commands = if commands.is_empty() {
            spec.rest()
        } else {
            Commands::from_row_slice(commands)
        };
        if commands.len() != spec.dimension() {
            return Err(DynamicsError::InvalidCommands {
                model: model.name().to_string(),
                expected: spec.dimension(),
                got: commands.len(),
            });
        }
        if !spec.contains(&commands) {
            warn!(
                agent = name,
                model = model.name(),
                commands = ?commands.as_slice(),
                "Commands fall outside the model's declared range."
            );
        }

        let state = model.pose_to_state(pose);
        Ok(Self {
            name: name.to_string(),
            model,
            state,
            commands,
        })
    }

    pub fn model(&self) -> &D {
        &self.model
    }

    pub fn state(&self) -> &D::State {
        &self.state
    }

    pub fn set_commands(&mut self, commands: Commands) {
        self.commands = commands;
    }
}

impl<D: Dynamics> SimAgent for Agent<D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn model_name(&self) -> &str {
        self.model.name()
    }

    fn step(&mut self, dt: f64, rng: &mut dyn RngCore) -> Result<(), DynamicsError> {
        self.state = self.model.integrate(&self.state, &self.commands, dt, rng)?;
        Ok(())
    }

    fn joints(&self) -> Result<Vec<JointState>, DynamicsError> {
        (0..self.model.num_joints())
            .map(|joint| self.model.joint_state(&self.state, joint))
            .collect()
    }

    fn record(&self) -> Result<StateRecord, DynamicsError> {
        self.model.state_to_record(&self.state)
    }
}
