// vehicles_sim/src/simulation/core/runner.rs

use anyhow::Context;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, info, info_span};
use vehicles_core::prelude::StateRecord;

use super::agent::SimAgent;
use super::prng::SimulationRng;
use super::spawner::spawn_agent;
use crate::simulation::config::{ScenarioConfig, SimulationConfig};

/// The recorded trajectory of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReport {
    pub name: String,
    pub model: String,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub state: StateRecord,
}

/// Everything a run produced, written out as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub seed: u64,
    pub dt: f64,
    pub steps: usize,
    pub agents: Vec<AgentReport>,
}

impl Report {
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to serialize the report")
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("Report written to: {}", path.display());
        Ok(())
    }
}

struct Slot {
    agent: Box<dyn SimAgent>,
    rng: ChaCha8Rng,
    report: AgentReport,
}

/// A fixed-step simulation of independent agents.
pub struct Simulation {
    config: SimulationConfig,
    slots: Vec<Slot>,
    step: usize,
}

impl Simulation {
    pub fn from_config(config: &ScenarioConfig) -> anyhow::Result<Self> {
        let rng = SimulationRng::from_seed(config.simulation.seed);
        let slots = config
            .agents
            .iter()
            .enumerate()
            .map(|(index, agent_config)| {
                let agent = spawn_agent(agent_config)
                    .with_context(|| format!("failed to spawn agent '{}'", agent_config.name))?;
                let report = AgentReport {
                    name: agent.name().to_string(),
                    model: agent.model_name().to_string(),
                    samples: Vec::new(),
                };
                Ok(Slot {
                    agent,
                    rng: rng.for_agent(index),
                    report,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            config: config.simulation.clone(),
            slots,
            step: 0,
        })
    }

    pub fn time(&self) -> f64 {
        self.step as f64 * self.config.dt
    }

    /// Advances every agent by one time step.
    pub fn step(&mut self) -> anyhow::Result<()> {
        let (dt, step) = (self.config.dt, self.step);
        for slot in &mut self.slots {
            slot.agent.step(dt, &mut slot.rng).with_context(|| {
                format!("agent '{}' failed at step {step}", slot.agent.name())
            })?;
        }
        self.step += 1;
        Ok(())
    }

    fn sample(&mut self) -> anyhow::Result<()> {
        let time = self.time();
        for slot in &mut self.slots {
            let state = slot.agent.record()?;
            slot.report.samples.push(Sample { time, state });
        }
        Ok(())
    }

    /// Runs the configured number of steps and returns the recorded trajectories.
    pub fn run(mut self) -> anyhow::Result<Report> {
        let span = info_span!("simulation", seed = self.config.seed, dt = self.config.dt);
        let _enter = span.enter();
        info!(
            steps = self.config.steps,
            agents = self.slots.len(),
            "Starting run."
        );

        self.sample()?;
        for _ in 0..self.config.steps {
            self.step()?;
            if self.step % self.config.record_every == 0 || self.step == self.config.steps {
                self.sample()?;
            }
        }

        for slot in &self.slots {
            if let Some(last) = slot.report.samples.last() {
                debug!(
                    agent = %slot.report.name,
                    x = last.state.pose.translation.x,
                    y = last.state.pose.translation.y,
                    z = last.state.pose.translation.z,
                    "Final pose."
                );
            }
        }
        info!(time = self.time(), "Run complete.");

        Ok(Report {
            seed: self.config.seed,
            dt: self.config.dt,
            steps: self.config.steps,
            agents: self.slots.into_iter().map(|slot| slot.report).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::{AgentConfig, NoiseConfig, Pose, VehicleConfig};
    use approx::assert_abs_diff_eq;

    fn scenario(seed: u64) -> ScenarioConfig {
        ScenarioConfig {
            simulation: SimulationConfig {
                seed,
                dt: 0.1,
                steps: 10,
                record_every: 5,
            },
            agents: vec![
                AgentConfig {
                    name: "straight".to_string(),
                    starting_pose: Pose::default(),
                    vehicle: VehicleConfig::Se2Velocity {
                        max_linear_velocity: [1.0, 1.0],
                        max_angular_velocity: 1.0,
                    },
                    commands: vec![1.0, 0.0, 0.0],
                    noise: None,
                },
                AgentConfig {
                    name: "noisy".to_string(),
                    starting_pose: Pose::default(),
                    vehicle: VehicleConfig::DifferentialDrive {
                        max_wheel_velocity: 1.0,
                        wheel_separation: 0.5,
                    },
                    commands: vec![1.0, 1.0],
                    noise: Some(NoiseConfig {
                        drift: vec![0.05, 0.0, 0.05],
                        mult: vec![0.0, 0.0, 0.0],
                    }),
                },
            ],
        }
    }

    fn run(seed: u64) -> Report {
        let simulation = Simulation::from_config(&scenario(seed)).unwrap();
        simulation.run().unwrap()
    }

    #[test]
    fn test_run_records_trajectories() {
        let report = run(1);
        assert_eq!(report.agents.len(), 2);

        // Initial state, step 5 and step 10.
        let straight = &report.agents[0];
        assert_eq!(straight.model, "Se2Velocity");
        assert_eq!(straight.samples.len(), 3);
        let last = straight.samples.last().unwrap();
        assert_abs_diff_eq!(last.time, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(last.state.pose.translation.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_same_seed_same_report() {
        let (a, b, c) = (run(4), run(4), run(5));
        assert_eq!(a, b);
        assert_ne!(a.agents[1], c.agents[1]);
        // The noiseless agent does not depend on the seed.
        assert_eq!(a.agents[0], c.agents[0]);
    }

    #[test]
    fn test_report_serializes_to_toml() {
        let report = run(1);
        let text = report.to_toml().unwrap();
        assert!(text.contains("straight"));
        let back: Report = toml::from_str(&text).unwrap();
        assert_eq!(back.agents.len(), 2);
        assert_eq!(back.agents[0].samples.len(), 3);
    }
}
