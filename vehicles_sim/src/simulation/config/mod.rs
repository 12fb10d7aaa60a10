// vehicles_sim/src/simulation/config/mod.rs

//! Loading and validating a scenario from disk.
//!
//! Values come from the scenario TOML file, then from `VEHICLES_`-prefixed
//! environment variables (`VEHICLES_SIMULATION__DT=0.05` overrides
//! `simulation.dt`), then from the command line.

pub mod structs;

use anyhow::{ensure, Context};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;
use tracing::{debug, info};

use crate::cli::Cli;
pub use structs::{AgentConfig, NoiseConfig, Pose, ScenarioConfig, SimulationConfig, VehicleConfig};

pub const ENV_PREFIX: &str = "VEHICLES_";

/// Builds the figment for a scenario file, without command-line overrides.
pub fn scenario_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Loads the scenario at `path` and checks it can be run.
pub fn load_scenario(path: &Path) -> anyhow::Result<ScenarioConfig> {
    ensure!(
        path.exists(),
        "scenario file not found at {}",
        path.display()
    );
    info!("Loading scenario from: {}", path.display());

    let config: ScenarioConfig = scenario_figment(path)
        .extract()
        .with_context(|| format!("failed to parse scenario file {}", path.display()))?;
    validate(&config)?;
    debug!(agents = config.agents.len(), simulation = ?config.simulation, "Scenario loaded.");
    Ok(config)
}

/// Loads the scenario named by the command line and applies its overrides.
pub fn load_from_cli(cli: &Cli) -> anyhow::Result<ScenarioConfig> {
    let mut config = load_scenario(&cli.scenario)?;
    if let Some(steps) = cli.steps {
        config.simulation.steps = steps;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &ScenarioConfig) -> anyhow::Result<()> {
    let sim = &config.simulation;
    ensure!(
        sim.dt.is_finite() && sim.dt > 0.0,
        "simulation.dt must be positive, got {}",
        sim.dt
    );
    ensure!(
        sim.record_every > 0,
        "simulation.record_every must be at least 1"
    );
    ensure!(!config.agents.is_empty(), "the scenario has no agents");

    let mut names: Vec<&str> = config.agents.iter().map(|a| a.name.as_str()).collect();
    names.sort_unstable();
    if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
        anyhow::bail!("agent name '{}' is used more than once", pair[0]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const HEADER: &str = "[simulation]\ndt = 0.1\nsteps = 1\n";

    const SCENARIO: &str = r#"
        [simulation]
        dt = 0.05
        steps = 20
        seed = 3

        [[agents]]
        name = "rover"
        commands = [0.5, 1.0]
        starting_pose = { translation = [1.0, 2.0, 0.0], rotation_deg = [0.0, 0.0, 90.0] }
        vehicle = { type = "DifferentialDrive", max_wheel_velocity = 1.0, wheel_separation = 0.5 }
        noise = { drift = [0.01, 0.0, 0.01], mult = [0.0, 0.0, 0.0] }

        [[agents]]
        name = "puck"
        vehicle = { type = "EuclideanForce", max_force = [1.0, 1.0], damping = 0.2 }
    "#;

    #[test]
    fn test_scenario_parses_with_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("scenario.toml", SCENARIO)?;
            let config = load_scenario(Path::new("scenario.toml")).map_err(|e| e.to_string())?;

            assert_eq!(config.simulation.steps, 20);
            assert_eq!(config.simulation.record_every, 1);
            assert_eq!(config.agents.len(), 2);
            assert_eq!(config.agents[0].vehicle.get_type_str(), "DifferentialDrive");
            assert_eq!(
                config.agents[1].vehicle,
                VehicleConfig::EuclideanForce {
                    max_force: vec![1.0, 1.0],
                    mass: 1.0,
                    damping: 0.2,
                }
            );
            assert!(config.agents[1].commands.is_empty());
            assert_eq!(config.agents[1].starting_pose, Pose::default());
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_the_file() {
        Jail::expect_with(|jail| {
            jail.create_file("scenario.toml", SCENARIO)?;
            jail.set_env("VEHICLES_SIMULATION__STEPS", "7");
            let config = load_scenario(Path::new("scenario.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.simulation.steps, 7);
            assert_eq!(config.simulation.dt, 0.05);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_scenarios_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("missing_agents.toml", HEADER)?;
            assert!(load_scenario(Path::new("missing_agents.toml")).is_err());

            jail.create_file(
                "duplicate.toml",
                r#"
                [simulation]
                dt = 0.1
                steps = 1

                [[agents]]
                name = "a"
                vehicle = { type = "CircleVelocity", max_velocity = 1.0 }

                [[agents]]
                name = "a"
                vehicle = { type = "CircleVelocity", max_velocity = 1.0 }
                "#,
            )?;
            let err = load_scenario(Path::new("duplicate.toml")).unwrap_err();
            assert!(err.to_string().contains("more than once"));

            jail.create_file("unknown.toml", &format!("{HEADER}speed = 2\n"))?;
            assert!(load_scenario(Path::new("unknown.toml")).is_err());

            assert!(load_scenario(Path::new("nowhere.toml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_pose_angles_are_degrees() {
        let pose = Pose {
            translation: [1.0, 0.0, 0.0],
            rotation_deg: [0.0, 0.0, 90.0],
        };
        let iso = pose.to_isometry();
        let x = iso.rotation * nalgebra::Vector3::x();
        approx::assert_abs_diff_eq!(x, nalgebra::Vector3::y(), epsilon = 1e-12);
    }
}
