// vehicles_sim/src/simulation/core/spawner.rs

//! Turns an [`AgentConfig`] into a live agent with its model from `vehicles_core`.

use tracing::info;
use vehicles_core::prelude::*;

use super::agent::{Agent, SimAgent};
use crate::simulation::config::{AgentConfig, VehicleConfig};

/// Builds the model named by the agent's `vehicle` section and places it at the starting pose.
pub fn spawn_agent(config: &AgentConfig) -> Result<Box<dyn SimAgent>, DynamicsError> {
    let agent = match &config.vehicle {
        VehicleConfig::EuclideanVelocity { max_velocity } => match max_velocity.as_slice() {
            &[x] => kinematic(config, EuclideanVelocity::new([x])?),
            &[x, y] => kinematic(config, EuclideanVelocity::new([x, y])?),
            &[x, y, z] => kinematic(config, EuclideanVelocity::new([x, y, z])?),
            other => Err(dimension_error("EuclideanVelocity", other.len())),
        },
        VehicleConfig::EuclideanForce {
            max_force,
            mass,
            damping,
        } => match max_force.as_slice() {
            &[x] => inertial(config, EuclideanForce::new([x])?, *mass, *damping),
            &[x, y] => inertial(config, EuclideanForce::new([x, y])?, *mass, *damping),
            &[x, y, z] => inertial(config, EuclideanForce::new([x, y, z])?, *mass, *damping),
            other => Err(dimension_error("EuclideanForce", other.len())),
        },
        VehicleConfig::CircleVelocity { max_velocity } => {
            kinematic(config, CircleVelocity::new(*max_velocity)?)
        }
        VehicleConfig::CircleForce {
            max_force,
            mass,
            damping,
        } => inertial(config, CircleForce::new(*max_force)?, *mass, *damping),
        VehicleConfig::Se2Velocity {
            max_linear_velocity,
            max_angular_velocity,
        } => kinematic(
            config,
            Se2Velocity::new(*max_linear_velocity, *max_angular_velocity)?,
        ),
        VehicleConfig::Se2Forward {
            linear_velocity,
            max_angular_velocity,
        } => kinematic(
            config,
            Se2Forward::new(*linear_velocity, *max_angular_velocity)?,
        ),
        VehicleConfig::Car {
            kind,
            max_linear_velocity,
            max_steering_angle,
            wheelbase,
        } => kinematic(
            config,
            CarLaw::new(*kind, *max_linear_velocity, *max_steering_angle, *wheelbase)?,
        ),
        VehicleConfig::SteeredCar {
            kind,
            max_linear_velocity,
            max_steering_angle,
            wheelbase,
            max_steering_rate,
            track_width,
        } => {
            let law = CarLaw::new(*kind, *max_linear_velocity, *max_steering_angle, *wheelbase)?;
            let base = kinematic_model(config, law)?;
            let model = SteeredCar::new(base, *max_steering_rate, *track_width)?;
            boxed(config, model)
        }
        VehicleConfig::DifferentialDrive {
            max_wheel_velocity,
            wheel_separation,
        } => kinematic(
            config,
            DifferentialDrive::new(*max_wheel_velocity, *wheel_separation)?,
        ),
        VehicleConfig::So3Velocity {
            max_angular_velocity,
        } => kinematic(config, So3Velocity::new(*max_angular_velocity)?),
        VehicleConfig::So3Force {
            max_torque,
            mass,
            damping,
        } => inertial(config, So3Force::new(*max_torque)?, *mass, *damping),
        VehicleConfig::RigidBodyVelocity {
            max_linear_velocity,
            max_angular_velocity,
        } => kinematic(
            config,
            RigidBodyVelocity::new(*max_linear_velocity, *max_angular_velocity)?,
        ),
        VehicleConfig::RigidBodyForce {
            max_force,
            max_torque,
            mass,
            damping,
        } => inertial(
            config,
            RigidBodyForce::new(*max_force, *max_torque)?,
            *mass,
            *damping,
        ),
    }?;

    info!(
        agent = %config.name,
        vehicle = config.vehicle.get_type_str(),
        model = agent.model_name(),
        "Spawned agent."
    );
    Ok(agent)
}

fn kinematic_model<L: VelocityLaw>(
    config: &AgentConfig,
    law: L,
) -> Result<SimpleKinematics<L>, DynamicsError> {
    match &config.noise {
        Some(noise) => SimpleKinematics::with_noise(law, noise.to_model()),
        None => SimpleKinematics::new(law),
    }
}

fn kinematic<L: VelocityLaw + 'static>(
    config: &AgentConfig,
    law: L,
) -> Result<Box<dyn SimAgent>, DynamicsError> {
    let model = kinematic_model(config, law)?;
    boxed(config, model)
}

fn inertial<F: ForceLaw + 'static>(
    config: &AgentConfig,
    law: F,
    mass: f64,
    damping: f64,
) -> Result<Box<dyn SimAgent>, DynamicsError> {
    if config.noise.is_some() {
        return Err(DynamicsError::UnsupportedOperation {
            model: law.name().to_string(),
            operation: "process noise",
        });
    }
    boxed(config, SimpleDynamics::new(law, mass, damping)?)
}

fn boxed<D: Dynamics + 'static>(
    config: &AgentConfig,
    model: D,
) -> Result<Box<dyn SimAgent>, DynamicsError> {
    let pose = config.starting_pose.to_isometry();
    let agent = Agent::new(&config.name, model, &pose, &config.commands)?;
    Ok(Box::new(agent))
}

fn dimension_error(model: &str, got: usize) -> DynamicsError {
    DynamicsError::InvalidConstruction {
        model: model.to_string(),
        reason: format!("only 1, 2 or 3 dimensions are supported, got {got}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::{NoiseConfig, Pose};

    fn agent(vehicle: VehicleConfig) -> AgentConfig {
        AgentConfig {
            name: "test".to_string(),
            starting_pose: Pose::default(),
            vehicle,
            commands: Vec::new(),
            noise: None,
        }
    }

    #[test]
    fn test_every_vehicle_type_spawns() {
        let vehicles = [
            VehicleConfig::EuclideanVelocity {
                max_velocity: vec![1.0, 2.0, 3.0],
            },
            VehicleConfig::EuclideanForce {
                max_force: vec![1.0],
                mass: 1.0,
                damping: 0.0,
            },
            VehicleConfig::CircleVelocity { max_velocity: 1.0 },
            VehicleConfig::CircleForce {
                max_force: 1.0,
                mass: 2.0,
                damping: 0.1,
            },
            VehicleConfig::Se2Velocity {
                max_linear_velocity: [1.0, 1.0],
                max_angular_velocity: 1.0,
            },
            VehicleConfig::Se2Forward {
                linear_velocity: 1.0,
                max_angular_velocity: 1.0,
            },
            VehicleConfig::Car {
                kind: CarKind::Dubins,
                max_linear_velocity: 1.0,
                max_steering_angle: 0.5,
                wheelbase: 2.0,
            },
            VehicleConfig::SteeredCar {
                kind: CarKind::Simple,
                max_linear_velocity: 1.0,
                max_steering_angle: 0.5,
                wheelbase: 2.0,
                max_steering_rate: 1.0,
                track_width: 1.5,
            },
            VehicleConfig::DifferentialDrive {
                max_wheel_velocity: 1.0,
                wheel_separation: 0.5,
            },
            VehicleConfig::So3Velocity {
                max_angular_velocity: [1.0; 3],
            },
            VehicleConfig::So3Force {
                max_torque: [1.0; 3],
                mass: 1.0,
                damping: 0.0,
            },
            VehicleConfig::RigidBodyVelocity {
                max_linear_velocity: [1.0; 3],
                max_angular_velocity: [1.0; 3],
            },
            VehicleConfig::RigidBodyForce {
                max_force: [1.0; 3],
                max_torque: [1.0; 3],
                mass: 1.0,
                damping: 0.0,
            },
        ];

        for vehicle in vehicles {
            let spawned = spawn_agent(&agent(vehicle.clone())).unwrap();
            assert_eq!(spawned.name(), "test");
            assert!(spawned.joints().unwrap().len() >= 1, "{vehicle:?}");
        }
    }

    #[test]
    fn test_steered_car_exposes_its_wheels() {
        let config = agent(VehicleConfig::SteeredCar {
            kind: CarKind::ReedsShepp,
            max_linear_velocity: 1.0,
            max_steering_angle: 0.5,
            wheelbase: 2.0,
            max_steering_rate: 1.0,
            track_width: 1.5,
        });
        let spawned = spawn_agent(&config).unwrap();
        assert_eq!(spawned.model_name(), "SteeredReedsSheppCar");
        assert_eq!(spawned.joints().unwrap().len(), 5);
    }

    #[test]
    fn test_invalid_vehicles_are_rejected() {
        let four_d = agent(VehicleConfig::EuclideanVelocity {
            max_velocity: vec![1.0; 4],
        });
        assert!(matches!(
            spawn_agent(&four_d),
            Err(DynamicsError::InvalidConstruction { .. })
        ));

        let mut noisy_force = agent(VehicleConfig::CircleForce {
            max_force: 1.0,
            mass: 1.0,
            damping: 0.0,
        });
        noisy_force.noise = Some(NoiseConfig {
            drift: vec![0.1],
            mult: vec![0.0],
        });
        assert!(matches!(
            spawn_agent(&noisy_force),
            Err(DynamicsError::UnsupportedOperation { .. })
        ));

        let mut bad_noise = agent(VehicleConfig::CircleVelocity { max_velocity: 1.0 });
        bad_noise.noise = Some(NoiseConfig {
            drift: vec![0.1, 0.1],
            mult: vec![0.0, 0.0],
        });
        assert!(spawn_agent(&bad_noise).is_err());

        let mut bad_commands = agent(VehicleConfig::CircleVelocity { max_velocity: 1.0 });
        bad_commands.commands = vec![1.0, 1.0];
        assert!(matches!(
            spawn_agent(&bad_commands),
            Err(DynamicsError::InvalidCommands { .. })
        ));
    }
}
