// vehicles_sim/src/prelude.rs

// Re-export the entire vehicles_core prelude so you can easily access
// pure types like `Dynamics`, `CommandSpec`, `StateRecord`, etc.
pub use vehicles_core::prelude::*;

// Re-export common simulation-specific types for easy access in other modules.
pub use crate::cli::Cli;
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::agent::{Agent, SimAgent};
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::core::runner::{AgentReport, Report, Sample, Simulation};
pub use crate::simulation::core::spawner::spawn_agent;
