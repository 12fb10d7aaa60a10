// vehicles_sim/src/simulation/core/mod.rs

pub mod agent;
pub mod prng;
pub mod runner;
pub mod spawner;
