// vehicles_sim/src/lib.rs

//! A headless, fixed-step runner for the vehicle models of `vehicles_core`.
//!
//! A scenario file lists agents, each with a vehicle, a starting pose and
//! constant commands. The runner steps them all with a seeded PRNG and
//! records their states.

// This prelude is for convenience for other files WITHIN the vehicles_sim crate.
pub mod prelude;

pub mod cli;
pub mod simulation;

use tracing_subscriber::EnvFilter;

/// The log filter used when neither `--log-filter` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "info,vehicles_sim=debug,vehicles_core=debug";

/// Installs the global `tracing` subscriber.
pub fn init_logging(filter: Option<&str>) -> anyhow::Result<()> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install the log subscriber: {e}"))
}
