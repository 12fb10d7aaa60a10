// vehicles_sim/src/main.rs

//! Runs a scenario file and writes the recorded trajectories as TOML.
//!
//! `cargo run -p vehicles_sim -- --scenario assets/scenarios/demo.toml --output out/report.toml`

use anyhow::Context;
use clap::Parser;
use vehicles_sim::{
    cli::Cli,
    init_logging,
    simulation::{config, core::runner::Simulation},
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_filter.as_deref())?;

    // --- 1. Load Simulation Configuration ---
    let scenario = config::load_from_cli(&cli)?;

    // --- 2. Spawn the agents and run ---
    let report = Simulation::from_config(&scenario)?.run()?;

    // --- 3. Write the report ---
    match &cli.output {
        Some(path) => report.write(path)?,
        None => {
            let text = report.to_toml().context("failed to render the report")?;
            print!("{text}");
        }
    }
    Ok(())
}
