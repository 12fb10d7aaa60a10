// vehicles_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Runs a vehicle scenario headless and writes the recorded trajectories.
///
/// Scenario values can be overridden with `VEHICLES_`-prefixed environment
/// variables (e.g. `VEHICLES_SIMULATION__DT=0.05`) and then by the flags below.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/demo.toml")]
    pub scenario: PathBuf,

    /// Override the number of steps from the scenario.
    #[arg(long)]
    pub steps: Option<usize>,

    /// Override the PRNG seed from the scenario.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the TOML report. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log filter directives, e.g. `info,vehicles_core=debug`. `RUST_LOG` is used when omitted.
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let cli = Cli::parse_from(["vehicles_sim"]);
        assert_eq!(cli.scenario, PathBuf::from("assets/scenarios/demo.toml"));
        assert!(cli.steps.is_none());

        let cli = Cli::parse_from([
            "vehicles_sim",
            "--scenario",
            "other.toml",
            "--steps",
            "12",
            "--seed",
            "9",
            "-o",
            "out/report.toml",
        ]);
        assert_eq!(cli.steps, Some(12));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.output, Some(PathBuf::from("out/report.toml")));
    }
}
