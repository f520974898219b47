//! Command-line interface for freight route planning.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_PLAN_STOPS: &str = "stops";
const ARG_PLAN_MODE: &str = "mode";
const ARG_PLAN_GEOCODER_URL: &str = "geocoder-url";
const ARG_PLAN_OSRM_URL: &str = "osrm-url";
const ARG_PLAN_OSRM_PROFILE: &str = "osrm-profile";
const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_PLAN_USER_AGENT: &str = "user-agent";
const ENV_PLAN_STOPS: &str = "FREIGHT_CMDS_PLAN_STOPS_PATH";

/// Run the freight CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "freight",
    about = "Route geometry and mileage for freight orders",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode an order's stops and estimate the route distance.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
