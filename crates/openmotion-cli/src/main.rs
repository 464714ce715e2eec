//! motionctl - OpenMotion filter tooling
//!
//! Inspect and validate tracker filter configurations, replay recorded sample
//! streams through the filters, and simulate synthetic motion.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config_file;
mod error;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ConfigCommands, ReplayArgs, SimulateArgs};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "motionctl")]
#[command(about = "OpenMotion filter tooling - validate configs, replay streams, simulate motion")]
#[command(version)]
#[command(long_about = "
motionctl works with the per-tracker rotation filters of the OpenMotion
tracker server. It validates filter configurations exactly as the server
does, replays recorded sample streams through the filters, and simulates
constant-rate motion to show how much a configuration smooths or leads.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Replay a recorded sample stream through the filters
    Replay(ReplayArgs),

    /// Simulate constant-rate yaw and show the filter response
    Simulate(SimulateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("motionctl={log_level},openmotion={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(e.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Config(cmd) => commands::config::execute(cmd, cli.json),
        Commands::Replay(args) => commands::replay::execute(args, cli.json),
        Commands::Simulate(args) => commands::simulate::execute(args, cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_config_show_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["motionctl", "config", "show"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Show { config: None })
        ));
        Ok(())
    }

    #[test]
    fn parse_global_json_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["motionctl", "config", "validate", "f.json", "--json"])?;
        assert!(cli.json);
        Ok(())
    }

    #[test]
    fn parse_verbosity_count() -> TestResult {
        let cli = Cli::try_parse_from(["motionctl", "-vvv", "simulate"])?;
        assert_eq!(cli.verbose, 3);
        Ok(())
    }

    #[test]
    fn parse_simulate_options() -> TestResult {
        let cli = Cli::try_parse_from([
            "motionctl",
            "simulate",
            "--rate-hz",
            "250",
            "--degrees-per-second",
            "-45",
            "--steps",
            "12",
        ])?;
        let Commands::Simulate(args) = cli.command else {
            return Err("expected simulate".into());
        };
        assert!((args.rate_hz - 250.0).abs() < f64::EPSILON);
        assert!((args.degrees_per_second + 45.0).abs() < f64::EPSILON);
        assert_eq!(args.steps, 12);
        Ok(())
    }

    #[test]
    fn replay_requires_input() {
        assert!(matches!(Cli::try_parse_from(["motionctl", "replay"]), Err(_)));
    }

    #[test]
    fn exit_codes_by_error_kind() {
        assert_eq!(CliError::FileNotFound("x".into()).exit_code(), 3);
        assert_eq!(CliError::InvalidInput("x".into()).exit_code(), 4);
        assert_eq!(CliError::InvalidArgument("x".into()).exit_code(), 2);
    }
}
