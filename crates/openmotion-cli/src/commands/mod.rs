//! Command implementations for motionctl

pub mod config;
pub mod replay;
pub mod simulate;

use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective filter configuration
    Show {
        /// Configuration file (JSON); the built-in default when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file and list every normalized value
    Validate {
        /// Configuration file (JSON)
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Recorded samples, one JSON object per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Filter configuration applied to every tracker
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write filtered samples; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Sample rate of the synthetic tracker
    #[arg(long, default_value_t = 100.0)]
    pub rate_hz: f64,

    /// Constant yaw rate
    #[arg(long, default_value_t = 90.0, allow_negative_numbers = true)]
    pub degrees_per_second: f64,

    /// Number of samples to generate
    #[arg(long, default_value_t = 30)]
    pub steps: u32,

    /// Filter configuration; the built-in default when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
