//! Error types for motionctl

use openmotion_errors::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::FileNotFound(_) => 3,
            CliError::InvalidInput(_) | CliError::JsonError(_) | CliError::Config(_) => 4,
            CliError::InvalidArgument(_) => 2,
            CliError::IoError(_) => 1,
        }
    }
}
