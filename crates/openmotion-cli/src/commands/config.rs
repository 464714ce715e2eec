//! Filter configuration commands

use anyhow::Result;
use tracing::info;

use crate::commands::ConfigCommands;
use crate::config_file;
use crate::output;

/// Execute a config command
pub fn execute(cmd: &ConfigCommands, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Show { config } => {
            let filter_config = config_file::load_or_default(config.as_deref())?;
            output::print_config(&filter_config, json)?;
        }
        ConfigCommands::Validate { file } => {
            info!(path = ?file, "Validating filter config");
            let loaded = config_file::load(file)?;
            output::print_validation(&loaded, json)?;
        }
    }
    Ok(())
}
