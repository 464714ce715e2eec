//! Loading persisted filter configurations.

use std::fs;
use std::path::Path;

use openmotion_errors::ConfigError;
use openmotion_filters::{ConfigAdjustment, FilterConfig, RawFilterConfig};
use tracing::{debug, warn};

use crate::error::CliError;

/// A configuration as loaded from disk, with what validation changed.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: FilterConfig,
    pub adjustments: Vec<ConfigAdjustment>,
}

/// Read and validate a JSON filter configuration.
///
/// Out-of-range values are clamped and reported, never rejected. Only a
/// missing file, unreadable file, or malformed JSON is an error.
pub fn load(path: &Path) -> Result<LoadedConfig, CliError> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    debug!(path = ?path, "Reading filter config");
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
    let raw: RawFilterConfig =
        serde_json::from_str(&text).map_err(|e| ConfigError::parse(e.to_string()))?;

    let (config, adjustments) = FilterConfig::validate_with_report(raw);
    for adjustment in &adjustments {
        warn!(path = ?path, %adjustment, "Filter config value normalized");
    }
    Ok(LoadedConfig { config, adjustments })
}

/// Load `path` if given, else the built-in default.
pub fn load_or_default(path: Option<&Path>) -> Result<FilterConfig, CliError> {
    match path {
        Some(path) => Ok(load(path)?.config),
        None => Ok(FilterConfig::default()),
    }
}
