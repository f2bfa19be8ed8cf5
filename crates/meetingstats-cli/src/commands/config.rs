//! Configuration commands.

use std::path::Path;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &AppConfig) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", AppConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
///
/// Checks everything a report run would need before reading a calendar.
pub fn validate(config: &AppConfig) -> CliResult<()> {
    config.pipeline_config()?;
    config.decode_options()?;

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(override_path: Option<&Path>) -> CliResult<()> {
    let config_path = override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::default_path);
    println!("config: {}", config_path.display());
    Ok(())
}
