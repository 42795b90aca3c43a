//! Configuration and catalog loading for CLI commands

use anyhow::{Context, Result};
use plantwatch_core::catalog::Catalog;
use plantwatch_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::Path;

/// Load layered configuration: defaults, then file, then environment, then CLI
pub fn load_config(explicit: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match explicit {
        Some(path) => config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir()?;
            config.load_from_dir_if_present(&cwd).context("Failed to load plantwatch.toml")?
        }
    };

    let mut config = config.load_from_env();
    config.update_from_cli(overrides).context("Invalid command-line override")?;
    Ok(config)
}

/// Load the plant catalog from a file, or fall back to the sample data
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(Catalog::sample()),
    }
}
