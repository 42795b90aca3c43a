//! Command implementations

mod config;
mod locate;
mod map;
mod plants;

use crate::cli::{Cli, Commands};
use crate::config_loader;
use crate::output::OutputWriter;
use anyhow::Result;
use plantwatch_core::config::CliConfigOverrides;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let overrides = match &cli.command {
        Commands::Locate(args) => args.config_overrides(),
        _ => CliConfigOverrides::default(),
    };
    let config = config_loader::load_config(cli.config.as_deref(), overrides)?;

    match cli.command {
        Commands::Locate(args) => locate::execute(args, &config, &output).await,
        Commands::Map(args) => {
            let catalog = config_loader::load_catalog(cli.catalog.as_deref())?;
            map::execute(args, &catalog, &output)
        }
        Commands::Plants(args) => {
            let catalog = config_loader::load_catalog(cli.catalog.as_deref())?;
            plants::execute(args, &catalog, &output)
        }
        Commands::Config => config::execute(&config, &output),
    }
}
