use anyhow::Result;
use blobkit_config::prelude::ConfigError;
use clap::Parser;
use tracing::{error, info};

use super::context::CliContext;
use super::dispatch::dispatch;
use super::env::CliArgs;
use super::runtime::{init_logging, load_config};

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();

    init_logging(&cli.log_level, cli.debug)?;

    info!("Starting blobkit v{}", env!("CARGO_PKG_VERSION"));

    let loaded = match load_config(cli.config.as_ref(), &cli.set).await {
        Ok(loaded) => loaded,
        Err(err) => {
            if let Some(config_err) = err.downcast_ref::<ConfigError>() {
                let view = config_err.0.to_public();
                error!(code = %view.code, "{}", view.message);
            }
            return Err(err);
        }
    };
    let cli_context = CliContext::new(loaded, cli.output.clone());

    match dispatch(&cli, &cli_context).await {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(err) => {
            error!("Command failed: {}", err);
            Err(err)
        }
    }
}
