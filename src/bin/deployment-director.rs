use anyhow::{Context, Result};
use clap::Parser;
use deployment_director::cli::{run, DirectorCli};
use deployment_director::DirectorError;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = DirectorCli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting deployment-director v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli).await {
        Ok(()) => Ok(()),
        Err(DirectorError::DeploymentNotFound(name)) => {
            error!("Deployment '{}' doesn't exist", name);
            std::process::exit(2);
        }
        Err(e) => Err(e).context("deployment-director command failed"),
    }
}
