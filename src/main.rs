use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arbor::config::{Cli, Config};
use arbor::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::try_from(cli).context("invalid configuration")?;

    server::run(config).await
}
