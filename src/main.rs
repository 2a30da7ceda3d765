use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use freshet::cli::{commands, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; -v lowers the default level, RUST_LOG wins outright
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    commands::run(&cli).await?;

    Ok(())
}
