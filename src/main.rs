use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use confluence::app::AppContext;
use confluence::cli::{commands, Cli, Commands};
use confluence::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Run => {
            commands::run(&ctx).await?;
        }
        Commands::Once { json } => {
            commands::once(&ctx, json).await?;
        }
        Commands::Sources => {
            commands::sources(&ctx);
        }
    }

    Ok(())
}
