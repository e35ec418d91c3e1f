//! tessera-config CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tessera_config::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dump(args) => tessera_config::cli::commands::dump::execute(args, cli.json).await,
        Commands::Migrate(args) => {
            tessera_config::cli::commands::migrate::execute(args, cli.json).await
        }
        Commands::Check(args) => tessera_config::cli::commands::check::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        tessera_config::cli::handle_error(err, cli.json);
    }
}
