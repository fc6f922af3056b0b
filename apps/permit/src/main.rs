//! Permit console entry point.

use clap::Parser;
use permit::cli::{Cli, Commands, cmd_preview, cmd_serve};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Serve {
            listen,
            backend_url,
            api_key,
            backend_timeout_secs,
        } => cmd_serve(&listen, backend_url, api_key, backend_timeout_secs).await,
        Commands::Preview {
            features,
            select,
            json,
        } => cmd_preview(&features, &select, json),
    };

    if let Err(err) = result {
        tracing::error!(error = %err, "command failed");
        std::process::exit(1);
    }
}
