//! netwatch-server: HTTP facade over the discovery engine.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use netwatch_discovery::classify::KeywordClassifier;
use netwatch_discovery::config;

#[derive(Parser)]
#[command(name = "netwatch-server", about = "Discovery HTTP facade")]
struct Cli {
    /// Path to a YAML config file overlay
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(version = netwatch_discovery::VERSION, "netwatch-server starting");

    netwatch_discovery::web::start_web_server(config, Arc::new(KeywordClassifier)).await
}
