//! netwatch-discover: ad-hoc command-line discovery runs.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use netwatch_discovery::classify::KeywordClassifier;
use netwatch_discovery::config;
use netwatch_discovery::engine::DiscoveryEngine;
use netwatch_discovery::store::writer;

#[derive(Parser)]
#[command(name = "netwatch-discover", about = "Local-network device discovery")]
struct Cli {
    /// Path to a YAML config file overlay
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Enable debug-level logging
    #[arg(short = 'D', long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Perform one discovery pass and write the snapshot to disk
    Run,
    /// Print the last snapshot's summary
    Show,
    /// Print the effective configuration as YAML
    DumpConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    let filter = if cli.debug { "debug" } else { config.log.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match cli.command {
        Commands::Run => run(&config).await,
        Commands::Show => show(&config),
        Commands::DumpConfig => dump_config(&config),
    }
}

async fn run(config: &config::DiscoveryConfig) -> Result<()> {
    let engine = DiscoveryEngine::new(config.clone(), Arc::new(KeywordClassifier));
    let snapshot = engine.run().await;
    writer::write(&snapshot, &config.snapshot_path)?;

    println!(
        "discovered {} device(s): {} with hostnames, {} with MACs, {} with vendor",
        snapshot.summary.total_devices,
        snapshot.summary.with_hostnames,
        snapshot.summary.with_macs,
        snapshot.summary.with_vendor,
    );
    Ok(())
}

fn show(config: &config::DiscoveryConfig) -> Result<()> {
    let contents = std::fs::read_to_string(&config.snapshot_path)?;
    let snapshot: netwatch_discovery::models::Snapshot = serde_json::from_str(&contents)?;
    println!("{}", serde_json::to_string_pretty(&snapshot.summary)?);
    Ok(())
}

fn dump_config(config: &config::DiscoveryConfig) -> Result<()> {
    println!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
