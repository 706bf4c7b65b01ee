//! Configuration loading: built-in defaults, optional YAML overlay, then
//! environment variables, reduced to the two fields this engine actually
//! reads from the environment (`HOST`/`PORT`).

pub mod settings;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub use settings::{ConcurrencyConfig, DiscoveryConfig, SocketAddrConfig, TimingConfig};

/// Load configuration from an explicit path, or else `~/.netwatch/config.yml`
/// if it exists, then apply environment overrides. A missing file at either
/// location is not an error — defaults stand in its place.
pub fn load_config(config_path: Option<&Path>) -> Result<DiscoveryConfig> {
    let resolved = config_path.map(PathBuf::from).or_else(default_config_path);

    let mut config = match resolved {
        Some(path) if path.exists() => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config: DiscoveryConfig = serde_yaml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            info!(path = %path.display(), "loaded discovery config");
            config
        }
        Some(path) => {
            info!(path = %path.display(), "config file not found, using defaults");
            DiscoveryConfig::default()
        }
        None => DiscoveryConfig::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

/// `~/.netwatch/config.yml`, used when no `--config` path is given. Mirrors
/// the teacher's own home-directory fallback in its config loader, reduced
/// to a single file rather than a directory of layered YAML documents.
fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".netwatch").join("config.yml"))
}

fn apply_env_overrides(config: &mut DiscoveryConfig) {
    if let Ok(host) = std::env::var("HOST") {
        config.bind.host = host;
    }
    if let Ok(port) = std::env::var("PORT") {
        if let Ok(port) = port.parse() {
            config.bind.port = port;
        }
    }
}
