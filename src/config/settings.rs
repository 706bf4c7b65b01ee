//! Configuration tree for a discovery run: defaults baked in, an optional
//! YAML file overlays them, environment variables overlay that.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for a discovery run and its HTTP façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// `tracing_subscriber::EnvFilter` default directive.
    pub log: String,
    pub bind: SocketAddrConfig,
    pub timing: TimingConfig,
    pub concurrency: ConcurrencyConfig,
    pub snapshot_path: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            log: "info".into(),
            bind: SocketAddrConfig::default(),
            timing: TimingConfig::default(),
            concurrency: ConcurrencyConfig::default(),
            snapshot_path: PathBuf::from("discovery.json"),
            cors_origins: vec![
                "http://localhost:3000".into(),
                "http://localhost:5173".into(),
                "http://localhost:5174".into(),
            ],
        }
    }
}

/// Bind address for the HTTP façade, overridable by `HOST`/`PORT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketAddrConfig {
    pub host: String,
    pub port: u16,
}

impl Default for SocketAddrConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8787 }
    }
}

impl SocketAddrConfig {
    pub fn to_bind_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Phase and per-probe deadlines, all wall-clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub t_passive_secs: u64,
    pub t_active_secs: u64,
    pub arp_retries: u32,
    pub ssdp_mx: u32,
    pub mdns_window_secs: u64,
    pub icmp_timeout_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            t_passive_secs: 5,
            t_active_secs: 10,
            arp_retries: 2,
            ssdp_mx: 3,
            mdns_window_secs: 3,
            icmp_timeout_secs: 1,
        }
    }
}

/// Worker-pool bounds for Phase B.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    pub c_active: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self { c_active: 64 }
    }
}
