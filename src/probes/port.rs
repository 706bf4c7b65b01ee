//! Port probe: wraps the external `nmap` port-scanner if it's on `PATH`,
//! otherwise is skipped silently — a missing scanner is a `DependencyMissing`
//! outcome, not a failure.

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::debug;

use super::ProbeStatus;
use crate::models::{Observation, Source};

/// Scan `target` with `nmap`'s greppable output, bounded by `deadline`.
pub async fn probe(target: Ipv4Addr, deadline: Instant) -> (Vec<Observation>, ProbeStatus) {
    let budget = deadline.saturating_duration_since(Instant::now());
    if budget.is_zero() {
        return (Vec::new(), ProbeStatus::Timeout);
    }

    let output = timeout(budget, run_nmap(target)).await;
    match output {
        Ok(Some(stdout)) => {
            let services = parse_greppable(&stdout);
            if services.is_empty() {
                (Vec::new(), ProbeStatus::Ok)
            } else {
                (vec![Observation::new(target, Source::Port).with_services(services)], ProbeStatus::Ok)
            }
        }
        Ok(None) => (Vec::new(), ProbeStatus::DependencyMissing),
        Err(_) => (Vec::new(), ProbeStatus::Timeout),
    }
}

async fn run_nmap(target: Ipv4Addr) -> Option<String> {
    let result = tokio::process::Command::new("nmap")
        .args(["-oG", "-", "--open", "-T4", &target.to_string()])
        .stderr(std::process::Stdio::null())
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "nmap unavailable");
            None
        }
    }
}

/// Parse `nmap -oG -` output into `"proto/port:service"` strings for every
/// reported open port.
///
/// Line shape: `Host: 1.2.3.4 ()\tPorts: 22/open/tcp//ssh///, 80/open/tcp//http///`
fn parse_greppable(output: &str) -> Vec<String> {
    let mut services = Vec::new();
    for line in output.lines() {
        let Some(ports_field) = line.split("Ports: ").nth(1) else { continue };
        let ports_field = ports_field.split('\t').next().unwrap_or(ports_field);
        for entry in ports_field.split(", ") {
            let fields: Vec<&str> = entry.split('/').collect();
            if fields.len() < 5 || fields[1] != "open" {
                continue;
            }
            let port = fields[0];
            let proto = fields[2];
            let service = fields[4];
            if service.is_empty() {
                services.push(format!("{proto}/{port}"));
            } else {
                services.push(format!("{proto}/{port}:{service}"));
            }
        }
    }
    services
}
