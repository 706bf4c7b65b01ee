//! mDNS / DNS-SD probe: browses the well-known service types for a fixed
//! discovery window, emitting one Observation per resolved service that
//! carries at least one IPv4 address.
//!
//! A fresh `ServiceDaemon` is spun up per invocation rather than shared
//! across probes — mdns-sd documents each daemon as an independent
//! background thread, and a short-lived one keeps this probe free of any
//! shared state the rest of the engine would need to reason about.

use std::time::Instant;

use mdns_sd::{ResolvedService, ServiceDaemon, ServiceEvent};
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::ProbeStatus;
use crate::models::{Interface, Observation, Source};

const SERVICE_TYPES: &[&str] = &[
    "_http._tcp.local.",
    "_ssh._tcp.local.",
    "_workstation._tcp.local.",
    "_services._dns-sd._udp.local.",
];

/// Browse `SERVICE_TYPES` for up to `window_secs` (bounded by `deadline`),
/// emitting one Observation per resolved service instance.
pub async fn probe(
    _iface: &Interface,
    deadline: Instant,
    window_secs: u64,
) -> (Vec<Observation>, ProbeStatus) {
    let window = deadline
        .saturating_duration_since(Instant::now())
        .min(Duration::from_secs(window_secs));
    if window.is_zero() {
        return (Vec::new(), ProbeStatus::Timeout);
    }

    let daemon = match ServiceDaemon::new() {
        Ok(daemon) => daemon,
        Err(e) => {
            debug!(error = %e, "mDNS daemon unavailable");
            return (Vec::new(), ProbeStatus::DependencyMissing);
        }
    };

    let mut observations = Vec::new();
    for service_type in SERVICE_TYPES {
        observations.extend(browse_one(&daemon, service_type, window).await);
    }

    let _ = daemon.shutdown();
    (observations, ProbeStatus::Ok)
}

async fn browse_one(daemon: &ServiceDaemon, service_type: &str, window: Duration) -> Vec<Observation> {
    let receiver = match daemon.browse(service_type) {
        Ok(receiver) => receiver,
        Err(e) => {
            debug!(service_type, error = %e, "mDNS browse failed");
            return Vec::new();
        }
    };

    let mut observations = Vec::new();
    let start = Instant::now();

    while start.elapsed() < window {
        let remaining = window.saturating_sub(start.elapsed());
        match timeout(remaining, receiver.recv_async()).await {
            Ok(Ok(ServiceEvent::ServiceResolved(info))) => {
                if let Some(obs) = resolved_to_observation(&info, service_type) {
                    observations.push(obs);
                }
            }
            Ok(Ok(_)) => continue,
            Ok(Err(_)) => break,
            Err(_) => break,
        }
    }

    let _ = daemon_stop(daemon, service_type);
    observations
}

fn daemon_stop(daemon: &ServiceDaemon, service_type: &str) -> Result<(), mdns_sd::Error> {
    daemon.stop_browse(service_type)
}

fn resolved_to_observation(info: &ResolvedService, service_type: &str) -> Option<Observation> {
    let instance = instance_label(&info.fullname, service_type)?;

    let ip = info.addresses.iter().find_map(|addr| match addr {
        mdns_sd::ScopedIp::V4(v4) => Some(*v4.addr()),
        _ => None,
    })?;

    Some(
        Observation::new(ip, Source::Mdns)
            .with_hostname(instance)
            .with_services(vec![service_type.to_string()]),
    )
}

/// Extract and validate the DNS-SD instance label from a fully-qualified
/// service name of the form `<instance>.<type>`. Rejects names that don't
/// carry the expected service-type suffix or have an empty instance part.
fn instance_label(fullname: &str, service_type: &str) -> Option<String> {
    let suffix = format!(".{service_type}");
    let label = fullname.strip_suffix(&suffix).or_else(|| fullname.strip_suffix(service_type))?;
    let label = label.trim_end_matches('.');
    if label.is_empty() {
        return None;
    }
    Some(label.to_string())
}
