//! Reverse DNS: best-effort hostname resolution for a reachable IP.
//!
//! Used only as an enrichment inside the ICMP probe — a lookup failure or
//! timeout never fails the probe itself.

use std::net::IpAddr;

/// Resolve `ip` to a hostname via the system resolver. Returns `None` on
/// any failure (NXDOMAIN, no resolver configured, etc.).
pub async fn reverse_lookup(ip: IpAddr) -> Option<String> {
    tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip).ok())
        .await
        .ok()
        .flatten()
}
