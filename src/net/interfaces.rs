//! Interface Enumerator — lists the host's usable local IPv4 interfaces.
//!
//! Drops loopback and link-local (169.254.0.0/16) addresses. An empty result
//! is a valid outcome, not an error: the engine proceeds with zero
//! interfaces and an empty snapshot rather than failing the run.

use ipnetwork::{IpNetwork, Ipv4Network};
use pnet::datalink;
use std::net::Ipv4Addr;
use tracing::{debug, warn};

use crate::models::Interface;

/// Enumerate usable local IPv4 interfaces via the OS's network interface
/// table.
pub fn enumerate() -> Vec<Interface> {
    let mut found = Vec::new();

    for iface in datalink::interfaces() {
        if iface.is_loopback() || is_loopback_name(&iface.name) {
            continue;
        }

        for ip in &iface.ips {
            let IpNetwork::V4(v4net) = ip else { continue };
            let addr = v4net.ip();
            if is_link_local(addr) {
                continue;
            }

            let Some(network) = network_from_netmask(addr, v4net.mask()) else {
                continue;
            };

            found.push(Interface {
                name: iface.name.clone(),
                ipv4: addr,
                cidr: network,
            });
        }
    }

    if found.is_empty() {
        warn!("no usable network interfaces found (excluding loopback and link-local)");
    } else {
        debug!(count = found.len(), "enumerated local interfaces");
    }

    found
}

fn is_loopback_name(name: &str) -> bool {
    name == "lo" || name.starts_with("lo:") || name.eq_ignore_ascii_case("loopback")
}

fn is_link_local(addr: Ipv4Addr) -> bool {
    let octets = addr.octets();
    octets[0] == 169 && octets[1] == 254
}

/// Derive an `Ipv4Network` from a host address and its netmask, by counting
/// the set bits in the netmask. Returns `None` if the netmask isn't a
/// contiguous run of ones followed by zeros.
pub fn network_from_netmask(addr: Ipv4Addr, netmask: Ipv4Addr) -> Option<Ipv4Network> {
    if !is_contiguous_mask(netmask) {
        return None;
    }
    let prefix = netmask.octets().iter().map(|b| b.count_ones() as u8).sum();
    let candidate = Ipv4Network::new(addr, prefix).ok()?;
    Ipv4Network::new(candidate.network(), prefix).ok()
}

fn is_contiguous_mask(mask: Ipv4Addr) -> bool {
    let bits = u32::from(mask);
    let inverted = !bits;
    inverted == 0 || (inverted & inverted.wrapping_add(1)) == 0
}
