//! Interface — a usable local IPv4 network interface.

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// One non-loopback, non-link-local IPv4 address/network pair found on this
/// host, as produced by the Interface Enumerator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub ipv4: Ipv4Addr,
    pub cidr: Ipv4Network,
}

impl Interface {
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.cidr.contains(ip)
    }
}
