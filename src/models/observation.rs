//! Observation — immutable evidence emitted by a single probe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Which probe produced an Observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Source {
    Arp,
    Icmp,
    Ssdp,
    Mdns,
    Port,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Source::Arp => "ARP",
            Source::Icmp => "ICMP",
            Source::Ssdp => "SSDP",
            Source::Mdns => "MDNS",
            Source::Port => "PORT",
        };
        write!(f, "{label}")
    }
}

/// Reachability outcome carried by ICMP observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "ONLINE")]
    Online,
    #[serde(rename = "NO_RESPONSE")]
    NoResponse,
}

/// Evidence that a device was seen via a single probe, at a single instant.
///
/// Immutable once emitted; the Discovery Store absorbs it and folds its
/// fields into a `DeviceRecord`. Construction follows a consuming builder
/// so a probe can assemble only the fields it actually observed.
#[derive(Debug, Clone)]
pub struct Observation {
    pub ip: Ipv4Addr,
    pub source: Source,
    pub timestamp: DateTime<Utc>,
    pub iface: Option<String>,
    pub mac: Option<String>,
    pub hostname: Option<String>,
    pub vendor: Option<String>,
    pub services: Vec<String>,
    pub status: Option<Status>,
}

impl Observation {
    pub fn new(ip: Ipv4Addr, source: Source) -> Self {
        Self {
            ip,
            source,
            timestamp: Utc::now(),
            iface: None,
            mac: None,
            hostname: None,
            vendor: None,
            services: Vec::new(),
            status: None,
        }
    }

    pub fn with_mac(mut self, mac: String) -> Self {
        self.mac = Some(mac);
        self
    }

    pub fn with_iface(mut self, iface: String) -> Self {
        self.iface = Some(iface);
        self
    }

    pub fn with_hostname(mut self, hostname: String) -> Self {
        self.hostname = Some(hostname);
        self
    }

    pub fn with_vendor(mut self, vendor: String) -> Self {
        self.vendor = Some(vendor);
        self
    }

    pub fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = services;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }
}
