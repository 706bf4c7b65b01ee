//! DeviceRecord — the per-IP aggregated view owned by the Discovery Store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use super::{Source, Status};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub ip: Ipv4Addr,
    pub hostname: Option<String>,
    pub mac: Option<String>,
    pub vendor: Option<String>,
    pub iface: Option<String>,
    pub services: Vec<String>,
    pub discovered_via: Vec<Source>,
    pub status: Option<Status>,
    /// Internal bookkeeping only — §6's on-disk/wire device schema has no
    /// `first_seen`/`last_seen` keys, so these never reach `discovery.json`
    /// or the HTTP façade. Deserializing a device from that wire format
    /// (e.g. reading a snapshot back) has no value to restore them from,
    /// so they're seeded to the moment of deserialization instead.
    #[serde(skip, default = "Utc::now")]
    pub first_seen: DateTime<Utc>,
    #[serde(skip, default = "Utc::now")]
    pub last_seen: DateTime<Utc>,
    pub device_type: Option<String>,
    pub confidence: Option<f64>,
}

impl DeviceRecord {
    /// Create a fresh record for `ip`, seeded at `seen_at`.
    pub fn new(ip: Ipv4Addr, seen_at: DateTime<Utc>) -> Self {
        Self {
            ip,
            hostname: None,
            mac: None,
            vendor: None,
            iface: None,
            services: Vec::new(),
            discovered_via: Vec::new(),
            status: None,
            first_seen: seen_at,
            last_seen: seen_at,
            device_type: None,
            confidence: None,
        }
    }

    /// Concatenation of the textual signals the classifier keys off, lower-cased.
    pub fn classification_text(&self) -> String {
        let mut text = String::new();
        if let Some(vendor) = &self.vendor {
            text.push_str(vendor);
            text.push(' ');
        }
        if let Some(hostname) = &self.hostname {
            text.push_str(hostname);
            text.push(' ');
        }
        text.push_str(&self.services.join(" "));
        text.to_lowercase()
    }
}
