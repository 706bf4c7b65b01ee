//! Discovery Store — folds Observations into per-IP DeviceRecords.
//!
//! `upsert` is the only mutator and is atomic per IP. The merge rule makes
//! the final record independent of absorption order, except for the
//! documented vendor longest-string-wins refinement.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

use chrono::Utc;

use crate::models::{
    DeviceRecord, Interface, InterfaceSnapshot, Meta, Observation, Snapshot, Summary,
};

pub struct DiscoveryStore {
    devices_by_ip: Mutex<HashMap<Ipv4Addr, DeviceRecord>>,
    interfaces: Mutex<Vec<Interface>>,
    os: String,
    started_at: chrono::DateTime<Utc>,
}

impl DiscoveryStore {
    pub fn new(os: impl Into<String>) -> Self {
        Self {
            devices_by_ip: Mutex::new(HashMap::new()),
            interfaces: Mutex::new(Vec::new()),
            os: os.into(),
            started_at: Utc::now(),
        }
    }

    pub fn add_interface(&self, iface: Interface) {
        self.interfaces
            .lock()
            .expect("interface list mutex poisoned")
            .push(iface);
    }

    pub fn interfaces(&self) -> Vec<Interface> {
        self.interfaces
            .lock()
            .expect("interface list mutex poisoned")
            .clone()
    }

    /// Absorb a single Observation, creating or updating the record for its
    /// IP, and return the record's state after the merge.
    pub fn upsert(&self, obs: Observation) -> DeviceRecord {
        let mut devices = self.devices_by_ip.lock().expect("device map mutex poisoned");
        let record = devices
            .entry(obs.ip)
            .or_insert_with(|| DeviceRecord::new(obs.ip, obs.timestamp));

        merge(record, &obs);
        record.clone()
    }

    pub fn set_classification(&self, ip: Ipv4Addr, device_type: String, confidence: f64) {
        if let Some(record) = self
            .devices_by_ip
            .lock()
            .expect("device map mutex poisoned")
            .get_mut(&ip)
        {
            record.device_type = Some(device_type);
            record.confidence = Some(confidence);
        }
    }

    pub fn get(&self, ip: Ipv4Addr) -> Option<DeviceRecord> {
        self.devices_by_ip
            .lock()
            .expect("device map mutex poisoned")
            .get(&ip)
            .cloned()
    }

    pub fn known_ips(&self) -> Vec<Ipv4Addr> {
        self.devices_by_ip
            .lock()
            .expect("device map mutex poisoned")
            .keys()
            .copied()
            .collect()
    }

    pub fn devices(&self) -> Vec<DeviceRecord> {
        let mut devices: Vec<_> = self
            .devices_by_ip
            .lock()
            .expect("device map mutex poisoned")
            .values()
            .cloned()
            .collect();
        devices.sort_by_key(|d| d.ip);
        devices
    }

    pub fn summary(&self) -> Summary {
        let devices = self.devices_by_ip.lock().expect("device map mutex poisoned");
        Summary {
            total_devices: devices.len(),
            with_hostnames: devices.values().filter(|d| d.hostname.is_some()).count(),
            with_macs: devices.values().filter(|d| d.mac.is_some()).count(),
            with_vendor: devices.values().filter(|d| d.vendor.is_some()).count(),
        }
    }

    /// Freeze a consistent view of the store as a Snapshot. Call only once
    /// every probe for this run has joined or timed out.
    pub fn snapshot(&self) -> Snapshot {
        let finished_at = Utc::now();
        let interfaces = self
            .interfaces()
            .into_iter()
            .map(|iface| InterfaceSnapshot {
                name: iface.name,
                ip: iface.ipv4.to_string(),
                network: iface.cidr.to_string(),
            })
            .collect();

        Snapshot {
            meta: Meta {
                os: self.os.clone(),
                started_at: self.started_at.timestamp_micros() as f64 / 1e6,
                finished_at: finished_at.timestamp_micros() as f64 / 1e6,
            },
            interfaces,
            devices: self.devices(),
            summary: self.summary(),
        }
    }
}

/// Field-by-field merge rule.
///
/// Scalars (hostname, mac, iface, status) are first-non-empty-wins: once
/// set, later Observations never overwrite them. Vendor is the one
/// exception — the longer string wins, so a verbose SSDP SERVER banner
/// supersedes a terse OUI vendor name regardless of which arrived first.
/// Services and discovered_via are deduplicated, order-preserving unions.
fn merge(record: &mut DeviceRecord, obs: &Observation) {
    if record.hostname.is_none() {
        if let Some(hostname) = &obs.hostname {
            record.hostname = Some(hostname.clone());
        }
    }
    if record.mac.is_none() {
        if let Some(mac) = &obs.mac {
            record.mac = Some(mac.clone());
        }
    }
    if let Some(vendor) = &obs.vendor {
        let replace = match &record.vendor {
            Some(current) => vendor.len() > current.len(),
            None => true,
        };
        if replace {
            record.vendor = Some(vendor.clone());
        }
    }
    if record.iface.is_none() {
        if let Some(iface) = &obs.iface {
            record.iface = Some(iface.clone());
        }
    }
    if record.status.is_none() {
        if let Some(status) = obs.status {
            record.status = Some(status);
        }
    }

    for service in &obs.services {
        if !record.services.contains(service) {
            record.services.push(service.clone());
        }
    }
    if !record.discovered_via.contains(&obs.source) {
        record.discovered_via.push(obs.source);
    }

    record.last_seen = record.last_seen.max(obs.timestamp);
}
