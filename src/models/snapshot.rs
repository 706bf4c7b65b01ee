//! Snapshot — the frozen, serializable result of one discovery run.

use serde::{Deserialize, Serialize};

use super::DeviceRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub os: String,
    pub started_at: f64,
    pub finished_at: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceSnapshot {
    pub name: String,
    pub ip: String,
    pub network: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_devices: usize,
    pub with_hostnames: usize,
    pub with_macs: usize,
    pub with_vendor: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub meta: Meta,
    pub interfaces: Vec<InterfaceSnapshot>,
    pub devices: Vec<DeviceRecord>,
    pub summary: Summary,
}
