//! Unit tests for the record/snapshot model types.

use chrono::Utc;
use netwatch_discovery::models::{DeviceRecord, Meta, Snapshot, Summary};
use pretty_assertions::assert_eq;
use std::net::Ipv4Addr;

#[test]
fn classification_text_concatenates_vendor_hostname_and_services() {
    let mut record = DeviceRecord::new(Ipv4Addr::new(10, 0, 0, 5), Utc::now());
    record.vendor = Some("Hewlett Packard".into());
    record.hostname = Some("HP-OfficeJet".into());
    record.services = vec!["_ipp._tcp".into(), "_http._tcp".into()];

    let text = record.classification_text();
    assert!(text.contains("hewlett packard"));
    assert!(text.contains("hp-officejet"));
    assert!(text.contains("_ipp._tcp"));
}

#[test]
fn classification_text_is_lowercase_even_with_missing_fields() {
    let record = DeviceRecord::new(Ipv4Addr::new(10, 0, 0, 6), Utc::now());
    assert_eq!(record.classification_text(), "");
}

#[test]
fn snapshot_serializes_to_the_documented_json_shape() {
    let snapshot = Snapshot {
        meta: Meta { os: "linux".into(), started_at: 100.0, finished_at: 105.0 },
        interfaces: Vec::new(),
        devices: Vec::new(),
        summary: Summary::default(),
    };
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["meta"]["os"], "linux");
    assert_eq!(json["summary"]["total_devices"].as_u64().unwrap_or(0), 0);
}
