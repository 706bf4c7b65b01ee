//! End-to-end scenario tests.
//!
//! These drive the store, OUI resolver, and classifier together the way
//! the engine's merge and classify phases do, without depending on real
//! network peers. Probe-level behavior (raw sends, fallback paths) is
//! covered by each probe module's own tests; what's exercised here is the
//! data flow from Observation through to a classified Snapshot.

use chrono::Utc;
use netwatch_discovery::classify::{DeviceClassifier, KeywordClassifier};
use netwatch_discovery::models::{Observation, Source, Status};
use netwatch_discovery::net::oui;
use netwatch_discovery::store::DiscoveryStore;
use std::net::Ipv4Addr;

/// Empty network: no peers respond, the snapshot is still well-formed.
#[test]
fn empty_network_yields_an_empty_but_valid_snapshot() {
    let store = DiscoveryStore::new("linux");
    let snapshot = store.snapshot();

    assert_eq!(snapshot.devices, vec![]);
    assert_eq!(snapshot.summary.total_devices, 0);
}

/// ARP-only discovery, then an ICMP follow-up in phase B.
#[test]
fn arp_then_icmp_builds_up_a_single_record() {
    let store = DiscoveryStore::new("linux");
    let ip = Ipv4Addr::new(192, 168, 1, 180);
    let mac = "3c:6d:66:24:69:6c";

    store.upsert(
        Observation::new(ip, Source::Arp)
            .with_mac(mac.into())
            .with_vendor(oui::lookup(mac).expect("known OUI prefix")),
    );
    let after_phase_a = store.get(ip).unwrap();
    assert_eq!(after_phase_a.mac.as_deref(), Some(mac));
    assert_eq!(after_phase_a.discovered_via, vec![Source::Arp]);
    assert_eq!(after_phase_a.vendor.as_deref(), Some("Sagemcom Broadband SAS"));

    store.upsert(Observation::new(ip, Source::Icmp).with_status(Status::Online));
    let after_phase_b = store.get(ip).unwrap();
    assert_eq!(after_phase_b.status, Some(Status::Online));
    assert_eq!(after_phase_b.discovered_via, vec![Source::Arp, Source::Icmp]);
}

/// SSDP and ARP both resolve the same peer; the longer vendor string and
/// the union of both sources' evidence must both survive the merge.
#[test]
fn ssdp_and_arp_merge_into_one_record() {
    let store = DiscoveryStore::new("linux");
    let ip = Ipv4Addr::new(192, 168, 1, 50);
    let mac = "aa:bb:cc:dd:ee:ff";

    store.upsert(
        Observation::new(ip, Source::Arp)
            .with_mac(mac.into())
            .with_vendor(oui::lookup(mac).expect("known OUI prefix")),
    );
    let record = store.upsert(
        Observation::new(ip, Source::Ssdp)
            .with_vendor("Linux/3.2 UPnP/1.0 FooTV/2.1".into())
            .with_services(vec!["SSDP:upnp:rootdevice".into()]),
    );

    assert_eq!(record.vendor.as_deref(), Some("Linux/3.2 UPnP/1.0 FooTV/2.1"));
    assert!(record.services.contains(&"SSDP:upnp:rootdevice".to_string()));
    assert_eq!(record.discovered_via, vec![Source::Arp, Source::Ssdp]);
}

/// The classifier picks the documented label/confidence for each signal.
#[test]
fn classifier_matches_the_documented_examples() {
    let store = DiscoveryStore::new("linux");
    let classifier = KeywordClassifier;

    let printer_ip = Ipv4Addr::new(10, 0, 0, 1);
    store.upsert(
        Observation::new(printer_ip, Source::Ssdp)
            .with_services(vec!["SSDP:urn:schemas-upnp-org:device:Printer:1".into()]),
    );
    store.upsert(Observation::new(printer_ip, Source::Mdns).with_hostname("HP-Printer-01".into()));
    let printer = store.get(printer_ip).unwrap();
    let (label, confidence) = classifier.infer(&printer);
    assert_eq!(label, "Printer");
    assert_eq!(confidence, 0.95);

    let iot_ip = Ipv4Addr::new(10, 0, 0, 2);
    store.upsert(Observation::new(iot_ip, Source::Arp).with_vendor("Espressif".into()));
    let iot = store.get(iot_ip).unwrap();
    let (label, confidence) = classifier.infer(&iot);
    assert_eq!(label, "IoT Device");
    assert_eq!(confidence, 0.90);

    let unknown_ip = Ipv4Addr::new(10, 0, 0, 3);
    store.upsert(Observation::new(unknown_ip, Source::Icmp).with_status(Status::Online));
    let unknown = store.get(unknown_ip).unwrap();
    let (label, confidence) = classifier.infer(&unknown);
    assert_eq!(label, "Unknown Device");
    assert_eq!(confidence, 0.30);
}

/// Privilege fallback: even without raw-socket access, two ARP-cache
/// entries surface as two fully-formed records discovered only via ARP.
#[test]
fn arp_cache_fallback_yields_both_known_peers() {
    let store = DiscoveryStore::new("linux");
    let peer_a = Ipv4Addr::new(192, 168, 1, 10);
    let peer_b = Ipv4Addr::new(192, 168, 1, 11);

    for (ip, mac) in [(peer_a, "00:50:56:aa:bb:cc"), (peer_b, "00:0c:29:11:22:33")] {
        store.upsert(Observation::new(ip, Source::Arp).with_mac(mac.into()));
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.summary.total_devices, 2);
    for device in &snapshot.devices {
        assert_eq!(device.discovered_via, vec![Source::Arp]);
    }
}

#[test]
fn snapshot_timestamps_use_utc_now_as_a_sanity_bound() {
    let started = Utc::now();
    let store = DiscoveryStore::new("linux");
    let snapshot = store.snapshot();
    assert!(snapshot.meta.started_at >= started.timestamp() as f64 - 1.0);
    assert!(snapshot.meta.finished_at >= snapshot.meta.started_at);
}

/// A serialized device carries exactly the documented on-disk/HTTP keys —
/// no internal bookkeeping field (e.g. `first_seen`/`last_seen`) leaks
/// through `discovery.json` or `GET /discovery.json`.
#[test]
fn serialized_device_has_exactly_the_documented_keys() {
    let store = DiscoveryStore::new("linux");
    let ip = Ipv4Addr::new(192, 168, 1, 20);
    store.upsert(Observation::new(ip, Source::Arp).with_mac("aa:bb:cc:dd:ee:ff".into()));

    let snapshot = store.snapshot();
    let value = serde_json::to_value(&snapshot.devices[0]).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();

    let mut expected = vec![
        "ip",
        "hostname",
        "mac",
        "vendor",
        "iface",
        "services",
        "discovered_via",
        "status",
        "device_type",
        "confidence",
    ];
    expected.sort_unstable();
    assert_eq!(keys, expected);
}
