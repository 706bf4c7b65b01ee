//! Property tests for the discovery store's merge rule: permutation
//! invariance and idempotence under repeated absorption of the same
//! evidence (see the store's field-by-field merge documentation).

use netwatch_discovery::models::{Observation, Source, Status};
use netwatch_discovery::store::DiscoveryStore;
use std::net::Ipv4Addr;

fn ip() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 1, 50)
}

fn observations() -> Vec<Observation> {
    vec![
        Observation::new(ip(), Source::Arp)
            .with_mac("AA:BB:CC:DD:EE:FF".into())
            .with_iface("eth0".into()),
        Observation::new(ip(), Source::Ssdp)
            .with_vendor("Sonos, Inc. Zone Player".into())
            .with_services(vec!["urn:schemas-upnp-org:device:ZonePlayer:1".into()]),
        Observation::new(ip(), Source::Mdns)
            .with_hostname("sonos-living-room.local".into())
            .with_services(vec!["_spotify-connect._tcp".into()]),
        Observation::new(ip(), Source::Icmp).with_status(Status::Online),
    ]
}

fn absorb_all(store: &DiscoveryStore, obs: Vec<Observation>) {
    for o in obs {
        store.upsert(o);
    }
}

#[test]
fn merge_is_order_independent() {
    let store_a = DiscoveryStore::new("linux");
    absorb_all(&store_a, observations());

    let mut reversed = observations();
    reversed.reverse();
    let store_b = DiscoveryStore::new("linux");
    absorb_all(&store_b, reversed);

    let a = store_a.get(ip()).unwrap();
    let b = store_b.get(ip()).unwrap();

    assert_eq!(a.mac, b.mac);
    assert_eq!(a.hostname, b.hostname);
    assert_eq!(a.vendor, b.vendor);
    assert_eq!(a.iface, b.iface);
    assert_eq!(a.status, b.status);

    let mut a_services = a.services.clone();
    let mut b_services = b.services.clone();
    a_services.sort();
    b_services.sort();
    assert_eq!(a_services, b_services);

    let mut a_via = a.discovered_via.clone();
    let mut b_via = b.discovered_via.clone();
    a_via.sort_by_key(|s| s.to_string());
    b_via.sort_by_key(|s| s.to_string());
    assert_eq!(a_via, b_via);
}

#[test]
fn absorbing_the_same_observation_twice_is_idempotent() {
    let store = DiscoveryStore::new("linux");
    let obs = Observation::new(ip(), Source::Arp).with_mac("11:22:33:44:55:66".into());

    let first = store.upsert(obs.clone());
    let second = store.upsert(obs);

    assert_eq!(first.mac, second.mac);
    assert_eq!(second.services.len(), 0);
    assert_eq!(second.discovered_via, vec![Source::Arp]);
}

#[test]
fn longer_vendor_string_wins_regardless_of_arrival_order() {
    let store = DiscoveryStore::new("linux");
    store.upsert(Observation::new(ip(), Source::Arp).with_vendor("Sonos".into()));
    let record = store.upsert(
        Observation::new(ip(), Source::Ssdp).with_vendor("Sonos, Inc. Zone Player".into()),
    );
    assert_eq!(record.vendor.as_deref(), Some("Sonos, Inc. Zone Player"));

    // Reverse arrival order — the longer string still wins.
    let store = DiscoveryStore::new("linux");
    store.upsert(
        Observation::new(ip(), Source::Ssdp).with_vendor("Sonos, Inc. Zone Player".into()),
    );
    let record = store.upsert(Observation::new(ip(), Source::Arp).with_vendor("Sonos".into()));
    assert_eq!(record.vendor.as_deref(), Some("Sonos, Inc. Zone Player"));
}

#[test]
fn concurrent_upsert_across_threads_unions_services() {
    use std::sync::Arc;
    use std::thread;

    let store = Arc::new(DiscoveryStore::new("linux"));
    let mut handles = Vec::new();

    for t in 0..8 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..125 {
                let service = format!("service-{t}-{i}");
                store.upsert(
                    Observation::new(ip(), Source::Ssdp).with_services(vec![service]),
                );
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    let record = store.get(ip()).unwrap();
    assert_eq!(record.services.len(), 1000);

    let mut seen = record.services.clone();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 1000, "union must contain no duplicates");
}
