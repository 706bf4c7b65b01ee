//! ARP probe: broadcasts ARP requests across an interface's CIDR via a raw L2
//! socket, falling back to the kernel ARP cache (`/proc/net/arp`, then
//! `arp -a`) when raw sockets aren't available (unprivileged process).

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use pnet::datalink::{self, Channel, MacAddr};
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::packet::Packet;
use tracing::debug;

use super::ProbeStatus;
use crate::models::{Interface, Observation, Source};
use crate::net::mac;

const ETH_HEADER_LEN: usize = 14;
const ARP_PACKET_LEN: usize = 28;
const READ_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Broadcast ARP requests for every host in `iface`'s CIDR, waiting up to
/// `deadline` and resending up to `retries` times. Falls back to the system
/// ARP cache if a raw L2 channel can't be opened (typically a privilege
/// problem).
pub async fn probe(iface: &Interface, deadline: Instant, retries: u32) -> (Vec<Observation>, ProbeStatus) {
    match raw_probe(iface, deadline, retries).await {
        Some(observations) => (observations, ProbeStatus::Ok),
        None => {
            debug!(interface = %iface.name, "raw ARP unavailable, falling back to ARP cache");
            (fallback_cache(iface).await, ProbeStatus::PrivilegeDenied)
        }
    }
}

async fn raw_probe(iface: &Interface, deadline: Instant, retries: u32) -> Option<Vec<Observation>> {
    if deadline <= Instant::now() {
        return Some(Vec::new());
    }

    let target_name = iface.name.clone();
    let cidr = iface.cidr;
    let iface_for_obs = iface.name.clone();

    tokio::task::spawn_blocking(move || run_raw_scan(&target_name, cidr, deadline, retries, &iface_for_obs))
        .await
        .ok()?
}

fn run_raw_scan(
    iface_name: &str,
    cidr: ipnetwork::Ipv4Network,
    deadline: Instant,
    retries: u32,
    iface_for_obs: &str,
) -> Option<Vec<Observation>> {
    let pnet_iface = datalink::interfaces().into_iter().find(|i| i.name == iface_name)?;
    let source_mac = pnet_iface.mac?;

    let config = datalink::Config {
        read_timeout: Some(READ_POLL_INTERVAL),
        ..Default::default()
    };

    let (mut tx, mut rx) = match datalink::channel(&pnet_iface, config) {
        Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
        _ => return None,
    };

    let hosts: Vec<Ipv4Addr> = cidr
        .iter()
        .filter(|ip| *ip != cidr.network() && *ip != cidr.broadcast())
        .collect();

    let mut seen: std::collections::HashMap<Ipv4Addr, MacAddr> = std::collections::HashMap::new();

    for attempt in 0..=retries {
        if Instant::now() >= deadline {
            break;
        }
        for host in &hosts {
            if Instant::now() >= deadline {
                break;
            }
            send_arp_request(tx.as_mut(), source_mac, cidr.ip(), *host);
        }
        debug!(interface = iface_name, attempt, "sent ARP broadcast burst");

        while Instant::now() < deadline {
            match rx.next() {
                Ok(frame) => {
                    if let Some((ip, mac_addr)) = parse_arp_reply(frame) {
                        seen.entry(ip).or_insert(mac_addr);
                    }
                }
                Err(e)
                    if e.kind() == std::io::ErrorKind::TimedOut
                        || e.kind() == std::io::ErrorKind::WouldBlock =>
                {
                    continue
                }
                Err(_) => break,
            }
        }
    }

    Some(
        seen.into_iter()
            .map(|(ip, mac_addr)| {
                let normalized = mac::normalize(&mac_addr.to_string());
                let mut obs = Observation::new(ip, Source::Arp)
                    .with_mac(normalized.clone())
                    .with_iface(iface_for_obs.to_string());
                if let Some(vendor) = crate::net::oui::lookup(&normalized) {
                    obs = obs.with_vendor(vendor);
                }
                obs
            })
            .collect(),
    )
}

fn send_arp_request(
    tx: &mut dyn datalink::DataLinkSender,
    source_mac: MacAddr,
    source_ip: Ipv4Addr,
    target_ip: Ipv4Addr,
) {
    let mut buf = [0u8; ETH_HEADER_LEN + ARP_PACKET_LEN];
    {
        let mut eth_packet = match MutableEthernetPacket::new(&mut buf) {
            Some(p) => p,
            None => return,
        };
        eth_packet.set_destination(MacAddr::broadcast());
        eth_packet.set_source(source_mac);
        eth_packet.set_ethertype(EtherTypes::Arp);

        if let Some(mut arp_packet) = MutableArpPacket::new(eth_packet.payload_mut()) {
            arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
            arp_packet.set_protocol_type(EtherTypes::Ipv4);
            arp_packet.set_hw_addr_len(6);
            arp_packet.set_proto_addr_len(4);
            arp_packet.set_operation(ArpOperations::Request);
            arp_packet.set_sender_hw_addr(source_mac);
            arp_packet.set_sender_proto_addr(source_ip);
            arp_packet.set_target_hw_addr(MacAddr::zero());
            arp_packet.set_target_proto_addr(target_ip);
        }
    }
    tx.send_to(&buf, None);
}

fn parse_arp_reply(frame: &[u8]) -> Option<(Ipv4Addr, MacAddr)> {
    let eth = EthernetPacket::new(frame)?;
    if eth.get_ethertype() != EtherTypes::Arp {
        return None;
    }
    let arp = ArpPacket::new(eth.payload())?;
    if arp.get_operation() != ArpOperations::Reply {
        return None;
    }
    Some((arp.get_sender_proto_addr(), arp.get_sender_hw_addr()))
}

/// Phase B's "unicast ARP refresh": re-read the kernel ARP cache for a
/// single already-known IP. A full L2 broadcast burst is overkill once a
/// host's MAC is already known from Phase A; this just picks up a MAC the
/// cache resolved since then (e.g. an entry that was still incomplete).
pub async fn refresh_single(target: Ipv4Addr) -> (Vec<Observation>, ProbeStatus) {
    let entries = match tokio::fs::read_to_string("/proc/net/arp").await {
        Ok(contents) => parse_proc_net_arp(&contents),
        Err(_) => arp_command_entries().await,
    };

    let observations = entries
        .into_iter()
        .filter(|(ip, mac_addr)| *ip == target && is_acceptable_mac(mac_addr))
        .map(|(ip, mac_addr)| {
            let mut obs = Observation::new(ip, Source::Arp).with_mac(mac_addr.clone());
            if let Some(vendor) = crate::net::oui::lookup(&mac_addr) {
                obs = obs.with_vendor(vendor);
            }
            obs
        })
        .collect::<Vec<_>>();

    if observations.is_empty() {
        (Vec::new(), ProbeStatus::Ok)
    } else {
        (observations, ProbeStatus::Ok)
    }
}

async fn fallback_cache(iface: &Interface) -> Vec<Observation> {
    let entries = match tokio::fs::read_to_string("/proc/net/arp").await {
        Ok(contents) => parse_proc_net_arp(&contents),
        Err(_) => arp_command_entries().await,
    };

    entries
        .into_iter()
        .filter(|(ip, mac_addr)| iface.cidr.contains(*ip) && is_acceptable_mac(mac_addr))
        .map(|(ip, mac_addr)| {
            let mut obs = Observation::new(ip, Source::Arp)
                .with_mac(mac_addr.clone())
                .with_iface(iface.name.clone());
            if let Some(vendor) = crate::net::oui::lookup(&mac_addr) {
                obs = obs.with_vendor(vendor);
            }
            obs
        })
        .collect()
}

fn parse_proc_net_arp(contents: &str) -> Vec<(Ipv4Addr, String)> {
    contents
        .lines()
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return None;
            }
            let ip: Ipv4Addr = parts[0].parse().ok()?;
            Some((ip, mac::normalize(parts[3])))
        })
        .collect()
}

async fn arp_command_entries() -> Vec<(Ipv4Addr, String)> {
    let output = match tokio::process::Command::new("arp").arg("-a").output().await {
        Ok(o) => o,
        Err(_) => return Vec::new(),
    };
    parse_arp_a(&String::from_utf8_lossy(&output.stdout))
}

/// Parse `arp -a` output lines of the form
/// `? (192.168.1.10) at 00:11:22:33:44:55 [ether] on eth0` into
/// `(ip, normalized_mac)` pairs. Entries reporting `<incomplete>` are
/// dropped; everything else (including broadcast/multicast MACs) is left
/// for the caller to filter.
pub fn parse_arp_a(output: &str) -> Vec<(Ipv4Addr, String)> {
    let mut entries = Vec::new();
    for line in output.lines() {
        let (Some(open), Some(close)) = (line.find('('), line.find(')')) else {
            continue;
        };
        let Ok(ip) = line[open + 1..close].parse::<Ipv4Addr>() else {
            continue;
        };
        let Some(at) = line.find(" at ") else { continue };
        let rest = &line[at + 4..];
        let mac_raw = rest.split_whitespace().next().unwrap_or("");
        if mac_raw.is_empty() || mac_raw == "<incomplete>" {
            continue;
        }
        entries.push((ip, mac::normalize(mac_raw)));
    }
    entries
}

fn is_acceptable_mac(mac_addr: &str) -> bool {
    mac_addr != "ff:ff:ff:ff:ff:ff" && mac_addr != "00:00:00:00:00:00" && !mac_addr.starts_with("01:00:5e")
}
