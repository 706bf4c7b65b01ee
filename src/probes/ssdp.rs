//! SSDP probe: one UDP M-SEARCH datagram per interface, broadcast to the
//! UPnP multicast group, replies collected until the deadline.
//!
//! Sending to a multicast group doesn't require joining it — the socket
//! only needs to be bound to the interface's own address so replies (sent
//! unicast back to our ephemeral port) arrive on the same socket.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Instant;

use tokio::net::UdpSocket;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::ProbeStatus;
use crate::models::{Interface, Observation, Source};

const SSDP_MULTICAST: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
const SSDP_PORT: u16 = 1900;
const READ_BUF_LEN: usize = 2048;

/// Send one M-SEARCH for `ssdp:all` on `iface`, advertising `mx` as the
/// peer response window, collecting replies until `deadline`.
pub async fn probe(iface: &Interface, deadline: Instant, mx: u32) -> (Vec<Observation>, ProbeStatus) {
    let socket = match UdpSocket::bind(SocketAddrV4::new(iface.ipv4, 0)).await {
        Ok(socket) => socket,
        Err(e) => {
            debug!(interface = %iface.name, error = %e, "SSDP socket bind failed");
            return (Vec::new(), ProbeStatus::DependencyMissing);
        }
    };

    let message = build_msearch(mx);
    let target = SocketAddrV4::new(SSDP_MULTICAST, SSDP_PORT);
    if let Err(e) = socket.send_to(message.as_bytes(), target).await {
        debug!(interface = %iface.name, error = %e, "SSDP send failed");
        return (Vec::new(), ProbeStatus::DependencyMissing);
    }

    let mut observations = Vec::new();
    let mut buf = [0u8; READ_BUF_LEN];

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match timeout(remaining, socket.recv_from(&mut buf)).await {
            Ok(Ok((len, from))) => {
                if let Some(obs) = parse_reply(&buf[..len], from.ip().to_string().parse().ok()) {
                    observations.push(obs);
                }
            }
            Ok(Err(e)) => {
                debug!(interface = %iface.name, error = %e, "SSDP recv failed");
                break;
            }
            Err(_) => break,
        }
    }

    (observations, ProbeStatus::Ok)
}

fn build_msearch(mx: u32) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {SSDP_MULTICAST}:{SSDP_PORT}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         ST: ssdp:all\r\n\
         MX: {mx}\r\n\
         \r\n"
    )
}

/// Parse one HTTP-style SSDP reply (case-insensitive headers) into an
/// Observation, if the peer address could be determined.
fn parse_reply(raw: &[u8], peer: Option<Ipv4Addr>) -> Option<Observation> {
    let peer = peer?;
    let text = std::str::from_utf8(raw).ok()?;
    let headers = parse_headers(text);

    let mut obs = Observation::new(peer, Source::Ssdp);
    if let Some(server) = headers.get("server") {
        obs = obs.with_vendor(server.clone()).with_hostname(server.clone());
    }

    let mut services = Vec::new();
    if let Some(st) = headers.get("st").or_else(|| headers.get("nt")) {
        services.push(format!("SSDP:{st}"));
    }
    if let Some(usn) = headers.get("usn") {
        services.push(format!("USN:{usn}"));
    }
    obs = obs.with_services(services);

    Some(obs)
}

fn parse_headers(text: &str) -> std::collections::HashMap<String, String> {
    let mut headers = std::collections::HashMap::new();
    for line in text.lines() {
        let Some(colon) = line.find(':') else { continue };
        let key = line[..colon].trim().to_lowercase();
        let value = line[colon + 1..].trim().to_string();
        if !key.is_empty() && !value.is_empty() {
            headers.insert(key, value);
        }
    }
    headers
}
