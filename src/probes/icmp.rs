//! ICMP probe: pings a single host via the system `ping` binary.
//!
//! Raw ICMP sockets need the same privilege as raw ARP; shelling out to
//! `ping` (already suid/capabilities-aware on every target platform) avoids
//! asking for more privilege than the rest of the engine needs.

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::debug;

use super::ProbeStatus;
use crate::models::{Observation, Source, Status};
use crate::util::dns;

const REVERSE_DNS_BUDGET: Duration = Duration::from_millis(500);

/// Send one ICMP echo to `target`, capped at `timeout_secs` regardless of
/// the phase deadline. On a successful reply, also attempts a best-effort
/// reverse DNS lookup to populate `hostname` — never lets that lookup make
/// the probe miss its own deadline.
pub async fn probe(target: Ipv4Addr, deadline: Instant, timeout_secs: u64) -> (Vec<Observation>, ProbeStatus) {
    let budget = deadline
        .saturating_duration_since(Instant::now())
        .min(Duration::from_secs(timeout_secs));

    if budget.is_zero() {
        return (
            vec![Observation::new(target, Source::Icmp).with_status(Status::NoResponse)],
            ProbeStatus::Timeout,
        );
    }

    let reached = ping_once(target, budget).await;
    let status = if reached { Status::Online } else { Status::NoResponse };
    debug!(ip = %target, ?status, "ICMP probe complete");

    let mut observation = Observation::new(target, Source::Icmp).with_status(status);
    if reached {
        let remaining = deadline.saturating_duration_since(Instant::now()).min(REVERSE_DNS_BUDGET);
        if !remaining.is_zero() {
            if let Ok(Some(hostname)) =
                timeout(remaining, dns::reverse_lookup(std::net::IpAddr::V4(target))).await
            {
                observation = observation.with_hostname(hostname);
            }
        }
    }

    (vec![observation], ProbeStatus::Ok)
}

async fn ping_once(target: Ipv4Addr, budget: Duration) -> bool {
    let wait_secs = budget.as_secs().max(1).to_string();
    let result = timeout(
        budget + Duration::from_millis(200),
        tokio::process::Command::new("ping")
            .args(["-c", "1", "-W", &wait_secs, &target.to_string()])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status(),
    )
    .await;

    matches!(result, Ok(Ok(status)) if status.success())
}
