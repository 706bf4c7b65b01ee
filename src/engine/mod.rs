//! Discovery Engine / Scheduler: enumerates interfaces, fans out probes in
//! two phases, merges their Observations into the store, classifies, and
//! freezes a Snapshot.
//!
//! State machine: `Idle -> Enumerating -> PhaseA -> Merge -> PhaseB ->
//! Merge -> Classify -> Snapshot -> Done`, with `Aborted` reachable from
//! any state. The transitions are tracked for observability (tests and
//! logs can see where a run is); nothing outside this module reads them
//! to make decisions.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::classify::DeviceClassifier;
use crate::config::DiscoveryConfig;
use crate::models::{Observation, Snapshot};
use crate::net;
use crate::probes::{self, ProbeStatus};
use crate::store::DiscoveryStore;

/// Points in a single discovery run's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Enumerating,
    PhaseA,
    Merge,
    PhaseB,
    Classify,
    Snapshot,
    Done,
    Aborted,
}

/// Orchestrates one discovery run. Stateless across runs — construct a new
/// `DiscoveryEngine` (or call `run` again) for each pass.
pub struct DiscoveryEngine {
    config: DiscoveryConfig,
    classifier: Arc<dyn DeviceClassifier>,
    state: Mutex<EngineState>,
}

impl DiscoveryEngine {
    pub fn new(config: DiscoveryConfig, classifier: Arc<dyn DeviceClassifier>) -> Self {
        Self { config, classifier, state: Mutex::new(EngineState::Idle) }
    }

    pub fn state(&self) -> EngineState {
        *self.state.lock().expect("engine state mutex poisoned")
    }

    fn transition(&self, next: EngineState) {
        let mut state = self.state.lock().expect("engine state mutex poisoned");
        debug!(from = ?*state, to = ?next, "engine state transition");
        *state = next;
    }

    /// Run one full discovery pass and return the frozen snapshot. Never
    /// fails on partial-probe failure — only truly fatal conditions (none
    /// currently originate inside this engine) would reach callers as an
    /// error.
    pub async fn run(&self) -> Snapshot {
        self.transition(EngineState::Enumerating);
        let store = DiscoveryStore::new(std::env::consts::OS);

        let interfaces = net::enumerate();
        if interfaces.is_empty() {
            warn!("no usable interfaces; proceeding with an empty snapshot");
        }
        for iface in &interfaces {
            store.add_interface(iface.clone());
        }

        self.transition(EngineState::PhaseA);
        let phase_a_deadline = Instant::now() + Duration::from_secs(self.config.timing.t_passive_secs);
        let phase_a_observations = self.run_phase_a(&interfaces, phase_a_deadline).await;

        self.transition(EngineState::Merge);
        info!(count = phase_a_observations.len(), "phase A observations absorbed");
        for obs in phase_a_observations {
            store.upsert(obs);
        }

        self.transition(EngineState::PhaseB);
        let phase_b_deadline = Instant::now() + Duration::from_secs(self.config.timing.t_active_secs);
        let known_ips = store.known_ips();
        let phase_b_observations = self.run_phase_b(&known_ips, phase_b_deadline).await;

        self.transition(EngineState::Merge);
        info!(count = phase_b_observations.len(), "phase B observations absorbed");
        for obs in phase_b_observations {
            store.upsert(obs);
        }

        self.transition(EngineState::Classify);
        for record in store.devices() {
            let (device_type, confidence) = self.classifier.infer(&record);
            store.set_classification(record.ip, device_type, confidence);
        }

        self.transition(EngineState::Snapshot);
        let snapshot = store.snapshot();

        self.transition(EngineState::Done);
        snapshot
    }

    /// Passive + broadcast phase: one ARP, SSDP, and mDNS probe per
    /// interface, all running concurrently, bounded by `deadline`.
    async fn run_phase_a(
        &self,
        interfaces: &[crate::models::Interface],
        deadline: Instant,
    ) -> Vec<Observation> {
        let mut tasks: JoinSet<(Vec<Observation>, ProbeStatus, &'static str)> = JoinSet::new();
        let arp_retries = self.config.timing.arp_retries;
        let ssdp_mx = self.config.timing.ssdp_mx;
        let mdns_window_secs = self.config.timing.mdns_window_secs;

        for iface in interfaces {
            let iface = iface.clone();
            tasks.spawn(async move {
                let (obs, status) = probes::arp::probe(&iface, deadline, arp_retries).await;
                (obs, status, "arp")
            });

            let iface = iface.clone();
            tasks.spawn(async move {
                let (obs, status) = probes::ssdp::probe(&iface, deadline, ssdp_mx).await;
                (obs, status, "ssdp")
            });

            let iface = iface.clone();
            tasks.spawn(async move {
                let (obs, status) = probes::mdns::probe(&iface, deadline, mdns_window_secs).await;
                (obs, status, "mdns")
            });
        }

        drain(tasks, deadline).await
    }

    /// Active per-IP phase: ICMP, Port, and a unicast ARP refresh per known
    /// IP, bounded by `deadline` and a worker-pool concurrency cap.
    async fn run_phase_b(&self, ips: &[std::net::Ipv4Addr], deadline: Instant) -> Vec<Observation> {
        let cap = self.config.concurrency.c_active.max(1);
        let icmp_timeout_secs = self.config.timing.icmp_timeout_secs;
        let mut tasks: JoinSet<(Vec<Observation>, ProbeStatus, &'static str)> = JoinSet::new();
        let mut observations = Vec::new();

        for ip in ips {
            let ip = *ip;
            if tasks.len() >= cap {
                if let Some(joined) = tasks.join_next().await {
                    absorb_joined(joined, &mut observations);
                }
            }
            tasks.spawn(async move {
                let (obs, status) = probes::icmp::probe(ip, deadline, icmp_timeout_secs).await;
                (obs, status, "icmp")
            });

            if tasks.len() >= cap {
                if let Some(joined) = tasks.join_next().await {
                    absorb_joined(joined, &mut observations);
                }
            }
            tasks.spawn(async move {
                let (obs, status) = probes::port::probe(ip, deadline).await;
                (obs, status, "port")
            });

            if tasks.len() >= cap {
                if let Some(joined) = tasks.join_next().await {
                    absorb_joined(joined, &mut observations);
                }
            }
            tasks.spawn(async move {
                let (obs, status) = probes::arp::refresh_single(ip).await;
                (obs, status, "arp-refresh")
            });
        }

        observations.extend(drain(tasks, deadline).await);
        observations
    }
}

fn absorb_joined(
    joined: Result<(Vec<Observation>, ProbeStatus, &'static str), tokio::task::JoinError>,
    into: &mut Vec<Observation>,
) {
    match joined {
        Ok((obs, status, label)) => {
            if status != ProbeStatus::Ok {
                debug!(probe = label, ?status, "probe completed with non-ok status");
            }
            into.extend(obs);
        }
        Err(e) => warn!(error = %e, "probe task panicked"),
    }
}

async fn drain(
    mut tasks: JoinSet<(Vec<Observation>, ProbeStatus, &'static str)>,
    deadline: Instant,
) -> Vec<Observation> {
    let mut observations = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            tasks.abort_all();
            break;
        }
        match tokio::time::timeout(remaining, tasks.join_next()).await {
            Ok(Some(joined)) => absorb_joined(joined, &mut observations),
            Ok(None) => break,
            Err(_) => {
                tasks.abort_all();
                break;
            }
        }
    }
    observations
}
