//! Probes: five independent ways of finding evidence of a device on the
//! local network. Each probe is a free async function rather than a trait
//! object — the phase scheduler in `crate::engine` calls them directly and
//! they never need to be stored or dispatched dynamically.
//!
//! No probe ever propagates an error: a privilege problem, a missing
//! external dependency, or a timeout all resolve to an empty observation
//! list plus a `ProbeStatus` the engine logs and moves past.

pub mod arp;
pub mod icmp;
pub mod mdns;
pub mod port;
pub mod ssdp;

/// Outcome of a single probe invocation, independent of how many
/// Observations (if any) it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Ok,
    PrivilegeDenied,
    DependencyMissing,
    Timeout,
}
