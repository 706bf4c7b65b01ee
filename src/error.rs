//! Engine-boundary error type.
//!
//! Probes never propagate errors: every operational failure (permission
//! denied, missing dependency, timeout, malformed reply) resolves to an
//! empty observation list plus a `ProbeStatus` the engine logs and moves
//! past. `DiscoveryError` exists only for the handful of conditions that
//! abort a run outright.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to write discovery snapshot: {0}")]
    Serialization(#[from] anyhow::Error),

    #[error("unrecoverable I/O error: {0}")]
    FatalIo(#[from] std::io::Error),
}
