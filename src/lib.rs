//! netwatch-discovery: local-network device discovery.
//!
//! Enumerates the host's local IPv4 interfaces, runs several passive and
//! active discovery protocols against each network, merges the resulting
//! observations into a de-duplicated per-IP inventory, classifies each
//! device, and produces a JSON snapshot.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod net;
pub mod probes;
pub mod store;
pub mod util;
pub mod web;

/// Crate version, as reported by Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP façade port, used when no config or `PORT` override is set.
pub const DEFAULT_PORT: u16 = 8787;
