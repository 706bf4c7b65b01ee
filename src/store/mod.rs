//! Discovery Store: the merge engine and the atomic snapshot writer.

pub mod discovery_store;
pub mod writer;

pub use discovery_store::DiscoveryStore;
