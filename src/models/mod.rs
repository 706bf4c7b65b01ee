//! Core data model: immutable Observations folded into per-IP DeviceRecords,
//! frozen into a Snapshot at the end of a discovery run.

pub mod device;
pub mod interface;
pub mod observation;
pub mod snapshot;

pub use device::DeviceRecord;
pub use interface::Interface;
pub use observation::{Observation, Source, Status};
pub use snapshot::{InterfaceSnapshot, Meta, Snapshot, Summary};
