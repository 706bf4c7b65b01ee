//! Networking primitives: interface enumeration, MAC normalization, OUI
//! lookup. No probe logic lives here — see `crate::probes`.

pub mod interfaces;
pub mod mac;
pub mod oui;

pub use interfaces::enumerate;
