//! Small cross-cutting helpers that don't belong to any one probe or model.

pub mod dns;
