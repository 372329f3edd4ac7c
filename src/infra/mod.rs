//! Infrastructure adapters: telemetry and the in-memory reference store.

pub mod error;
pub mod memory;
pub mod telemetry;
