//! Adapter implementations for board ports.
//!
//! - [`memory`]: in-process snapshot store and canned ingestion
//! - [`file`]: JSON snapshot file inside a capability-scoped directory

pub mod file;
pub mod memory;
