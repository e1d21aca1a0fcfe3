//! File-backed adapters.

mod snapshot;

pub use snapshot::JsonFileSnapshotStore;
