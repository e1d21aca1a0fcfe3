//! In-memory adapters for tests and embedding.

mod ingestion;
mod snapshot;

pub use ingestion::StaticTaskIngestion;
pub use snapshot::InMemorySnapshotStore;
