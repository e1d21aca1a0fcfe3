//! Port contracts for board persistence and free-text ingestion.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod ingestion;
pub mod snapshot;

pub use ingestion::{
    DraftTask, IngestionError, IngestionRequest, IngestionResponse, IngestionResult, TaskIngestion,
};
pub use snapshot::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult};
