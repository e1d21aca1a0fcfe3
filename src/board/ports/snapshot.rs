//! Persistence port for whole-board snapshots.

use crate::board::domain::BoardSnapshot;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot store operations.
pub type SnapshotStoreResult<T> = Result<T, SnapshotStoreError>;

/// Loads and saves board snapshots.
///
/// Implementations must round-trip every field exactly, including absent
/// due dates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the stored snapshot.
    ///
    /// Returns `None` when nothing has been saved yet.
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError`] when the snapshot cannot be encoded or
    /// written.
    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()>;
}

/// Errors returned by snapshot store implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotStoreError {
    /// The snapshot could not be encoded or decoded.
    #[error("snapshot encoding error: {0}")]
    Encoding(Arc<serde_json::Error>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotStoreError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps an encoding error.
    #[must_use]
    pub fn encoding(err: serde_json::Error) -> Self {
        Self::Encoding(Arc::new(err))
    }
}
