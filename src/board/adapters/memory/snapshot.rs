//! In-memory snapshot store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::BoardSnapshot,
    ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult},
};

/// Thread-safe in-memory snapshot store.
///
/// Snapshots are held in their JSON encoding so that every save and load
/// exercises the same round-trip as a durable store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    state: Arc<RwLock<InMemorySnapshotState>>,
}

#[derive(Debug, Default)]
struct InMemorySnapshotState {
    encoded: Option<String>,
    saves: usize,
}

impl InMemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Encoding`] if the snapshot cannot be
    /// encoded.
    pub fn with_snapshot(snapshot: &BoardSnapshot) -> SnapshotStoreResult<Self> {
        let encoded = snapshot.to_json().map_err(SnapshotStoreError::encoding)?;
        Ok(Self {
            state: Arc::new(RwLock::new(InMemorySnapshotState {
                encoded: Some(encoded),
                saves: 0,
            })),
        })
    }

    /// Returns how many saves have completed.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.saves)
    }

    /// Returns the stored JSON, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.encoded.clone())
    }
}

fn lock_error(err: impl std::fmt::Display) -> SnapshotStoreError {
    SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>> {
        let state = self.state.read().map_err(lock_error)?;
        state
            .encoded
            .as_deref()
            .map(BoardSnapshot::from_json)
            .transpose()
            .map_err(SnapshotStoreError::encoding)
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()> {
        let encoded = snapshot.to_json().map_err(SnapshotStoreError::encoding)?;
        let mut state = self.state.write().map_err(lock_error)?;
        state.encoded = Some(encoded);
        state.saves += 1;
        Ok(())
    }
}
