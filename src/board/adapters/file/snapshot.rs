//! JSON snapshot file stored in a capability-scoped directory.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::board::{
    domain::{BoardConfig, BoardSnapshot},
    ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult},
};

/// Snapshot store writing a single JSON document.
///
/// Saves go through a temporary sibling file and a rename so a crash never
/// leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    dir: Arc<Dir>,
    file_name: String,
}

impl JsonFileSnapshotStore {
    /// Opens (creating if needed) `path` as the snapshot directory, using the
    /// configured snapshot file name.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(path: &Utf8Path, config: &BoardConfig) -> SnapshotStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(SnapshotStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(SnapshotStoreError::persistence)?;
        Ok(Self::from_dir(dir, &config.snapshot_file_name))
    }

    /// Wraps an already-open directory.
    #[must_use]
    pub fn from_dir(dir: Dir, file_name: &str) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: file_name.to_owned(),
        }
    }

    /// Returns the snapshot file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn temp_name(&self) -> String {
        format!(".{}.tmp", self.file_name)
    }
}

/// Runs blocking filesystem work off the async executor.
async fn run_blocking<F, T>(f: F) -> SnapshotStoreResult<T>
where
    F: FnOnce() -> SnapshotStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|err| {
        SnapshotStoreError::persistence(std::io::Error::other(format!("task join error: {err}")))
    })?
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let contents = run_blocking(move || match dir.read_to_string(&file_name) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotStoreError::persistence(err)),
        })
        .await?;
        contents
            .as_deref()
            .map(BoardSnapshot::from_json)
            .transpose()
            .map_err(SnapshotStoreError::encoding)
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()> {
        let encoded = snapshot.to_json().map_err(SnapshotStoreError::encoding)?;
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let temp_name = self.temp_name();
        run_blocking(move || {
            dir.write(&temp_name, encoded.as_bytes())
                .map_err(SnapshotStoreError::persistence)?;
            dir.rename(&temp_name, &dir, &file_name)
                .map_err(SnapshotStoreError::persistence)
        })
        .await
    }
}
