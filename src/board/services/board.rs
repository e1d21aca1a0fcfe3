//! Service owning the board and persisting it after mutations.

use super::ingestion::{IngestionReport, route_drafts};
use crate::board::{
    domain::{Board, BoardConfig, BlockId, ColumnId, DropPosition, NewTask, TaskId},
    ports::{
        IngestionError, IngestionRequest, SnapshotStore, SnapshotStoreError, TaskIngestion,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info, warn};

/// Service-level errors for board persistence and ingestion.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Snapshot store operation failed.
    #[error(transparent)]
    Store(#[from] SnapshotStoreError),
    /// Ingestion port failed.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Tells the service whether a board mutation changed anything.
pub trait MutationOutcome {
    /// Returns `true` when the mutation took effect.
    fn applied(&self) -> bool;
}

impl MutationOutcome for bool {
    fn applied(&self) -> bool {
        *self
    }
}

impl<T> MutationOutcome for Option<T> {
    fn applied(&self) -> bool {
        self.is_some()
    }
}

impl MutationOutcome for usize {
    fn applied(&self) -> bool {
        *self > 0
    }
}

impl MutationOutcome for IngestionReport {
    fn applied(&self) -> bool {
        !self.created_tasks.is_empty() || !self.created_templates.is_empty()
    }
}

/// Board orchestration service.
///
/// Mutations run synchronously against the in-memory board; a successful
/// mutation then schedules a save on the current Tokio runtime without
/// waiting for it. Saves are chained so they land in mutation order.
pub struct BoardService<S, C>
where
    S: SnapshotStore + 'static,
    C: Clock + Send + Sync,
{
    board: Board,
    store: Arc<S>,
    clock: Arc<C>,
    pending: Option<JoinHandle<()>>,
}

impl<S, C> BoardService<S, C>
where
    S: SnapshotStore + 'static,
    C: Clock + Send + Sync,
{
    /// Wraps an existing board without touching the store.
    #[must_use]
    pub const fn new(board: Board, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            board,
            store,
            clock,
            pending: None,
        }
    }

    /// Loads the stored snapshot, or starts a fresh board when nothing is
    /// stored or the store fails.
    pub async fn open(store: Arc<S>, clock: Arc<C>, config: BoardConfig) -> Self {
        let board = match store.load().await {
            Ok(Some(snapshot)) => {
                info!(blocks = snapshot.blocks.len(), "board snapshot loaded");
                Board::from_snapshot(snapshot, config)
            }
            Ok(None) => {
                debug!("no stored board snapshot; starting fresh");
                Board::new(config)
            }
            Err(err) => {
                warn!(error = %err, "board snapshot load failed; starting fresh");
                Board::new(config)
            }
        };
        Self::new(board, store, clock)
    }

    /// Returns the current board state.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the injected clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Applies a mutation and schedules a save when it took effect.
    pub fn mutate<R, F>(&mut self, mutation: F) -> R
    where
        R: MutationOutcome,
        F: FnOnce(&mut Board, &C) -> R,
    {
        let outcome = mutation(&mut self.board, &*self.clock);
        if outcome.applied() {
            self.schedule_save();
        }
        outcome
    }

    /// Adds a task to a block.
    pub fn add_task(&mut self, block_id: BlockId, draft: NewTask) -> Option<TaskId> {
        self.mutate(|board, clock| board.add_task(block_id, draft, clock))
    }

    /// Moves a task to a column.
    pub fn move_to_column(
        &mut self,
        task_id: TaskId,
        target: &ColumnId,
        position: Option<DropPosition>,
    ) -> bool {
        self.mutate(|board, _| board.move_to_column(task_id, target, position))
    }

    /// Moves a task to the terminal stage.
    pub fn mark_done(&mut self, task_id: TaskId) -> bool {
        self.mutate(|board, _| board.mark_done(task_id))
    }

    /// Deletes a task.
    pub fn delete_task(&mut self, task_id: TaskId) -> bool {
        self.mutate(|board, _| board.delete_task(task_id))
    }

    /// Sends free text to the ingestion port and routes the returned drafts
    /// onto the board one by one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Ingestion`] when the port fails. Draft
    /// level problems never fail the call; they are listed in the report.
    pub async fn ingest<I>(
        &mut self,
        ingestion: &I,
        free_text: &str,
        reference_date: NaiveDate,
    ) -> BoardServiceResult<IngestionReport>
    where
        I: TaskIngestion + ?Sized,
    {
        let request = IngestionRequest::new(free_text, reference_date);
        let response = ingestion
            .ingest(&request)
            .await
            .inspect_err(|err| warn!(error = %err, "ingestion request failed"))?;
        let report =
            self.mutate(|board, clock| route_drafts(board, response, reference_date, clock));
        info!(
            tasks = report.created_tasks.len(),
            templates = report.created_templates.len(),
            rejected = report.rejected.len(),
            "ingestion batch routed"
        );
        Ok(report)
    }

    /// Waits for scheduled saves, then saves the current state and reports
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the final save fails.
    pub async fn flush(&mut self) -> BoardServiceResult<()> {
        if let Some(pending) = self.pending.take()
            && let Err(err) = pending.await
        {
            warn!(error = %err, "scheduled board save did not complete");
        }
        self.store.save(&self.board.to_snapshot()).await?;
        Ok(())
    }

    fn schedule_save(&mut self) {
        let Ok(runtime) = Handle::try_current() else {
            warn!("no Tokio runtime available; board save skipped");
            return;
        };
        let snapshot = self.board.to_snapshot();
        let store = Arc::clone(&self.store);
        let previous = self.pending.take();
        self.pending = Some(runtime.spawn(async move {
            if let Some(prior) = previous
                && let Err(err) = prior.await
            {
                warn!(error = %err, "previous board save did not complete");
            }
            if let Err(err) = store.save(&snapshot).await {
                warn!(error = %err, "board save failed");
            }
        }));
    }
}
