//! Shared world state for board movement BDD scenarios.

use std::sync::Arc;

use blockboard::board::{
    adapters::memory::InMemorySnapshotStore,
    domain::{Board, BoardConfig, ColumnId, Task},
    services::BoardService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemorySnapshotStore, DefaultClock>;

/// Scenario world for board movement behaviour tests.
pub struct MovementWorld {
    pub store: Arc<InMemorySnapshotStore>,
    pub service: TestBoardService,
}

impl MovementWorld {
    /// Creates a world with a fresh board over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemorySnapshotStore::new());
        let service = BoardService::new(
            Board::new(BoardConfig::default()),
            Arc::clone(&store),
            Arc::new(DefaultClock),
        );
        Self { store, service }
    }

    /// Finds a stored task by title.
    pub fn task_titled(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.service
            .board()
            .blocks()
            .iter()
            .flat_map(|block| block.tasks())
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?}"))
    }

    /// Resolves a column by display name.
    pub fn column(&self, name: &str) -> Result<ColumnId, eyre::Report> {
        self.service
            .board()
            .columns()
            .resolve(name)
            .map(|column| column.id().clone())
            .ok_or_else(|| eyre::eyre!("no column named {name:?}"))
    }
}

impl Default for MovementWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MovementWorld {
    MovementWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
