//! Integration tests for the persisting board service.

use super::helpers::{SteppingClock, clock, date};
use blockboard::board::{
    adapters::memory::{InMemorySnapshotStore, StaticTaskIngestion},
    domain::{BoardConfig, BoardSnapshot, NewTask},
    ports::{DraftTask, IngestionResponse},
    services::BoardService,
};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_snapshot_survives_a_restart(
    clock: SteppingClock,
    #[from(clock)] restart_clock: SteppingClock,
) -> eyre::Result<()> {
    let store = Arc::new(InMemorySnapshotStore::new());
    let mut service =
        BoardService::open(Arc::clone(&store), Arc::new(clock), BoardConfig::default()).await;
    let block = service
        .mutate(|board, _| board.create_block("Garden", "#16a34a"))
        .ok_or_eyre("block created")?;
    let id = service
        .add_task(block, NewTask::new("Prune roses").due(date(2024, 9, 1)))
        .ok_or_eyre("task added")?;
    service.flush().await?;

    let raw = store.raw().ok_or_eyre("snapshot stored")?;
    let snapshot = BoardSnapshot::from_json(&raw)?;
    ensure!(snapshot.blocks.len() == 2);

    let restarted =
        BoardService::open(Arc::clone(&store), Arc::new(restart_clock), BoardConfig::default())
            .await;
    let task = restarted.board().task(id).ok_or_eyre("task restored")?;
    ensure!(task.due_date() == Some(date(2024, 9, 1)));
    ensure!(task.block_id() == block);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn canned_ingestion_lands_on_the_board(clock: SteppingClock) -> eyre::Result<()> {
    let ingestion = StaticTaskIngestion::from_json(
        r#"{
            "tasks": [
                {"title": "Call plumber", "priority": "high", "initialColumn": "In Progress"},
                {"title": "Swim", "kind": "recurring", "recurringDays": ["tue", "thu"],
                 "recurringTime": "07:30:00"},
                {"title": ""}
            ],
            "suggestedBlock": "Home"
        }"#,
    )?;
    let store = Arc::new(InMemorySnapshotStore::new());
    let mut service =
        BoardService::open(Arc::clone(&store), Arc::new(clock), BoardConfig::default()).await;
    ensure!(service.mutate(|board, _| board.create_block("Home", "#f97316")).is_some());

    let report = service
        .ingest(&ingestion, "call the plumber, swim tue/thu", date(2024, 8, 14))
        .await?;
    service.flush().await?;

    ensure!(report.created_tasks.len() == 1);
    ensure!(report.created_templates.len() == 1);
    ensure!(report.rejected.len() == 1);
    let home = service
        .board()
        .block_by_name("home")
        .ok_or_eyre("home block")?;
    ensure!(home.tasks().len() == 1);
    ensure!(
        home.schedule().is_empty(),
        "ingested templates are not pinned"
    );
    ensure!(service.board().occurrences_on(date(2024, 8, 15)).len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_ingestion_input_is_refused(clock: SteppingClock) -> eyre::Result<()> {
    let ingestion = StaticTaskIngestion::new(IngestionResponse {
        tasks: vec![DraftTask::titled("Never routed")],
        suggested_block: None,
    });
    let store = Arc::new(InMemorySnapshotStore::new());
    let mut service =
        BoardService::open(Arc::clone(&store), Arc::new(clock), BoardConfig::default()).await;

    let result = service.ingest(&ingestion, "   ", date(2024, 8, 14)).await;

    ensure!(result.is_err());
    ensure!(service.board().search(&Default::default()).is_empty());
    Ok(())
}
