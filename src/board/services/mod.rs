//! Application services that own a board and drive its ports.

mod board;
mod ingestion;

pub use board::{BoardService, BoardServiceError, BoardServiceResult, MutationOutcome};
pub use ingestion::{DraftRejection, IngestionReport, RejectedDraft, route_drafts};
