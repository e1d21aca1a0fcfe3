//! Port for turning free text into draft tasks.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for ingestion calls.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Free text to interpret relative to a reference day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionRequest {
    /// Raw user input.
    pub free_text_input: String,
    /// Day that relative expressions ("on Friday") resolve against.
    pub reference_date: NaiveDate,
}

impl IngestionRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(free_text_input: impl Into<String>, reference_date: NaiveDate) -> Self {
        Self {
            free_text_input: free_text_input.into(),
            reference_date,
        }
    }
}

/// One task proposed by the ingestion service.
///
/// Fields stay loosely typed, dates and times included, because the service
/// is untrusted: every draft is validated on its own when routed onto the
/// board, so one unreadable value never spoils the rest of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftTask {
    /// Proposed title.
    pub title: String,
    /// Proposed description.
    pub description: String,
    /// Priority label (`low`, `medium`, `high`).
    pub priority: Option<String>,
    /// Column name or identifier to place the task in.
    pub initial_column: Option<String>,
    /// Kind label; `recurring` routes the draft to a template.
    pub kind: Option<String>,
    /// Explicit due date, ISO formatted (`2024-08-16`).
    pub due_date: Option<String>,
    /// Explicit start date, ISO formatted.
    pub start_date: Option<String>,
    /// Weekday tags.
    pub recurring_days: Option<Vec<String>>,
    /// Time of day for recurring drafts (`18:00` or `18:00:00`).
    pub recurring_time: Option<String>,
    /// Time of day for appointments.
    pub appointment_time: Option<String>,
    /// Name of the block the draft belongs in.
    pub suggested_block_name: Option<String>,
}

impl DraftTask {
    /// Creates a draft with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Drafts produced for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngestionResponse {
    /// Proposed tasks.
    pub tasks: Vec<DraftTask>,
    /// Block suggested for the whole batch.
    pub suggested_block: Option<String>,
}

/// Ingestion contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskIngestion: Send + Sync {
    /// Interprets free text into draft tasks.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError`] when the service is unreachable or replies
    /// with something that is not a draft batch.
    async fn ingest(&self, request: &IngestionRequest) -> IngestionResult<IngestionResponse>;
}

/// Errors returned by ingestion implementations.
#[derive(Debug, Clone, Error)]
pub enum IngestionError {
    /// The request carried no text.
    #[error("ingestion input must not be empty")]
    EmptyInput,

    /// The service replied with an unusable payload.
    #[error("invalid ingestion response: {0}")]
    InvalidResponse(String),

    /// Provider-side failure.
    #[error("ingestion provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl IngestionError {
    /// Wraps a provider error.
    #[must_use]
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
