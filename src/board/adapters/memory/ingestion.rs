//! Canned ingestion adapter.

use async_trait::async_trait;

use crate::board::ports::{
    IngestionError, IngestionRequest, IngestionResponse, IngestionResult, TaskIngestion,
};

/// Ingestion adapter that answers every request with the same response.
#[derive(Debug, Clone, Default)]
pub struct StaticTaskIngestion {
    response: IngestionResponse,
}

impl StaticTaskIngestion {
    /// Creates an adapter replying with `response`.
    #[must_use]
    pub const fn new(response: IngestionResponse) -> Self {
        Self { response }
    }

    /// Creates an adapter from a JSON-encoded response.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::InvalidResponse`] when `raw` does not decode
    /// into a draft batch.
    pub fn from_json(raw: &str) -> IngestionResult<Self> {
        serde_json::from_str(raw)
            .map(Self::new)
            .map_err(|err| IngestionError::InvalidResponse(err.to_string()))
    }
}

#[async_trait]
impl TaskIngestion for StaticTaskIngestion {
    async fn ingest(&self, request: &IngestionRequest) -> IngestionResult<IngestionResponse> {
        if request.free_text_input.trim().is_empty() {
            return Err(IngestionError::EmptyInput);
        }
        Ok(self.response.clone())
    }
}
