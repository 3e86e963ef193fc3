//! Mock board source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::source::{BoardPayload, SourceError, TicketSource};

/// Mock implementation of the TicketSource trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable payload
/// - Count fetches for assertions
/// - Simulate failures, once or on every call
///
/// # Example
///
/// ```rust,ignore
/// use kanban_core::testing::{MockTicketSource, fixtures};
///
/// let source = MockTicketSource::new();
/// source.set_payload(fixtures::sample_payload()).await;
///
/// let payload = source.fetch_board().await?;
/// assert_eq!(payload.tickets.len(), 5);
/// ```
#[derive(Debug)]
pub struct MockTicketSource {
    /// Payload returned by successful fetches.
    payload: Arc<RwLock<BoardPayload>>,
    /// Number of fetches performed (including failed ones).
    fetches: Arc<RwLock<usize>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<SourceError>>>,
    /// If set, every fetch fails with an API error carrying this status.
    failing_status: Arc<RwLock<Option<u16>>>,
}

impl Default for MockTicketSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTicketSource {
    /// Create a new mock that returns empty collections.
    pub fn new() -> Self {
        Self {
            payload: Arc::new(RwLock::new(BoardPayload::default())),
            fetches: Arc::new(RwLock::new(0)),
            next_error: Arc::new(RwLock::new(None)),
            failing_status: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a mock preloaded with a payload.
    pub fn with_payload(payload: BoardPayload) -> Self {
        Self {
            payload: Arc::new(RwLock::new(payload)),
            ..Self::new()
        }
    }

    /// Replace the payload returned by subsequent fetches.
    pub async fn set_payload(&self, payload: BoardPayload) {
        *self.payload.write().await = payload;
    }

    /// Get the number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        *self.fetches.read().await
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every fetch fail with an API error until cleared.
    pub async fn fail_with_status(&self, status: u16) {
        *self.failing_status.write().await = Some(status);
    }

    /// Clear any pending or persistent error.
    pub async fn clear_errors(&self) {
        *self.next_error.write().await = None;
        *self.failing_status.write().await = None;
    }

    async fn take_error(&self) -> Option<SourceError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Some(err);
        }
        self.failing_status
            .read()
            .await
            .map(|status| SourceError::ApiError {
                status,
                message: "simulated failure".to_string(),
            })
    }
}

#[async_trait]
impl TicketSource for MockTicketSource {
    async fn fetch_board(&self) -> Result<BoardPayload, SourceError> {
        *self.fetches.write().await += 1;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.payload.read().await.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
