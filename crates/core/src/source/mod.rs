//! Remote source of board data.
//!
//! The board is fed by a single endpoint returning every ticket and user in
//! one JSON document. [`HttpTicketSource`] is the production implementation;
//! tests substitute [`crate::testing::MockTicketSource`].

mod http;

pub use http::HttpTicketSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{null_as_default, Ticket, User};

/// Errors that can occur when fetching board data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Response body was not a valid board payload.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Source could not be built from its configuration.
    #[error("Source not configured: {0}")]
    NotConfigured(String),
}

/// Everything the endpoint returns: the full ticket and user collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tickets: Vec<Ticket>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<User>,
}

/// Trait for board data sources.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Fetch the complete ticket and user collections.
    async fn fetch_board(&self) -> Result<BoardPayload, SourceError>;

    /// Short name of this source, for logs and metrics.
    fn name(&self) -> &'static str;
}
