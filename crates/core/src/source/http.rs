//! HTTP board source.
//!
//! One unauthenticated GET against a fixed endpoint. No query parameters,
//! no pagination, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::{BoardPayload, SourceError, TicketSource};
use crate::config::SourceConfig;

/// Fetches board data from a JSON endpoint.
pub struct HttpTicketSource {
    client: Client,
    url: Url,
}

impl HttpTicketSource {
    /// Create a new HTTP source.
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let url = Url::parse(&config.url).map_err(|e| {
            SourceError::NotConfigured(format!("Invalid source url '{}': {}", config.url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl TicketSource for HttpTicketSource {
    async fn fetch_board(&self) -> Result<BoardPayload, SourceError> {
        debug!("Fetching board data from {}", self.url);

        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: BoardPayload = response.json().await.map_err(|e| {
            SourceError::ParseError(format!("Failed to parse board response: {}", e))
        })?;

        debug!(
            "Fetched {} tickets and {} users",
            payload.tickets.len(),
            payload.users.len()
        );

        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
