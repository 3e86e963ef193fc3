//! Common test utilities for in-process API testing with mocks.
//!
//! This module provides a test fixture that builds the router with a mock
//! board source injected, so the API can be exercised without a live
//! endpoint.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use kanban_core::{
    testing::MockTicketSource, BoardController, Config, Preferences, TicketSource,
};
use kanban_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use kanban_core::testing::fixtures;

/// Test fixture for API testing with a mock board source.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_board() {
///     let fixture = TestFixture::loaded().await;
///     let response = fixture.get("/api/v1/board").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock source - configure payloads and failures
    pub source: Arc<MockTicketSource>,
    /// Controller shared with the router
    pub board: Arc<BoardController>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a fixture with an empty board that has never been fetched.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a fixture with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let source = Arc::new(MockTicketSource::new());
        let board = Arc::new(BoardController::new(
            Arc::clone(&source) as Arc<dyn TicketSource>,
            Preferences::from(&config.board),
        ));

        let state = Arc::new(AppState::new(config, Arc::clone(&board)));
        let router = create_router(state);

        Self {
            router,
            source,
            board,
        }
    }

    /// Create a fixture whose board holds the sample payload.
    pub async fn loaded() -> Self {
        let fixture = Self::new();
        fixture.source.set_payload(fixtures::sample_payload()).await;
        assert!(fixture.board.refresh().await.is_loaded());
        fixture
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<Value>) -> TestResponse {
        self.request("POST", path, body).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Column keys of a board response, in order.
pub fn column_keys(body: &Value) -> Vec<String> {
    body["columns"]
        .as_array()
        .map(|cols| {
            cols.iter()
                .filter_map(|c| c["key"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Ticket ids of one column of a board response, in order.
pub fn column_ids(body: &Value, key: &str) -> Vec<String> {
    body["columns"]
        .as_array()
        .and_then(|cols| cols.iter().find(|c| c["key"] == key))
        .and_then(|c| c["tickets"].as_array())
        .map(|tickets| {
            tickets
                .iter()
                .filter_map(|t| t["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
