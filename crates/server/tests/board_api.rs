//! In-process API tests for the board endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{column_ids, column_keys, fixtures, TestFixture};
use kanban_core::{BoardConfig, Config, GroupBy, SortBy, SourceError};

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["server"]["port"], 8080);
    assert_eq!(response.body["board"]["group_by"], "status");
    assert_eq!(response.body["board"]["sort_by"], "priority");
}

#[tokio::test]
async fn test_board_before_fetch_is_empty() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/board").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["group_by"], "status");
    assert_eq!(response.body["sort_by"], "priority");
    assert_eq!(response.body["columns"], json!([]));
}

#[tokio::test]
async fn test_board_default_view() {
    let fixture = TestFixture::loaded().await;
    let response = fixture.get("/api/v1/board").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(column_keys(&response.body), vec!["Todo", "In progress"]);
    assert_eq!(column_ids(&response.body, "Todo"), vec!["CAM-1", "CAM-5"]);
    assert_eq!(response.body["columns"][1]["count"], 3);

    let first = &response.body["columns"][0]["tickets"][0];
    assert_eq!(first["title"], "Update user profile page UI");
    assert_eq!(first["userId"], "usr-1");
    assert_eq!(first["tag"][0], "Feature request");
}

#[tokio::test]
async fn test_board_query_override() {
    let fixture = TestFixture::loaded().await;
    let response = fixture
        .get("/api/v1/board?group_by=user&sort_by=title")
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["group_by"], "user");
    assert_eq!(
        column_keys(&response.body),
        vec!["Anoop sharma", "Yogesh", "Shankar Kumar"]
    );
    assert_eq!(
        column_ids(&response.body, "Anoop sharma"),
        vec!["CAM-4", "CAM-1"]
    );
    assert_eq!(response.body["columns"][2]["count"], 0);

    // Override does not change stored preferences
    let prefs = fixture.get("/api/v1/board/preferences").await;
    assert_eq!(prefs.body["group_by"], "status");
}

#[tokio::test]
async fn test_board_partial_override_uses_stored_value() {
    let fixture = TestFixture::loaded().await;
    let response = fixture.get("/api/v1/board?group_by=priority").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["sort_by"], "priority");
    assert_eq!(
        column_keys(&response.body),
        vec!["Urgent", "High", "Low", "No Priority"]
    );
}

#[tokio::test]
async fn test_board_unknown_grouping_is_bad_request() {
    let fixture = TestFixture::loaded().await;
    let response = fixture.get("/api/v1/board?group_by=assignee").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("assignee"));
}

#[tokio::test]
async fn test_update_preferences() {
    let fixture = TestFixture::loaded().await;

    let response = fixture
        .put("/api/v1/board/preferences", json!({ "group_by": "priority" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["group_by"], "priority");
    assert_eq!(response.body["sort_by"], "priority");

    let response = fixture
        .put("/api/v1/board/preferences", json!({ "sort_by": "title" }))
        .await;
    assert_eq!(response.body["group_by"], "priority");
    assert_eq!(response.body["sort_by"], "title");

    let board = fixture.get("/api/v1/board").await;
    assert_eq!(board.body["group_by"], "priority");
    assert_eq!(board.body["sort_by"], "title");
    assert_eq!(column_ids(&board.body, "High"), vec!["CAM-2", "CAM-4"]);
}

#[tokio::test]
async fn test_update_preferences_rejects_unknown_value() {
    let fixture = TestFixture::new();
    let response = fixture
        .put("/api/v1/board/preferences", json!({ "sort_by": "created_at" }))
        .await;

    assert!(response.status.is_client_error());

    let prefs = fixture.get("/api/v1/board/preferences").await;
    assert_eq!(prefs.body["sort_by"], "priority");
}

#[tokio::test]
async fn test_configured_preferences_are_initial() {
    let config = Config {
        board: BoardConfig {
            group_by: GroupBy::User,
            sort_by: SortBy::Title,
        },
        ..Default::default()
    };
    let fixture = TestFixture::with_config(config);
    let response = fixture.get("/api/v1/board/preferences").await;

    assert_eq!(response.body["group_by"], "user");
    assert_eq!(response.body["sort_by"], "title");
}

#[tokio::test]
async fn test_refresh_loads_board() {
    let fixture = TestFixture::new();
    fixture.source.set_payload(fixtures::sample_payload()).await;

    let response = fixture.post("/api/v1/board/refresh", None).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["outcome"], "loaded");
    assert_eq!(response.body["tickets"], 5);
    assert_eq!(response.body["users"], 3);
    assert!(response.body["refreshed_at"].is_string());

    let board = fixture.get("/api/v1/board").await;
    assert_eq!(column_keys(&board.body), vec!["Todo", "In progress"]);
}

#[tokio::test]
async fn test_refresh_failure_keeps_empty_board() {
    let fixture = TestFixture::new();
    fixture
        .source
        .set_next_error(SourceError::ApiError {
            status: 500,
            message: "upstream down".to_string(),
        })
        .await;

    let response = fixture.post("/api/v1/board/refresh", None).await;
    assert_status!(response, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["outcome"], "failed");
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("upstream down"));
    assert!(response.body["refreshed_at"].is_null());

    let board = fixture.get("/api/v1/board").await;
    assert_status!(board, StatusCode::OK);
    assert_eq!(board.body["columns"], json!([]));
}

#[tokio::test]
async fn test_refresh_failure_keeps_previous_board() {
    let fixture = TestFixture::loaded().await;
    fixture.source.fail_with_status(503).await;

    let response = fixture.post("/api/v1/board/refresh", None).await;
    assert_status!(response, StatusCode::BAD_GATEWAY);
    assert!(response.body["refreshed_at"].is_string());

    let board = fixture.get("/api/v1/board").await;
    assert_eq!(column_keys(&board.body), vec!["Todo", "In progress"]);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::loaded().await;
    fixture.get("/api/v1/board").await;

    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("kanban_views_built_total"));
    assert!(response.text.contains("kanban_source_fetches_total"));
    assert!(response.text.contains("kanban_http_requests_total"));
}

#[tokio::test]
async fn test_unmatched_paths_share_one_metrics_label() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/no-such-route-7f3a").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    fixture.get("/random/scan/path-91c2").await;

    let metrics = fixture.get("/metrics").await;
    assert!(metrics.text.contains(r#"path="unmatched""#));
    assert!(!metrics.text.contains("no-such-route-7f3a"));
    assert!(!metrics.text.contains("path-91c2"));
}
