//! Board API handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use kanban_core::{
    BoardError, BoardView, GroupBy, Preferences, PreferencesUpdate, RefreshOutcome, SortBy,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for viewing the board.
///
/// Either value overrides the stored preference for this request only.
#[derive(Debug, Deserialize)]
pub struct BoardParams {
    pub group_by: Option<String>,
    pub sort_by: Option<String>,
}

impl BoardParams {
    fn has_override(&self) -> bool {
        self.group_by.is_some() || self.sort_by.is_some()
    }

    fn to_update(&self) -> Result<PreferencesUpdate, BoardError> {
        Ok(PreferencesUpdate {
            group_by: self
                .group_by
                .as_deref()
                .map(str::parse::<GroupBy>)
                .transpose()?,
            sort_by: self
                .sort_by
                .as_deref()
                .map(str::parse::<SortBy>)
                .transpose()?,
        })
    }
}

/// Response for a refresh request
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    #[serde(flatten)]
    pub outcome: RefreshOutcome,
    /// Time of the last successful fetch, if any.
    pub refreshed_at: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct BoardErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Get the grouped and ordered board
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BoardParams>,
) -> Result<Json<BoardView>, (StatusCode, Json<BoardErrorResponse>)> {
    if !params.has_override() {
        return Ok(Json(state.board().view().await));
    }

    let update = params.to_update().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(BoardErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let preferences = state.board().preferences().await.merged(update);
    Ok(Json(state.board().view_with(preferences).await))
}

/// Get the stored display preferences
pub async fn get_preferences(State(state): State<Arc<AppState>>) -> Json<Preferences> {
    Json(state.board().preferences().await)
}

/// Change the stored display preferences
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(update): Json<PreferencesUpdate>,
) -> Json<Preferences> {
    Json(state.board().set_preferences(update).await)
}

/// Re-fetch tickets and users from the source
pub async fn refresh_board(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RefreshResponse>) {
    let outcome = state.board().refresh().await;
    let refreshed_at = state
        .board()
        .snapshot()
        .await
        .refreshed_at()
        .map(|t| t.to_rfc3339());

    let status = if outcome.is_loaded() {
        StatusCode::OK
    } else {
        warn!("Board refresh failed, keeping previous data");
        StatusCode::BAD_GATEWAY
    };

    (
        status,
        Json(RefreshResponse {
            outcome,
            refreshed_at,
        }),
    )
}
