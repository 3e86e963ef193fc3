//! Board state and the controller that owns it.
//!
//! [`BoardState`] is an immutable value: every change (a fetch, a preference
//! update) builds a new state and swaps it in. Readers take an `Arc` snapshot
//! and compute the view without holding the lock.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::board::{build_view, BoardView, Preferences, PreferencesUpdate, Ticket, User};
use crate::metrics::{
    SOURCE_FETCHES, SOURCE_FETCH_DURATION, TICKETS_LOADED, USERS_LOADED, VIEWS_BUILT,
};
use crate::source::{BoardPayload, TicketSource};

/// Snapshot of everything the board is rendered from.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    tickets: Arc<Vec<Ticket>>,
    users: Arc<Vec<User>>,
    preferences: Preferences,
    refreshed_at: Option<DateTime<Utc>>,
}

impl BoardState {
    /// Empty collections with the given preferences.
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Default::default()
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// When the collections were last replaced by a successful fetch.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// New state with both collections replaced wholesale.
    pub fn with_payload(&self, payload: BoardPayload, at: DateTime<Utc>) -> Self {
        Self {
            tickets: Arc::new(payload.tickets),
            users: Arc::new(payload.users),
            preferences: self.preferences,
            refreshed_at: Some(at),
        }
    }

    /// New state with different display preferences.
    pub fn with_preferences(&self, preferences: Preferences) -> Self {
        Self {
            preferences,
            ..self.clone()
        }
    }

    /// Board view for the stored preferences.
    pub fn view(&self) -> BoardView {
        self.view_with(self.preferences)
    }

    /// Board view for an explicit preference pair.
    pub fn view_with(&self, preferences: Preferences) -> BoardView {
        build_view(&self.tickets, &self.users, preferences)
    }
}

/// Result of a refresh. Fetch failures are reported, never raised.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Loaded { tickets: usize, users: usize },
    Failed { error: String },
}

impl RefreshOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, RefreshOutcome::Loaded { .. })
    }
}

/// Sole owner of the board state.
pub struct BoardController {
    source: Arc<dyn TicketSource>,
    state: RwLock<Arc<BoardState>>,
}

impl BoardController {
    pub fn new(source: Arc<dyn TicketSource>, preferences: Preferences) -> Self {
        Self {
            source,
            state: RwLock::new(Arc::new(BoardState::new(preferences))),
        }
    }

    /// Current immutable state.
    pub async fn snapshot(&self) -> Arc<BoardState> {
        Arc::clone(&*self.state.read().await)
    }

    /// Fetch from the source and replace the collections.
    ///
    /// On failure the error is logged and the current collections are kept.
    pub async fn refresh(&self) -> RefreshOutcome {
        let source = self.source.name();
        let start = Instant::now();

        match self.source.fetch_board().await {
            Ok(payload) => {
                let elapsed = start.elapsed().as_secs_f64();
                SOURCE_FETCHES.with_label_values(&[source, "success"]).inc();
                SOURCE_FETCH_DURATION
                    .with_label_values(&[source, "success"])
                    .observe(elapsed);

                let tickets = payload.tickets.len();
                let users = payload.users.len();

                {
                    let mut guard = self.state.write().await;
                    let next = guard.with_payload(payload, Utc::now());
                    *guard = Arc::new(next);
                }

                TICKETS_LOADED.set(tickets as i64);
                USERS_LOADED.set(users as i64);
                info!("Loaded {} tickets and {} users from {} source", tickets, users, source);

                RefreshOutcome::Loaded { tickets, users }
            }
            Err(e) => {
                let elapsed = start.elapsed().as_secs_f64();
                SOURCE_FETCHES.with_label_values(&[source, "failure"]).inc();
                SOURCE_FETCH_DURATION
                    .with_label_values(&[source, "failure"])
                    .observe(elapsed);

                error!("Failed to fetch tickets: {}", e);
                RefreshOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    pub async fn preferences(&self) -> Preferences {
        self.state.read().await.preferences()
    }

    /// Apply a partial preference change and return the result.
    pub async fn set_preferences(&self, update: PreferencesUpdate) -> Preferences {
        let mut guard = self.state.write().await;
        let preferences = guard.preferences().merged(update);
        if preferences != guard.preferences() {
            info!(
                "Display preferences changed: group_by={}, sort_by={}",
                preferences.group_by, preferences.sort_by
            );
            let next = Arc::new(guard.with_preferences(preferences));
            *guard = next;
        }
        preferences
    }

    /// Board view for the stored preferences.
    pub async fn view(&self) -> BoardView {
        let snapshot = self.snapshot().await;
        Self::record_view(snapshot.view())
    }

    /// Board view for an override preference pair; stored preferences are untouched.
    pub async fn view_with(&self, preferences: Preferences) -> BoardView {
        let snapshot = self.snapshot().await;
        Self::record_view(snapshot.view_with(preferences))
    }

    fn record_view(view: BoardView) -> BoardView {
        VIEWS_BUILT.with_label_values(&[view.group_by.as_str()]).inc();
        view
    }
}
