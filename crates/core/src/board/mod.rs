//! Ticket grouping and ordering engine.
//!
//! [`build_view`] is a pure function of the ticket and user collections and
//! the display preferences. It never mutates its inputs and is recomputed in
//! full whenever any of them change.

mod grouping;
mod ordering;
mod types;

pub(crate) use types::null_as_default;

pub use grouping::{
    group_tickets, priority_label, status_label, HIGH, LOW, MEDIUM, NO_PRIORITY, UNKNOWN_STATUS,
    URGENT,
};
pub use ordering::{compare_priority, compare_titles, order_tickets};
pub use types::{
    BoardView, Column, GroupBy, Preferences, PreferencesUpdate, SortBy, Ticket, User,
};

use thiserror::Error;

/// Errors raised when parsing board display choices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Unknown grouping '{0}' (expected one of: status, user, priority)")]
    UnknownGroupBy(String),

    #[error("Unknown ordering '{0}' (expected one of: priority, title)")]
    UnknownSortBy(String),
}

/// Group and order tickets for display.
pub fn build_view(tickets: &[Ticket], users: &[User], preferences: Preferences) -> BoardView {
    let columns = group_tickets(tickets, users, preferences.group_by)
        .into_iter()
        .map(|(key, group)| Column::new(key, order_tickets(&group, preferences.sort_by)))
        .collect();

    BoardView {
        group_by: preferences.group_by,
        sort_by: preferences.sort_by,
        columns,
    }
}
