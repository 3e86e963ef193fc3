//! Testing utilities and mock implementations.
//!
//! This module provides a mock board source and record builders, allowing
//! controller and API tests without a live endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use kanban_core::testing::{MockTicketSource, fixtures};
//!
//! let source = MockTicketSource::with_payload(fixtures::sample_payload());
//! source.set_next_error(SourceError::ParseError("bad".into())).await;
//!
//! // Use in BoardController...
//! ```

mod mock_source;

pub use mock_source::MockTicketSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::board::{Ticket, User};
    use crate::source::BoardPayload;

    /// Create an unassigned ticket without labels.
    pub fn ticket(id: &str, title: &str, status: Option<&str>, priority: i64) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            status: status.map(str::to_string),
            priority: Some(priority),
            user_id: None,
            labels: Vec::new(),
        }
    }

    /// Assign a ticket to a user id.
    pub fn assigned(mut ticket: Ticket, user_id: &str) -> Ticket {
        ticket.user_id = Some(user_id.to_string());
        ticket
    }

    /// Attach labels to a ticket.
    pub fn labelled(mut ticket: Ticket, labels: &[&str]) -> Ticket {
        ticket.labels = labels.iter().map(|l| l.to_string()).collect();
        ticket
    }

    pub fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            available: None,
        }
    }

    pub fn payload(tickets: Vec<Ticket>, users: Vec<User>) -> BoardPayload {
        BoardPayload { tickets, users }
    }

    /// A small realistic board: five tickets, three users, and one ticket
    /// (`CAM-5`) whose owner is not in the user list.
    pub fn sample_payload() -> BoardPayload {
        payload(
            vec![
                labelled(
                    assigned(
                        ticket("CAM-1", "Update user profile page UI", Some("Todo"), 4),
                        "usr-1",
                    ),
                    &["Feature request"],
                ),
                assigned(
                    ticket("CAM-2", "Add multi-language support", Some("In progress"), 3),
                    "usr-2",
                ),
                assigned(
                    ticket(
                        "CAM-3",
                        "Optimize database queries for performance",
                        Some("In progress"),
                        1,
                    ),
                    "usr-2",
                ),
                assigned(
                    ticket(
                        "CAM-4",
                        "Implement email notification system",
                        Some("In progress"),
                        3,
                    ),
                    "usr-1",
                ),
                assigned(
                    ticket("CAM-5", "Enhance search functionality", Some("Todo"), 0),
                    "usr-5",
                ),
            ],
            vec![
                user("usr-1", "Anoop sharma"),
                user("usr-2", "Yogesh"),
                user("usr-3", "Shankar Kumar"),
            ],
        )
    }
}
