//! Partitioning tickets into board columns.

use std::collections::HashMap;

use tracing::debug;

use super::types::{GroupBy, Ticket, User};

/// Column key for tickets without a status.
pub const UNKNOWN_STATUS: &str = "Unknown";

pub const NO_PRIORITY: &str = "No Priority";
pub const URGENT: &str = "Urgent";
pub const HIGH: &str = "High";
pub const MEDIUM: &str = "Medium";
pub const LOW: &str = "Low";

/// Map a numeric priority to its bucket label.
///
/// Checked in order: `0`, `>= 4`, `3`, `2`, then everything else
/// (1, negatives, unset) falls into "Low".
pub fn priority_label(priority: Option<i64>) -> &'static str {
    match priority {
        Some(0) => NO_PRIORITY,
        Some(p) if p >= 4 => URGENT,
        Some(3) => HIGH,
        Some(2) => MEDIUM,
        _ => LOW,
    }
}

/// Column key for a ticket grouped by status.
pub fn status_label(ticket: &Ticket) -> &str {
    ticket
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_STATUS)
}

/// Keyed groups that remember the order in which keys were first seen.
#[derive(Default)]
struct Partition<'a> {
    groups: Vec<(String, Vec<&'a Ticket>)>,
    index: HashMap<String, usize>,
}

impl<'a> Partition<'a> {
    fn seed(&mut self, key: &str) -> usize {
        if let Some(&idx) = self.index.get(key) {
            return idx;
        }
        let idx = self.groups.len();
        self.groups.push((key.to_string(), Vec::new()));
        self.index.insert(key.to_string(), idx);
        idx
    }

    fn push(&mut self, key: &str, ticket: &'a Ticket) {
        let idx = self.seed(key);
        self.groups[idx].1.push(ticket);
    }
}

/// Partition `tickets` by the chosen field.
///
/// Groups come back in first-occurrence order. Grouping by user seeds one
/// group per distinct user name in user-list order, so users without tickets
/// still get an (empty) group. A ticket whose owner matches no user is left
/// out of every group.
pub fn group_tickets<'a>(
    tickets: &'a [Ticket],
    users: &[User],
    group_by: GroupBy,
) -> Vec<(String, Vec<&'a Ticket>)> {
    let mut partition = Partition::default();

    match group_by {
        GroupBy::Status => {
            for ticket in tickets {
                partition.push(status_label(ticket), ticket);
            }
        }
        GroupBy::Priority => {
            for ticket in tickets {
                partition.push(priority_label(ticket.priority), ticket);
            }
        }
        GroupBy::User => {
            let mut names_by_id: HashMap<&str, &str> = HashMap::with_capacity(users.len());
            for user in users {
                partition.seed(&user.name);
                names_by_id.entry(user.id.as_str()).or_insert(user.name.as_str());
            }

            for ticket in tickets {
                match ticket
                    .user_id
                    .as_deref()
                    .and_then(|id| names_by_id.get(id))
                {
                    Some(name) => partition.push(name, ticket),
                    None => debug!(
                        ticket_id = %ticket.id,
                        user_id = ?ticket.user_id,
                        "Ticket owner matches no known user, leaving it off the user board"
                    ),
                }
            }
        }
    }

    partition.groups
}
