//! Ordering tickets inside a column.
//!
//! Sorting always produces a fresh sequence; the stored ticket list is never
//! reordered.

use std::cmp::Ordering;

use icu_collator::{options::CollatorOptions, Collator, CollatorBorrowed, CollatorPreferences};
use once_cell::sync::Lazy;
use tracing::warn;

use super::types::{SortBy, Ticket};

/// Root-locale collator, built once from compiled data.
static COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    match Collator::try_new(CollatorPreferences::default(), CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Collation data unavailable, titles fall back to code point order: {}", e);
            None
        }
    }
});

/// Return the tickets of one group as a new, ordered sequence.
///
/// Both orderings are stable: tickets that compare equal keep their
/// relative input order.
pub fn order_tickets(group: &[&Ticket], sort_by: SortBy) -> Vec<Ticket> {
    let mut ordered: Vec<Ticket> = group.iter().map(|t| (*t).clone()).collect();
    match sort_by {
        SortBy::Priority => ordered.sort_by(compare_priority),
        SortBy::Title => ordered.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    ordered
}

/// Descending priority. Tickets without a priority sort after all others.
pub fn compare_priority(a: &Ticket, b: &Ticket) -> Ordering {
    b.priority.cmp(&a.priority)
}

/// Locale-aware title comparison using root-locale collation.
///
/// Base letters compare first, then accents, then case (lowercase first).
/// Punctuation sorts before digits, digits before letters.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    }
}
