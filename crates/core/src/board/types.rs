//! Board data types: tickets, users, display preferences and the view model.

use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::BoardError;

// ============================================================================
// Source Records
// ============================================================================

/// A unit of work shown on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    /// Stable identifier. Numeric ids in the payload are stringified.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Ticket title. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Workflow status (e.g. "Todo", "In progress").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Priority, 0 (none) to 4 (urgent). Out-of-range values are tolerated;
    /// fractional numbers are floored and non-numeric values read as unset.
    #[serde(
        default,
        deserialize_with = "deserialize_priority",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<i64>,
    /// Identifier of the owning user. Not guaranteed to match a known user.
    #[serde(
        default,
        rename = "userId",
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    /// Free-form labels. `null` reads as no labels.
    #[serde(
        default,
        rename = "tag",
        alias = "labels",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub labels: Vec<String>,
}

/// A user tickets can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name, also used as the column key when grouping by user.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Present-but-null fields fall back to the type's default instead of
/// rejecting the whole record.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPriority {
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

fn deserialize_priority<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPriority>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawPriority::Integer(p)) => Some(p),
        Some(RawPriority::Float(p)) if p.is_finite() => Some(p.floor() as i64),
        _ => None,
    })
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

// ============================================================================
// Display Preferences
// ============================================================================

/// Field tickets are partitioned by.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    Status,
    User,
    Priority,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Status => "status",
            GroupBy::User => "user",
            GroupBy::Priority => "priority",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(GroupBy::Status),
            "user" => Ok(GroupBy::User),
            "priority" => Ok(GroupBy::Priority),
            _ => Err(BoardError::UnknownGroupBy(s.to_string())),
        }
    }
}

/// Ordering applied inside each column.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Highest priority first.
    #[default]
    Priority,
    /// Alphabetical by title.
    Title,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Priority => "priority",
            SortBy::Title => "title",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Ok(SortBy::Priority),
            "title" => Ok(SortBy::Title),
            _ => Err(BoardError::UnknownSortBy(s.to_string())),
        }
    }
}

/// The pair of display choices the board is rendered with.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    pub group_by: GroupBy,
    pub sort_by: SortBy,
}

impl Preferences {
    pub fn new(group_by: GroupBy, sort_by: SortBy) -> Self {
        Self { group_by, sort_by }
    }

    /// Return a copy with the fields present in `update` replaced.
    pub fn merged(self, update: PreferencesUpdate) -> Self {
        Self {
            group_by: update.group_by.unwrap_or(self.group_by),
            sort_by: update.sort_by.unwrap_or(self.sort_by),
        }
    }
}

/// Partial preference change; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub group_by: Option<GroupBy>,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
}

// ============================================================================
// View Model
// ============================================================================

/// One column of the board: a group key and its ordered tickets.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub count: usize,
    pub tickets: Vec<Ticket>,
}

impl Column {
    pub fn new(key: impl Into<String>, tickets: Vec<Ticket>) -> Self {
        Self {
            key: key.into(),
            count: tickets.len(),
            tickets,
        }
    }

    /// Ticket ids in display order.
    pub fn ticket_ids(&self) -> Vec<&str> {
        self.tickets.iter().map(|t| t.id.as_str()).collect()
    }
}

/// Grouped and ordered structure handed to the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BoardView {
    pub group_by: GroupBy,
    pub sort_by: SortBy,
    pub columns: Vec<Column>,
}

impl BoardView {
    /// Look up a column by its group key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Column keys in display order.
    pub fn keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of tickets placed on the board across all columns.
    pub fn total_tickets(&self) -> usize {
        self.columns.iter().map(|c| c.count).sum()
    }
}
