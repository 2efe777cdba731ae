//! Task history (audit trail) models.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The field categories an audit entry can record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryField {
    /// Status (column) changed; values are status names
    Status,

    /// Sprint assignment changed; values are raw sprint ids
    Sprint,

    /// Label set changed; values are comma-joined labels
    Labels,
}

impl FromStr for HistoryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "status" => Ok(HistoryField::Status),
            "sprint" => Ok(HistoryField::Sprint),
            "labels" => Ok(HistoryField::Labels),
            _ => Err(format!("Invalid history field: {s}")),
        }
    }
}

impl HistoryField {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryField::Status => "status",
            HistoryField::Sprint => "sprint",
            HistoryField::Labels => "labels",
        }
    }
}

/// An immutable audit record of one observed field mutation.
///
/// Created exactly once per mutation, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskHistoryEntry {
    /// Unique identifier for the entry
    pub id: u64,

    /// Task the mutation applied to
    pub task_id: u64,

    /// The acting user
    pub user_id: u64,

    /// Which field category changed
    pub field: HistoryField,

    /// Value before the change
    pub old_value: Option<String>,

    /// Value after the change
    pub new_value: Option<String>,

    /// When the mutation was observed (UTC)
    pub created_at: Timestamp,
}
