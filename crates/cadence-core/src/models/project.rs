//! Project model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A project owns its workflow statuses, sprints, epics, and tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier for the project
    pub id: u64,

    /// Display name
    pub name: String,

    /// Timestamp when the project was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the project was last updated (UTC)
    pub updated_at: Timestamp,
}
