//! Epic model definition.

use serde::{Deserialize, Serialize};

/// A grouping label for related tasks, used in backlog presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    /// Unique identifier for the epic
    pub id: u64,

    /// ID of the owning project
    pub project_id: u64,

    /// Short sortable code (e.g. "CAD-12")
    pub code: String,

    /// Epic title
    pub title: String,

    /// Display color (hex string)
    pub color: String,

    /// Free-form status label (e.g. "open")
    pub status: String,

    /// Progress percentage, 0-100
    pub progress: u32,
}
