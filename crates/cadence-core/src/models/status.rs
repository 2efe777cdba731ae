//! Workflow status model and task priority enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named, ordered stage in a project's workflow (a board column).
///
/// Each project owns an ordered set of statuses. Exactly one is flagged
/// `is_default` (assigned to newly created tasks); any number may be flagged
/// `is_done` (tasks in any of them count as completed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    /// Unique identifier for the status
    pub id: u64,

    /// ID of the owning project
    pub project_id: u64,

    /// Display name of the column
    pub name: String,

    /// Display color (hex string)
    pub color: String,

    /// Order of the column on the board (0-indexed)
    pub position: u32,

    /// Whether new tasks land in this status
    pub is_default: bool,

    /// Whether tasks in this status count as completed
    pub is_done: bool,
}

/// Type-safe enumeration of task priorities.
///
/// Ordering is by urgency: `Critical < High < Medium < Low`, which is the
/// tie-break order used when sorting the backlog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Drop everything
    Critical,

    /// Important, schedule soon
    High,

    /// Normal priority
    #[default]
    Medium,

    /// Nice to have
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort rank: lower is more urgent (`Critical` = 0, `Low` = 3).
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}
