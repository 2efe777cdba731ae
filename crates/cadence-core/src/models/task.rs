//! Task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Epic, Priority};

/// A unit of work on the board.
///
/// Tasks may nest one level deep: a task with `parent_id` set is a subtask,
/// and a subtask can never itself be a parent. A task's `completed_at` is
/// non-null exactly when its current status is flagged done; the move
/// operation recomputes it on every status change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the owning project
    pub project_id: u64,

    /// Parent task for subtasks (one level of nesting only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    /// Epic this task belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<u64>,

    /// Sprint this task is assigned to; `None` means backlog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<u64>,

    /// Current workflow status (board column)
    pub status_id: u64,

    /// Brief title/summary of the task
    pub title: String,

    /// Detailed multi-line description
    pub description: Option<String>,

    /// Priority of the task
    pub priority: Priority,

    /// Story point estimate; `None` means unestimated (counts as 0)
    pub story_points: Option<f64>,

    /// Order of the task within its status column (0-indexed)
    pub position: u32,

    /// Assigned user, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,

    /// Set when the task entered a done status, cleared when it left one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,

    /// Labels attached to the task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Number of direct subtasks
    #[serde(default)]
    pub subtask_count: u32,

    /// Number of comments
    #[serde(default)]
    pub comment_count: u32,

    /// The task's epic, hydrated for board and backlog views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<Epic>,
}

impl Task {
    /// Whether this task is a subtask (has a parent).
    pub fn is_subtask(&self) -> bool {
        self.parent_id.is_some()
    }
}
