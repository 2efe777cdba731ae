//! Parameter structures for Cadence operations
//!
//! Shared parameter structures usable across different interfaces (CLI,
//! future HTTP layer, tests) without framework-specific derives. Interface
//! layers wrap these with their own derives (clap `Args`, etc.) and convert
//! via `From`, keeping the core free of UI framework dependencies.
//!
//! The move operation is deliberately not a bag of optional fields: it takes
//! a list of tagged [`MoveChange`] intents so a position reorder can never be
//! applied apart from the status/sprint write it belongs with — the whole
//! list lands in one transaction or not at all.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{BoardFilter, Priority};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like get_task, get_sprint, start_sprint, burndown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new project.
///
/// Project creation seeds the default workflow: "To Do" (default),
/// "In Progress", and "Done" (flagged done).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    /// Name of the project (required)
    pub name: String,
}

/// Parameters for creating a new epic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEpic {
    /// Project the epic belongs to
    pub project_id: u64,
    /// Short sortable code (e.g. "CAD-12")
    pub code: String,
    /// Epic title
    pub title: String,
    /// Optional display color (hex string)
    pub color: Option<String>,
}

/// Parameters for creating a new sprint (in Planning).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSprint {
    /// Project the sprint belongs to
    pub project_id: u64,
    /// Display name of the sprint
    pub name: String,
    /// Optional sprint goal
    pub goal: Option<String>,
    /// First day of the sprint window
    pub start_date: Option<Date>,
    /// Last day of the sprint window (inclusive)
    pub end_date: Option<Date>,
}

/// Parameters for creating a new task or subtask.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// Project the task belongs to
    pub project_id: u64,
    /// Brief title/summary of the task
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Parent task id to create a subtask (one level only)
    pub parent_id: Option<u64>,
    /// Epic to attach the task to
    pub epic_id: Option<u64>,
    /// Sprint to schedule the task into; `None` means backlog
    pub sprint_id: Option<u64>,
    /// Priority (defaults to medium)
    pub priority: Option<Priority>,
    /// Story point estimate
    pub story_points: Option<f64>,
    /// User to assign the task to
    pub assignee_id: Option<u64>,
    /// Labels to attach
    #[serde(default)]
    pub labels: Vec<String>,
}

/// One tagged intent within a task move.
///
/// The tag doubles as the audit field category the change is recorded under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "field", rename_all = "lowercase")]
pub enum MoveChange {
    /// Move the task to another status (column)
    #[serde(rename_all = "camelCase")]
    Status {
        /// Target status; must belong to the task's project
        status_id: u64,
    },
    /// Reassign the task to a sprint, or to the backlog with `None`
    #[serde(rename_all = "camelCase")]
    Sprint {
        /// Target sprint; `None` returns the task to the backlog
        sprint_id: Option<u64>,
    },
    /// Place the task at a target index within its (possibly just-updated)
    /// status column; the whole column re-sequences
    Position {
        /// 0-based target index, clamped to the column length
        index: u32,
    },
}

/// Parameters for the task move operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTask {
    /// Task to move
    pub task_id: u64,
    /// Acting user, stamped on history entries
    pub user_id: u64,
    /// Changes to apply atomically; must not be empty
    pub changes: Vec<MoveChange>,
}

/// Parameters for replacing a task's label set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLabels {
    /// Task to relabel
    pub task_id: u64,
    /// The complete new label set
    pub labels: Vec<String>,
    /// Acting user, stamped on the history entry
    pub user_id: u64,
}

/// Parameters for adding a comment to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddComment {
    /// Task to comment on
    pub task_id: u64,
    /// Commenting user
    pub author_id: u64,
    /// Comment body
    pub body: String,
}

/// Parameters for completing a sprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSprint {
    /// Sprint to complete; must be active
    pub sprint_id: u64,
    /// Sprint to carry incomplete tasks over to; `None` means backlog
    pub move_incomplete_to: Option<u64>,
    /// Acting user, stamped on carry-over history entries
    pub user_id: u64,
}

/// Parameters for assembling the board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBoard {
    /// Project whose board to assemble
    pub project_id: u64,
    /// Optional sprint/epic/assignee filters
    #[serde(flatten)]
    pub filter: BoardFilter,
}

/// Parameters for assembling the backlog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBacklog {
    /// Project whose backlog to assemble
    pub project_id: u64,
    /// Group tasks by epic instead of returning a flat list
    #[serde(default)]
    pub group_by_epic: bool,
}

/// Parameters for the velocity calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVelocity {
    /// Project to compute velocity for
    pub project_id: u64,
    /// How many recently completed sprints to average over (default 5)
    pub limit: Option<u32>,
}
