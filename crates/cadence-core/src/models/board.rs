//! Assembled board and backlog view shapes.
//!
//! These are the read-model shapes the engine returns for the kanban board
//! and the backlog. They serialize directly to the JSON a front end renders:
//! `{"columns": [{"status": ..., "tasks": [...]}]}` for the board, and either
//! a flat `{"tasks": [...], "total": N}` list or a grouped
//! `{"groups": [{"epic": ..., "tasks": [...]}], "unassigned": [...],
//! "total": N}` shape for the backlog.

use serde::{Deserialize, Serialize};

use super::{Epic, Task, WorkflowStatus};

/// One board column: a workflow status plus its top-level tasks, ordered by
/// position ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    /// The status this column represents
    pub status: WorkflowStatus,

    /// Top-level tasks currently in this status
    pub tasks: Vec<Task>,
}

/// The assembled kanban view: columns ordered by status position.
///
/// Subtasks never appear as top-level entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    /// Columns in board order
    pub columns: Vec<BoardColumn>,
}

/// One backlog group: an epic plus its unscheduled tasks.
///
/// Epics with no matching tasks still appear, with an empty task list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BacklogGroup {
    /// The epic this group represents
    pub epic: Epic,

    /// Unscheduled top-level tasks under this epic
    pub tasks: Vec<Task>,
}

/// The backlog: top-level tasks with no sprint assignment.
///
/// Flat ordering is deterministic: epic code ascending (tasks without an
/// epic last), then priority rank, then position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Backlog {
    /// One group per epic, plus a bucket for tasks without an epic
    Grouped {
        /// Groups in epic-code order
        groups: Vec<BacklogGroup>,
        /// Tasks with no epic
        unassigned: Vec<Task>,
        /// Total number of backlog tasks
        total: usize,
    },
    /// A single ordered list
    Flat {
        /// Tasks in backlog order
        tasks: Vec<Task>,
        /// Total number of backlog tasks
        total: usize,
    },
}

impl Backlog {
    /// Total number of backlog tasks regardless of shape.
    pub fn total(&self) -> usize {
        match self {
            Backlog::Flat { total, .. } | Backlog::Grouped { total, .. } => *total,
        }
    }
}
