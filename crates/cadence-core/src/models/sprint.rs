//! Sprint model, lifecycle status, and completion report.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Type-safe enumeration of sprint lifecycle states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SprintStatus {
    /// Sprint is being planned; tasks can be pulled in freely
    #[default]
    Planning,

    /// Sprint is running; at most one per project
    Active,

    /// Sprint is finished; accounting is frozen
    Completed,
}

impl FromStr for SprintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(SprintStatus::Planning),
            "active" => Ok(SprintStatus::Active),
            "completed" => Ok(SprintStatus::Completed),
            _ => Err(format!("Invalid sprint status: {s}")),
        }
    }
}

impl SprintStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintStatus::Planning => "planning",
            SprintStatus::Active => "active",
            SprintStatus::Completed => "completed",
        }
    }
}

/// A time-boxed container of tasks.
///
/// Lifecycle: created in `Planning`; `start_sprint` moves it to `Active`
/// (computing `planned_points` from its task set); `complete_sprint` moves it
/// to `Completed` (computing `completed_points` and reassigning unfinished
/// tasks).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Unique identifier for the sprint
    pub id: u64,

    /// ID of the owning project
    pub project_id: u64,

    /// Display name of the sprint
    pub name: String,

    /// Sprint goal, if stated
    pub goal: Option<String>,

    /// Current lifecycle state
    pub status: SprintStatus,

    /// First day of the sprint window
    pub start_date: Option<Date>,

    /// Last day of the sprint window (inclusive)
    pub end_date: Option<Date>,

    /// When the sprint was started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,

    /// When the sprint was completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Sum of story points at start time
    pub planned_points: Option<f64>,

    /// Sum of story points over done tasks at completion time
    pub completed_points: Option<f64>,
}

/// Accounting summary returned by sprint completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SprintReport {
    /// Number of tasks that were in the sprint
    pub total_tasks: u32,

    /// Tasks whose status was flagged done
    pub completed_tasks: u32,

    /// Tasks carried over (reassigned or returned to backlog)
    pub incomplete_tasks: u32,

    /// Points over the done tasks (unestimated tasks count 0)
    pub completed_points: f64,

    /// Sprint the incomplete tasks were moved to; `None` means backlog
    pub moved_to: Option<u64>,
}
