//! Data models for the sprint/task board engine.
//!
//! This module contains the core domain models: projects, workflow statuses,
//! tasks, sprints, epics, history entries, and the assembled board/backlog
//! shapes. Display implementations for these models live in
//! [`crate::display`] to keep data structures and presentation separate.
//!
//! All models derive serde so the assembled shapes serialize directly to the
//! JSON contract a front end consumes (`columns[].tasks[]`,
//! `groups[].epic`/`tasks`, chart `data[]` of `{date, ideal, actual}`).
//! Field names serialize in camelCase to match that contract.

pub mod board;
pub mod epic;
pub mod filters;
pub mod history;
pub mod project;
pub mod sprint;
pub mod status;
pub mod task;


// Re-export all public types at the models level
pub use board::{Backlog, BacklogGroup, BoardColumn, BoardView};
pub use epic::Epic;
pub use filters::BoardFilter;
pub use history::{HistoryField, TaskHistoryEntry};
pub use project::Project;
pub use sprint::{Sprint, SprintReport, SprintStatus};
pub use status::{Priority, WorkflowStatus};
pub use task::Task;
