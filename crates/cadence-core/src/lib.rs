//! Core library for the Cadence sprint and task board engine.
//!
//! This crate provides the business logic for managing projects, tasks,
//! epics, and sprints on a kanban board: board and backlog assembly, the
//! transactional task move with column re-sequencing, the sprint lifecycle
//! (planning, active, completed), and the burndown/burnup/velocity math.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for
//!   direct formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! All views also serialize to JSON via serde, so interface layers can emit
//! machine-readable output from the same data.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cadence_core::{
//!     params::{CreateProject, CreateTask},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a tracker instance
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("cadence.db"))
//!     .build()
//!     .await?;
//!
//! // Create a project; its kanban workflow is seeded automatically
//! let project = tracker
//!     .create_project(&CreateProject {
//!         name: "My Project".to_string(),
//!     })
//!     .await?;
//!
//! // Add a task; it lands in the default column
//! let task = tracker
//!     .create_task(&CreateTask {
//!         project_id: project.id,
//!         title: "Design the schema".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Created task: {}", task);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod metrics;
pub mod models;
pub mod params;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use display::{ChartSeries, CreateResult, HistoryEntries, SprintCompletion};
pub use error::{Result, TrackerError};
pub use metrics::ChartPoint;
pub use models::{
    Backlog, BacklogGroup, BoardColumn, BoardFilter, BoardView, Epic, HistoryField, Priority,
    Project, Sprint, SprintReport, SprintStatus, Task, TaskHistoryEntry, WorkflowStatus,
};
pub use params::{
    AddComment, CompleteSprint, CreateEpic, CreateProject, CreateSprint, CreateTask, GetBacklog,
    GetBoard, GetVelocity, Id, MoveChange, MoveTask, SetLabels,
};
pub use tracker::{Tracker, TrackerBuilder};
