//! High-level tracker API for the Cadence board engine.
//!
//! [`Tracker`] is the central coordinator between interface layers and the
//! database. It holds only the database path; each operation opens a fresh
//! connection on a blocking thread via `spawn_blocking`, so the async facade
//! never blocks an executor thread on SQLite.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances with configuration
//! - [`project_ops`]: Project, workflow status, and epic operations
//! - [`task_ops`]: Task creation, moves, labels, comments, and history
//! - [`sprint_ops`]: Sprint lifecycle, burndown/burnup, and velocity
//! - [`board_ops`]: Board and backlog assembly

use std::path::PathBuf;

pub mod builder;
pub mod board_ops;
pub mod project_ops;
pub mod sprint_ops;
pub mod task_ops;


pub use builder::TrackerBuilder;

/// Main tracker interface for managing projects, tasks, and sprints.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
}

impl Tracker {
    /// Creates a new tracker with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
