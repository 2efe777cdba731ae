//! Task operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{Task, TaskHistoryEntry},
    params::{AddComment, CreateTask, Id, MoveTask, SetLabels},
};

impl Tracker {
    /// Creates a new task or subtask in the project's default status.
    pub async fn create_task(&self, params: &CreateTask) -> Result<Task> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_task(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a task by its ID, hydrated with labels, counts, and epic.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let db_path = self.db_path.clone();
        let task_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_task(task_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Applies a set of move intents to a task atomically and returns the
    /// updated task.
    pub async fn move_task(&self, params: &MoveTask) -> Result<Task> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.move_task(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Replaces a task's label set; returns the normalized set.
    pub async fn set_labels(&self, params: &SetLabels) -> Result<Vec<String>> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_labels(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Adds a comment to a task; returns the comment id.
    pub async fn add_comment(&self, params: &AddComment) -> Result<u64> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_comment(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a task's audit trail, oldest first.
    pub async fn get_task_history(&self, params: &Id) -> Result<Vec<TaskHistoryEntry>> {
        let db_path = self.db_path.clone();
        let task_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_task_history(task_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
