//! Board and backlog assembly operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{Backlog, BoardView},
    params::{GetBacklog, GetBoard},
};

impl Tracker {
    /// Assembles the kanban board for a project, applying any filters.
    pub async fn board(&self, params: &GetBoard) -> Result<BoardView> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.board(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Assembles the backlog for a project, flat or grouped by epic.
    pub async fn backlog(&self, params: &GetBacklog) -> Result<Backlog> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.backlog(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
