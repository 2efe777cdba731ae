//! Project, workflow status, and epic operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{Epic, Project, WorkflowStatus},
    params::{CreateEpic, CreateProject, Id},
};

impl Tracker {
    /// Creates a new project and seeds its default workflow.
    pub async fn create_project(&self, params: &CreateProject) -> Result<Project> {
        let db_path = self.db_path.clone();
        let name = params.name.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_project(&name)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a project by its ID.
    pub async fn get_project(&self, params: &Id) -> Result<Option<Project>> {
        let db_path = self.db_path.clone();
        let project_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_project(project_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists a project's workflow statuses in board order.
    pub async fn list_statuses(&self, params: &Id) -> Result<Vec<WorkflowStatus>> {
        let db_path = self.db_path.clone();
        let project_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_statuses(project_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Creates a new epic in a project.
    pub async fn create_epic(&self, params: &CreateEpic) -> Result<Epic> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_epic(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves an epic by its ID.
    pub async fn get_epic(&self, params: &Id) -> Result<Option<Epic>> {
        let db_path = self.db_path.clone();
        let epic_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_epic(epic_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists a project's epics ordered by code.
    pub async fn list_epics(&self, params: &Id) -> Result<Vec<Epic>> {
        let db_path = self.db_path.clone();
        let project_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_epics(project_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
