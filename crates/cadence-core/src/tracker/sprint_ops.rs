//! Sprint lifecycle and chart operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    metrics::{self, ChartPoint},
    models::{Sprint, SprintReport},
    params::{CompleteSprint, CreateSprint, GetVelocity, Id},
};

/// How many completed sprints feed the velocity average by default.
const DEFAULT_VELOCITY_WINDOW: u32 = 5;

impl Tracker {
    /// Creates a new sprint in the Planning state.
    pub async fn create_sprint(&self, params: &CreateSprint) -> Result<Sprint> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_sprint(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a sprint by its ID.
    pub async fn get_sprint(&self, params: &Id) -> Result<Option<Sprint>> {
        let db_path = self.db_path.clone();
        let sprint_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_sprint(sprint_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists a project's sprints, oldest first.
    pub async fn list_sprints(&self, params: &Id) -> Result<Vec<Sprint>> {
        let db_path = self.db_path.clone();
        let project_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_sprints(project_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Transitions a sprint from Planning to Active, snapshotting its planned
    /// points.
    pub async fn start_sprint(&self, params: &Id) -> Result<Sprint> {
        let db_path = self.db_path.clone();
        let sprint_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.start_sprint(sprint_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Transitions a sprint from Active to Completed, carrying incomplete
    /// tasks over, and returns the completion report.
    pub async fn complete_sprint(&self, params: &CompleteSprint) -> Result<(Sprint, SprintReport)> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.complete_sprint(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Computes a sprint's burndown series.
    ///
    /// Requires the sprint to have both a start and an end date.
    pub async fn burndown(&self, params: &Id) -> Result<Vec<ChartPoint>> {
        self.chart(params.id, metrics::burndown).await
    }

    /// Computes a sprint's burnup series.
    ///
    /// Requires the sprint to have both a start and an end date.
    pub async fn burnup(&self, params: &Id) -> Result<Vec<ChartPoint>> {
        self.chart(params.id, metrics::burnup).await
    }

    /// Average completed points over the project's recently completed
    /// sprints; 0.0 when none have completed.
    pub async fn velocity(&self, params: &GetVelocity) -> Result<f64> {
        let db_path = self.db_path.clone();
        let project_id = params.project_id;
        let limit = params.limit.unwrap_or(DEFAULT_VELOCITY_WINDOW);

        let points = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_completed_sprints(project_id, limit)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let points: Vec<f64> = points
            .iter()
            .map(|s| s.completed_points.unwrap_or(0.0))
            .collect();
        Ok(metrics::velocity(&points))
    }

    async fn chart(
        &self,
        sprint_id: u64,
        series: fn(jiff::civil::Date, jiff::civil::Date, &[metrics::PointSample]) -> Vec<ChartPoint>,
    ) -> Result<Vec<ChartPoint>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let sprint = db
                .get_sprint(sprint_id)?
                .ok_or(TrackerError::SprintNotFound { id: sprint_id })?;

            let (start, end) = match (sprint.start_date, sprint.end_date) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(TrackerError::invalid_input(
                        "sprintId",
                        "Sprint has no date window to chart",
                    ));
                }
            };

            let samples = db.sprint_point_samples(sprint_id)?;
            Ok(series(start, end, &samples))
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
