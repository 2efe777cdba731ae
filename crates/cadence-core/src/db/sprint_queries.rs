//! Sprint queries: creation, lifecycle transitions, and point accounting.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use super::{is_constraint_violation, parse_opt_date, parse_opt_timestamp};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Sprint, SprintReport, SprintStatus},
    params::{CompleteSprint, CreateSprint},
};

const INSERT_SPRINT_SQL: &str = "INSERT INTO sprints (project_id, name, goal, status, start_date, end_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SPRINT_COLUMNS: &str = "id, project_id, name, goal, status, start_date, end_date, started_at, completed_at, planned_points, completed_points";
const CHECK_ACTIVE_SPRINT_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM sprints WHERE project_id = ?1 AND status = 'active')";
const SUM_SPRINT_POINTS_SQL: &str =
    "SELECT COALESCE(SUM(COALESCE(story_points, 0)), 0) FROM tasks WHERE sprint_id = ?1";
const START_SPRINT_SQL: &str = "UPDATE sprints SET status = 'active', started_at = ?1, planned_points = ?2 WHERE id = ?3 AND status = 'planning'";
const COMPLETE_SPRINT_SQL: &str = "UPDATE sprints SET status = 'completed', completed_at = ?1, completed_points = ?2 WHERE id = ?3 AND status = 'active'";
const SELECT_SPRINT_TASK_STATES_SQL: &str = "SELECT t.id, COALESCE(t.story_points, 0), s.is_done FROM tasks t JOIN statuses s ON s.id = t.status_id WHERE t.sprint_id = ?1";
const REASSIGN_INCOMPLETE_SQL: &str = "UPDATE tasks SET sprint_id = ?1, updated_at = ?2 WHERE sprint_id = ?3 AND status_id NOT IN (SELECT id FROM statuses WHERE is_done = 1)";
const INSERT_HISTORY_SQL: &str = "INSERT INTO task_history (task_id, user_id, field, old_value, new_value, created_at) VALUES (?1, ?2, 'sprint', ?3, ?4, ?5)";
const CHECK_SPRINT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM sprints WHERE id = ?1)";

/// Helper function to construct a Sprint from a database row
pub(crate) fn build_sprint_from_row(row: &rusqlite::Row) -> rusqlite::Result<Sprint> {
    let status_str: String = row.get(4)?;
    let status = status_str.parse::<SprintStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            format!("Invalid sprint status: {status_str}").into(),
        )
    })?;

    Ok(Sprint {
        id: row.get::<_, i64>(0)? as u64,
        project_id: row.get::<_, i64>(1)? as u64,
        name: row.get(2)?,
        goal: row.get(3)?,
        status,
        start_date: parse_opt_date(5, row.get(5)?)?,
        end_date: parse_opt_date(6, row.get(6)?)?,
        started_at: parse_opt_timestamp(7, row.get(7)?)?,
        completed_at: parse_opt_timestamp(8, row.get(8)?)?,
        planned_points: row.get(9)?,
        completed_points: row.get(10)?,
    })
}

impl super::Database {
    /// Creates a new sprint in the Planning state.
    pub fn create_sprint(&mut self, sprint: &CreateSprint) -> Result<Sprint> {
        self.require_project(sprint.project_id)?;

        if let (Some(start), Some(end)) = (sprint.start_date, sprint.end_date) {
            if end < start {
                return Err(TrackerError::invalid_input(
                    "endDate",
                    "Sprint end date precedes its start date",
                ));
            }
        }

        self.connection
            .execute(
                INSERT_SPRINT_SQL,
                params![
                    sprint.project_id as i64,
                    &sprint.name,
                    &sprint.goal,
                    SprintStatus::Planning.as_str(),
                    sprint.start_date.map(|d| d.to_string()),
                    sprint.end_date.map(|d| d.to_string()),
                ],
            )
            .db_context("Failed to insert sprint")?;

        Ok(Sprint {
            id: self.connection.last_insert_rowid() as u64,
            project_id: sprint.project_id,
            name: sprint.name.clone(),
            goal: sprint.goal.clone(),
            status: SprintStatus::Planning,
            start_date: sprint.start_date,
            end_date: sprint.end_date,
            started_at: None,
            completed_at: None,
            planned_points: None,
            completed_points: None,
        })
    }

    /// Retrieves a sprint by its ID.
    pub fn get_sprint(&self, id: u64) -> Result<Option<Sprint>> {
        let query = format!("SELECT {SPRINT_COLUMNS} FROM sprints WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let sprint = stmt
            .query_row(params![id as i64], build_sprint_from_row)
            .optional()
            .db_context("Failed to query sprint")?;

        Ok(sprint)
    }

    /// Lists a project's sprints, oldest first.
    pub fn list_sprints(&self, project_id: u64) -> Result<Vec<Sprint>> {
        self.require_project(project_id)?;

        let query = format!("SELECT {SPRINT_COLUMNS} FROM sprints WHERE project_id = ?1 ORDER BY id");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let sprints = stmt
            .query_map(params![project_id as i64], build_sprint_from_row)
            .db_context("Failed to query sprints")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch sprints")?;

        Ok(sprints)
    }

    /// Lists a project's completed sprints, most recently completed first,
    /// capped at `limit`.
    pub fn list_completed_sprints(&self, project_id: u64, limit: u32) -> Result<Vec<Sprint>> {
        self.require_project(project_id)?;

        let query = format!(
            "SELECT {SPRINT_COLUMNS} FROM sprints WHERE project_id = ?1 AND status = 'completed' ORDER BY completed_at DESC LIMIT ?2"
        );
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let sprints = stmt
            .query_map(params![project_id as i64, limit as i64], build_sprint_from_row)
            .db_context("Failed to query completed sprints")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch completed sprints")?;

        Ok(sprints)
    }

    /// Transitions a sprint from Planning to Active.
    ///
    /// Rejects with a conflict when the sprint is not in planning or another
    /// sprint of the project is already active. The guard runs inside the
    /// transaction and is backed by a partial unique index on
    /// `(project_id) WHERE status = 'active'`, so two racing starts cannot
    /// both commit. `planned_points` is the point sum over the sprint's
    /// current task set (unestimated tasks count 0).
    pub fn start_sprint(&mut self, sprint_id: u64) -> Result<Sprint> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let query = format!("SELECT {SPRINT_COLUMNS} FROM sprints WHERE id = ?1");
        let sprint = tx
            .query_row(&query, params![sprint_id as i64], build_sprint_from_row)
            .optional()
            .db_context("Failed to query sprint")?
            .ok_or(TrackerError::SprintNotFound { id: sprint_id })?;

        match sprint.status {
            SprintStatus::Planning => {}
            SprintStatus::Active => {
                return Err(TrackerError::conflict(format!(
                    "Sprint {sprint_id} is already active"
                )));
            }
            SprintStatus::Completed => {
                return Err(TrackerError::conflict(format!(
                    "Sprint {sprint_id} is already completed"
                )));
            }
        }

        let other_active: bool = tx
            .query_row(
                CHECK_ACTIVE_SPRINT_SQL,
                params![sprint.project_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check for an active sprint")?;
        if other_active {
            return Err(TrackerError::conflict(format!(
                "Project {} already has an active sprint",
                sprint.project_id
            )));
        }

        let planned_points: f64 = tx
            .query_row(SUM_SPRINT_POINTS_SQL, params![sprint_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to sum sprint points")?;

        let now = Timestamp::now();
        let rows = tx
            .execute(
                START_SPRINT_SQL,
                params![now.to_string(), planned_points, sprint_id as i64],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    // Another start won the race to the unique active index.
                    TrackerError::conflict(format!(
                        "Project {} already has an active sprint",
                        sprint.project_id
                    ))
                } else {
                    TrackerError::database_error("Failed to start sprint", e)
                }
            })?;
        if rows == 0 {
            return Err(TrackerError::conflict(format!(
                "Sprint {sprint_id} is no longer in planning"
            )));
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Sprint {
            status: SprintStatus::Active,
            started_at: Some(now),
            planned_points: Some(planned_points),
            ..sprint
        })
    }

    /// Transitions a sprint from Active to Completed and finalizes its
    /// accounting.
    ///
    /// Tasks in a done status stay attached and their points sum into
    /// `completed_points`; every other task is bulk-reassigned to
    /// `move_incomplete_to` (or the backlog), with a sprint history entry
    /// per reassigned task. Whether the target sprint belongs to the same
    /// project is deliberately not checked.
    pub fn complete_sprint(&mut self, complete: &CompleteSprint) -> Result<(Sprint, SprintReport)> {
        let sprint_id = complete.sprint_id;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let query = format!("SELECT {SPRINT_COLUMNS} FROM sprints WHERE id = ?1");
        let sprint = tx
            .query_row(&query, params![sprint_id as i64], build_sprint_from_row)
            .optional()
            .db_context("Failed to query sprint")?
            .ok_or(TrackerError::SprintNotFound { id: sprint_id })?;

        match sprint.status {
            SprintStatus::Active => {}
            SprintStatus::Planning => {
                return Err(TrackerError::conflict(format!(
                    "Sprint {sprint_id} has not been started"
                )));
            }
            SprintStatus::Completed => {
                return Err(TrackerError::conflict(format!(
                    "Sprint {sprint_id} is already completed"
                )));
            }
        }

        if let Some(target) = complete.move_incomplete_to {
            if target == sprint_id {
                return Err(TrackerError::invalid_input(
                    "moveIncompleteTo",
                    "Cannot carry tasks over into the sprint being completed",
                ));
            }
            let exists: bool = tx
                .query_row(CHECK_SPRINT_EXISTS_SQL, params![target as i64], |row| {
                    row.get(0)
                })
                .db_context("Failed to check target sprint existence")?;
            if !exists {
                return Err(TrackerError::SprintNotFound { id: target });
            }
        }

        // Partition the sprint's tasks by the project's done-status set.
        let task_states: Vec<(i64, f64, bool)> = {
            let mut stmt = tx
                .prepare(SELECT_SPRINT_TASK_STATES_SQL)
                .db_context("Failed to prepare task state query")?;
            let rows = stmt
                .query_map(params![sprint_id as i64], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })
                .db_context("Failed to query sprint tasks")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch sprint tasks")?;
            rows
        };

        let total_tasks = task_states.len() as u32;
        let completed_points: f64 = task_states
            .iter()
            .filter(|(_, _, done)| *done)
            .map(|(_, points, _)| points)
            .sum();
        let completed_tasks = task_states.iter().filter(|(_, _, done)| *done).count() as u32;
        let incomplete: Vec<i64> = task_states
            .iter()
            .filter(|(_, _, done)| !done)
            .map(|(id, _, _)| *id)
            .collect();

        let now = Timestamp::now();
        let now_str = now.to_string();

        let old_value = sprint_id.to_string();
        let new_value = complete.move_incomplete_to.map(|v| v.to_string());
        for task_id in &incomplete {
            tx.execute(
                INSERT_HISTORY_SQL,
                params![
                    task_id,
                    complete.user_id as i64,
                    &old_value,
                    &new_value,
                    &now_str
                ],
            )
            .db_context("Failed to insert carry-over history entry")?;
        }

        // Matches the partition above: a task is incomplete when its own
        // status is not a done status, whichever project that status belongs to.
        tx.execute(
            REASSIGN_INCOMPLETE_SQL,
            params![
                complete.move_incomplete_to.map(|v| v as i64),
                &now_str,
                sprint_id as i64
            ],
        )
        .db_context("Failed to reassign incomplete tasks")?;

        tx.execute(
            COMPLETE_SPRINT_SQL,
            params![&now_str, completed_points, sprint_id as i64],
        )
        .db_context("Failed to complete sprint")?;

        tx.commit().db_context("Failed to commit transaction")?;

        let report = SprintReport {
            total_tasks,
            completed_tasks,
            incomplete_tasks: incomplete.len() as u32,
            completed_points,
            moved_to: complete.move_incomplete_to,
        };

        let sprint = Sprint {
            status: SprintStatus::Completed,
            completed_at: Some(now),
            completed_points: Some(completed_points),
            ..sprint
        };

        Ok((sprint, report))
    }

    /// Point samples for a sprint's chart: each task's estimate and
    /// completion timestamp.
    pub fn sprint_point_samples(
        &self,
        sprint_id: u64,
    ) -> Result<Vec<(Option<f64>, Option<Timestamp>)>> {
        let mut stmt = self
            .connection
            .prepare("SELECT story_points, completed_at FROM tasks WHERE sprint_id = ?1")
            .db_context("Failed to prepare query")?;

        let samples = stmt
            .query_map(params![sprint_id as i64], |row| {
                Ok((row.get(0)?, row.get::<_, Option<String>>(1)?))
            })
            .db_context("Failed to query sprint tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch sprint tasks")?
            .into_iter()
            .map(|(points, completed)| Ok((points, parse_opt_timestamp(1, completed)?)))
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to parse completion timestamps")?;

        Ok(samples)
    }
}
