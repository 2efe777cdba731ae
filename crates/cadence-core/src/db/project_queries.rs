//! Project, workflow status, and epic queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::parse_timestamp;
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Epic, Project, WorkflowStatus},
    params::CreateEpic,
};

const INSERT_PROJECT_SQL: &str =
    "INSERT INTO projects (name, created_at, updated_at) VALUES (?1, ?2, ?3)";
const SELECT_PROJECT_SQL: &str =
    "SELECT id, name, created_at, updated_at FROM projects WHERE id = ?1";
const CHECK_PROJECT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)";
const INSERT_STATUS_SQL: &str = "INSERT INTO statuses (project_id, name, color, position, is_default, is_done) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_STATUSES_SQL: &str = "SELECT id, project_id, name, color, position, is_default, is_done FROM statuses WHERE project_id = ?1 ORDER BY position";
const INSERT_EPIC_SQL: &str =
    "INSERT INTO epics (project_id, code, title, color) VALUES (?1, ?2, ?3, ?4)";
const SELECT_EPIC_SQL: &str =
    "SELECT id, project_id, code, title, color, status, progress FROM epics WHERE id = ?1";
const SELECT_EPICS_SQL: &str = "SELECT id, project_id, code, title, color, status, progress FROM epics WHERE project_id = ?1 ORDER BY code";

const DEFAULT_EPIC_COLOR: &str = "#6366f1";

/// The workflow seeded into every new project: (name, color, done flag).
/// The first entry is the default status for new tasks.
const DEFAULT_WORKFLOW: [(&str, &str, bool); 3] = [
    ("To Do", "#8b949e", false),
    ("In Progress", "#d29922", false),
    ("Done", "#3fb950", true),
];

/// Helper function to construct a WorkflowStatus from a database row
pub(crate) fn build_status_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkflowStatus> {
    Ok(WorkflowStatus {
        id: row.get::<_, i64>(0)? as u64,
        project_id: row.get::<_, i64>(1)? as u64,
        name: row.get(2)?,
        color: row.get(3)?,
        position: row.get::<_, i64>(4)? as u32,
        is_default: row.get(5)?,
        is_done: row.get(6)?,
    })
}

/// Helper function to construct an Epic from a database row
pub(crate) fn build_epic_from_row(row: &rusqlite::Row) -> rusqlite::Result<Epic> {
    Ok(Epic {
        id: row.get::<_, i64>(0)? as u64,
        project_id: row.get::<_, i64>(1)? as u64,
        code: row.get(2)?,
        title: row.get(3)?,
        color: row.get(4)?,
        status: row.get(5)?,
        progress: row.get::<_, i64>(6)? as u32,
    })
}

impl super::Database {
    /// Creates a new project and seeds its default workflow: "To Do"
    /// (default for new tasks), "In Progress", and "Done" (flagged done).
    pub fn create_project(&mut self, name: &str) -> Result<Project> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(INSERT_PROJECT_SQL, params![name, &now_str, &now_str])
            .db_context("Failed to insert project")?;

        let id = tx.last_insert_rowid();

        for (position, (status_name, color, is_done)) in DEFAULT_WORKFLOW.iter().enumerate() {
            tx.execute(
                INSERT_STATUS_SQL,
                params![id, status_name, color, position as i64, position == 0, is_done],
            )
            .db_context("Failed to seed workflow status")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Project {
            id: id as u64,
            name: name.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a project by its ID.
    pub fn get_project(&self, id: u64) -> Result<Option<Project>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PROJECT_SQL)
            .db_context("Failed to prepare query")?;

        let project = stmt
            .query_row(params![id as i64], |row| {
                Ok(Project {
                    id: row.get::<_, i64>(0)? as u64,
                    name: row.get(1)?,
                    created_at: parse_timestamp(2, row.get::<_, String>(2)?)?,
                    updated_at: parse_timestamp(3, row.get::<_, String>(3)?)?,
                })
            })
            .optional()
            .db_context("Failed to query project")?;

        Ok(project)
    }

    /// Returns an error unless the project exists.
    pub(crate) fn require_project(&self, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(CHECK_PROJECT_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check project existence")?;

        if exists {
            Ok(())
        } else {
            Err(TrackerError::ProjectNotFound { id })
        }
    }

    /// Lists a project's workflow statuses in board order.
    pub fn list_statuses(&self, project_id: u64) -> Result<Vec<WorkflowStatus>> {
        self.require_project(project_id)?;

        let mut stmt = self
            .connection
            .prepare(SELECT_STATUSES_SQL)
            .db_context("Failed to prepare query")?;

        let statuses = stmt
            .query_map(params![project_id as i64], build_status_from_row)
            .db_context("Failed to query statuses")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch statuses")?;

        Ok(statuses)
    }

    /// Creates a new epic in the given project.
    pub fn create_epic(&mut self, epic: &CreateEpic) -> Result<Epic> {
        self.require_project(epic.project_id)?;

        let color = epic.color.as_deref().unwrap_or(DEFAULT_EPIC_COLOR);

        self.connection
            .execute(
                INSERT_EPIC_SQL,
                params![epic.project_id as i64, &epic.code, &epic.title, color],
            )
            .db_context("Failed to insert epic")?;

        Ok(Epic {
            id: self.connection.last_insert_rowid() as u64,
            project_id: epic.project_id,
            code: epic.code.clone(),
            title: epic.title.clone(),
            color: color.into(),
            status: "open".into(),
            progress: 0,
        })
    }

    /// Retrieves an epic by its ID.
    pub fn get_epic(&self, id: u64) -> Result<Option<Epic>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_EPIC_SQL)
            .db_context("Failed to prepare query")?;

        let epic = stmt
            .query_row(params![id as i64], build_epic_from_row)
            .optional()
            .db_context("Failed to query epic")?;

        Ok(epic)
    }

    /// Lists a project's epics ordered by code.
    pub fn list_epics(&self, project_id: u64) -> Result<Vec<Epic>> {
        self.require_project(project_id)?;

        let mut stmt = self
            .connection
            .prepare(SELECT_EPICS_SQL)
            .db_context("Failed to prepare query")?;

        let epics = stmt
            .query_map(params![project_id as i64], build_epic_from_row)
            .db_context("Failed to query epics")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch epics")?;

        Ok(epics)
    }
}
