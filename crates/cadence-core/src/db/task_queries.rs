//! Task queries: creation, retrieval, the transactional move operation,
//! labels, comments, and the audit trail.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Transaction};

use super::{parse_opt_timestamp, parse_timestamp};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{HistoryField, Priority, Task, TaskHistoryEntry},
    params::{AddComment, CreateTask, MoveChange, MoveTask, SetLabels},
};

/// Task columns selected everywhere a full task row is needed, including the
/// hydration subselects (subtask count, comment count, ordered label list).
pub(crate) const TASK_COLUMNS: &str = "t.id, t.project_id, t.parent_id, t.epic_id, t.sprint_id, t.status_id, t.title, t.description, t.priority, t.story_points, t.position, t.assignee_id, t.completed_at, t.created_at, t.updated_at, \
    (SELECT COUNT(*) FROM tasks c WHERE c.parent_id = t.id), \
    (SELECT COUNT(*) FROM task_comments tc WHERE tc.task_id = t.id), \
    (SELECT GROUP_CONCAT(label, ',') FROM (SELECT label FROM task_labels l WHERE l.task_id = t.id ORDER BY label))";

const SELECT_TASK_CORE_SQL: &str =
    "SELECT project_id, parent_id, status_id, sprint_id, completed_at, position FROM tasks WHERE id = ?1";
const SELECT_PARENT_SQL: &str = "SELECT project_id, parent_id FROM tasks WHERE id = ?1";
const SELECT_DEFAULT_STATUS_SQL: &str =
    "SELECT id, is_done FROM statuses WHERE project_id = ?1 AND is_default = 1";
const SELECT_STATUS_FOR_MOVE_SQL: &str =
    "SELECT project_id, name, is_done FROM statuses WHERE id = ?1";
const SELECT_STATUS_NAME_SQL: &str = "SELECT name FROM statuses WHERE id = ?1";
const NEXT_COLUMN_POSITION_SQL: &str = "SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE project_id = ?1 AND status_id = ?2 AND parent_id IS NULL";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (project_id, parent_id, epic_id, sprint_id, status_id, title, description, priority, story_points, position, assignee_id, completed_at, created_at, updated_at) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const SELECT_COLUMN_SIBLINGS_SQL: &str = "SELECT id FROM tasks WHERE project_id = ?1 AND status_id = ?2 AND parent_id IS NULL AND id != ?3 ORDER BY position";
const UPDATE_SIBLING_POSITION_SQL: &str = "UPDATE tasks SET position = ?1 WHERE id = ?2";
const UPDATE_MOVED_TASK_SQL: &str = "UPDATE tasks SET status_id = ?1, sprint_id = ?2, completed_at = ?3, position = ?4, updated_at = ?5 WHERE id = ?6";
const CHECK_SPRINT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM sprints WHERE id = ?1)";
const CHECK_EPIC_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM epics WHERE id = ?1 AND project_id = ?2)";
const INSERT_LABEL_SQL: &str = "INSERT INTO task_labels (task_id, label) VALUES (?1, ?2)";
const DELETE_LABELS_SQL: &str = "DELETE FROM task_labels WHERE task_id = ?1";
const SELECT_LABELS_SQL: &str =
    "SELECT label FROM task_labels WHERE task_id = ?1 ORDER BY label";
const TOUCH_TASK_SQL: &str = "UPDATE tasks SET updated_at = ?1 WHERE id = ?2";
const INSERT_COMMENT_SQL: &str =
    "INSERT INTO task_comments (task_id, author_id, body, created_at) VALUES (?1, ?2, ?3, ?4)";
const INSERT_HISTORY_SQL: &str = "INSERT INTO task_history (task_id, user_id, field, old_value, new_value, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_HISTORY_SQL: &str = "SELECT id, task_id, user_id, field, old_value, new_value, created_at FROM task_history WHERE task_id = ?1 ORDER BY created_at, id";
const CHECK_TASK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)";

/// Helper function to construct a Task from a database row
pub(crate) fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    let priority_str: String = row.get(8)?;
    let priority = priority_str.parse::<Priority>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            8,
            Type::Text,
            format!("Invalid priority: {priority_str}").into(),
        )
    })?;

    let labels_str: Option<String> = row.get(17)?;
    let labels = labels_str
        .map(|s| s.split(',').map(String::from).collect())
        .unwrap_or_default();

    Ok(Task {
        id: row.get::<_, i64>(0)? as u64,
        project_id: row.get::<_, i64>(1)? as u64,
        parent_id: row.get::<_, Option<i64>>(2)?.map(|v| v as u64),
        epic_id: row.get::<_, Option<i64>>(3)?.map(|v| v as u64),
        sprint_id: row.get::<_, Option<i64>>(4)?.map(|v| v as u64),
        status_id: row.get::<_, i64>(5)? as u64,
        title: row.get(6)?,
        description: row.get(7)?,
        priority,
        story_points: row.get(9)?,
        position: row.get::<_, i64>(10)? as u32,
        assignee_id: row.get::<_, Option<i64>>(11)?.map(|v| v as u64),
        completed_at: parse_opt_timestamp(12, row.get(12)?)?,
        created_at: parse_timestamp(13, row.get::<_, String>(13)?)?,
        updated_at: parse_timestamp(14, row.get::<_, String>(14)?)?,
        labels,
        subtask_count: row.get::<_, i64>(15)? as u32,
        comment_count: row.get::<_, i64>(16)? as u32,
        epic: None,
    })
}

/// Labels are stored and audited comma-joined, so the comma is reserved.
fn validate_labels(labels: &[String]) -> Result<()> {
    for label in labels {
        if label.contains(',') {
            return Err(TrackerError::invalid_input(
                "labels",
                "Labels may not contain commas",
            ));
        }
    }
    Ok(())
}

/// Records one audit entry inside an open transaction.
fn record_history(
    tx: &Transaction<'_>,
    task_id: u64,
    user_id: u64,
    field: HistoryField,
    old_value: Option<String>,
    new_value: Option<String>,
    now_str: &str,
) -> Result<()> {
    tx.execute(
        INSERT_HISTORY_SQL,
        params![
            task_id as i64,
            user_id as i64,
            field.as_str(),
            old_value,
            new_value,
            now_str
        ],
    )
    .db_context("Failed to insert history entry")?;
    Ok(())
}

/// Rewrites every position in a status column to its 0-based contiguous
/// index, with `moved_task` (when given) inserted at `insert_at`.
/// Returns the final position of the moved task.
fn resequence_column(
    tx: &Transaction<'_>,
    project_id: u64,
    status_id: u64,
    moved_task: Option<u64>,
    insert_at: Option<usize>,
    excluded: u64,
) -> Result<u32> {
    let mut stmt = tx
        .prepare(SELECT_COLUMN_SIBLINGS_SQL)
        .db_context("Failed to prepare sibling query")?;

    let mut siblings: Vec<i64> = stmt
        .query_map(
            params![project_id as i64, status_id as i64, excluded as i64],
            |row| row.get(0),
        )
        .db_context("Failed to query column siblings")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch column siblings")?;

    let mut moved_position = 0;
    if let Some(task_id) = moved_task {
        let index = insert_at.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(index, task_id as i64);
        moved_position = index as u32;
    }

    for (index, sibling_id) in siblings.iter().enumerate() {
        // The moved task's row is written once by the caller's main UPDATE.
        if moved_task == Some(*sibling_id as u64) {
            continue;
        }
        tx.execute(
            UPDATE_SIBLING_POSITION_SQL,
            params![index as i64, sibling_id],
        )
        .db_context("Failed to update sibling position")?;
    }

    Ok(moved_position)
}

impl super::Database {
    /// Creates a new task or subtask.
    ///
    /// The task lands in the project's default status, at the end of that
    /// column. Parent, epic, and sprint references are validated; subtasks
    /// may only nest one level deep.
    pub fn create_task(&mut self, create: &CreateTask) -> Result<Task> {
        self.require_project(create.project_id)?;
        validate_labels(&create.labels)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if let Some(parent_id) = create.parent_id {
            let parent: Option<(i64, Option<i64>)> = tx
                .query_row(SELECT_PARENT_SQL, params![parent_id as i64], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })
                .optional()
                .db_context("Failed to query parent task")?;

            match parent {
                None => return Err(TrackerError::TaskNotFound { id: parent_id }),
                Some((project_id, _)) if project_id as u64 != create.project_id => {
                    return Err(TrackerError::invalid_input(
                        "parentId",
                        "Parent task belongs to a different project",
                    ));
                }
                Some((_, Some(_))) => {
                    return Err(TrackerError::invalid_input(
                        "parentId",
                        "Subtasks cannot have subtasks of their own",
                    ));
                }
                Some((_, None)) => {}
            }
        }

        if let Some(epic_id) = create.epic_id {
            let exists: bool = tx
                .query_row(
                    CHECK_EPIC_EXISTS_SQL,
                    params![epic_id as i64, create.project_id as i64],
                    |row| row.get(0),
                )
                .db_context("Failed to check epic existence")?;
            if !exists {
                return Err(TrackerError::EpicNotFound { id: epic_id });
            }
        }

        if let Some(sprint_id) = create.sprint_id {
            let exists: bool = tx
                .query_row(CHECK_SPRINT_EXISTS_SQL, params![sprint_id as i64], |row| {
                    row.get(0)
                })
                .db_context("Failed to check sprint existence")?;
            if !exists {
                return Err(TrackerError::SprintNotFound { id: sprint_id });
            }
        }

        let (status_id, status_is_done): (i64, bool) = tx
            .query_row(
                SELECT_DEFAULT_STATUS_SQL,
                params![create.project_id as i64],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .db_context("Failed to query default status")?;

        // Subtasks are not board entries; only top-level tasks take a column slot.
        let position: i64 = if create.parent_id.is_none() {
            tx.query_row(
                NEXT_COLUMN_POSITION_SQL,
                params![create.project_id as i64, status_id],
                |row| row.get(0),
            )
            .db_context("Failed to compute column position")?
        } else {
            0
        };

        let now = Timestamp::now();
        let now_str = now.to_string();
        let priority = create.priority.unwrap_or_default();
        let completed_at = status_is_done.then(|| now_str.clone());

        tx.execute(
            INSERT_TASK_SQL,
            params![
                create.project_id as i64,
                create.parent_id.map(|v| v as i64),
                create.epic_id.map(|v| v as i64),
                create.sprint_id.map(|v| v as i64),
                status_id,
                &create.title,
                &create.description,
                priority.as_str(),
                create.story_points,
                position,
                create.assignee_id.map(|v| v as i64),
                completed_at,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert task")?;

        let id = tx.last_insert_rowid() as u64;

        let mut labels = create.labels.clone();
        labels.sort();
        labels.dedup();
        for label in &labels {
            tx.execute(INSERT_LABEL_SQL, params![id as i64, label])
                .db_context("Failed to insert label")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            id,
            project_id: create.project_id,
            parent_id: create.parent_id,
            epic_id: create.epic_id,
            sprint_id: create.sprint_id,
            status_id: status_id as u64,
            title: create.title.clone(),
            description: create.description.clone(),
            priority,
            story_points: create.story_points,
            position: position as u32,
            assignee_id: create.assignee_id,
            completed_at: status_is_done.then_some(now),
            created_at: now,
            updated_at: now,
            labels,
            subtask_count: 0,
            comment_count: 0,
            epic: None,
        })
    }

    /// Retrieves a single task by its ID, hydrated with labels, counts, and
    /// its epic.
    pub fn get_task(&self, task_id: u64) -> Result<Option<Task>> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.id = ?1");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let mut task = stmt
            .query_row(params![task_id as i64], build_task_from_row)
            .optional()
            .db_context("Failed to query task")?;

        if let Some(ref mut task) = task {
            if let Some(epic_id) = task.epic_id {
                task.epic = self.get_epic(epic_id)?;
            }
        }

        Ok(task)
    }

    /// Applies a set of move intents to a task in one transaction.
    ///
    /// Status and sprint changes are audited; position changes re-sequence
    /// the whole target column (and the source column, when the task changed
    /// columns) so positions stay contiguous after every move.
    pub fn move_task(&mut self, mv: &MoveTask) -> Result<Task> {
        if mv.changes.is_empty() {
            return Err(TrackerError::invalid_input(
                "changes",
                "A move must carry at least one change",
            ));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        type TaskCore = (i64, Option<i64>, i64, Option<i64>, Option<String>, i64);
        let (project_id, parent_id, old_status_id, old_sprint_id, old_completed, old_position): TaskCore =
            tx.query_row(SELECT_TASK_CORE_SQL, params![mv.task_id as i64], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    TrackerError::TaskNotFound { id: mv.task_id }
                } else {
                    TrackerError::database_error("Failed to query task", e)
                }
            })?;

        let project_id = project_id as u64;
        let mut status_id = old_status_id as u64;
        let mut sprint_id = old_sprint_id.map(|v| v as u64);
        let mut completed_at = old_completed;
        let mut target_index: Option<usize> = None;

        for change in &mv.changes {
            match change {
                MoveChange::Status { status_id: new_id } => {
                    if *new_id == status_id {
                        continue;
                    }

                    let target: Option<(i64, String, bool)> = tx
                        .query_row(
                            SELECT_STATUS_FOR_MOVE_SQL,
                            params![*new_id as i64],
                            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                        )
                        .optional()
                        .db_context("Failed to query target status")?;

                    let (new_name, is_done) = match target {
                        Some((status_project, name, is_done))
                            if status_project as u64 == project_id =>
                        {
                            (name, is_done)
                        }
                        _ => return Err(TrackerError::StatusNotFound { id: *new_id }),
                    };

                    let old_name: String = tx
                        .query_row(SELECT_STATUS_NAME_SQL, params![status_id as i64], |row| {
                            row.get(0)
                        })
                        .db_context("Failed to query current status")?;

                    record_history(
                        &tx,
                        mv.task_id,
                        mv.user_id,
                        HistoryField::Status,
                        Some(old_name),
                        Some(new_name),
                        &now_str,
                    )?;

                    // completed_at tracks the done flag, never left stale
                    completed_at = if is_done {
                        completed_at.or_else(|| Some(now_str.clone()))
                    } else {
                        None
                    };
                    status_id = *new_id;
                }
                MoveChange::Sprint {
                    sprint_id: new_sprint,
                } => {
                    if *new_sprint == sprint_id {
                        continue;
                    }

                    if let Some(target) = new_sprint {
                        let exists: bool = tx
                            .query_row(CHECK_SPRINT_EXISTS_SQL, params![*target as i64], |row| {
                                row.get(0)
                            })
                            .db_context("Failed to check sprint existence")?;
                        if !exists {
                            return Err(TrackerError::SprintNotFound { id: *target });
                        }
                    }

                    record_history(
                        &tx,
                        mv.task_id,
                        mv.user_id,
                        HistoryField::Sprint,
                        sprint_id.map(|v| v.to_string()),
                        new_sprint.map(|v| v.to_string()),
                        &now_str,
                    )?;

                    sprint_id = *new_sprint;
                }
                MoveChange::Position { index } => {
                    if parent_id.is_some() {
                        return Err(TrackerError::invalid_input(
                            "position",
                            "Subtasks have no column position",
                        ));
                    }
                    target_index = Some(*index as usize);
                }
            }
        }

        let column_changed = status_id != old_status_id as u64;
        let mut position = old_position;

        if parent_id.is_none() && (column_changed || target_index.is_some()) {
            position = resequence_column(
                &tx,
                project_id,
                status_id,
                Some(mv.task_id),
                target_index,
                mv.task_id,
            )? as i64;

            if column_changed {
                // Close the gap the task left behind.
                resequence_column(
                    &tx,
                    project_id,
                    old_status_id as u64,
                    None,
                    None,
                    mv.task_id,
                )?;
            }
        }

        tx.execute(
            UPDATE_MOVED_TASK_SQL,
            params![
                status_id as i64,
                sprint_id.map(|v| v as i64),
                completed_at,
                position,
                &now_str,
                mv.task_id as i64
            ],
        )
        .db_context("Failed to update task")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_task(mv.task_id)?
            .ok_or(TrackerError::TaskNotFound { id: mv.task_id })
    }

    /// Replaces a task's label set, recording one audit entry when the set
    /// actually changed.
    pub fn set_labels(&mut self, set: &SetLabels) -> Result<Vec<String>> {
        validate_labels(&set.labels)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_TASK_EXISTS_SQL, params![set.task_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check task existence")?;
        if !exists {
            return Err(TrackerError::TaskNotFound { id: set.task_id });
        }

        let current: Vec<String> = {
            let mut stmt = tx
                .prepare(SELECT_LABELS_SQL)
                .db_context("Failed to prepare label query")?;
            let rows = stmt
                .query_map(params![set.task_id as i64], |row| row.get(0))
                .db_context("Failed to query labels")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch labels")?;
            rows
        };

        let mut labels = set.labels.clone();
        labels.sort();
        labels.dedup();

        if labels == current {
            return Ok(labels);
        }

        tx.execute(DELETE_LABELS_SQL, params![set.task_id as i64])
            .db_context("Failed to clear labels")?;
        for label in &labels {
            tx.execute(INSERT_LABEL_SQL, params![set.task_id as i64, label])
                .db_context("Failed to insert label")?;
        }

        let now_str = Timestamp::now().to_string();
        let join = |set: &[String]| {
            if set.is_empty() {
                None
            } else {
                Some(set.join(","))
            }
        };
        record_history(
            &tx,
            set.task_id,
            set.user_id,
            HistoryField::Labels,
            join(&current),
            join(&labels),
            &now_str,
        )?;

        tx.execute(TOUCH_TASK_SQL, params![&now_str, set.task_id as i64])
            .db_context("Failed to update task timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(labels)
    }

    /// Adds a comment to a task; returns the comment id.
    pub fn add_comment(&mut self, comment: &AddComment) -> Result<u64> {
        let exists: bool = self
            .connection
            .query_row(
                CHECK_TASK_EXISTS_SQL,
                params![comment.task_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check task existence")?;
        if !exists {
            return Err(TrackerError::TaskNotFound {
                id: comment.task_id,
            });
        }

        let now_str = Timestamp::now().to_string();
        self.connection
            .execute(
                INSERT_COMMENT_SQL,
                params![
                    comment.task_id as i64,
                    comment.author_id as i64,
                    &comment.body,
                    &now_str
                ],
            )
            .db_context("Failed to insert comment")?;

        Ok(self.connection.last_insert_rowid() as u64)
    }

    /// Retrieves a task's audit trail, oldest first.
    pub fn get_task_history(&self, task_id: u64) -> Result<Vec<TaskHistoryEntry>> {
        let exists: bool = self
            .connection
            .query_row(CHECK_TASK_EXISTS_SQL, params![task_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check task existence")?;
        if !exists {
            return Err(TrackerError::TaskNotFound { id: task_id });
        }

        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(params![task_id as i64], |row| {
                let field_str: String = row.get(3)?;
                let field = field_str.parse::<HistoryField>().map_err(|_| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        Type::Text,
                        format!("Invalid history field: {field_str}").into(),
                    )
                })?;

                Ok(TaskHistoryEntry {
                    id: row.get::<_, i64>(0)? as u64,
                    task_id: row.get::<_, i64>(1)? as u64,
                    user_id: row.get::<_, i64>(2)? as u64,
                    field,
                    old_value: row.get(4)?,
                    new_value: row.get(5)?,
                    created_at: parse_timestamp(6, row.get::<_, String>(6)?)?,
                })
            })
            .db_context("Failed to query history")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch history")?;

        Ok(entries)
    }
}
