//! Board and backlog assembly queries.

use std::collections::HashMap;

use rusqlite::{types::ToSql, params};

use super::task_queries::{build_task_from_row, TASK_COLUMNS};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Backlog, BacklogGroup, BoardColumn, BoardView, Epic, Task},
    params::{GetBacklog, GetBoard},
};

const BACKLOG_TASKS_SQL_TAIL: &str = "FROM tasks t \
    LEFT JOIN epics e ON e.id = t.epic_id \
    WHERE t.project_id = ?1 AND t.sprint_id IS NULL AND t.parent_id IS NULL \
    ORDER BY e.code IS NULL, e.code, \
    CASE t.priority WHEN 'critical' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 ELSE 3 END, \
    t.position";

impl super::Database {
    /// Assembles the kanban board for a project.
    ///
    /// Every workflow status becomes a column, in status-position order, even
    /// when the filters leave it empty. Only top-level tasks appear; within a
    /// column they are ordered by position ascending. Tasks with an epic are
    /// hydrated with it.
    pub fn board(&self, get: &GetBoard) -> Result<BoardView> {
        let statuses = self.list_statuses(get.project_id)?;
        let epics = self.project_epic_map(get.project_id)?;

        let mut query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks t WHERE t.project_id = ?1 AND t.parent_id IS NULL"
        );
        let mut query_params: Vec<Box<dyn ToSql>> = vec![Box::new(get.project_id as i64)];

        if let Some(sprint_id) = get.filter.sprint_id {
            query_params.push(Box::new(sprint_id as i64));
            query.push_str(&format!(" AND t.sprint_id = ?{}", query_params.len()));
        }
        if let Some(epic_id) = get.filter.epic_id {
            query_params.push(Box::new(epic_id as i64));
            query.push_str(&format!(" AND t.epic_id = ?{}", query_params.len()));
        }
        if let Some(assignee_id) = get.filter.assignee_id {
            query_params.push(Box::new(assignee_id as i64));
            query.push_str(&format!(" AND t.assignee_id = ?{}", query_params.len()));
        }

        query.push_str(" ORDER BY t.position");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare board query")?;

        let param_refs: Vec<&dyn ToSql> = query_params.iter().map(|p| p.as_ref()).collect();
        let tasks = stmt
            .query_map(param_refs.as_slice(), build_task_from_row)
            .db_context("Failed to query board tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch board tasks")?;

        let mut by_status: HashMap<u64, Vec<Task>> = HashMap::new();
        for mut task in tasks {
            hydrate_epic(&mut task, &epics);
            by_status.entry(task.status_id).or_default().push(task);
        }

        let columns = statuses
            .into_iter()
            .map(|status| {
                let tasks = by_status.remove(&status.id).unwrap_or_default();
                BoardColumn { status, tasks }
            })
            .collect();

        Ok(BoardView { columns })
    }

    /// Assembles the backlog for a project: top-level tasks with no sprint.
    ///
    /// The flat shape orders by epic code (epic-less tasks last), then
    /// priority, then position. The grouped shape buckets by epic; every
    /// project epic appears even when its bucket is empty.
    pub fn backlog(&self, get: &GetBacklog) -> Result<Backlog> {
        self.require_project(get.project_id)?;

        let query = format!("SELECT {TASK_COLUMNS} {BACKLOG_TASKS_SQL_TAIL}");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare backlog query")?;

        let epics = self.project_epic_map(get.project_id)?;
        let mut tasks = stmt
            .query_map(params![get.project_id as i64], build_task_from_row)
            .db_context("Failed to query backlog tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch backlog tasks")?;
        for task in &mut tasks {
            hydrate_epic(task, &epics);
        }

        let total = tasks.len();

        if !get.group_by_epic {
            return Ok(Backlog::Flat { tasks, total });
        }

        let mut by_epic: HashMap<u64, Vec<Task>> = HashMap::new();
        let mut unassigned = Vec::new();
        for task in tasks {
            match task.epic_id {
                Some(epic_id) => by_epic.entry(epic_id).or_default().push(task),
                None => unassigned.push(task),
            }
        }

        let mut all_epics: Vec<Epic> = epics.into_values().collect();
        all_epics.sort_by(|a, b| a.code.cmp(&b.code));

        let groups = all_epics
            .into_iter()
            .map(|epic| {
                let tasks = by_epic.remove(&epic.id).unwrap_or_default();
                BacklogGroup { epic, tasks }
            })
            .collect();

        Ok(Backlog::Grouped {
            groups,
            unassigned,
            total,
        })
    }

    /// All of a project's epics keyed by id, for hydrating task rows without
    /// a per-task query.
    fn project_epic_map(&self, project_id: u64) -> Result<HashMap<u64, Epic>> {
        let epics = self.list_epics(project_id)?;
        Ok(epics.into_iter().map(|e| (e.id, e)).collect())
    }
}

fn hydrate_epic(task: &mut Task, epics: &HashMap<u64, Epic>) {
    if let Some(epic_id) = task.epic_id {
        task.epic = epics.get(&epic_id).cloned();
    }
}
