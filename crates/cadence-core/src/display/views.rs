//! Board, backlog, and chart rendering.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    metrics::ChartPoint,
    models::{Backlog, BoardView, TaskHistoryEntry},
};

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in &self.columns {
            writeln!(f, "## {} ({})", column.status.name, column.tasks.len())?;
            writeln!(f)?;
            if column.tasks.is_empty() {
                writeln!(f, "No tasks.")?;
                writeln!(f)?;
                continue;
            }
            for task in &column.tasks {
                let points = task
                    .story_points
                    .map(|p| format!(" [{p}]"))
                    .unwrap_or_default();
                writeln!(f, "- {}. {}{points} ({})", task.id, task.title, task.priority)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Backlog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Backlog ({} tasks)", self.total())?;
        writeln!(f)?;

        match self {
            Backlog::Flat { tasks, .. } => {
                for task in tasks {
                    let epic = task
                        .epic
                        .as_ref()
                        .map(|e| format!("{} ", e.code))
                        .unwrap_or_default();
                    writeln!(f, "- {epic}{}. {} ({})", task.id, task.title, task.priority)?;
                }
            }
            Backlog::Grouped {
                groups, unassigned, ..
            } => {
                for group in groups {
                    writeln!(f, "## {} {}", group.epic.code, group.epic.title)?;
                    writeln!(f)?;
                    if group.tasks.is_empty() {
                        writeln!(f, "No tasks.")?;
                    }
                    for task in &group.tasks {
                        writeln!(f, "- {}. {} ({})", task.id, task.title, task.priority)?;
                    }
                    writeln!(f)?;
                }
                writeln!(f, "## Unassigned")?;
                writeln!(f)?;
                if unassigned.is_empty() {
                    writeln!(f, "No tasks.")?;
                }
                for task in unassigned {
                    writeln!(f, "- {}. {} ({})", task.id, task.title, task.priority)?;
                }
            }
        }

        Ok(())
    }
}

/// Wrapper type for displaying a burndown or burnup series as a markdown
/// table.
pub struct ChartSeries<'a> {
    pub title: &'a str,
    pub points: &'a [ChartPoint],
}

impl<'a> fmt::Display for ChartSeries<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        if self.points.is_empty() {
            writeln!(f, "No data.")?;
            return Ok(());
        }

        writeln!(f, "| Date | Ideal | Actual |")?;
        writeln!(f, "|------|-------|--------|")?;
        for point in self.points {
            writeln!(
                f,
                "| {} | {:.1} | {:.1} |",
                point.date, point.ideal, point.actual
            )?;
        }
        Ok(())
    }
}

/// Wrapper type for displaying a task's audit trail.
pub struct HistoryEntries(pub Vec<TaskHistoryEntry>);

impl fmt::Display for HistoryEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No history.")?;
            return Ok(());
        }

        for entry in &self.0 {
            let old = entry.old_value.as_deref().unwrap_or("(none)");
            let new = entry.new_value.as_deref().unwrap_or("(none)");
            writeln!(
                f,
                "- {} {}: {} -> {} (user {})",
                LocalDateTime(&entry.created_at),
                entry.field.as_str(),
                old,
                new,
                entry.user_id
            )?;
        }
        Ok(())
    }
}
