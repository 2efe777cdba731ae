//! Display implementations for domain models.
//!
//! Markdown-formatted output for the core domain models, kept apart from the
//! model definitions themselves.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Epic, Priority, Project, Sprint, SprintStatus, Task, WorkflowStatus};

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        Ok(())
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.id)?;
        if self.is_default {
            write!(f, " [default]")?;
        }
        if self.is_done {
            write!(f, " [done]")?;
        }
        Ok(())
    }
}

impl fmt::Display for Epic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} {} (ID: {}, {}%)",
            self.code, self.title, self.id, self.progress
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Priority: {}", self.priority)?;
        if let Some(points) = self.story_points {
            writeln!(f, "- Points: {points}")?;
        }
        if let Some(epic) = &self.epic {
            writeln!(f, "- Epic: {} {}", epic.code, epic.title)?;
        }
        if let Some(sprint_id) = self.sprint_id {
            writeln!(f, "- Sprint: {sprint_id}")?;
        }
        if let Some(assignee) = self.assignee_id {
            writeln!(f, "- Assignee: {assignee}")?;
        }
        if !self.labels.is_empty() {
            writeln!(f, "- Labels: {}", self.labels.join(", "))?;
        }
        if self.subtask_count > 0 {
            writeln!(f, "- Subtasks: {}", self.subtask_count)?;
        }
        if self.comment_count > 0 {
            writeln!(f, "- Comments: {}", self.comment_count)?;
        }
        if let Some(completed) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Sprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {} ({})", self.id, self.name, self.status)?;
        writeln!(f)?;

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            writeln!(f, "- Window: {start} to {end}")?;
        }
        if let Some(goal) = &self.goal {
            writeln!(f, "- Goal: {goal}")?;
        }
        if let Some(points) = self.planned_points {
            writeln!(f, "- Planned points: {points}")?;
        }
        if let Some(points) = self.completed_points {
            writeln!(f, "- Completed points: {points}")?;
        }
        if let Some(started) = &self.started_at {
            writeln!(f, "- Started: {}", LocalDateTime(started))?;
        }
        if let Some(completed) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed))?;
        }

        Ok(())
    }
}
