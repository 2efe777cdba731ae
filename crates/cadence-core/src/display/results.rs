//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Epic, Project, Sprint, SprintReport, Task};

/// Wrapper type for displaying the result of create operations.
///
/// Formats a success message naming the resource type and ID, followed by the
/// full details of the created resource.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created project with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Epic> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created epic with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Sprint> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created sprint with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying a completed sprint together with its report.
pub struct SprintCompletion {
    pub sprint: Sprint,
    pub report: SprintReport,
}

impl fmt::Display for SprintCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed sprint '{}' (ID: {})", self.sprint.name, self.sprint.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Tasks: {}/{} completed",
            self.report.completed_tasks, self.report.total_tasks
        )?;
        writeln!(f, "- Completed points: {}", self.report.completed_points)?;
        match self.report.moved_to {
            Some(target) if self.report.incomplete_tasks > 0 => writeln!(
                f,
                "- Carried over: {} tasks to sprint {target}",
                self.report.incomplete_tasks
            )?,
            None if self.report.incomplete_tasks > 0 => writeln!(
                f,
                "- Returned to backlog: {} tasks",
                self.report.incomplete_tasks
            )?,
            _ => {}
        }
        Ok(())
    }
}
