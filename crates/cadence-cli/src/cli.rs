//! Command handlers bridging parsed arguments to the core tracker.
//!
//! Each handler converts its clap argument struct into the matching core
//! parameter type, invokes the tracker, and renders the outcome either as
//! markdown through the terminal renderer or as JSON when `--json` is set.

use anyhow::{bail, Result};
use cadence_core::{
    display::{ChartSeries, CreateResult, HistoryEntries, SprintCompletion},
    params::Id,
    Tracker,
};
use serde::Serialize;
use serde_json::json;

use crate::{
    args::{EpicCommands, ProjectCommands, SprintCommands, TaskCommands},
    renderer::TerminalRenderer,
};

/// CLI command dispatcher holding the tracker and output configuration.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    /// Create a new CLI handler.
    pub fn new(tracker: Tracker, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            tracker,
            renderer,
            json,
        }
    }

    /// Render a value: JSON when requested, markdown otherwise.
    fn emit<T: Serialize, D: std::fmt::Display>(&self, value: &T, display: D) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        } else {
            self.renderer.render(&display.to_string())
        }
    }

    pub async fn handle_project_command(&self, command: ProjectCommands) -> Result<()> {
        match command {
            ProjectCommands::Create(args) => {
                let project = self.tracker.create_project(&args.into()).await?;
                self.emit(&project, CreateResult::new(project.clone()))
            }
            ProjectCommands::Show(args) => {
                let id = args.id;
                match self.tracker.get_project(&Id { id }).await? {
                    Some(project) => self.emit(&project, &project),
                    None => bail!("Project {id} not found"),
                }
            }
            ProjectCommands::Statuses(args) => {
                let statuses = self.tracker.list_statuses(&Id { id: args.id }).await?;
                let listing = statuses
                    .iter()
                    .map(|s| format!("- {s}\n"))
                    .collect::<String>();
                self.emit(&statuses, listing)
            }
        }
    }

    pub async fn handle_epic_command(&self, command: EpicCommands) -> Result<()> {
        match command {
            EpicCommands::Create(args) => {
                let epic = self.tracker.create_epic(&args.into()).await?;
                self.emit(&epic, CreateResult::new(epic.clone()))
            }
            EpicCommands::List(args) => {
                let epics = self.tracker.list_epics(&Id { id: args.id }).await?;
                let listing = epics.iter().map(ToString::to_string).collect::<String>();
                self.emit(&epics, listing)
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Create(args) => {
                let task = self.tracker.create_task(&args.into()).await?;
                self.emit(&task, CreateResult::new(task.clone()))
            }
            TaskCommands::Show(args) => {
                let id = args.id;
                match self.tracker.get_task(&Id { id }).await? {
                    Some(task) => self.emit(&task, &task),
                    None => bail!("Task {id} not found"),
                }
            }
            TaskCommands::Move(args) => {
                let task = self.tracker.move_task(&args.into()).await?;
                self.emit(&task, &task)
            }
            TaskCommands::Label(args) => {
                let labels = self.tracker.set_labels(&args.into()).await?;
                let listing = if labels.is_empty() {
                    "No labels.\n".to_string()
                } else {
                    format!("Labels: {}\n", labels.join(", "))
                };
                self.emit(&labels, listing)
            }
            TaskCommands::Comment(args) => {
                let comment_id = self.tracker.add_comment(&args.into()).await?;
                self.emit(
                    &json!({ "commentId": comment_id }),
                    format!("Added comment with ID: {comment_id}\n"),
                )
            }
            TaskCommands::History(args) => {
                let entries = self.tracker.get_task_history(&Id { id: args.id }).await?;
                self.emit(&entries, HistoryEntries(entries.clone()))
            }
        }
    }

    pub async fn handle_sprint_command(&self, command: SprintCommands) -> Result<()> {
        match command {
            SprintCommands::Create(args) => {
                let sprint = self.tracker.create_sprint(&args.into()).await?;
                self.emit(&sprint, CreateResult::new(sprint.clone()))
            }
            SprintCommands::List(args) => {
                let sprints = self.tracker.list_sprints(&Id { id: args.id }).await?;
                let listing = sprints.iter().map(ToString::to_string).collect::<String>();
                self.emit(&sprints, listing)
            }
            SprintCommands::Show(args) => {
                let id = args.id;
                match self.tracker.get_sprint(&Id { id }).await? {
                    Some(sprint) => self.emit(&sprint, &sprint),
                    None => bail!("Sprint {id} not found"),
                }
            }
            SprintCommands::Start(args) => {
                let sprint = self.tracker.start_sprint(&Id { id: args.id }).await?;
                self.emit(&sprint, &sprint)
            }
            SprintCommands::Complete(args) => {
                let (sprint, report) = self.tracker.complete_sprint(&args.into()).await?;
                self.emit(
                    &json!({ "sprint": &sprint, "report": &report }),
                    SprintCompletion { sprint, report },
                )
            }
            SprintCommands::Burndown(args) => {
                let points = self.tracker.burndown(&Id { id: args.id }).await?;
                self.emit(
                    &json!({ "data": &points }),
                    ChartSeries {
                        title: "Burndown",
                        points: &points,
                    },
                )
            }
            SprintCommands::Burnup(args) => {
                let points = self.tracker.burnup(&Id { id: args.id }).await?;
                self.emit(
                    &json!({ "data": &points }),
                    ChartSeries {
                        title: "Burnup",
                        points: &points,
                    },
                )
            }
            SprintCommands::Velocity(args) => {
                let velocity = self.tracker.velocity(&args.into()).await?;
                self.emit(
                    &json!({ "velocity": velocity }),
                    format!("Velocity: {velocity:.1} points per sprint\n"),
                )
            }
        }
    }

    pub async fn show_board(&self, params: cadence_core::params::GetBoard) -> Result<()> {
        let board = self.tracker.board(&params).await?;
        self.emit(&board, &board)
    }

    pub async fn show_backlog(&self, params: cadence_core::params::GetBacklog) -> Result<()> {
        let backlog = self.tracker.backlog(&params).await?;
        self.emit(&backlog, &backlog)
    }
}
