//! Command-line argument definitions using clap.
//!
//! This module implements the CLI side of the parameter wrapper pattern:
//! clap-specific argument structures live here and convert into the core
//! parameter types via `From`, keeping the core crate free of CLI framework
//! concerns.

use std::path::PathBuf;

use cadence_core::{
    params::{
        AddComment, CompleteSprint, CreateEpic, CreateProject, CreateSprint, CreateTask,
        GetBacklog, GetBoard, GetVelocity, MoveChange, MoveTask, SetLabels,
    },
    BoardFilter, Priority,
};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;

/// Main command-line interface for the Cadence board tool
///
/// Cadence is a sprint and task board engine: projects own kanban workflows,
/// tasks move across columns with stable ordering, and sprints run a
/// planning/active/completed lifecycle with burndown, burnup, and velocity
/// reporting.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Cadence CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects and their workflows
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage epics
    #[command(alias = "e")]
    Epic {
        #[command(subcommand)]
        command: EpicCommands,
    },
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage sprints and sprint reporting
    #[command(alias = "s")]
    Sprint {
        #[command(subcommand)]
        command: SprintCommands,
    },
    /// Show the kanban board
    #[command(alias = "b")]
    Board(BoardArgs),
    /// Show the backlog
    Backlog(BacklogArgs),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project with the default workflow
    #[command(alias = "c")]
    Create(CreateProjectArgs),
    /// Show a project's details
    #[command(alias = "s")]
    Show(IdArg),
    /// List a project's workflow statuses
    Statuses(IdArg),
}

#[derive(Subcommand)]
pub enum EpicCommands {
    /// Create a new epic
    #[command(alias = "c")]
    Create(CreateEpicArgs),
    /// List a project's epics
    #[command(aliases = ["l", "ls"])]
    List(IdArg),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a new task or subtask
    #[command(alias = "c")]
    Create(CreateTaskArgs),
    /// Show a task's details
    #[command(alias = "s")]
    Show(IdArg),
    /// Move a task: change status, sprint, or position
    #[command(alias = "mv")]
    Move(MoveTaskArgs),
    /// Replace a task's label set
    Label(SetLabelsArgs),
    /// Add a comment to a task
    Comment(AddCommentArgs),
    /// Show a task's change history
    #[command(alias = "h")]
    History(IdArg),
}

#[derive(Subcommand)]
pub enum SprintCommands {
    /// Create a new sprint in planning
    #[command(alias = "c")]
    Create(CreateSprintArgs),
    /// List a project's sprints
    #[command(aliases = ["l", "ls"])]
    List(IdArg),
    /// Show a sprint's details
    #[command(alias = "s")]
    Show(IdArg),
    /// Start a sprint (planning -> active)
    Start(IdArg),
    /// Complete a sprint (active -> completed)
    Complete(CompleteSprintArgs),
    /// Show a sprint's burndown chart
    Burndown(IdArg),
    /// Show a sprint's burnup chart
    Burnup(IdArg),
    /// Show a project's velocity over recent sprints
    Velocity(VelocityArgs),
}

/// Generic single-ID argument shared by show/list/start style commands.
#[derive(ClapArgs)]
pub struct IdArg {
    /// Unique identifier of the resource
    pub id: u64,
}

/// Create a new project
#[derive(ClapArgs)]
pub struct CreateProjectArgs {
    /// Name of the project
    pub name: String,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(val: CreateProjectArgs) -> Self {
        CreateProject { name: val.name }
    }
}

/// Create a new epic
#[derive(ClapArgs)]
pub struct CreateEpicArgs {
    /// ID of the project the epic belongs to
    pub project_id: u64,
    /// Short sortable code (e.g. "CAD-12")
    pub code: String,
    /// Epic title
    pub title: String,
    /// Display color as a hex string
    #[arg(long)]
    pub color: Option<String>,
}

impl From<CreateEpicArgs> for CreateEpic {
    fn from(val: CreateEpicArgs) -> Self {
        CreateEpic {
            project_id: val.project_id,
            code: val.code,
            title: val.title,
            color: val.color,
        }
    }
}

/// Create a new sprint
#[derive(ClapArgs)]
pub struct CreateSprintArgs {
    /// ID of the project the sprint belongs to
    pub project_id: u64,
    /// Display name of the sprint
    pub name: String,
    /// Sprint goal
    #[arg(short, long)]
    pub goal: Option<String>,
    /// First day of the sprint window (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<Date>,
    /// Last day of the sprint window, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<Date>,
}

impl From<CreateSprintArgs> for CreateSprint {
    fn from(val: CreateSprintArgs) -> Self {
        CreateSprint {
            project_id: val.project_id,
            name: val.name,
            goal: val.goal,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

/// Create a new task or subtask
#[derive(ClapArgs)]
pub struct CreateTaskArgs {
    /// ID of the project the task belongs to
    pub project_id: u64,
    /// Brief title/summary of the task
    pub title: String,
    /// Detailed description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Parent task ID to create a subtask (one level only)
    #[arg(long)]
    pub parent: Option<u64>,
    /// Epic to attach the task to
    #[arg(long)]
    pub epic: Option<u64>,
    /// Sprint to schedule the task into
    #[arg(long)]
    pub sprint: Option<u64>,
    /// Priority of the task
    #[arg(short, long)]
    pub priority: Option<PriorityArg>,
    /// Story point estimate
    #[arg(long)]
    pub points: Option<f64>,
    /// User to assign the task to
    #[arg(long)]
    pub assignee: Option<u64>,
    /// Labels as a comma-separated list
    #[arg(short, long, value_delimiter = ',')]
    pub labels: Vec<String>,
}

impl From<CreateTaskArgs> for CreateTask {
    fn from(val: CreateTaskArgs) -> Self {
        CreateTask {
            project_id: val.project_id,
            title: val.title,
            description: val.description,
            parent_id: val.parent,
            epic_id: val.epic,
            sprint_id: val.sprint,
            priority: val.priority.map(Into::into),
            story_points: val.points,
            assignee_id: val.assignee,
            labels: val.labels,
        }
    }
}

/// Move a task
///
/// Any combination of --status, --sprint/--backlog, and --position may be
/// given; all requested changes land in one transaction.
#[derive(ClapArgs)]
pub struct MoveTaskArgs {
    /// Unique identifier of the task to move
    pub id: u64,
    /// Acting user, recorded in the task history
    #[arg(long, default_value_t = 0)]
    pub user: u64,
    /// Target status (column) ID
    #[arg(short, long)]
    pub status: Option<u64>,
    /// Target sprint ID
    #[arg(long, conflicts_with = "backlog")]
    pub sprint: Option<u64>,
    /// Return the task to the backlog
    #[arg(long)]
    pub backlog: bool,
    /// Target 0-based index within the status column
    #[arg(short, long)]
    pub position: Option<u32>,
}

impl From<MoveTaskArgs> for MoveTask {
    fn from(val: MoveTaskArgs) -> Self {
        let mut changes = Vec::new();
        if let Some(status_id) = val.status {
            changes.push(MoveChange::Status { status_id });
        }
        if val.backlog {
            changes.push(MoveChange::Sprint { sprint_id: None });
        } else if let Some(sprint_id) = val.sprint {
            changes.push(MoveChange::Sprint {
                sprint_id: Some(sprint_id),
            });
        }
        if let Some(index) = val.position {
            changes.push(MoveChange::Position { index });
        }
        MoveTask {
            task_id: val.id,
            user_id: val.user,
            changes,
        }
    }
}

/// Replace a task's label set
#[derive(ClapArgs)]
pub struct SetLabelsArgs {
    /// Unique identifier of the task to relabel
    pub id: u64,
    /// The complete new label set as a comma-separated list; an empty value
    /// clears all labels
    #[arg(value_delimiter = ',')]
    pub labels: Vec<String>,
    /// Acting user, recorded in the task history
    #[arg(long, default_value_t = 0)]
    pub user: u64,
}

impl From<SetLabelsArgs> for SetLabels {
    fn from(val: SetLabelsArgs) -> Self {
        SetLabels {
            task_id: val.id,
            labels: val.labels,
            user_id: val.user,
        }
    }
}

/// Add a comment to a task
#[derive(ClapArgs)]
pub struct AddCommentArgs {
    /// Unique identifier of the task to comment on
    pub id: u64,
    /// Comment body
    pub body: String,
    /// Commenting user
    #[arg(long, default_value_t = 0)]
    pub user: u64,
}

impl From<AddCommentArgs> for AddComment {
    fn from(val: AddCommentArgs) -> Self {
        AddComment {
            task_id: val.id,
            author_id: val.user,
            body: val.body,
        }
    }
}

/// Complete a sprint
#[derive(ClapArgs)]
pub struct CompleteSprintArgs {
    /// Unique identifier of the sprint to complete
    pub id: u64,
    /// Sprint to carry incomplete tasks over to; omitted means backlog
    #[arg(long)]
    pub move_to: Option<u64>,
    /// Acting user, recorded on carry-over history entries
    #[arg(long, default_value_t = 0)]
    pub user: u64,
}

impl From<CompleteSprintArgs> for CompleteSprint {
    fn from(val: CompleteSprintArgs) -> Self {
        CompleteSprint {
            sprint_id: val.id,
            move_incomplete_to: val.move_to,
            user_id: val.user,
        }
    }
}

/// Show the kanban board
#[derive(ClapArgs)]
pub struct BoardArgs {
    /// ID of the project whose board to show
    pub project_id: u64,
    /// Only tasks in this sprint
    #[arg(long)]
    pub sprint: Option<u64>,
    /// Only tasks under this epic
    #[arg(long)]
    pub epic: Option<u64>,
    /// Only tasks assigned to this user
    #[arg(long)]
    pub assignee: Option<u64>,
}

impl From<BoardArgs> for GetBoard {
    fn from(val: BoardArgs) -> Self {
        GetBoard {
            project_id: val.project_id,
            filter: BoardFilter {
                sprint_id: val.sprint,
                epic_id: val.epic,
                assignee_id: val.assignee,
            },
        }
    }
}

/// Show the backlog
#[derive(ClapArgs)]
pub struct BacklogArgs {
    /// ID of the project whose backlog to show
    pub project_id: u64,
    /// Group tasks by epic instead of a flat list
    #[arg(long)]
    pub by_epic: bool,
}

impl From<BacklogArgs> for GetBacklog {
    fn from(val: BacklogArgs) -> Self {
        GetBacklog {
            project_id: val.project_id,
            group_by_epic: val.by_epic,
        }
    }
}

/// Show project velocity
#[derive(ClapArgs)]
pub struct VelocityArgs {
    /// ID of the project to compute velocity for
    pub project_id: u64,
    /// How many recently completed sprints to average over
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<VelocityArgs> for GetVelocity {
    fn from(val: VelocityArgs) -> Self {
        GetVelocity {
            project_id: val.project_id,
            limit: val.limit,
        }
    }
}

/// Command-line argument representation of task priority values
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum PriorityArg {
    /// Drop everything
    Critical,
    /// Important, schedule soon
    High,
    /// Normal priority
    Medium,
    /// Nice to have
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::Critical => Priority::Critical,
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}
