//! Cadence CLI Application
//!
//! Command-line interface for the Cadence sprint and task board tool.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::TrackerBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color && !json);
    let cli = Cli::new(tracker, renderer, json);

    info!("Cadence started");

    match command {
        Project { command } => cli.handle_project_command(command).await,
        Epic { command } => cli.handle_epic_command(command).await,
        Task { command } => cli.handle_task_command(command).await,
        Sprint { command } => cli.handle_sprint_command(command).await,
        Board(args) => cli.show_board(args.into()).await,
        Backlog(args) => cli.show_backlog(args.into()).await,
    }
}
