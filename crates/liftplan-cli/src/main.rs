//! Liftplan CLI
//!
//! Command-line editor for training plans, and MCP server for AI assistants.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use liftplan_core::{params::ListPlans, PlannerBuilder};
use log::info;
use mcp::{run_stdio_server, LiftplanMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_user(user)
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!("Liftplan started as {}", planner.user());

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Week { command }) => {
            Cli::new(planner, renderer)
                .handle_hierarchy_command(command)
                .await
        }
        Some(Day { command }) => {
            Cli::new(planner, renderer)
                .handle_hierarchy_command(command)
                .await
        }
        Some(Session { command }) => {
            Cli::new(planner, renderer)
                .handle_hierarchy_command(command)
                .await
        }
        Some(Lift { command }) => {
            Cli::new(planner, renderer)
                .handle_hierarchy_command(command)
                .await
        }
        Some(Set { command }) => {
            Cli::new(planner, renderer)
                .handle_hierarchy_command(command)
                .await
        }
        Some(Exercise { command }) => {
            Cli::new(planner, renderer)
                .handle_exercise_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting liftplan MCP server");
            run_stdio_server(LiftplanMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(planner, renderer)
                .list_plans(&ListPlans::default())
                .await
        }
    }
}
