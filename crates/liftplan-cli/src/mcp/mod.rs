//! MCP server for liftplan
//!
//! Exposes plan and exercise library operations as Model Context Protocol
//! tools over stdio, so that AI assistants can build and revise training
//! plans. Hierarchy changes go through `edit_plan`, which takes the same
//! `op`-tagged edits as `liftplan plan edit`.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use liftplan_core::Planner;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreateExercise, CreatePlan, DeletePlan, EditPlan, Id, ListPlans, McpResult, SearchExercises,
    UpdatePlan,
};

const INSTRUCTIONS: &str = r#"Liftplan stores strength training plans as a tree: a plan has weeks, a week has days (numbered 1-7, possibly rest days), a day has sessions, a session has exercises taken from the exercise library, and an exercise has sets.

## Editing
`edit_plan` takes a list of edits tagged by `op` and saves them together; if one edit fails nothing is saved. Nodes are addressed by 0-based positions in the plan as shown by `show_plan`, for example:
- `{"op": "add_week"}`
- `{"op": "add_day", "week": 0, "title": "Lower body"}`
- `{"op": "add_exercise", "week": 0, "day": 0, "session": 0, "exercise_id": 3}`
- `{"op": "add_set", "week": 0, "day": 0, "session": 0, "exercise": 0, "target_reps": 5, "target_weight": 100, "weight_unit": "kg"}`
- `{"op": "delete_day", "week": 0, "day": 1}`

Later edits in the same list see the effect of earlier ones. Numbers such as week_number, set_number and execution_group default to the next free value. Exercises sharing an execution_group form a superset.

Use `preview_plan_edits` to check a list of edits without saving. Only the user who created a plan can change it."#;

/// MCP server for liftplan
#[derive(Clone)]
pub struct LiftplanMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LiftplanMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create a new training plan. Provide a title (required) and optionally a description, difficulty (beginner, intermediate, advanced), visibility (private, team, public) and team_id. Returns the new plan ID; add weeks with edit_plan."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List training plans with their week, training day, rest day and session counts, most recently updated first. Filter by title text, difficulty, visibility, created_by or team_id."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with all its weeks, days, sessions, exercises and sets in order. Exercises sharing an execution group are shown together as a superset."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "update_plan",
        description = "Change a plan's title, description, difficulty, visibility or team. Only provided fields are changed. Only the plan's creator can update it."
    )]
    async fn update_plan(&self, params: Parameters<UpdatePlan>) -> McpResult {
        self.handlers().update_plan(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan with all its weeks, days, sessions, exercises and sets. Requires confirmed=true. This cannot be undone."
    )]
    async fn delete_plan(&self, params: Parameters<DeletePlan>) -> McpResult {
        self.handlers().delete_plan(params).await
    }

    #[tool(
        name = "edit_plan",
        description = "Apply a list of structural edits to a plan and save them as one batch: add_week, update_week, delete_week, add_day, update_day, delete_day, add_session, update_session, delete_session, add_exercise, update_exercise, delete_exercise, add_set, update_set, delete_set. Each edit addresses nodes by 0-based week/day/session/exercise/set positions. Returns the ids assigned to new nodes and the updated plan."
    )]
    async fn edit_plan(&self, params: Parameters<EditPlan>) -> McpResult {
        self.handlers().edit_plan(params).await
    }

    #[tool(
        name = "preview_plan_edits",
        description = "Apply a list of edits like edit_plan but without saving, and return the additions, updates and deletions a save would send."
    )]
    async fn preview_plan_edits(&self, params: Parameters<EditPlan>) -> McpResult {
        self.handlers().preview_plan_edits(params).await
    }

    #[tool(
        name = "create_exercise",
        description = "Add an exercise to the shared library. Provide a name (required) and optionally primary_muscle, equipment, image_url and instructions. Use the returned ID as exercise_id in add_exercise edits."
    )]
    async fn create_exercise(&self, params: Parameters<CreateExercise>) -> McpResult {
        self.handlers().create_exercise(params).await
    }

    #[tool(
        name = "search_exercises",
        description = "Search the exercise library by name text (query) and primary muscle. Returns matching exercises sorted by name with their IDs."
    )]
    async fn search_exercises(&self, params: Parameters<SearchExercises>) -> McpResult {
        self.handlers().search_exercises(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LiftplanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "liftplan".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: LiftplanMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting liftplan MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
