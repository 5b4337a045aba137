//! Command handlers.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! planner and renders the resulting display wrapper as markdown.

use std::{fs, io::Read, path::Path};

use anyhow::{bail, Context, Result};
use liftplan_core::{
    display::{CreateResult, DeleteResult, EditorView, OperationStatus},
    params::{EditPlan, Id, ListPlans, PlanEdit},
    Planner,
};
use log::debug;

use crate::{
    args::{EditPlanArgs, ExerciseCommands, HierarchyEdit, PlanCommands, ShowPlanArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .planner
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => self.show_plan(&args).await,
            PlanCommands::Update(args) => {
                let result = self
                    .planner
                    .update_plan_result(&args.into())
                    .await
                    .context("Failed to update plan")?;
                self.renderer.render(&result.to_string())
            }
            PlanCommands::Delete(args) => {
                let plan = self
                    .planner
                    .delete_plan(&args.into())
                    .await
                    .context("Failed to delete plan")?;
                self.renderer.render(&DeleteResult::new(plan).to_string())
            }
            PlanCommands::Edit(args) => self.edit_plan(args).await,
        }
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self
            .planner
            .list_plans_summary(params)
            .await
            .context("Failed to list plans")?;

        if summaries.is_empty() {
            return self.renderer.render(&summaries.to_string());
        }
        self.renderer.render(&format!("# Plans\n\n{summaries}"))
    }

    async fn show_plan(&self, args: &ShowPlanArgs) -> Result<()> {
        if args.paths {
            return self.show_paths(args.id).await;
        }

        let Some(outline) = self
            .planner
            .show_plan_outline(&Id { id: args.id })
            .await
            .context("Failed to get plan")?
        else {
            bail!("Plan with ID {} not found", args.id);
        };
        self.renderer.render(&outline.to_string())
    }

    async fn show_paths(&self, plan_id: u64) -> Result<()> {
        let editor = self
            .planner
            .open_editor(plan_id)
            .await
            .context("Failed to load plan")?;
        self.renderer.render(&EditorView::new(&editor).to_string())
    }

    async fn edit_plan(&self, args: EditPlanArgs) -> Result<()> {
        let edits = read_edits(&args.file)?;
        debug!("Read {} edits for plan {}", edits.len(), args.id);
        let params = EditPlan {
            plan_id: args.id,
            edits,
        };

        if args.dry_run {
            let changes = self
                .planner
                .preview_edits(&params)
                .await
                .context("Failed to apply edits")?;
            return self.renderer.json(&changes);
        }
        self.save_edits(&params).await
    }

    /// Applies one edit from a week, day, session, lift or set subcommand.
    pub async fn handle_hierarchy_command(&self, command: impl HierarchyEdit) -> Result<()> {
        let params = EditPlan {
            plan_id: command.plan_id(),
            edits: vec![command.into_edit()],
        };
        self.save_edits(&params).await
    }

    async fn save_edits(&self, params: &EditPlan) -> Result<()> {
        let report = self
            .planner
            .edit_plan(params)
            .await
            .context("Failed to save plan")?;

        match report {
            Some(report) => self.renderer.render(&report.to_string())?,
            None => self
                .renderer
                .render(&OperationStatus::success("No changes to save").to_string())?,
        }
        println!();
        self.show_paths(params.plan_id).await
    }

    pub async fn handle_exercise_command(&self, command: ExerciseCommands) -> Result<()> {
        match command {
            ExerciseCommands::Create(args) => {
                let exercise = self
                    .planner
                    .create_exercise(&args.into())
                    .await
                    .context("Failed to create exercise")?;
                self.renderer.render(&CreateResult::new(exercise).to_string())
            }
            ExerciseCommands::List(args) => {
                let exercises = self
                    .planner
                    .search_exercises(&args.into())
                    .await
                    .context("Failed to search exercises")?;
                self.renderer.render(&exercises.to_string())
            }
            ExerciseCommands::Show(args) => {
                let params: Id = args.into();
                let Some(exercise) = self
                    .planner
                    .get_exercise(&params)
                    .await
                    .context("Failed to get exercise")?
                else {
                    bail!("Exercise with ID {} not found", params.id);
                };
                self.renderer.render(&exercise.to_string())
            }
        }
    }
}

/// Reads a JSON array of edits from `path`, or from standard input for `-`.
fn read_edits(path: &Path) -> Result<Vec<PlanEdit>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read edits from standard input")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read edits from {}", path.display()))?
    };

    serde_json::from_str(&content).context("Edits must be a JSON array of operations")
}
