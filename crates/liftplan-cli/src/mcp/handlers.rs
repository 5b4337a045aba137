//! MCP tool handler implementations.

use std::sync::Arc;

use liftplan_core::{
    display::{CreateResult, DeleteResult, OperationStatus},
    params as core, Planner,
};
use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

/// Transparent wrapper giving core parameter types the MCP derives.
///
/// Core types derive `JsonSchema` only behind their `schema` feature; the
/// wrapper forwards both the schema and deserialization to the inner type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type UpdatePlan = McpParams<core::UpdatePlan>;
pub type DeletePlan = McpParams<core::DeletePlan>;
pub type EditPlan = McpParams<core::EditPlan>;
pub type CreateExercise = McpParams<core::CreateExercise>;
pub type SearchExercises = McpParams<core::SearchExercises>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(result: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        result.to_string(),
    )]))
}

pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .create_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;
        text(CreateResult::new(plan))
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {params:?}");

        let summaries = self
            .planner
            .lock()
            .await
            .list_plans_summary(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        if summaries.is_empty() {
            return text(summaries);
        }
        text(format!("# Plans\n\n{summaries}"))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let id = params.as_ref().id;
        let outline = self
            .planner
            .lock()
            .await
            .show_plan_outline(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?
            .ok_or_else(|| ErrorData::invalid_params(format!("Plan with ID {id} not found"), None))?;
        text(outline)
    }

    pub async fn update_plan(&self, Parameters(params): Parameters<UpdatePlan>) -> McpResult {
        debug!("update_plan: {params:?}");

        let result = self
            .planner
            .lock()
            .await
            .update_plan_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update plan", &e))?;
        text(result)
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<DeletePlan>) -> McpResult {
        debug!("delete_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .delete_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?;
        text(DeleteResult::new(plan))
    }

    pub async fn edit_plan(&self, Parameters(params): Parameters<EditPlan>) -> McpResult {
        debug!("edit_plan: {params:?}");

        let planner = self.planner.lock().await;
        let report = planner
            .edit_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to edit plan", &e))?;

        let Some(report) = report else {
            return text(OperationStatus::success("No changes to save"));
        };
        let outline = planner
            .show_plan_outline(&core::Id {
                id: params.as_ref().plan_id,
            })
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?;

        match outline {
            Some(outline) => text(format!("{report}\n{outline}")),
            None => text(report),
        }
    }

    pub async fn preview_plan_edits(&self, Parameters(params): Parameters<EditPlan>) -> McpResult {
        debug!("preview_plan_edits: {params:?}");

        let changes = self
            .planner
            .lock()
            .await
            .preview_edits(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to apply edits", &e))?;

        if changes.is_empty() {
            return text(OperationStatus::success("The edits change nothing"));
        }
        let counts = changes.counts();
        let json = serde_json::to_string_pretty(&changes)
            .map_err(|e| ErrorData::internal_error(format!("Failed to encode changes: {e}"), None))?;
        text(format!(
            "Saving would add {}, update {} and delete {} nodes:\n\n```json\n{json}\n```\n",
            counts.added, counts.updated, counts.deleted
        ))
    }

    pub async fn create_exercise(
        &self,
        Parameters(params): Parameters<CreateExercise>,
    ) -> McpResult {
        debug!("create_exercise: {params:?}");

        let exercise = self
            .planner
            .lock()
            .await
            .create_exercise(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create exercise", &e))?;
        text(CreateResult::new(exercise))
    }

    pub async fn search_exercises(
        &self,
        Parameters(params): Parameters<SearchExercises>,
    ) -> McpResult {
        debug!("search_exercises: {params:?}");

        let exercises = self
            .planner
            .lock()
            .await
            .search_exercises(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to search exercises", &e))?;
        text(exercises)
    }
}

#[cfg(test)]
mod tests {
    use liftplan_core::PlannerBuilder;
    use tempfile::TempDir;

    use super::*;

    async fn handlers(user: &str, dir: &TempDir) -> McpHandlers {
        let planner = PlannerBuilder::new()
            .with_database_path(Some(dir.path().join("mcp.db")))
            .with_user(user)
            .build()
            .await
            .unwrap();
        McpHandlers::new(Arc::new(Mutex::new(planner)))
    }

    fn params<T: JsonSchema + serde::de::DeserializeOwned>(
        value: serde_json::Value,
    ) -> Parameters<McpParams<T>> {
        Parameters(serde_json::from_value(value).unwrap())
    }

    fn output(result: CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_edit_plan_tool_saves_and_shows_outline() {
        let dir = TempDir::new().unwrap();
        let handlers = handlers("coach", &dir).await;

        let created = handlers
            .create_plan(params(serde_json::json!({"title": "Block"})))
            .await
            .unwrap();
        assert!(output(created).contains("Created plan with ID: 1"));

        let result = handlers
            .edit_plan(params(serde_json::json!({
                "plan_id": 1,
                "edits": [
                    {"op": "add_week", "description": "Base"},
                    {"op": "add_day", "week": 0, "title": "Legs"}
                ]
            })))
            .await
            .unwrap();
        let text = output(result);
        assert!(text.contains("Saved plan 1: 2 added, 0 updated, 0 deleted"));
        assert!(text.contains("Legs"));
    }

    #[tokio::test]
    async fn test_preview_does_not_save() {
        let dir = TempDir::new().unwrap();
        let handlers = handlers("coach", &dir).await;
        handlers
            .create_plan(params(serde_json::json!({"title": "Block"})))
            .await
            .unwrap();

        let preview = handlers
            .preview_plan_edits(params(serde_json::json!({
                "plan_id": 1,
                "edits": [{"op": "add_week"}]
            })))
            .await
            .unwrap();
        assert!(output(preview).contains("Saving would add 1, update 0 and delete 0 nodes"));

        let shown = handlers
            .show_plan(params(serde_json::json!({"id": 1})))
            .await
            .unwrap();
        assert!(output(shown).contains("No weeks in this plan."));
    }

    #[tokio::test]
    async fn test_errors_reach_the_client() {
        let dir = TempDir::new().unwrap();
        let handlers = handlers("coach", &dir).await;

        let missing = handlers
            .show_plan(params(serde_json::json!({"id": 9})))
            .await
            .unwrap_err();
        assert!(missing.message.contains("Plan with ID 9 not found"));

        let unconfirmed = handlers
            .delete_plan(params(serde_json::json!({"id": 9})))
            .await
            .unwrap_err();
        assert!(unconfirmed.message.contains("confirmed"));
    }
}
