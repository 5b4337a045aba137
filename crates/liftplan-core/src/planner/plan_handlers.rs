//! Plan handler operations that return formatted wrapper types for the Planner.

use super::Planner;
use crate::{
    display::{PlanOutline, PlanSummaries, UpdateResult},
    error::{PlanError, Result},
    models::{Plan, PlanFilter},
    params::{DeletePlan, Id, ListPlans, UpdatePlan},
};

impl Planner {
    /// Handle listing plans with the given filters.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use liftplan_core::{params::ListPlans, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = ListPlans {
    ///     created_by: Some("coach".to_string()),
    ///     ..Default::default()
    /// };
    /// let summaries = planner.list_plans_summary(&params).await?;
    /// # Result::<(), liftplan_core::PlanError>::Ok(())
    /// # };
    /// ```
    pub async fn list_plans_summary(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let summaries = self.list_plans(PlanFilter::from(params)).await?;
        Ok(PlanSummaries(summaries))
    }

    /// Handle showing a plan as a sorted outline, with rest days collapsed
    /// and supersets grouped. Returns `None` if the plan doesn't exist.
    pub async fn show_plan_outline(&self, params: &Id) -> Result<Option<PlanOutline>> {
        let details = self.get_plan_details(params).await?;
        Ok(details.as_ref().map(PlanOutline::from_details))
    }

    /// Handle updating plan metadata, listing the attributes that changed.
    pub async fn update_plan_result(&self, params: &UpdatePlan) -> Result<UpdateResult<Plan>> {
        let mut changes = Vec::new();
        if params.title.is_some() {
            changes.push("Title".to_string());
        }
        if params.description.is_some() {
            changes.push("Description".to_string());
        }
        if let Some(difficulty) = params.difficulty {
            changes.push(format!("Difficulty: {difficulty}"));
        }
        if let Some(visibility) = params.visibility {
            changes.push(format!("Visibility: {visibility}"));
        }
        if let Some(team) = params.team_id {
            changes.push(format!("Team: {team}"));
        }

        let plan = self.update_plan(params).await?;
        Ok(UpdateResult::with_changes(plan, changes))
    }

    /// Handle permanently deleting a plan with confirmation.
    ///
    /// Removes the plan with every week, day, session, exercise and set. This
    /// cannot be undone, so `confirmed` must be set.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` if `confirmed` is false,
    /// `PlanError::PlanNotFound` for an unknown plan and
    /// `PlanError::ReadOnly` if the acting user did not create the plan.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Plan> {
        if !params.confirmed {
            return Err(PlanError::invalid_input("confirmed").with_reason(
                "Plan deletion requires explicit confirmation. Set 'confirmed' to true to \
                 proceed with permanent deletion.",
            ));
        }
        self.remove_plan(&Id { id: params.id }).await
    }
}
