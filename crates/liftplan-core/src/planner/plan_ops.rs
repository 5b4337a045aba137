//! Plan operations for the Planner.

use super::Planner;
use crate::{
    error::{PlanError, Result},
    models::{Plan, PlanDetails, PlanFilter, PlanSummary},
    params::{CreatePlan, Id, UpdatePlan},
};

impl Planner {
    /// Creates a plan owned by the acting user.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let params = params.clone();
        let user = self.user.clone();
        self.with_database(move |db| db.create_plan(&params, &user))
            .await
    }

    /// Retrieves plan metadata by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        self.with_database(move |db| db.get_plan(plan_id)).await
    }

    /// Retrieves a plan with its whole hierarchy, every level sorted.
    pub async fn get_plan_details(&self, params: &Id) -> Result<Option<PlanDetails>> {
        let plan_id = params.id;
        self.with_database(move |db| db.get_plan_details(plan_id))
            .await
    }

    /// Lists plan summaries matching `filter`.
    pub async fn list_plans(&self, filter: PlanFilter) -> Result<Vec<PlanSummary>> {
        self.with_database(move |db| db.list_plans(&filter)).await
    }

    /// Updates plan metadata. Only the plan's creator may do so.
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<Plan> {
        if params.is_empty() {
            return Err(PlanError::invalid_input("update")
                .with_reason("at least one field must be provided"));
        }

        let params = params.clone();
        let user = self.user.clone();
        self.with_database(move |db| {
            ensure_creator(db.get_plan(params.id)?, params.id, &user)?;
            db.update_plan(&params)
        })
        .await
    }

    /// Permanently deletes a plan and its hierarchy. Only the plan's creator
    /// may do so.
    pub async fn remove_plan(&self, params: &Id) -> Result<Plan> {
        let plan_id = params.id;
        let user = self.user.clone();
        self.with_database(move |db| {
            ensure_creator(db.get_plan(plan_id)?, plan_id, &user)?;
            db.delete_plan(plan_id)
        })
        .await
    }

    /// Whether the acting user may change `plan`.
    pub fn can_edit(&self, plan: &Plan) -> bool {
        plan.created_by == self.user
    }
}

pub(super) fn ensure_creator(plan: Option<Plan>, plan_id: u64, user: &str) -> Result<()> {
    match plan {
        None => Err(PlanError::PlanNotFound { id: plan_id }),
        Some(plan) if plan.created_by != user => Err(PlanError::ReadOnly { plan_id }),
        Some(_) => Ok(()),
    }
}
