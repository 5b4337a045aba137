//! Plan CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::rows::{id, parsed, timestamp};
use crate::{
    error::{DatabaseResultExt, PlanError, Result},
    models::{Plan, PlanFilter, PlanSummary},
    params::{CreatePlan, UpdatePlan},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (title, description, difficulty, visibility, \
     team_id, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_PLAN_SQL: &str = "SELECT id, title, description, difficulty, visibility, team_id, \
     created_by, created_at, updated_at FROM plans WHERE id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET title = ?1, description = ?2, difficulty = ?3, \
     visibility = ?4, team_id = ?5, updated_at = ?6 WHERE id = ?7";
const TOUCH_PLAN_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

const PLAN_SUMMARY_COLUMNS: &str = "id, title, description, difficulty, visibility, team_id, \
     created_by, created_at, updated_at, total_weeks, training_days, rest_days, total_sessions";

fn plan_from_row(row: &Row) -> rusqlite::Result<Plan> {
    Ok(Plan {
        id: id(row, 0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        difficulty: parsed(row, 3)?,
        visibility: parsed(row, 4)?,
        team_id: row.get::<_, Option<i64>>(5)?.map(|t| t as u64),
        created_by: row.get(6)?,
        created_at: timestamp(row, 7)?,
        updated_at: timestamp(row, 8)?,
    })
}

fn summary_from_row(row: &Row) -> rusqlite::Result<PlanSummary> {
    Ok(PlanSummary {
        id: id(row, 0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        difficulty: parsed(row, 3)?,
        visibility: parsed(row, 4)?,
        team_id: row.get::<_, Option<i64>>(5)?.map(|t| t as u64),
        created_by: row.get(6)?,
        created_at: timestamp(row, 7)?,
        updated_at: timestamp(row, 8)?,
        total_weeks: row.get(9)?,
        training_days: row.get(10)?,
        rest_days: row.get(11)?,
        total_sessions: row.get(12)?,
    })
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PlanError::invalid_input("title").with_reason("must not be empty"));
    }
    Ok(())
}

impl super::Database {
    /// Creates a plan owned by `created_by`, with no weeks.
    pub fn create_plan(&mut self, params: &CreatePlan, created_by: &str) -> Result<Plan> {
        validate_title(&params.title)?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let difficulty = params.difficulty.unwrap_or_default();
        let visibility = params.visibility.unwrap_or_default();

        self.connection
            .execute(
                INSERT_PLAN_SQL,
                params![
                    params.title,
                    params.description,
                    difficulty.as_str(),
                    visibility.as_str(),
                    params.team_id.map(|t| t as i64),
                    created_by,
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert plan")?;
        let id = self.connection.last_insert_rowid() as u64;
        debug!("Created plan {id} for {created_by}");

        Ok(Plan {
            id,
            title: params.title.clone(),
            description: params.description.clone(),
            difficulty,
            visibility,
            team_id: params.team_id,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves plan metadata by its ID.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        self.connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], plan_from_row)
            .optional()
            .db_context("Failed to query plan")
    }

    pub(super) fn plan_exists(connection: &Connection, id: u64) -> Result<bool> {
        connection
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")
    }

    /// Lists plan summaries matching `filter`, most recently updated first.
    pub fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanSummary>> {
        let mut query = format!("SELECT {PLAN_SUMMARY_COLUMNS} FROM plan_summaries");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref title) = filter.title_contains {
            conditions.push("title LIKE ?");
            params_vec.push(Box::new(format!("%{title}%")));
        }
        if let Some(difficulty) = filter.difficulty {
            conditions.push("difficulty = ?");
            params_vec.push(Box::new(difficulty.as_str()));
        }
        if let Some(visibility) = filter.visibility {
            conditions.push("visibility = ?");
            params_vec.push(Box::new(visibility.as_str()));
        }
        if let Some(ref user) = filter.created_by {
            conditions.push("created_by = ?");
            params_vec.push(Box::new(user.clone()));
        }
        if let Some(team) = filter.team_id {
            conditions.push("team_id = ?");
            params_vec.push(Box::new(team as i64));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY updated_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let plans = stmt
            .query_map(&params_refs[..], summary_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;
        Ok(plans)
    }

    /// Updates plan metadata, keeping the current value of every field left
    /// out of `params`.
    pub fn update_plan(&mut self, params: &UpdatePlan) -> Result<Plan> {
        let mut plan = self
            .get_plan(params.id)?
            .ok_or(PlanError::PlanNotFound { id: params.id })?;

        if let Some(ref title) = params.title {
            validate_title(title)?;
            plan.title = title.clone();
        }
        if let Some(ref description) = params.description {
            plan.description = Some(description.clone());
        }
        if let Some(difficulty) = params.difficulty {
            plan.difficulty = difficulty;
        }
        if let Some(visibility) = params.visibility {
            plan.visibility = visibility;
        }
        if let Some(team) = params.team_id {
            plan.team_id = Some(team);
        }
        plan.updated_at = Timestamp::now();

        self.connection
            .execute(
                UPDATE_PLAN_SQL,
                params![
                    plan.title,
                    plan.description,
                    plan.difficulty.as_str(),
                    plan.visibility.as_str(),
                    plan.team_id.map(|t| t as i64),
                    plan.updated_at.to_string(),
                    plan.id as i64
                ],
            )
            .db_context("Failed to update plan")?;

        Ok(plan)
    }

    /// Sets a plan's `updated_at` to now.
    pub(super) fn touch_plan(connection: &Connection, id: u64) -> Result<()> {
        connection
            .execute(TOUCH_PLAN_SQL, params![Timestamp::now().to_string(), id as i64])
            .db_context("Failed to update plan timestamp")?;
        Ok(())
    }

    /// Deletes a plan together with its whole hierarchy. Returns the deleted
    /// plan's metadata.
    pub fn delete_plan(&mut self, id: u64) -> Result<Plan> {
        let plan = self.get_plan(id)?.ok_or(PlanError::PlanNotFound { id })?;

        self.connection
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;
        debug!("Deleted plan {id}");

        Ok(plan)
    }
}
