//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Difficulty, PlanDetails, Visibility};

/// Summary information about a plan with hierarchy statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Title of the plan
    pub title: String,
    /// Detailed multi-line description of the plan
    pub description: Option<String>,
    pub difficulty: Difficulty,
    pub visibility: Visibility,
    pub team_id: Option<u64>,
    pub created_by: String,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Number of weeks
    pub total_weeks: u32,
    /// Number of days that are not rest days
    pub training_days: u32,
    /// Number of rest days
    pub rest_days: u32,
    /// Number of sessions, counting only training days
    pub total_sessions: u32,
}

impl From<&PlanDetails> for PlanSummary {
    fn from(details: &PlanDetails) -> Self {
        let days = details.weeks.iter().flat_map(|w| w.days.iter());
        let (rest, training): (Vec<_>, Vec<_>) = days.partition(|d| d.fields.is_rest_day);
        let total_sessions = training.iter().map(|d| d.sessions.len()).sum::<usize>();

        let plan = &details.plan;
        Self {
            id: plan.id,
            title: plan.title.clone(),
            description: plan.description.clone(),
            difficulty: plan.difficulty,
            visibility: plan.visibility,
            team_id: plan.team_id,
            created_by: plan.created_by.clone(),
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            total_weeks: details.weeks.len() as u32,
            training_days: training.len() as u32,
            rest_days: rest.len() as u32,
            total_sessions: total_sessions as u32,
        }
    }
}
