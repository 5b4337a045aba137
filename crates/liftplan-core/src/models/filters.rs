//! Filter types for querying plans and exercises.

use super::{Difficulty, Visibility};

/// Filter options for querying plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Filter by plan title (case-insensitive partial match)
    pub title_contains: Option<String>,

    pub difficulty: Option<Difficulty>,

    pub visibility: Option<Visibility>,

    /// Only plans created by this user
    pub created_by: Option<String>,

    /// Only plans owned by this team
    pub team_id: Option<u64>,
}

impl PlanFilter {
    /// Filter matching the plans created by `user`.
    ///
    /// ```rust
    /// use liftplan_core::models::PlanFilter;
    ///
    /// let filter = PlanFilter::created_by("sam");
    /// assert_eq!(filter.created_by.as_deref(), Some("sam"));
    /// assert!(filter.title_contains.is_none());
    /// ```
    pub fn created_by(user: impl Into<String>) -> Self {
        Self {
            created_by: Some(user.into()),
            ..Default::default()
        }
    }
}

impl From<&crate::params::ListPlans> for PlanFilter {
    fn from(params: &crate::params::ListPlans) -> Self {
        Self {
            title_contains: params.title.clone(),
            difficulty: params.difficulty,
            visibility: params.visibility,
            created_by: params.created_by.clone(),
            team_id: params.team_id,
        }
    }
}

/// Filter options for searching the exercise library.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    /// Case-insensitive partial match on the exercise name
    pub name_contains: Option<String>,

    /// Exact (case-insensitive) match on the primary muscle group
    pub primary_muscle: Option<String>,
}

impl From<&crate::params::SearchExercises> for ExerciseFilter {
    fn from(params: &crate::params::SearchExercises) -> Self {
        Self {
            name_contains: params.query.clone(),
            primary_muscle: params.muscle.clone(),
        }
    }
}
