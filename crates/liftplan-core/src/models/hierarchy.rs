//! Hierarchy node definitions: weeks, days, sessions, exercises and sets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ExerciseRef, SetType, WeightUnit};
use crate::ids::NodeId;

/// Editable attributes of a week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekFields {
    /// Position of the week within the plan (1-based, sortable only)
    pub week_number: u32,
    pub description: Option<String>,
}

/// A week of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Week {
    pub id: NodeId,
    #[serde(flatten)]
    pub fields: WeekFields,
    #[serde(default)]
    pub days: Vec<Arc<Day>>,
}

impl Week {
    pub fn new(id: impl Into<NodeId>, fields: WeekFields) -> Self {
        Self {
            id: id.into(),
            fields,
            days: Vec::new(),
        }
    }

    pub fn with_days(mut self, days: impl IntoIterator<Item = Day>) -> Self {
        self.days = days.into_iter().map(Arc::new).collect();
        self
    }
}

/// Editable attributes of a day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayFields {
    /// Day of the week, 1 through 7
    pub day_number: u8,
    pub title: Option<String>,
    /// Rest days have no sessions shown or edited
    #[serde(default)]
    pub is_rest_day: bool,
}

/// A day within a week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Day {
    pub id: NodeId,
    #[serde(flatten)]
    pub fields: DayFields,
    #[serde(default)]
    pub sessions: Vec<Arc<Session>>,
}

impl Day {
    pub fn new(id: impl Into<NodeId>, fields: DayFields) -> Self {
        Self {
            id: id.into(),
            fields,
            sessions: Vec::new(),
        }
    }

    pub fn with_sessions(mut self, sessions: impl IntoIterator<Item = Session>) -> Self {
        self.sessions = sessions.into_iter().map(Arc::new).collect();
        self
    }
}

/// Editable attributes of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionFields {
    pub order_index: u32,
    pub title: Option<String>,
    pub notes: Option<String>,
}

/// A training session within a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: NodeId,
    #[serde(flatten)]
    pub fields: SessionFields,
    #[serde(default)]
    pub exercises: Vec<Arc<SessionExercise>>,
}

impl Session {
    pub fn new(id: impl Into<NodeId>, fields: SessionFields) -> Self {
        Self {
            id: id.into(),
            fields,
            exercises: Vec::new(),
        }
    }

    pub fn with_exercises(mut self, exercises: impl IntoIterator<Item = SessionExercise>) -> Self {
        self.exercises = exercises.into_iter().map(Arc::new).collect();
        self
    }
}

/// Editable attributes of an exercise placed in a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionExerciseFields {
    /// Library exercise being performed
    pub exercise_id: u64,
    pub order_within_session: u32,
    /// Exercises sharing a group number form a superset
    pub execution_group: u32,
    pub post_exercise_rest_seconds: Option<u32>,
    pub post_group_rest_seconds: Option<u32>,
    pub notes: Option<String>,
}

/// A library exercise scheduled inside a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionExercise {
    pub id: NodeId,
    #[serde(flatten)]
    pub fields: SessionExerciseFields,
    /// Library details joined in for display; not part of the changeset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseRef>,
    #[serde(default)]
    pub sets: Vec<Arc<ExerciseSet>>,
}

impl SessionExercise {
    pub fn new(id: impl Into<NodeId>, fields: SessionExerciseFields) -> Self {
        Self {
            id: id.into(),
            fields,
            exercise: None,
            sets: Vec::new(),
        }
    }

    pub fn with_exercise(mut self, exercise: ExerciseRef) -> Self {
        self.exercise = Some(exercise);
        self
    }

    pub fn with_sets(mut self, sets: impl IntoIterator<Item = ExerciseSet>) -> Self {
        self.sets = sets.into_iter().map(Arc::new).collect();
        self
    }

    /// Name to show for this exercise.
    pub fn display_name(&self) -> String {
        self.exercise
            .as_ref()
            .map(|e| e.name.clone())
            .unwrap_or_else(|| format!("Exercise #{}", self.fields.exercise_id))
    }
}

/// Editable attributes of a set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SetFields {
    pub set_number: u32,
    #[serde(default)]
    pub set_type: SetType,
    pub target_reps: Option<u32>,
    pub target_weight: Option<f64>,
    pub weight_unit: Option<WeightUnit>,
    pub target_duration_seconds: Option<u32>,
    pub target_distance_meters: Option<f64>,
    pub target_rest_seconds: Option<u32>,
    pub notes: Option<String>,
}

/// A prescribed set of a session exercise. Sets are leaves of the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub id: NodeId,
    #[serde(flatten)]
    pub fields: SetFields,
}

impl ExerciseSet {
    pub fn new(id: impl Into<NodeId>, fields: SetFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}
