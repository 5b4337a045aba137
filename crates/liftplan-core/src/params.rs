//! Parameter structures for liftplan operations
//!
//! These structures are shared by every interface (CLI, MCP) and carry no
//! framework-specific derives beyond serde and optional JSON schema
//! generation. Interface layers wrap or convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Hierarchy edits are expressed as [`PlanEdit`] values. They address nodes
//! by index path and leave ordering values optional: whoever applies them
//! (see [`crate::planner::edit_handlers`]) fills in the next free value the
//! way an editor screen would before handing a complete node to the
//! [`crate::editor::PlanEditor`].

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{
    DayPatch, DayPath, Difficulty, ExercisePath, SessionExercisePatch, SessionPatch, SessionPath,
    SetPatch, SetPath, SetType, Visibility, WeekPatch, WeekPath, WeightUnit,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Title of the plan (required)
    pub title: String,
    /// Optional detailed description of the plan
    pub description: Option<String>,
    /// Difficulty level (defaults to beginner)
    pub difficulty: Option<Difficulty>,
    /// Visibility (defaults to private)
    pub visibility: Option<Visibility>,
    /// Owning team, if any
    pub team_id: Option<u64>,
}

/// Parameters for listing plans. All filters are optional and combined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Case-insensitive title substring
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub visibility: Option<Visibility>,
    /// Only plans created by this user
    pub created_by: Option<String>,
    pub team_id: Option<u64>,
}

/// Parameters for updating plan metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlan {
    /// ID of the plan to update
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub visibility: Option<Visibility>,
    pub team_id: Option<u64>,
}

impl UpdatePlan {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.difficulty.is_none()
            && self.visibility.is_none()
            && self.team_id.is_none()
    }
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// ID of the plan to delete
    pub id: u64,
    /// Must be true; deletion removes every week, day, session and set
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding an exercise to the library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateExercise {
    /// Exercise name (required)
    pub name: String,
    pub image_url: Option<String>,
    pub primary_muscle: Option<String>,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
}

/// Parameters for searching the exercise library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SearchExercises {
    /// Case-insensitive name substring
    pub query: Option<String>,
    /// Primary muscle group
    pub muscle: Option<String>,
}

/// Parameters for applying a batch of hierarchy edits to one plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditPlan {
    /// ID of the plan to edit
    pub plan_id: u64,
    /// Edits applied in order; index paths refer to the tree as it is after
    /// the previous edits
    pub edits: Vec<PlanEdit>,
}

/// Week attributes. On add, a missing `week_number` becomes the next number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WeekInput {
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Day attributes. On add, a missing `day_number` becomes the next free day
/// (1-7).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DayInput {
    #[serde(default)]
    pub day_number: Option<u8>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_rest_day: Option<bool>,
}

/// Session attributes. On add, a missing `order_index` becomes the next one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SessionInput {
    #[serde(default)]
    pub order_index: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Attributes of an exercise placed in a session. `exercise_id` is required
/// on add; a missing `execution_group` puts the exercise in a group of its
/// own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExerciseInput {
    #[serde(default)]
    pub exercise_id: Option<u64>,
    #[serde(default)]
    pub order_within_session: Option<u32>,
    #[serde(default)]
    pub execution_group: Option<u32>,
    #[serde(default)]
    pub post_exercise_rest_seconds: Option<u32>,
    #[serde(default)]
    pub post_group_rest_seconds: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Set attributes. On add, a missing `set_number` becomes the next one and a
/// missing `set_type` is `normal`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetInput {
    #[serde(default)]
    pub set_number: Option<u32>,
    #[serde(default)]
    pub set_type: Option<SetType>,
    #[serde(default)]
    pub target_reps: Option<u32>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub weight_unit: Option<WeightUnit>,
    #[serde(default)]
    pub target_duration_seconds: Option<u32>,
    #[serde(default)]
    pub target_distance_meters: Option<f64>,
    #[serde(default)]
    pub target_rest_seconds: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A single structural edit of a plan tree.
///
/// Serialized with an `op` tag, e.g.
/// `{"op": "add_set", "week": 0, "day": 0, "session": 0, "exercise": 1,
/// "target_reps": 8}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanEdit {
    AddWeek(WeekInput),
    UpdateWeek {
        #[serde(flatten)]
        at: WeekPath,
        #[serde(flatten)]
        changes: WeekInput,
    },
    DeleteWeek(WeekPath),
    AddDay {
        #[serde(flatten)]
        at: WeekPath,
        #[serde(flatten)]
        day: DayInput,
    },
    UpdateDay {
        #[serde(flatten)]
        at: DayPath,
        #[serde(flatten)]
        changes: DayInput,
    },
    DeleteDay(DayPath),
    AddSession {
        #[serde(flatten)]
        at: DayPath,
        #[serde(flatten)]
        session: SessionInput,
    },
    UpdateSession {
        #[serde(flatten)]
        at: SessionPath,
        #[serde(flatten)]
        changes: SessionInput,
    },
    DeleteSession(SessionPath),
    AddExercise {
        #[serde(flatten)]
        at: SessionPath,
        #[serde(flatten)]
        exercise: ExerciseInput,
    },
    UpdateExercise {
        #[serde(flatten)]
        at: ExercisePath,
        #[serde(flatten)]
        changes: ExerciseInput,
    },
    DeleteExercise(ExercisePath),
    AddSet {
        #[serde(flatten)]
        at: ExercisePath,
        #[serde(flatten)]
        set: SetInput,
    },
    UpdateSet {
        #[serde(flatten)]
        at: SetPath,
        #[serde(flatten)]
        changes: SetInput,
    },
    DeleteSet(SetPath),
}

impl From<&WeekInput> for WeekPatch {
    fn from(input: &WeekInput) -> Self {
        Self {
            week_number: input.week_number,
            description: input.description.clone().map(Some),
        }
    }
}

impl From<&DayInput> for DayPatch {
    fn from(input: &DayInput) -> Self {
        Self {
            day_number: input.day_number,
            title: input.title.clone().map(Some),
            is_rest_day: input.is_rest_day,
        }
    }
}

impl From<&SessionInput> for SessionPatch {
    fn from(input: &SessionInput) -> Self {
        Self {
            order_index: input.order_index,
            title: input.title.clone().map(Some),
            notes: input.notes.clone().map(Some),
        }
    }
}

impl From<&ExerciseInput> for SessionExercisePatch {
    fn from(input: &ExerciseInput) -> Self {
        Self {
            exercise_id: input.exercise_id,
            order_within_session: input.order_within_session,
            execution_group: input.execution_group,
            post_exercise_rest_seconds: input.post_exercise_rest_seconds.map(Some),
            post_group_rest_seconds: input.post_group_rest_seconds.map(Some),
            notes: input.notes.clone().map(Some),
        }
    }
}

impl From<&SetInput> for SetPatch {
    fn from(input: &SetInput) -> Self {
        Self {
            set_number: input.set_number,
            set_type: input.set_type,
            target_reps: input.target_reps.map(Some),
            target_weight: input.target_weight.map(Some),
            weight_unit: input.weight_unit.map(Some),
            target_duration_seconds: input.target_duration_seconds.map(Some),
            target_distance_meters: input.target_distance_meters.map(Some),
            target_rest_seconds: input.target_rest_seconds.map(Some),
            notes: input.notes.clone().map(Some),
        }
    }
}
