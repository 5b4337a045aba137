//! Data models for training plans and the exercise library.
//!
//! A plan is a tree: `Plan → Week[] → Day[] → Session[] → SessionExercise[]
//! → ExerciseSet[]`. Each node is split into an identity ([`NodeId`]), its own
//! editable attributes (the `*Fields` structs, which are exactly what a
//! changeset carries for that level) and its children.
//!
//! Children are stored as `Vec<Arc<Child>>`. Cloning a tree is cheap, and an
//! edit made through [`Arc::make_mut`] copies only the nodes on the edited
//! path, leaving every other branch shared with the previous version of the
//! tree.
//!
//! Display implementations for these models live in
//! [`crate::display::models`].
//!
//! [`NodeId`]: crate::ids::NodeId
//! [`Arc::make_mut`]: std::sync::Arc::make_mut

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod enums;
pub mod exercise;
pub mod filters;
pub mod hierarchy;
pub mod patches;
pub mod path;
pub mod plan;
pub mod summary;


pub use enums::{Difficulty, SetType, Visibility, WeightUnit};
pub use exercise::{Exercise, ExerciseRef};
pub use filters::{ExerciseFilter, PlanFilter};
pub use hierarchy::{
    Day, DayFields, ExerciseSet, Session, SessionExercise, SessionExerciseFields, SessionFields,
    SetFields, Week, WeekFields,
};
pub use patches::{DayPatch, SessionExercisePatch, SessionPatch, SetPatch, WeekPatch};
pub use path::{DayPath, ExercisePath, SessionPath, SetPath, WeekPath};
pub use plan::{Plan, PlanDetails};
pub use summary::PlanSummary;

/// A level of the plan hierarchy below the plan itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Week,
    Day,
    Session,
    Exercise,
    Set,
}

impl Level {
    /// Lowercase name used in messages and paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Week => "week",
            Level::Day => "day",
            Level::Session => "session",
            Level::Exercise => "exercise",
            Level::Set => "set",
        }
    }

    /// Capitalized name for the start of a sentence.
    pub fn title(&self) -> &'static str {
        match self {
            Level::Week => "Week",
            Level::Day => "Day",
            Level::Session => "Session",
            Level::Exercise => "Exercise",
            Level::Set => "Set",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
