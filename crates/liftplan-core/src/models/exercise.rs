//! Exercise library models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// An entry of the shared exercise library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    /// Unique identifier for the exercise
    pub id: u64,

    /// Display name, e.g. "Back Squat"
    pub name: String,

    /// Link to a demonstration image
    pub image_url: Option<String>,

    /// Main muscle group trained
    pub primary_muscle: Option<String>,

    /// Equipment needed
    pub equipment: Option<String>,

    /// How to perform the movement
    pub instructions: Option<String>,

    /// Timestamp when the exercise was added (UTC)
    pub created_at: Timestamp,
}

/// Library data shown next to an exercise inside a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseRef {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Exercise> for ExerciseRef {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name.clone(),
            image_url: exercise.image_url.clone(),
        }
    }
}
