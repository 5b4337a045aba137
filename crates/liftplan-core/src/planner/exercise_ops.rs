//! Exercise library operations for the Planner.

use super::Planner;
use crate::{
    display::Exercises,
    error::Result,
    models::{Exercise, ExerciseFilter},
    params::{CreateExercise, Id, SearchExercises},
};

impl Planner {
    /// Adds an exercise to the shared library.
    pub async fn create_exercise(&self, params: &CreateExercise) -> Result<Exercise> {
        let params = params.clone();
        self.with_database(move |db| db.create_exercise(&params))
            .await
    }

    pub async fn get_exercise(&self, params: &Id) -> Result<Option<Exercise>> {
        let id = params.id;
        self.with_database(move |db| db.get_exercise(id)).await
    }

    /// Searches the library by name and muscle group, sorted by name.
    pub async fn search_exercises(&self, params: &SearchExercises) -> Result<Exercises> {
        let filter = ExerciseFilter::from(params);
        let exercises = self
            .with_database(move |db| db.search_exercises(&filter))
            .await?;
        Ok(Exercises(exercises))
    }
}
