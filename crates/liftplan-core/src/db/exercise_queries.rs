//! Exercise library queries.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, Row, params};

use super::rows::{id, timestamp};
use crate::{
    error::{DatabaseResultExt, PlanError, Result},
    models::{Exercise, ExerciseFilter},
    params::CreateExercise,
};

const INSERT_EXERCISE_SQL: &str = "INSERT INTO exercises (name, image_url, primary_muscle, \
     equipment, instructions, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const EXERCISE_COLUMNS: &str =
    "id, name, image_url, primary_muscle, equipment, instructions, created_at";

fn exercise_from_row(row: &Row) -> rusqlite::Result<Exercise> {
    Ok(Exercise {
        id: id(row, 0)?,
        name: row.get(1)?,
        image_url: row.get(2)?,
        primary_muscle: row.get(3)?,
        equipment: row.get(4)?,
        instructions: row.get(5)?,
        created_at: timestamp(row, 6)?,
    })
}

impl super::Database {
    /// Adds an exercise to the library.
    pub fn create_exercise(&mut self, params: &CreateExercise) -> Result<Exercise> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(PlanError::invalid_input("name").with_reason("must not be empty"));
        }

        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_EXERCISE_SQL,
                params![
                    name,
                    params.image_url,
                    params.primary_muscle,
                    params.equipment,
                    params.instructions,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert exercise")?;

        Ok(Exercise {
            id: self.connection.last_insert_rowid() as u64,
            name: name.to_string(),
            image_url: params.image_url.clone(),
            primary_muscle: params.primary_muscle.clone(),
            equipment: params.equipment.clone(),
            instructions: params.instructions.clone(),
            created_at: now,
        })
    }

    pub fn get_exercise(&self, id: u64) -> Result<Option<Exercise>> {
        let query = format!("SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?1");
        self.connection
            .query_row(&query, params![id as i64], exercise_from_row)
            .optional()
            .db_context("Failed to query exercise")
    }

    /// Library entries matching `filter`, sorted by name.
    pub fn search_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
        let mut query = format!("SELECT {EXERCISE_COLUMNS} FROM exercises");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref name) = filter.name_contains {
            conditions.push("name LIKE ?");
            params_vec.push(Box::new(format!("%{name}%")));
        }
        if let Some(ref muscle) = filter.primary_muscle {
            conditions.push("primary_muscle = ? COLLATE NOCASE");
            params_vec.push(Box::new(muscle.clone()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY name COLLATE NOCASE, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let exercises = stmt
            .query_map(&params_refs[..], exercise_from_row)
            .db_context("Failed to query exercises")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch exercises")?;
        Ok(exercises)
    }
}
