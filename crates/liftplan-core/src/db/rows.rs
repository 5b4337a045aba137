//! Row conversion and per-level SQL for hierarchy tables.

use std::str::FromStr;

use jiff::Timestamp;
use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};

use crate::{
    error::{DatabaseResultExt, PlanError, Result},
    models::{DayFields, Level, SessionExerciseFields, SessionFields, SetFields, WeekFields},
};

/// Reads an integer row id.
pub(super) fn id(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Reads a timestamp stored as RFC 3339 text.
pub(super) fn timestamp(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a text column through the type's `FromStr`.
pub(super) fn parsed<T: FromStr<Err = String>>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

pub(super) fn parsed_opt<T: FromStr<Err = String>>(
    row: &Row,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        s.parse()
            .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
    })
    .transpose()
}

/// Storage of one hierarchy level.
pub(super) trait HierarchyRow {
    const LEVEL: Level;
    /// Level of the parent row, `None` when the parent is the plan itself
    const PARENT: Option<Level>;
    /// Plan id of the row with id `?1`
    const OWNER_SQL: &'static str;
    const DELETE_SQL: &'static str;

    fn insert(&self, conn: &Connection, parent: u64) -> rusqlite::Result<usize>;

    fn update(&self, conn: &Connection, id: u64) -> rusqlite::Result<usize>;

    /// Checks that the fields can be stored.
    fn validate(&self, _conn: &Connection) -> Result<()> {
        Ok(())
    }
}

/// Fails with `NodeNotFound` unless row `id` of level `R` belongs to `plan_id`.
pub(super) fn ensure_owned<R: HierarchyRow>(conn: &Connection, plan_id: u64, id: u64) -> Result<()> {
    let owner: Option<i64> = conn
        .query_row(R::OWNER_SQL, params![id as i64], |row| row.get(0))
        .optional()
        .db_context("Failed to look up row owner")?;

    match owner {
        Some(owner) if owner as u64 == plan_id => Ok(()),
        _ => Err(PlanError::NodeNotFound { level: R::LEVEL, id }),
    }
}

/// [`ensure_owned`] for a level known only at runtime.
pub(super) fn ensure_owned_at(conn: &Connection, level: Level, plan_id: u64, id: u64) -> Result<()> {
    match level {
        Level::Week => ensure_owned::<WeekFields>(conn, plan_id, id),
        Level::Day => ensure_owned::<DayFields>(conn, plan_id, id),
        Level::Session => ensure_owned::<SessionFields>(conn, plan_id, id),
        Level::Exercise => ensure_owned::<SessionExerciseFields>(conn, plan_id, id),
        Level::Set => ensure_owned::<SetFields>(conn, plan_id, id),
    }
}

const CHECK_EXERCISE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?1)";

impl HierarchyRow for WeekFields {
    const LEVEL: Level = Level::Week;
    const PARENT: Option<Level> = None;
    const OWNER_SQL: &'static str = "SELECT plan_id FROM plan_weeks WHERE id = ?1";
    const DELETE_SQL: &'static str = "DELETE FROM plan_weeks WHERE id = ?1";

    fn insert(&self, conn: &Connection, parent: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO plan_weeks (plan_id, week_number, description) VALUES (?1, ?2, ?3)",
            params![parent as i64, self.week_number, self.description],
        )
    }

    fn update(&self, conn: &Connection, id: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE plan_weeks SET week_number = ?1, description = ?2 WHERE id = ?3",
            params![self.week_number, self.description, id as i64],
        )
    }
}

impl HierarchyRow for DayFields {
    const LEVEL: Level = Level::Day;
    const PARENT: Option<Level> = Some(Level::Week);
    const OWNER_SQL: &'static str = "SELECT w.plan_id FROM plan_days d \
         JOIN plan_weeks w ON d.week_id = w.id WHERE d.id = ?1";
    const DELETE_SQL: &'static str = "DELETE FROM plan_days WHERE id = ?1";

    fn insert(&self, conn: &Connection, parent: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO plan_days (week_id, day_number, title, is_rest_day) VALUES (?1, ?2, ?3, ?4)",
            params![parent as i64, self.day_number, self.title, self.is_rest_day],
        )
    }

    fn update(&self, conn: &Connection, id: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE plan_days SET day_number = ?1, title = ?2, is_rest_day = ?3 WHERE id = ?4",
            params![self.day_number, self.title, self.is_rest_day, id as i64],
        )
    }

    fn validate(&self, _conn: &Connection) -> Result<()> {
        if (1..=7).contains(&self.day_number) {
            Ok(())
        } else {
            Err(PlanError::invalid_input("day_number")
                .with_reason(format!("{} is not between 1 and 7", self.day_number)))
        }
    }
}

impl HierarchyRow for SessionFields {
    const LEVEL: Level = Level::Session;
    const PARENT: Option<Level> = Some(Level::Day);
    const OWNER_SQL: &'static str = "SELECT w.plan_id FROM plan_sessions s \
         JOIN plan_days d ON s.day_id = d.id \
         JOIN plan_weeks w ON d.week_id = w.id WHERE s.id = ?1";
    const DELETE_SQL: &'static str = "DELETE FROM plan_sessions WHERE id = ?1";

    fn insert(&self, conn: &Connection, parent: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO plan_sessions (day_id, order_index, title, notes) VALUES (?1, ?2, ?3, ?4)",
            params![parent as i64, self.order_index, self.title, self.notes],
        )
    }

    fn update(&self, conn: &Connection, id: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE plan_sessions SET order_index = ?1, title = ?2, notes = ?3 WHERE id = ?4",
            params![self.order_index, self.title, self.notes, id as i64],
        )
    }
}

impl HierarchyRow for SessionExerciseFields {
    const LEVEL: Level = Level::Exercise;
    const PARENT: Option<Level> = Some(Level::Session);
    const OWNER_SQL: &'static str = "SELECT w.plan_id FROM session_exercises se \
         JOIN plan_sessions s ON se.session_id = s.id \
         JOIN plan_days d ON s.day_id = d.id \
         JOIN plan_weeks w ON d.week_id = w.id WHERE se.id = ?1";
    const DELETE_SQL: &'static str = "DELETE FROM session_exercises WHERE id = ?1";

    fn insert(&self, conn: &Connection, parent: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO session_exercises (session_id, exercise_id, order_within_session, \
             execution_group, post_exercise_rest_seconds, post_group_rest_seconds, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                parent as i64,
                self.exercise_id as i64,
                self.order_within_session,
                self.execution_group,
                self.post_exercise_rest_seconds,
                self.post_group_rest_seconds,
                self.notes
            ],
        )
    }

    fn update(&self, conn: &Connection, id: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE session_exercises SET exercise_id = ?1, order_within_session = ?2, \
             execution_group = ?3, post_exercise_rest_seconds = ?4, \
             post_group_rest_seconds = ?5, notes = ?6 WHERE id = ?7",
            params![
                self.exercise_id as i64,
                self.order_within_session,
                self.execution_group,
                self.post_exercise_rest_seconds,
                self.post_group_rest_seconds,
                self.notes,
                id as i64
            ],
        )
    }

    fn validate(&self, conn: &Connection) -> Result<()> {
        let exists: bool = conn
            .query_row(
                CHECK_EXERCISE_EXISTS_SQL,
                params![self.exercise_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check exercise existence")?;

        if exists {
            Ok(())
        } else {
            Err(PlanError::ExerciseNotFound {
                id: self.exercise_id,
            })
        }
    }
}

impl HierarchyRow for SetFields {
    const LEVEL: Level = Level::Set;
    const PARENT: Option<Level> = Some(Level::Exercise);
    const OWNER_SQL: &'static str = "SELECT w.plan_id FROM exercise_sets es \
         JOIN session_exercises se ON es.session_exercise_id = se.id \
         JOIN plan_sessions s ON se.session_id = s.id \
         JOIN plan_days d ON s.day_id = d.id \
         JOIN plan_weeks w ON d.week_id = w.id WHERE es.id = ?1";
    const DELETE_SQL: &'static str = "DELETE FROM exercise_sets WHERE id = ?1";

    fn insert(&self, conn: &Connection, parent: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO exercise_sets (session_exercise_id, set_number, set_type, target_reps, \
             target_weight, weight_unit, target_duration_seconds, target_distance_meters, \
             target_rest_seconds, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                parent as i64,
                self.set_number,
                self.set_type.as_str(),
                self.target_reps,
                self.target_weight,
                self.weight_unit.map(|u| u.as_str()),
                self.target_duration_seconds,
                self.target_distance_meters,
                self.target_rest_seconds,
                self.notes
            ],
        )
    }

    fn update(&self, conn: &Connection, id: u64) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE exercise_sets SET set_number = ?1, set_type = ?2, target_reps = ?3, \
             target_weight = ?4, weight_unit = ?5, target_duration_seconds = ?6, \
             target_distance_meters = ?7, target_rest_seconds = ?8, notes = ?9 WHERE id = ?10",
            params![
                self.set_number,
                self.set_type.as_str(),
                self.target_reps,
                self.target_weight,
                self.weight_unit.map(|u| u.as_str()),
                self.target_duration_seconds,
                self.target_distance_meters,
                self.target_rest_seconds,
                self.notes,
                id as i64
            ],
        )
    }
}
