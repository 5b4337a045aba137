//! Loading whole plan trees and saving changesets against them.

use std::collections::{HashMap, hash_map::Entry};

use log::{debug, info};
use rusqlite::{Connection, Row, params};

use super::rows::{HierarchyRow, ensure_owned, ensure_owned_at, id, parsed, parsed_opt};
use crate::{
    changeset::{Changeset, IdMapping, LevelChanges},
    error::{DatabaseResultExt, PlanError, Result},
    ids::{NodeId, TempId},
    models::{
        Day, DayFields, ExerciseRef, ExerciseSet, Level, PlanDetails, Session, SessionExercise,
        SessionExerciseFields, SessionFields, SetFields, Week, WeekFields,
    },
};

const SELECT_WEEKS_SQL: &str = "SELECT id, plan_id, week_number, description FROM plan_weeks \
     WHERE plan_id = ?1 ORDER BY week_number, id";
const SELECT_DAYS_SQL: &str = "SELECT d.id, d.week_id, d.day_number, d.title, d.is_rest_day \
     FROM plan_days d JOIN plan_weeks w ON d.week_id = w.id \
     WHERE w.plan_id = ?1 ORDER BY d.day_number, d.id";
const SELECT_SESSIONS_SQL: &str = "SELECT s.id, s.day_id, s.order_index, s.title, s.notes \
     FROM plan_sessions s \
     JOIN plan_days d ON s.day_id = d.id \
     JOIN plan_weeks w ON d.week_id = w.id \
     WHERE w.plan_id = ?1 ORDER BY s.order_index, s.id";
const SELECT_EXERCISES_SQL: &str = "SELECT se.id, se.session_id, se.exercise_id, \
     se.order_within_session, se.execution_group, se.post_exercise_rest_seconds, \
     se.post_group_rest_seconds, se.notes, e.name, e.image_url \
     FROM session_exercises se \
     JOIN exercises e ON se.exercise_id = e.id \
     JOIN plan_sessions s ON se.session_id = s.id \
     JOIN plan_days d ON s.day_id = d.id \
     JOIN plan_weeks w ON d.week_id = w.id \
     WHERE w.plan_id = ?1 ORDER BY se.order_within_session, se.id";
const SELECT_SETS_SQL: &str = "SELECT es.id, es.session_exercise_id, es.set_number, es.set_type, \
     es.target_reps, es.target_weight, es.weight_unit, es.target_duration_seconds, \
     es.target_distance_meters, es.target_rest_seconds, es.notes \
     FROM exercise_sets es \
     JOIN session_exercises se ON es.session_exercise_id = se.id \
     JOIN plan_sessions s ON se.session_id = s.id \
     JOIN plan_days d ON s.day_id = d.id \
     JOIN plan_weeks w ON d.week_id = w.id \
     WHERE w.plan_id = ?1 ORDER BY es.set_number, es.id";

/// Runs a per-level query for `plan_id` and groups the nodes by parent row
/// id, keeping the query's order within each group.
fn children_by_parent<T>(
    connection: &Connection,
    sql: &str,
    plan_id: u64,
    mut node: impl FnMut(&Row) -> rusqlite::Result<T>,
) -> Result<HashMap<u64, Vec<T>>> {
    let mut stmt = connection
        .prepare(sql)
        .db_context("Failed to prepare query")?;
    let rows = stmt
        .query_map(params![plan_id as i64], |row| Ok((id(row, 1)?, node(row)?)))
        .db_context("Failed to query plan hierarchy")?;

    let mut grouped: HashMap<u64, Vec<T>> = HashMap::new();
    for row in rows {
        let (parent, node) = row.db_context("Failed to fetch plan hierarchy")?;
        grouped.entry(parent).or_default().push(node);
    }
    Ok(grouped)
}

fn set_from_row(row: &Row) -> rusqlite::Result<ExerciseSet> {
    Ok(ExerciseSet::new(
        id(row, 0)?,
        SetFields {
            set_number: row.get(2)?,
            set_type: parsed(row, 3)?,
            target_reps: row.get(4)?,
            target_weight: row.get(5)?,
            weight_unit: parsed_opt(row, 6)?,
            target_duration_seconds: row.get(7)?,
            target_distance_meters: row.get(8)?,
            target_rest_seconds: row.get(9)?,
            notes: row.get(10)?,
        },
    ))
}

fn exercise_from_row(row: &Row) -> rusqlite::Result<SessionExercise> {
    let fields = SessionExerciseFields {
        exercise_id: id(row, 2)?,
        order_within_session: row.get(3)?,
        execution_group: row.get(4)?,
        post_exercise_rest_seconds: row.get(5)?,
        post_group_rest_seconds: row.get(6)?,
        notes: row.get(7)?,
    };
    let exercise = ExerciseRef {
        id: fields.exercise_id,
        name: row.get(8)?,
        image_url: row.get(9)?,
    };
    Ok(SessionExercise::new(id(row, 0)?, fields).with_exercise(exercise))
}

impl super::Database {
    /// Loads a plan with its whole hierarchy, every level sorted by its
    /// ordering field (ties broken by row id). Returns `None` for an unknown
    /// plan.
    pub fn get_plan_details(&self, plan_id: u64) -> Result<Option<PlanDetails>> {
        let Some(plan) = self.get_plan(plan_id)? else {
            return Ok(None);
        };
        let conn = &self.connection;

        let mut sets = children_by_parent(conn, SELECT_SETS_SQL, plan_id, set_from_row)?;
        let mut exercises =
            children_by_parent(conn, SELECT_EXERCISES_SQL, plan_id, |row| {
                let exercise = exercise_from_row(row)?;
                let key = id(row, 0)?;
                Ok(exercise.with_sets(sets.remove(&key).unwrap_or_default()))
            })?;
        let mut sessions = children_by_parent(conn, SELECT_SESSIONS_SQL, plan_id, |row| {
            let session = Session::new(
                id(row, 0)?,
                SessionFields {
                    order_index: row.get(2)?,
                    title: row.get(3)?,
                    notes: row.get(4)?,
                },
            );
            let key = id(row, 0)?;
            Ok(session.with_exercises(exercises.remove(&key).unwrap_or_default()))
        })?;
        let mut days = children_by_parent(conn, SELECT_DAYS_SQL, plan_id, |row| {
            let day = Day::new(
                id(row, 0)?,
                DayFields {
                    day_number: row.get(2)?,
                    title: row.get(3)?,
                    is_rest_day: row.get(4)?,
                },
            );
            let key = id(row, 0)?;
            Ok(day.with_sessions(sessions.remove(&key).unwrap_or_default()))
        })?;
        let mut weeks = children_by_parent(conn, SELECT_WEEKS_SQL, plan_id, |row| {
            let week = Week::new(
                id(row, 0)?,
                WeekFields {
                    week_number: row.get(2)?,
                    description: row.get(3)?,
                },
            );
            let key = id(row, 0)?;
            Ok(week.with_days(days.remove(&key).unwrap_or_default()))
        })?;

        let weeks = weeks.remove(&plan_id).unwrap_or_default();
        Ok(Some(PlanDetails::new(plan).with_weeks(weeks)))
    }

    /// Applies every change of `changeset` in a single transaction.
    ///
    /// Deletions run first, top-down, then updates, then insertions level by
    /// level so that a node added under a new parent finds the parent's row.
    /// Returns the row id assigned to each temporary id. Any failure rolls
    /// the whole changeset back.
    pub fn save_plan_changes(&mut self, changeset: &Changeset) -> Result<IdMapping> {
        let plan_id = changeset.plan_id;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::plan_exists(&tx, plan_id)? {
            return Err(PlanError::PlanNotFound { id: plan_id });
        }

        check_targets(&tx, plan_id, &changeset.weeks)?;
        check_targets(&tx, plan_id, &changeset.days)?;
        check_targets(&tx, plan_id, &changeset.sessions)?;
        check_targets(&tx, plan_id, &changeset.exercises)?;
        check_targets(&tx, plan_id, &changeset.sets)?;

        delete_rows(&tx, &changeset.weeks)?;
        delete_rows(&tx, &changeset.days)?;
        delete_rows(&tx, &changeset.sessions)?;
        delete_rows(&tx, &changeset.exercises)?;
        delete_rows(&tx, &changeset.sets)?;

        update_rows(&tx, &changeset.weeks)?;
        update_rows(&tx, &changeset.days)?;
        update_rows(&tx, &changeset.sessions)?;
        update_rows(&tx, &changeset.exercises)?;
        update_rows(&tx, &changeset.sets)?;

        let mut inserted = Inserted::default();
        inserted.insert_rows(&tx, plan_id, &changeset.weeks)?;
        inserted.insert_rows(&tx, plan_id, &changeset.days)?;
        inserted.insert_rows(&tx, plan_id, &changeset.sessions)?;
        inserted.insert_rows(&tx, plan_id, &changeset.exercises)?;
        inserted.insert_rows(&tx, plan_id, &changeset.sets)?;

        Self::touch_plan(&tx, plan_id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        let counts = changeset.counts();
        info!(
            "Saved plan {plan_id}: {} added, {} updated, {} deleted",
            counts.added, counts.updated, counts.deleted
        );
        Ok(inserted.mapping)
    }
}

/// Every updated or deleted row must belong to the plan being saved.
fn check_targets<R: HierarchyRow>(
    connection: &Connection,
    plan_id: u64,
    changes: &LevelChanges<R>,
) -> Result<()> {
    for id in changes.updated.iter().map(|node| node.id).chain(changes.deleted.iter().copied()) {
        ensure_owned::<R>(connection, plan_id, id)?;
    }
    Ok(())
}

/// Deletes the listed rows. A row already removed by the cascade of an
/// earlier deletion is not an error.
fn delete_rows<R: HierarchyRow>(connection: &Connection, changes: &LevelChanges<R>) -> Result<()> {
    for &id in &changes.deleted {
        let removed = connection
            .execute(R::DELETE_SQL, params![id as i64])
            .db_context("Failed to delete row")?;
        debug!("Deleted {} {id} ({removed} rows)", R::LEVEL);
    }
    Ok(())
}

/// Updates the listed rows. Targets are checked before any deletion, so a
/// row missing here went with the cascade of a deleted ancestor.
fn update_rows<R: HierarchyRow>(connection: &Connection, changes: &LevelChanges<R>) -> Result<()> {
    for node in &changes.updated {
        node.fields.validate(connection)?;
        let updated = node
            .fields
            .update(connection, node.id)
            .db_context("Failed to update row")?;
        if updated == 0 {
            debug!("Skipped update of {} {} removed by cascade", R::LEVEL, node.id);
        }
    }
    Ok(())
}

/// Rows inserted so far in one save.
#[derive(Default)]
struct Inserted {
    levels: HashMap<TempId, Level>,
    mapping: IdMapping,
}

impl Inserted {
    fn insert_rows<R: HierarchyRow>(
        &mut self,
        connection: &Connection,
        plan_id: u64,
        changes: &LevelChanges<R>,
    ) -> Result<()> {
        for node in &changes.added {
            let Entry::Vacant(slot) = self.levels.entry(node.temp_id) else {
                return Err(PlanError::reconcile(format!(
                    "temporary id {} is used more than once",
                    node.temp_id
                )));
            };
            slot.insert(R::LEVEL);

            let parent = self.parent_row::<R>(connection, plan_id, node.temp_id, node.parent)?;
            node.fields.validate(connection)?;
            node.fields
                .insert(connection, parent)
                .db_context("Failed to insert row")?;
            self.mapping
                .insert(node.temp_id, connection.last_insert_rowid() as u64);
        }
        Ok(())
    }

    /// Row id of the parent of an added node of level `R`.
    fn parent_row<R: HierarchyRow>(
        &self,
        connection: &Connection,
        plan_id: u64,
        temp_id: TempId,
        parent: NodeId,
    ) -> Result<u64> {
        match (R::PARENT, parent) {
            (None, NodeId::Persisted(id)) if id == plan_id => Ok(id),
            (None, other) => Err(PlanError::reconcile(format!(
                "{} {temp_id} must be added to plan {plan_id}, not {other}",
                R::LEVEL
            ))),
            (Some(level), NodeId::Persisted(id)) => {
                ensure_owned_at(connection, level, plan_id, id)?;
                Ok(id)
            }
            (Some(level), NodeId::Temp(parent)) => {
                let added_at = self.levels.get(&parent);
                match (added_at, self.mapping.get(&parent)) {
                    (Some(added_at), Some(row_id)) if *added_at == level => Ok(row_id),
                    _ => Err(PlanError::reconcile(format!(
                        "{} {temp_id} refers to {level} {parent}, which is not added before it",
                        R::LEVEL
                    ))),
                }
            }
        }
    }
}
