//! Structural mutations of the current tree.
//!
//! Every operation validates its path against the current tree before
//! touching it, so a failed call leaves the tree exactly as it was. A
//! successful call copies only the nodes on the path to the edited node
//! (`Arc::make_mut`); all other branches stay shared.

use std::{collections::HashSet, fmt::Display, sync::Arc};

use log::debug;

use super::PlanEditor;
use crate::{
    error::{PlanError, Result},
    ids::NodeId,
    models::{
        Day, DayPatch, DayPath, ExercisePath, ExerciseRef, ExerciseSet, Level, Session,
        SessionExercise, SessionExercisePatch, SessionPatch, SessionPath, SetPatch, SetPath, Week,
        WeekPatch, WeekPath,
    },
};

fn invalid_path(level: Level, path: impl Display) -> PlanError {
    PlanError::InvalidPath {
        level,
        path: path.to_string(),
    }
}

fn ensure_exists(exists: bool, level: Level, path: impl Display) -> Result<()> {
    if exists {
        Ok(())
    } else {
        Err(invalid_path(level, path))
    }
}

fn check_day_number(day_number: u8) -> Result<()> {
    if (1..=7).contains(&day_number) {
        Ok(())
    } else {
        Err(PlanError::invalid_input("day_number")
            .with_reason(format!("{day_number} is not between 1 and 7")))
    }
}

impl PlanEditor {
    fn ensure_editable(&self) -> Result<()> {
        if self.can_edit {
            Ok(())
        } else {
            Err(PlanError::ReadOnly {
                plan_id: self.plan_id(),
            })
        }
    }

    /// Rest days hide their sessions, so nothing at or below session level
    /// can be edited there.
    fn ensure_training_day(&self, path: DayPath) -> Result<()> {
        let day = self
            .current
            .day(path)
            .ok_or_else(|| invalid_path(Level::Day, path))?;
        if day.fields.is_rest_day {
            return Err(PlanError::invalid_input("day")
                .with_reason(format!("{path} is a rest day and has no sessions")));
        }
        Ok(())
    }

    /// Checks that a node about to be added, and everything nested in it,
    /// carries fresh temporary ids.
    fn check_new_ids(&mut self, new_ids: &[(Level, NodeId)]) -> Result<()> {
        let existing: HashSet<NodeId> = self
            .current
            .node_ids()
            .into_iter()
            .map(|(_, id)| id)
            .collect();
        let mut seen = HashSet::new();

        for (level, id) in new_ids {
            let Some(temp_id) = id.temp() else {
                return Err(PlanError::invalid_input("id").with_reason(format!(
                    "new {level} must carry a temporary id, got {id}"
                )));
            };
            if existing.contains(id) || !seen.insert(*id) {
                return Err(PlanError::invalid_input("id")
                    .with_reason(format!("{temp_id} is already used in this plan")));
            }
        }

        for (_, id) in new_ids {
            if let Some(temp_id) = id.temp() {
                self.ids.skip_past(temp_id);
            }
        }
        Ok(())
    }

    fn week_mut(&mut self, path: WeekPath) -> Result<&mut Week> {
        self.current
            .week(path)
            .ok_or_else(|| invalid_path(Level::Week, path))?;
        Ok(Arc::make_mut(&mut self.current.weeks[path.week]))
    }

    fn day_mut(&mut self, path: DayPath) -> Result<&mut Day> {
        self.current
            .day(path)
            .ok_or_else(|| invalid_path(Level::Day, path))?;
        let week = self.week_mut(path.week())?;
        Ok(Arc::make_mut(&mut week.days[path.day]))
    }

    fn session_mut(&mut self, path: SessionPath) -> Result<&mut Session> {
        self.current
            .session(path)
            .ok_or_else(|| invalid_path(Level::Session, path))?;
        let day = self.day_mut(path.day())?;
        Ok(Arc::make_mut(&mut day.sessions[path.session]))
    }

    fn exercise_mut(&mut self, path: ExercisePath) -> Result<&mut SessionExercise> {
        self.current
            .exercise(path)
            .ok_or_else(|| invalid_path(Level::Exercise, path))?;
        let session = self.session_mut(path.session())?;
        Ok(Arc::make_mut(&mut session.exercises[path.exercise]))
    }

    fn set_mut(&mut self, path: SetPath) -> Result<&mut ExerciseSet> {
        self.current
            .set(path)
            .ok_or_else(|| invalid_path(Level::Set, path))?;
        let exercise = self.exercise_mut(path.exercise())?;
        Ok(Arc::make_mut(&mut exercise.sets[path.set]))
    }

    // Weeks

    /// Appends a week to the plan and returns its path.
    pub fn add_week(&mut self, week: Week) -> Result<WeekPath> {
        self.ensure_editable()?;
        let mut ids = Vec::new();
        week.collect_ids(&mut ids);
        self.check_new_ids(&ids)?;

        debug!("Adding week {} to plan {}", week.id, self.plan_id());
        self.current.weeks.push(Arc::new(week));
        Ok(WeekPath::new(self.current.weeks.len() - 1))
    }

    pub fn update_week(&mut self, path: WeekPath, patch: &WeekPatch) -> Result<()> {
        self.ensure_editable()?;
        if patch.is_empty() {
            return ensure_exists(self.current.week(path).is_some(), Level::Week, path);
        }
        patch.apply_to(&mut self.week_mut(path)?.fields);
        Ok(())
    }

    /// Removes a week and everything below it.
    pub fn delete_week(&mut self, path: WeekPath) -> Result<Arc<Week>> {
        self.ensure_editable()?;
        self.current
            .week(path)
            .ok_or_else(|| invalid_path(Level::Week, path))?;

        let removed = self.current.weeks.remove(path.week);
        debug!("Deleted week {} at {path}", removed.id);
        Ok(removed)
    }

    // Days

    /// Appends a day to the week at `week` and returns its path.
    pub fn add_day(&mut self, week: WeekPath, day: Day) -> Result<DayPath> {
        self.ensure_editable()?;
        check_day_number(day.fields.day_number)?;
        self.current
            .week(week)
            .ok_or_else(|| invalid_path(Level::Week, week))?;
        let mut ids = Vec::new();
        day.collect_ids(&mut ids);
        self.check_new_ids(&ids)?;

        debug!("Adding day {} at {week}", day.id);
        let parent = self.week_mut(week)?;
        parent.days.push(Arc::new(day));
        Ok(week.day(parent.days.len() - 1))
    }

    pub fn update_day(&mut self, path: DayPath, patch: &DayPatch) -> Result<()> {
        self.ensure_editable()?;
        if let Some(day_number) = patch.day_number {
            check_day_number(day_number)?;
        }
        if patch.is_empty() {
            return ensure_exists(self.current.day(path).is_some(), Level::Day, path);
        }
        patch.apply_to(&mut self.day_mut(path)?.fields);
        Ok(())
    }

    pub fn delete_day(&mut self, path: DayPath) -> Result<Arc<Day>> {
        self.ensure_editable()?;
        self.current
            .day(path)
            .ok_or_else(|| invalid_path(Level::Day, path))?;

        let removed = self.week_mut(path.week())?.days.remove(path.day);
        debug!("Deleted day {} at {path}", removed.id);
        Ok(removed)
    }

    // Sessions

    /// Appends a session to a training day. Rest days take no sessions.
    pub fn add_session(&mut self, day: DayPath, session: Session) -> Result<SessionPath> {
        self.ensure_editable()?;
        self.ensure_training_day(day)?;
        let mut ids = Vec::new();
        session.collect_ids(&mut ids);
        self.check_new_ids(&ids)?;

        debug!("Adding session {} at {day}", session.id);
        let parent = self.day_mut(day)?;
        parent.sessions.push(Arc::new(session));
        Ok(day.session(parent.sessions.len() - 1))
    }

    pub fn update_session(&mut self, path: SessionPath, patch: &SessionPatch) -> Result<()> {
        self.ensure_editable()?;
        ensure_exists(self.current.session(path).is_some(), Level::Session, path)?;
        self.ensure_training_day(path.day())?;
        if patch.is_empty() {
            return Ok(());
        }
        patch.apply_to(&mut self.session_mut(path)?.fields);
        Ok(())
    }

    pub fn delete_session(&mut self, path: SessionPath) -> Result<Arc<Session>> {
        self.ensure_editable()?;
        self.current
            .session(path)
            .ok_or_else(|| invalid_path(Level::Session, path))?;
        self.ensure_training_day(path.day())?;

        let removed = self.day_mut(path.day())?.sessions.remove(path.session);
        debug!("Deleted session {} at {path}", removed.id);
        Ok(removed)
    }

    // Exercises

    /// Appends an exercise to a session and returns its path.
    pub fn add_exercise(
        &mut self,
        session: SessionPath,
        exercise: SessionExercise,
    ) -> Result<ExercisePath> {
        self.ensure_editable()?;
        self.current
            .session(session)
            .ok_or_else(|| invalid_path(Level::Session, session))?;
        self.ensure_training_day(session.day())?;
        let mut ids = Vec::new();
        exercise.collect_ids(&mut ids);
        self.check_new_ids(&ids)?;

        debug!("Adding exercise {} at {session}", exercise.id);
        let parent = self.session_mut(session)?;
        parent.exercises.push(Arc::new(exercise));
        Ok(session.exercise(parent.exercises.len() - 1))
    }

    /// Applies `patch`. Switching to another library exercise drops the
    /// joined library details, which no longer describe it.
    pub fn update_exercise(&mut self, path: ExercisePath, patch: &SessionExercisePatch) -> Result<()> {
        self.ensure_editable()?;
        ensure_exists(self.current.exercise(path).is_some(), Level::Exercise, path)?;
        self.ensure_training_day(path.session().day())?;
        if patch.is_empty() {
            return Ok(());
        }

        let exercise = self.exercise_mut(path)?;
        patch.apply_to(&mut exercise.fields);
        let stale = exercise
            .exercise
            .as_ref()
            .is_some_and(|library| library.id != exercise.fields.exercise_id);
        if stale {
            exercise.exercise = None;
        }
        Ok(())
    }

    /// Attaches library details to an exercise for display. This is not a
    /// change to save.
    pub fn set_exercise_details(&mut self, path: ExercisePath, details: ExerciseRef) -> Result<()> {
        let current = self
            .current
            .exercise(path)
            .ok_or_else(|| invalid_path(Level::Exercise, path))?;
        if current.fields.exercise_id != details.id {
            return Err(PlanError::invalid_input("exercise").with_reason(format!(
                "details for exercise {} given for exercise {}",
                details.id, current.fields.exercise_id
            )));
        }
        if current.exercise.as_ref() != Some(&details) {
            self.exercise_mut(path)?.exercise = Some(details);
        }
        Ok(())
    }

    pub fn delete_exercise(&mut self, path: ExercisePath) -> Result<Arc<SessionExercise>> {
        self.ensure_editable()?;
        self.current
            .exercise(path)
            .ok_or_else(|| invalid_path(Level::Exercise, path))?;
        self.ensure_training_day(path.session().day())?;

        let removed = self
            .session_mut(path.session())?
            .exercises
            .remove(path.exercise);
        debug!("Deleted exercise {} at {path}", removed.id);
        Ok(removed)
    }

    // Sets

    /// Appends a set to an exercise and returns its path.
    pub fn add_set(&mut self, exercise: ExercisePath, set: ExerciseSet) -> Result<SetPath> {
        self.ensure_editable()?;
        self.current
            .exercise(exercise)
            .ok_or_else(|| invalid_path(Level::Exercise, exercise))?;
        self.ensure_training_day(exercise.session().day())?;
        self.check_new_ids(&[(Level::Set, set.id)])?;

        debug!("Adding set {} at {exercise}", set.id);
        let parent = self.exercise_mut(exercise)?;
        parent.sets.push(Arc::new(set));
        Ok(exercise.set(parent.sets.len() - 1))
    }

    pub fn update_set(&mut self, path: SetPath, patch: &SetPatch) -> Result<()> {
        self.ensure_editable()?;
        ensure_exists(self.current.set(path).is_some(), Level::Set, path)?;
        self.ensure_training_day(path.exercise().session().day())?;
        if patch.is_empty() {
            return Ok(());
        }
        patch.apply_to(&mut self.set_mut(path)?.fields);
        Ok(())
    }

    /// Removes a set. Remaining sets keep their set numbers.
    pub fn delete_set(&mut self, path: SetPath) -> Result<Arc<ExerciseSet>> {
        self.ensure_editable()?;
        self.current
            .set(path)
            .ok_or_else(|| invalid_path(Level::Set, path))?;
        self.ensure_training_day(path.exercise().session().day())?;

        let removed = self.exercise_mut(path.exercise())?.sets.remove(path.set);
        debug!("Deleted set {} at {path}", removed.id);
        Ok(removed)
    }
}
