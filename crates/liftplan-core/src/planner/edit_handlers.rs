//! Translation of [`PlanEdit`]s into editor mutations.
//!
//! Edits may leave ordering values out. They are filled in with the next
//! value after the largest one among the siblings, so a new node sorts last.
//! Existing values are never renumbered.

use log::debug;

use super::Planner;
use crate::{
    editor::PlanEditor,
    error::{PlanError, Result},
    models::{
        Day, DayFields, DayPatch, ExercisePath, ExerciseRef, ExerciseSet, Session,
        SessionExercise, SessionExerciseFields, SessionExercisePatch, SessionFields, SessionPatch,
        SessionPath, SetFields, SetPatch, Week, WeekFields, WeekPatch,
    },
    params::{ExerciseInput, Id, PlanEdit, SetInput},
};

/// One past the largest value, 1 when there is none.
fn next_value(field: &str, values: impl Iterator<Item = u32>) -> Result<u32> {
    match values.max() {
        None => Ok(1),
        Some(last) => last.checked_add(1).ok_or_else(|| {
            PlanError::invalid_input(field)
                .with_reason(format!("no value follows {last}; give a {field} explicitly"))
        }),
    }
}

fn next_day_number(days: impl Iterator<Item = u8>) -> Result<u8> {
    match days.max() {
        None => Ok(1),
        Some(last) if last < 7 => Ok(last + 1),
        Some(_) => Err(PlanError::invalid_input("day_number")
            .with_reason("the week already has a day 7; give a day number explicitly")),
    }
}

fn set_fields(input: &SetInput, set_number: u32) -> SetFields {
    SetFields {
        set_number,
        set_type: input.set_type.unwrap_or_default(),
        target_reps: input.target_reps,
        target_weight: input.target_weight,
        weight_unit: input.weight_unit,
        target_duration_seconds: input.target_duration_seconds,
        target_distance_meters: input.target_distance_meters,
        target_rest_seconds: input.target_rest_seconds,
        notes: input.notes.clone(),
    }
}

impl Planner {
    /// Applies `edits` in order. Stops at the first failing edit; the editor
    /// keeps the edits applied before it.
    pub async fn apply_edits(&self, editor: &mut PlanEditor, edits: &[PlanEdit]) -> Result<()> {
        for (index, edit) in edits.iter().enumerate() {
            debug!("Applying edit {index} to plan {}", editor.plan_id());
            self.apply_edit(editor, edit).await?;
        }
        Ok(())
    }

    /// Applies a single edit, filling in defaults for left out values.
    pub async fn apply_edit(&self, editor: &mut PlanEditor, edit: &PlanEdit) -> Result<()> {
        match edit {
            PlanEdit::AddWeek(input) => {
                let week_number = match input.week_number {
                    Some(number) => number,
                    None => next_value(
                        "week_number",
                        editor.current().weeks.iter().map(|w| w.fields.week_number),
                    )?,
                };
                let fields = WeekFields {
                    week_number,
                    description: input.description.clone(),
                };
                let id = editor.temp_id();
                editor.add_week(Week::new(id, fields))?;
            }
            PlanEdit::UpdateWeek { at, changes } => {
                editor.update_week(*at, &WeekPatch::from(changes))?;
            }
            PlanEdit::DeleteWeek(at) => {
                editor.delete_week(*at)?;
            }

            PlanEdit::AddDay { at, day } => {
                let day_number = match day.day_number {
                    Some(number) => number,
                    None => next_day_number(
                        editor
                            .current()
                            .week(*at)
                            .into_iter()
                            .flat_map(|w| w.days.iter().map(|d| d.fields.day_number)),
                    )?,
                };
                let fields = DayFields {
                    day_number,
                    title: day.title.clone(),
                    is_rest_day: day.is_rest_day.unwrap_or(false),
                };
                let id = editor.temp_id();
                editor.add_day(*at, Day::new(id, fields))?;
            }
            PlanEdit::UpdateDay { at, changes } => {
                editor.update_day(*at, &DayPatch::from(changes))?;
            }
            PlanEdit::DeleteDay(at) => {
                editor.delete_day(*at)?;
            }

            PlanEdit::AddSession { at, session } => {
                let order_index = match session.order_index {
                    Some(order) => order,
                    None => next_value(
                        "order_index",
                        editor
                            .current()
                            .day(*at)
                            .into_iter()
                            .flat_map(|d| d.sessions.iter().map(|s| s.fields.order_index)),
                    )?,
                };
                let fields = SessionFields {
                    order_index,
                    title: session.title.clone(),
                    notes: session.notes.clone(),
                };
                let id = editor.temp_id();
                editor.add_session(*at, Session::new(id, fields))?;
            }
            PlanEdit::UpdateSession { at, changes } => {
                editor.update_session(*at, &SessionPatch::from(changes))?;
            }
            PlanEdit::DeleteSession(at) => {
                editor.delete_session(*at)?;
            }

            PlanEdit::AddExercise { at, exercise } => {
                self.add_exercise(editor, *at, exercise).await?;
            }
            PlanEdit::UpdateExercise { at, changes } => {
                self.update_exercise(editor, *at, changes).await?;
            }
            PlanEdit::DeleteExercise(at) => {
                editor.delete_exercise(*at)?;
            }

            PlanEdit::AddSet { at, set } => {
                let set_number = match set.set_number {
                    Some(number) => number,
                    None => next_value(
                        "set_number",
                        editor
                            .current()
                            .exercise(*at)
                            .into_iter()
                            .flat_map(|e| e.sets.iter().map(|s| s.fields.set_number)),
                    )?,
                };
                let fields = set_fields(set, set_number);
                let id = editor.temp_id();
                editor.add_set(*at, ExerciseSet::new(id, fields))?;
            }
            PlanEdit::UpdateSet { at, changes } => {
                editor.update_set(*at, &SetPatch::from(changes))?;
            }
            PlanEdit::DeleteSet(at) => {
                editor.delete_set(*at)?;
            }
        }
        Ok(())
    }

    /// Looks up a library exercise for display next to a session exercise.
    async fn exercise_ref(&self, exercise_id: u64) -> Result<ExerciseRef> {
        let exercise = self
            .get_exercise(&Id { id: exercise_id })
            .await?
            .ok_or(PlanError::ExerciseNotFound { id: exercise_id })?;
        Ok(ExerciseRef::from(&exercise))
    }

    async fn add_exercise(
        &self,
        editor: &mut PlanEditor,
        at: SessionPath,
        input: &ExerciseInput,
    ) -> Result<()> {
        let exercise_id = input.exercise_id.ok_or_else(|| {
            PlanError::invalid_input("exercise_id").with_reason("required when adding an exercise")
        })?;
        let library = self.exercise_ref(exercise_id).await?;

        let siblings = editor
            .current()
            .session(at)
            .map(|s| s.exercises.as_slice())
            .unwrap_or_default();
        let order_within_session = match input.order_within_session {
            Some(order) => order,
            None => next_value(
                "order_within_session",
                siblings.iter().map(|e| e.fields.order_within_session),
            )?,
        };
        let execution_group = match input.execution_group {
            Some(group) => group,
            None => next_value(
                "execution_group",
                siblings.iter().map(|e| e.fields.execution_group),
            )?,
        };

        let fields = SessionExerciseFields {
            exercise_id,
            order_within_session,
            execution_group,
            post_exercise_rest_seconds: input.post_exercise_rest_seconds,
            post_group_rest_seconds: input.post_group_rest_seconds,
            notes: input.notes.clone(),
        };
        let exercise = SessionExercise::new(editor.temp_id(), fields).with_exercise(library);
        editor.add_exercise(at, exercise)?;
        Ok(())
    }

    /// Updates an exercise, refreshing its library details when it now
    /// refers to another library exercise.
    async fn update_exercise(
        &self,
        editor: &mut PlanEditor,
        at: ExercisePath,
        changes: &ExerciseInput,
    ) -> Result<()> {
        let library = match changes.exercise_id {
            Some(id) => Some(self.exercise_ref(id).await?),
            None => None,
        };

        editor.update_exercise(at, &SessionExercisePatch::from(changes))?;
        if let Some(library) = library {
            editor.set_exercise_details(at, library)?;
        }
        Ok(())
    }
}
