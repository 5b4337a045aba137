//! Indexed view of an editor's working tree.
//!
//! Unlike [`PlanOutline`](super::PlanOutline), nodes are listed in tree order
//! with the index path that editing operations take, e.g. `[0.1.0]` for
//! week 0, day 1, session 0. Nodes that are new or modified since the last
//! save are marked with `*`.

use std::{collections::HashSet, fmt};

use crate::{editor::PlanEditor, ids::NodeId};

pub struct EditorView<'a> {
    editor: &'a PlanEditor,
    pending: HashSet<NodeId>,
}

impl<'a> EditorView<'a> {
    pub fn new(editor: &'a PlanEditor) -> Self {
        Self {
            editor,
            pending: editor.pending_nodes(),
        }
    }

    fn mark(&self, id: &NodeId) -> &'static str {
        if self.pending.contains(id) { " *" } else { "" }
    }
}

impl fmt::Display for EditorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.editor.current();
        writeln!(
            f,
            "# Editing {}. {} ({})",
            tree.plan.id,
            tree.plan.title,
            self.editor.status()
        )?;
        writeln!(f)?;
        if !self.editor.can_edit() {
            writeln!(f, "Read-only: only {} can edit this plan.", tree.plan.created_by)?;
            writeln!(f)?;
        }
        if tree.weeks.is_empty() {
            return writeln!(f, "No weeks in this plan.");
        }
        if !self.pending.is_empty() {
            writeln!(f, "Nodes marked * are not saved yet.")?;
            writeln!(f)?;
        }

        for (w, week) in tree.weeks.iter().enumerate() {
            write!(f, "- [{w}] Week {}", week.fields.week_number)?;
            if let Some(desc) = &week.fields.description {
                write!(f, ": {desc}")?;
            }
            writeln!(f, "{}", self.mark(&week.id))?;

            for (d, day) in week.days.iter().enumerate() {
                write!(f, "  - [{w}.{d}] Day {}", day.fields.day_number)?;
                if let Some(title) = &day.fields.title {
                    write!(f, ": {title}")?;
                }
                if day.fields.is_rest_day {
                    write!(f, " (rest day)")?;
                }
                writeln!(f, "{}", self.mark(&day.id))?;
                if day.fields.is_rest_day {
                    continue;
                }

                for (s, session) in day.sessions.iter().enumerate() {
                    let title = session
                        .fields
                        .title
                        .clone()
                        .unwrap_or_else(|| format!("Session {}", session.fields.order_index));
                    writeln!(f, "    - [{w}.{d}.{s}] {title}{}", self.mark(&session.id))?;

                    for (e, exercise) in session.exercises.iter().enumerate() {
                        writeln!(
                            f,
                            "      - [{w}.{d}.{s}.{e}] {} (group {}){}",
                            exercise.display_name(),
                            exercise.fields.execution_group,
                            self.mark(&exercise.id)
                        )?;
                        for (n, set) in exercise.sets.iter().enumerate() {
                            writeln!(
                                f,
                                "        - [{w}.{d}.{s}.{e}.{n}] Set {}: {}{}",
                                set.fields.set_number,
                                set.fields,
                                self.mark(&set.id)
                            )?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::{details, set_fields},
        models::{ExercisePath, ExerciseSet, SetPatch},
    };

    #[test]
    fn test_pending_nodes_are_marked() {
        let mut editor = PlanEditor::new(details(), true);
        let id = editor.temp_id();
        editor
            .add_set(ExercisePath::new(0, 0, 0, 1), ExerciseSet::new(id, set_fields(2)))
            .unwrap();
        let patch = SetPatch {
            target_reps: Some(Some(8)),
            ..Default::default()
        };
        editor
            .update_set(ExercisePath::new(0, 0, 0, 0).set(0), &patch)
            .unwrap();

        let output = EditorView::new(&editor).to_string();
        assert!(output.contains("(unsaved changes)"));
        assert!(output.contains("[0.0.0.0.0] Set 1: 8 reps @ 100 *"));
        assert!(output.contains("[0.0.0.0.1] Set 2: 5 reps @ 100\n"));
        assert!(output.contains("[0.0.0.1.1] Set 2: 5 reps @ 100 *"));
    }

    #[test]
    fn test_rest_day_sessions_hidden() {
        let editor = PlanEditor::new(details(), false);
        let output = EditorView::new(&editor).to_string();

        assert!(output.contains("[0.1] Day 2: Recovery (rest day)"));
        assert!(!output.contains("Mobility"));
        assert!(output.contains("Read-only: only coach can edit this plan."));
        assert!(!output.contains('*'));
    }
}
