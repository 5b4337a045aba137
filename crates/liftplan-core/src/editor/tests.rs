#[cfg(test)]
mod editor_tests {
    use std::sync::Arc;

    use crate::{
        changeset::IdMapping,
        editor::{PendingSave, PlanEditor, SyncStatus},
        error::PlanError,
        fixtures::{details, exercise_fields, plan, set_fields},
        ids::NodeId,
        models::{
            Day, DayFields, DayPatch, DayPath, ExercisePath, ExerciseSet, PlanDetails, Session,
            SessionExercise, SessionExercisePatch, SessionFields, SessionPatch, SessionPath,
            SetPatch, SetPath, SetType, Week, WeekFields, WeekPath,
        },
    };

    fn editor() -> PlanEditor {
        PlanEditor::new(details(), true)
    }

    /// Answers a save the way the backend would, with fresh row ids.
    fn accept(pending: &PendingSave) -> IdMapping {
        pending
            .changeset()
            .temp_ids()
            .into_iter()
            .zip(1000..)
            .collect()
    }

    fn set_path(set: usize) -> SetPath {
        ExercisePath::new(0, 0, 0, 0).set(set)
    }

    fn set_numbers(editor: &PlanEditor, path: ExercisePath) -> Vec<u32> {
        editor
            .current()
            .exercise(path)
            .unwrap()
            .sets
            .iter()
            .map(|s| s.fields.set_number)
            .collect()
    }

    #[test]
    fn test_add_session_to_empty_day() {
        let tree = PlanDetails::new(plan()).with_weeks([Week::new(
            1,
            WeekFields {
                week_number: 1,
                description: None,
            },
        )
        .with_days([Day::new(
            2,
            DayFields {
                day_number: 1,
                ..Default::default()
            },
        )])]);
        let mut editor = PlanEditor::new(tree, true);

        let id = editor.temp_id();
        let session = Session::new(
            id,
            SessionFields {
                order_index: 1,
                ..Default::default()
            },
        );
        let path = editor.add_session(DayPath::new(0, 0), session.clone()).unwrap();

        let day = editor.current().day(DayPath::new(0, 0)).unwrap();
        assert_eq!(day.sessions.len(), 1);
        assert_eq!(day.sessions[0].fields.order_index, 1);
        assert_eq!(editor.current().session(path), Some(&session));
        assert!(editor.is_pending(&NodeId::Temp(id)));
    }

    #[test]
    fn test_delete_set_keeps_set_numbers() {
        let mut editor = editor();
        let exercise = ExercisePath::new(0, 0, 0, 0);
        assert_eq!(set_numbers(&editor, exercise), vec![1, 2, 3]);

        let removed = editor.delete_set(exercise.set(1)).unwrap();
        assert_eq!(removed.id, NodeId::Persisted(51));
        assert_eq!(set_numbers(&editor, exercise), vec![1, 3]);
        assert!(!editor.current().contains(&NodeId::Persisted(51)));
        assert_eq!(editor.pending_changes().sets.deleted, vec![51]);
    }

    #[test]
    fn test_added_node_gets_fresh_temp_id_under_its_parent() {
        let mut editor = editor();
        let exercise = ExercisePath::new(0, 0, 0, 1);

        let id = editor.temp_id();
        let set = ExerciseSet::new(id, set_fields(2));
        let path = editor.add_set(exercise, set.clone()).unwrap();

        assert_eq!(path, exercise.set(1));
        assert_eq!(editor.current().set(path), Some(&set));
        let occurrences = editor
            .current()
            .node_ids()
            .into_iter()
            .filter(|(_, node)| *node == NodeId::Temp(id))
            .count();
        assert_eq!(occurrences, 1);
        assert_ne!(editor.temp_id(), id);
    }

    #[test]
    fn test_update_changes_only_given_fields_and_shares_siblings() {
        let mut editor = editor();
        let before = editor.current().clone();

        let patch = SetPatch {
            target_reps: Some(Some(3)),
            ..Default::default()
        };
        editor.update_set(set_path(1), &patch).unwrap();

        let updated = editor.current().set(set_path(1)).unwrap();
        assert_eq!(updated.fields.target_reps, Some(3));
        assert_eq!(updated.fields.target_weight, Some(100.0));
        assert_eq!(updated.fields.set_number, 2);

        // Only the path to the set was copied
        let after = editor.current();
        assert!(Arc::ptr_eq(&before.weeks[1], &after.weeks[1]));
        assert!(Arc::ptr_eq(&before.weeks[0].days[1], &after.weeks[0].days[1]));
        let (old_session, new_session) = (&before.weeks[0].days[0].sessions[0], &after.weeks[0].days[0].sessions[0]);
        assert!(Arc::ptr_eq(&old_session.exercises[1], &new_session.exercises[1]));
        let (old_sets, new_sets) = (&old_session.exercises[0].sets, &new_session.exercises[0].sets);
        assert!(Arc::ptr_eq(&old_sets[0], &new_sets[0]));
        assert!(Arc::ptr_eq(&old_sets[2], &new_sets[2]));
        assert!(!Arc::ptr_eq(&old_sets[1], &new_sets[1]));
    }

    #[test]
    fn test_delete_removes_only_target() {
        let mut editor = editor();
        let before = editor.current().clone();

        editor.delete_day(DayPath::new(0, 1)).unwrap();

        let week = editor.current().week(WeekPath::new(0)).unwrap();
        assert_eq!(week.days.len(), 1);
        assert!(Arc::ptr_eq(&before.weeks[0].days[0], &week.days[0]));
        assert!(!editor.current().contains(&NodeId::Persisted(21)));
        assert!(!editor.current().contains(&NodeId::Persisted(31)));
        assert_eq!(editor.pending_changes().days.deleted, vec![21]);
        assert!(editor.pending_changes().sessions.deleted.is_empty());
    }

    #[test]
    fn test_invalid_path_leaves_tree_untouched() {
        let mut editor = editor();
        let before = editor.current().clone();

        let err = editor
            .update_set(ExercisePath::new(0, 0, 0, 1).set(4), &SetPatch {
                target_reps: Some(None),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidPath { .. }));
        assert_eq!(
            err.to_string(),
            "No set at week 0 / day 0 / session 0 / exercise 1 / set 4"
        );

        assert!(editor.delete_week(WeekPath::new(5)).is_err());
        assert!(editor
            .add_session(DayPath::new(3, 0), Session::new(editor_temp(), SessionFields::default()))
            .is_err());

        for (old, new) in before.weeks.iter().zip(&editor.current().weeks) {
            assert!(Arc::ptr_eq(old, new));
        }
        assert_eq!(editor.status(), SyncStatus::Clean);
    }

    fn editor_temp() -> crate::ids::TempId {
        "tmp-900".parse().unwrap()
    }

    #[test]
    fn test_read_only_editor_rejects_mutations() {
        let mut editor = PlanEditor::new(details(), false);

        let err = editor.delete_week(WeekPath::new(0)).unwrap_err();
        assert!(matches!(err, PlanError::ReadOnly { plan_id: 1 }));
        let err = editor
            .update_day(DayPath::new(0, 0), &DayPatch::default())
            .unwrap_err();
        assert!(matches!(err, PlanError::ReadOnly { .. }));
        assert_eq!(editor.current(), editor.baseline());
    }

    #[test]
    fn test_additions_require_fresh_temp_ids() {
        let mut editor = editor();

        // Persisted ids are rejected
        let err = editor
            .add_set(
                ExercisePath::new(0, 0, 0, 0),
                ExerciseSet::new(77, set_fields(4)),
            )
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { .. }));

        // So are nested children without temp ids
        let id = editor.temp_id();
        let exercise = SessionExercise::new(id, exercise_fields(100, 3, 2))
            .with_sets([ExerciseSet::new(50, set_fields(1))]);
        assert!(editor
            .add_exercise(SessionPath::new(0, 0, 0), exercise)
            .is_err());

        // And temp ids already in the tree
        let id = editor.temp_id();
        editor
            .add_set(ExercisePath::new(0, 0, 0, 0), ExerciseSet::new(id, set_fields(4)))
            .unwrap();
        let err = editor
            .add_set(ExercisePath::new(0, 0, 0, 1), ExerciseSet::new(id, set_fields(2)))
            .unwrap_err();
        assert!(err.to_string().contains("already used"));
    }

    #[test]
    fn test_caller_supplied_temp_ids_advance_generator() {
        let mut editor = editor();
        editor
            .add_set(
                ExercisePath::new(0, 0, 0, 0),
                ExerciseSet::new(editor_temp(), set_fields(4)),
            )
            .unwrap();
        assert!(editor.temp_id() > editor_temp());
    }

    #[test]
    fn test_rest_day_takes_no_sessions() {
        let mut editor = editor();
        let id = editor.temp_id();
        let err = editor
            .add_session(DayPath::new(0, 1), Session::new(id, SessionFields::default()))
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { ref field, .. } if field == "day"));
    }

    #[test]
    fn test_rest_day_sessions_cannot_be_edited() {
        let mut editor = editor();
        let rest = SessionPath::new(0, 1, 0);
        let patch = SessionPatch {
            title: Some(Some("Yoga".to_string())),
            ..Default::default()
        };
        assert!(editor.update_session(rest, &patch).is_err());
        assert!(editor.delete_session(rest).is_err());
        let id = editor.temp_id();
        let exercise = SessionExercise::new(id, exercise_fields(100, 1, 1));
        let err = editor.add_exercise(rest, exercise).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { ref field, .. } if field == "day"));
        assert_eq!(editor.current(), editor.baseline());

        // Turning a training day into a rest day locks what is below it
        let to_rest = DayPatch {
            is_rest_day: Some(true),
            ..Default::default()
        };
        editor.update_day(DayPath::new(0, 0), &to_rest).unwrap();
        let before = editor.current().clone();

        let lift = ExercisePath::new(0, 0, 0, 0);
        let group = SessionExercisePatch {
            execution_group: Some(9),
            ..Default::default()
        };
        assert!(editor.update_exercise(lift, &group).is_err());
        assert!(editor.delete_exercise(lift).is_err());
        let id = editor.temp_id();
        assert!(editor.add_set(lift, ExerciseSet::new(id, set_fields(4))).is_err());
        let reps = SetPatch {
            target_reps: Some(Some(1)),
            ..Default::default()
        };
        assert!(editor.update_set(set_path(0), &reps).is_err());
        assert!(editor.delete_set(set_path(0)).is_err());
        assert_eq!(editor.current(), &before);

        // A missing session is still a path error
        let err = editor
            .delete_session(SessionPath::new(0, 1, 5))
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidPath { .. }));
    }

    #[test]
    fn test_day_numbers_stay_within_week() {
        let mut editor = editor();
        let patch = DayPatch {
            day_number: Some(8),
            ..Default::default()
        };
        assert!(editor.update_day(DayPath::new(0, 0), &patch).is_err());

        let id = editor.temp_id();
        let day = Day::new(id, DayFields::default());
        assert!(editor.add_day(WeekPath::new(1), day).is_err());
    }

    #[test]
    fn test_update_exercise_drops_stale_library_details() {
        let mut editor = editor();
        let path = ExercisePath::new(0, 0, 0, 0);

        let patch = crate::models::SessionExercisePatch {
            exercise_id: Some(200),
            ..Default::default()
        };
        editor.update_exercise(path, &patch).unwrap();
        let exercise = editor.current().exercise(path).unwrap();
        assert!(exercise.exercise.is_none());
        assert_eq!(exercise.display_name(), "Exercise #200");
    }

    #[test]
    fn test_successful_save_promotes_tree_to_baseline() {
        let mut editor = editor();
        let week_id = editor.temp_id();
        let day_id = editor.temp_id();
        let week = Week::new(
            week_id,
            WeekFields {
                week_number: 3,
                description: None,
            },
        )
        .with_days([Day::new(
            day_id,
            DayFields {
                day_number: 1,
                ..Default::default()
            },
        )]);
        editor.add_week(week).unwrap();
        editor.delete_set(set_path(2)).unwrap();
        assert_eq!(editor.status(), SyncStatus::Dirty);

        let pending = editor.begin_save().unwrap().unwrap();
        assert_eq!(editor.status(), SyncStatus::Saving);
        let mapping = accept(&pending);
        let report = editor.complete_save(pending, Ok(mapping)).unwrap();

        assert_eq!(report.counts.added, 2);
        assert_eq!(report.counts.deleted, 1);
        assert_eq!(report.id_mapping.get(&week_id), Some(1000));
        assert_eq!(editor.status(), SyncStatus::Clean);
        assert_eq!(editor.current(), editor.baseline());
        assert!(editor.current().contains(&NodeId::Persisted(1001)));
        assert!(!editor.current().node_ids().iter().any(|(_, id)| id.is_temp()));

        // Saving again with no edits in between sends nothing
        assert!(editor.pending_changes().is_empty());
        assert!(editor.begin_save().unwrap().is_none());
    }

    #[test]
    fn test_second_save_while_in_flight_is_rejected() {
        let mut editor = editor();
        editor.delete_week(WeekPath::new(1)).unwrap();

        let pending = editor.begin_save().unwrap().unwrap();
        let err = editor.begin_save().unwrap_err();
        assert!(matches!(err, PlanError::SaveInProgress { plan_id: 1 }));

        editor.complete_save(pending, Ok(IdMapping::new())).unwrap();
        assert_eq!(editor.status(), SyncStatus::Clean);
    }

    #[test]
    fn test_edits_made_while_saving_stay_pending() {
        let mut editor = editor();
        let id = editor.temp_id();
        editor
            .add_set(ExercisePath::new(0, 0, 0, 1), ExerciseSet::new(id, set_fields(2)))
            .unwrap();
        let pending = editor.begin_save().unwrap().unwrap();

        let patch = SetPatch {
            set_type: Some(SetType::Amrap),
            ..Default::default()
        };
        editor
            .update_set(ExercisePath::new(0, 0, 0, 1).set(1), &patch)
            .unwrap();

        let mapping = accept(&pending);
        editor.complete_save(pending, Ok(mapping)).unwrap();

        assert_eq!(editor.status(), SyncStatus::Dirty);
        let changes = editor.pending_changes();
        assert!(changes.sets.added.is_empty());
        assert_eq!(changes.sets.updated.len(), 1);
        assert_eq!(changes.sets.updated[0].id, 1000);
        assert_eq!(changes.sets.updated[0].fields.set_type, SetType::Amrap);
    }

    #[test]
    fn test_failed_save_keeps_edits_pending_until_discarded() {
        let mut editor = editor();
        let id = editor.temp_id();
        editor
            .add_set(ExercisePath::new(0, 0, 0, 1), ExerciseSet::new(id, set_fields(2)))
            .unwrap();
        editor
            .update_set(set_path(0), &SetPatch {
                notes: Some(Some("pause at the bottom".to_string())),
                ..Default::default()
            })
            .unwrap();

        let pending = editor.begin_save().unwrap().unwrap();
        let err = editor
            .complete_save(
                pending,
                Err(PlanError::ExerciseNotFound { id: 101 }),
            )
            .unwrap_err();
        assert!(matches!(err, PlanError::ExerciseNotFound { id: 101 }));

        assert_eq!(
            editor.status(),
            SyncStatus::Failed {
                message: "Exercise with ID 101 not found".to_string()
            }
        );
        assert!(editor.is_pending(&NodeId::Temp(id)));
        assert!(editor.is_pending(&NodeId::Persisted(50)));
        assert!(!editor.is_pending(&NodeId::Persisted(51)));

        editor.discard_changes();
        assert_eq!(editor.status(), SyncStatus::Clean);
        assert_eq!(editor.current(), editor.baseline());
        assert!(editor.pending_nodes().is_empty());
    }

    #[test]
    fn test_incomplete_id_mapping_fails_the_save() {
        let mut editor = editor();
        let id = editor.temp_id();
        editor
            .add_set(ExercisePath::new(0, 0, 0, 1), ExerciseSet::new(id, set_fields(2)))
            .unwrap();

        let pending = editor.begin_save().unwrap().unwrap();
        let err = editor
            .complete_save(pending, Ok(IdMapping::new()))
            .unwrap_err();
        assert!(matches!(err, PlanError::Reconcile { .. }));
        assert!(matches!(editor.status(), SyncStatus::Failed { .. }));
        assert!(editor.current().contains(&NodeId::Temp(id)));

        // A retry goes through
        let pending = editor.begin_save().unwrap().unwrap();
        let mapping = accept(&pending);
        editor.complete_save(pending, Ok(mapping)).unwrap();
        assert_eq!(editor.status(), SyncStatus::Clean);
    }
}
