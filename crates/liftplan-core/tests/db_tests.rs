mod common;

use common::{day, lift, session, set, tmp, week};
use liftplan_core::{
    Database, PlanError,
    changeset::{AddedNode, Changeset, UpdatedNode},
    ids::NodeId,
    models::{Difficulty, ExerciseFilter, Level, PlanFilter, Visibility},
    params::{CreateExercise, CreatePlan, UpdatePlan},
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn create_plan(db: &mut Database, title: &str, user: &str) -> u64 {
    db.create_plan(
        &CreatePlan {
            title: title.to_string(),
            ..Default::default()
        },
        user,
    )
    .expect("Failed to create plan")
    .id
}

fn create_exercise(db: &mut Database, name: &str, muscle: Option<&str>) -> u64 {
    db.create_exercise(&CreateExercise {
        name: name.to_string(),
        primary_muscle: muscle.map(String::from),
        ..Default::default()
    })
    .expect("Failed to create exercise")
    .id
}

/// Adds a week with one day, one session, one exercise and two sets.
fn full_week_changeset(plan_id: u64, exercise_id: u64) -> Changeset {
    let mut changes = Changeset {
        plan_id,
        ..Default::default()
    };
    changes.weeks.added.push(AddedNode {
        temp_id: tmp(1),
        parent: NodeId::Persisted(plan_id),
        fields: week(1),
    });
    changes.days.added.push(AddedNode {
        temp_id: tmp(2),
        parent: tmp(1).into(),
        fields: day(1),
    });
    changes.sessions.added.push(AddedNode {
        temp_id: tmp(3),
        parent: tmp(2).into(),
        fields: session(1),
    });
    changes.exercises.added.push(AddedNode {
        temp_id: tmp(4),
        parent: tmp(3).into(),
        fields: lift(exercise_id, 1),
    });
    for (n, temp) in [(1, 5), (2, 6)] {
        changes.sets.added.push(AddedNode {
            temp_id: tmp(temp),
            parent: tmp(4).into(),
            fields: set(n, 5),
        });
    }
    changes
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().unwrap(), 1);

    // Opening again keeps the schema
    let reopened = Database::new(temp_file.path()).expect("Failed to reopen");
    assert_eq!(reopened.schema_version().unwrap(), 1);
}

#[test]
fn test_create_and_get_plan() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(
            &CreatePlan {
                title: "Strength".to_string(),
                description: Some("Heavy singles".to_string()),
                difficulty: Some(Difficulty::Advanced),
                visibility: Some(Visibility::Team),
                team_id: Some(7),
            },
            "coach",
        )
        .expect("Failed to create plan");
    assert!(plan.id > 0);

    let fetched = db.get_plan(plan.id).unwrap().expect("Plan should exist");
    assert_eq!(fetched, plan);
    assert!(db.get_plan(plan.id + 1).unwrap().is_none());
}

#[test]
fn test_create_plan_requires_title() {
    let (_temp_file, mut db) = create_test_db();
    let result = db.create_plan(
        &CreatePlan {
            title: "  ".to_string(),
            ..Default::default()
        },
        "coach",
    );
    assert!(matches!(result, Err(PlanError::InvalidInput { ref field, .. }) if field == "title"));
}

#[test]
fn test_list_plans_filters() {
    let (_temp_file, mut db) = create_test_db();
    create_plan(&mut db, "Push Pull Legs", "coach");
    create_plan(&mut db, "Upper Lower", "coach");
    create_plan(&mut db, "Pull-up Progression", "athlete");

    let all = db.list_plans(&PlanFilter::default()).unwrap();
    assert_eq!(all.len(), 3);

    let pulls = db
        .list_plans(&PlanFilter {
            title_contains: Some("pull".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(pulls.len(), 2);

    let mine = db.list_plans(&PlanFilter::created_by("athlete")).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Pull-up Progression");

    let advanced = db
        .list_plans(&PlanFilter {
            difficulty: Some(Difficulty::Advanced),
            ..Default::default()
        })
        .unwrap();
    assert!(advanced.is_empty());
}

#[test]
fn test_update_plan_keeps_unset_fields() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "Strength", "coach");

    let updated = db
        .update_plan(&UpdatePlan {
            id: plan_id,
            visibility: Some(Visibility::Public),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.title, "Strength");
    assert_eq!(updated.visibility, Visibility::Public);
    assert_eq!(db.get_plan(plan_id).unwrap().unwrap(), updated);

    let missing = db.update_plan(&UpdatePlan {
        id: 99,
        title: Some("x".to_string()),
        ..Default::default()
    });
    assert!(matches!(missing, Err(PlanError::PlanNotFound { id: 99 })));
}

#[test]
fn test_search_exercises_sorted_by_name() {
    let (_temp_file, mut db) = create_test_db();
    create_exercise(&mut db, "Romanian Deadlift", Some("hamstrings"));
    create_exercise(&mut db, "back squat", Some("Quads"));
    create_exercise(&mut db, "Front Squat", Some("quads"));

    let all = db.search_exercises(&ExerciseFilter::default()).unwrap();
    let names: Vec<&str> = all.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["back squat", "Front Squat", "Romanian Deadlift"]);

    let quads = db
        .search_exercises(&ExerciseFilter {
            primary_muscle: Some("QUADS".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(quads.len(), 2);

    let squats = db
        .search_exercises(&ExerciseFilter {
            name_contains: Some("squat".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(squats.len(), 2);
}

#[test]
fn test_save_assigns_ids_to_nested_additions() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "Strength", "coach");
    let squat = create_exercise(&mut db, "Back Squat", None);

    let mapping = db
        .save_plan_changes(&full_week_changeset(plan_id, squat))
        .expect("Failed to save");
    assert_eq!(mapping.len(), 6);

    let details = db.get_plan_details(plan_id).unwrap().unwrap();
    let week = &details.weeks[0];
    assert_eq!(week.id, NodeId::Persisted(mapping.get(&tmp(1)).unwrap()));
    let exercise = &week.days[0].sessions[0].exercises[0];
    assert_eq!(exercise.id, NodeId::Persisted(mapping.get(&tmp(4)).unwrap()));
    assert_eq!(exercise.exercise.as_ref().unwrap().name, "Back Squat");
    assert_eq!(exercise.sets.len(), 2);
    assert_eq!(exercise.sets[1].id, NodeId::Persisted(mapping.get(&tmp(6)).unwrap()));
}

#[test]
fn test_details_sorted_by_ordering_then_id() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "Strength", "coach");

    let mut changes = Changeset {
        plan_id,
        ..Default::default()
    };
    for (temp, number) in [(1, 3), (2, 1), (3, 3)] {
        changes.weeks.added.push(AddedNode {
            temp_id: tmp(temp),
            parent: NodeId::Persisted(plan_id),
            fields: week(number),
        });
    }
    let mapping = db.save_plan_changes(&changes).unwrap();

    let details = db.get_plan_details(plan_id).unwrap().unwrap();
    let ids: Vec<NodeId> = details.weeks.iter().map(|w| w.id).collect();
    let expected: Vec<NodeId> = [2, 1, 3]
        .into_iter()
        .map(|t| NodeId::Persisted(mapping.get(&tmp(t)).unwrap()))
        .collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_save_updates_and_cascading_deletes() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "Strength", "coach");
    let squat = create_exercise(&mut db, "Back Squat", None);
    let mapping = db
        .save_plan_changes(&full_week_changeset(plan_id, squat))
        .unwrap();
    let set_id = mapping.get(&tmp(5)).unwrap();
    let session_id = mapping.get(&tmp(3)).unwrap();

    let mut changes = Changeset {
        plan_id,
        ..Default::default()
    };
    changes.sets.updated.push(UpdatedNode {
        id: set_id,
        fields: set(1, 3),
    });
    changes.sessions.deleted.push(session_id);
    db.save_plan_changes(&changes).unwrap();

    let details = db.get_plan_details(plan_id).unwrap().unwrap();
    assert!(details.weeks[0].days[0].sessions.is_empty());
    assert_eq!(details.node_ids().len(), 2);
}

#[test]
fn test_save_rejects_rows_of_other_plans() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "Strength", "coach");
    let other_id = create_plan(&mut db, "Other", "coach");
    let squat = create_exercise(&mut db, "Back Squat", None);
    let mapping = db
        .save_plan_changes(&full_week_changeset(other_id, squat))
        .unwrap();
    let foreign_week = mapping.get(&tmp(1)).unwrap();

    let mut changes = Changeset {
        plan_id,
        ..Default::default()
    };
    changes.weeks.added.push(AddedNode {
        temp_id: tmp(1),
        parent: NodeId::Persisted(plan_id),
        fields: week(1),
    });
    changes.weeks.deleted.push(foreign_week);

    let result = db.save_plan_changes(&changes);
    assert!(matches!(
        result,
        Err(PlanError::NodeNotFound { level: Level::Week, id }) if id == foreign_week
    ));

    // Nothing was applied
    assert!(db.get_plan_details(plan_id).unwrap().unwrap().weeks.is_empty());
    assert_eq!(db.get_plan_details(other_id).unwrap().unwrap().weeks.len(), 1);
}

#[test]
fn test_save_requires_temp_parent_added_first() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "Strength", "coach");

    let mut changes = Changeset {
        plan_id,
        ..Default::default()
    };
    changes.days.added.push(AddedNode {
        temp_id: tmp(2),
        parent: tmp(1).into(),
        fields: day(1),
    });

    let result = db.save_plan_changes(&changes);
    assert!(matches!(result, Err(PlanError::Reconcile { .. })));
}

#[test]
fn test_save_validates_fields_and_rolls_back() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "Strength", "coach");

    let mut unknown_exercise = full_week_changeset(plan_id, 404);
    let result = db.save_plan_changes(&unknown_exercise);
    assert!(matches!(result, Err(PlanError::ExerciseNotFound { id: 404 })));
    assert!(db.get_plan_details(plan_id).unwrap().unwrap().weeks.is_empty());

    unknown_exercise.exercises.added.clear();
    unknown_exercise.sets.added.clear();
    unknown_exercise.days.added[0].fields.day_number = 8;
    let result = db.save_plan_changes(&unknown_exercise);
    assert!(matches!(result, Err(PlanError::InvalidInput { ref field, .. }) if field == "day_number"));
    assert!(db.get_plan_details(plan_id).unwrap().unwrap().weeks.is_empty());
}

#[test]
fn test_save_for_unknown_plan() {
    let (_temp_file, mut db) = create_test_db();
    let result = db.save_plan_changes(&full_week_changeset(5, 1));
    assert!(matches!(result, Err(PlanError::PlanNotFound { id: 5 })));
    assert!(db.get_plan_details(5).unwrap().is_none());
}

#[test]
fn test_delete_plan_removes_hierarchy() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "Strength", "coach");
    let squat = create_exercise(&mut db, "Back Squat", None);
    db.save_plan_changes(&full_week_changeset(plan_id, squat))
        .unwrap();

    let deleted = db.delete_plan(plan_id).unwrap();
    assert_eq!(deleted.title, "Strength");
    assert!(db.get_plan_details(plan_id).unwrap().is_none());
    assert!(db.list_plans(&PlanFilter::default()).unwrap().is_empty());
    // Library entries are not part of the plan
    assert!(db.get_exercise(squat).unwrap().is_some());
}
