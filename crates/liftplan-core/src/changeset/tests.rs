use std::sync::Arc;

use super::*;
use crate::{
    fixtures::{details, set_fields},
    ids::TempIdGenerator,
    models::{Day, DayFields, ExerciseSet, Week},
};

#[test]
fn test_identical_trees_produce_empty_changeset() {
    let baseline = details();
    let current = baseline.clone();

    let changes = Changeset::diff(&baseline, &current);
    assert!(changes.is_empty());
    assert_eq!(changes.plan_id, 1);
    assert_eq!(changes.counts(), ChangeCounts::default());
}

#[test]
fn test_added_nodes_reference_their_parents() {
    let baseline = details();
    let mut current = baseline.clone();
    let mut ids = TempIdGenerator::new();
    let (week_id, day_id) = (ids.next_id(), ids.next_id());

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
    current.weeks.push(Arc::new(week));

    let changes = Changeset::diff(&baseline, &current);
    assert_eq!(changes.weeks.added.len(), 1);
    assert_eq!(changes.weeks.added[0].temp_id, week_id);
    assert_eq!(changes.weeks.added[0].parent, NodeId::Persisted(1));
    assert_eq!(changes.days.added[0].temp_id, day_id);
    assert_eq!(changes.days.added[0].parent, NodeId::Temp(week_id));
    assert_eq!(changes.temp_ids(), vec![week_id, day_id]);
    assert!(changes.weeks.updated.is_empty());
    assert!(changes.weeks.deleted.is_empty());
}

#[test]
fn test_changed_fields_are_reported_as_updates() {
    let baseline = details();
    let mut current = baseline.clone();

    let week = Arc::make_mut(&mut current.weeks[0]);
    let day = Arc::make_mut(&mut week.days[0]);
    let session = Arc::make_mut(&mut day.sessions[0]);
    let exercise = Arc::make_mut(&mut session.exercises[0]);
    Arc::make_mut(&mut exercise.sets[1]).fields.target_reps = Some(3);

    let changes = Changeset::diff(&baseline, &current);
    assert_eq!(changes.sets.updated.len(), 1);
    assert_eq!(changes.sets.updated[0].id, 51);
    assert_eq!(changes.sets.updated[0].fields.target_reps, Some(3));
    assert_eq!(changes.updated_ids(), vec![(Level::Set, 51)]);

    // Cloning a node without changing it is not an update
    assert!(changes.exercises.updated.is_empty());
    assert!(changes.weeks.updated.is_empty());
}

#[test]
fn test_deleted_subtree_lists_only_its_root() {
    let baseline = details();
    let mut current = baseline.clone();

    let week = Arc::make_mut(&mut current.weeks[0]);
    let day = Arc::make_mut(&mut week.days[0]);
    let session = Arc::make_mut(&mut day.sessions[0]);
    session.exercises.remove(0);

    let changes = Changeset::diff(&baseline, &current);
    assert_eq!(changes.exercises.deleted, vec![40]);
    assert!(changes.sets.deleted.is_empty());
    assert_eq!(changes.counts().deleted, 1);
}

#[test]
fn test_deleted_week_does_not_list_descendants() {
    let baseline = details();
    let mut current = baseline.clone();
    current.weeks.remove(0);

    let changes = Changeset::diff(&baseline, &current);
    assert_eq!(changes.weeks.deleted, vec![10]);
    assert!(changes.days.deleted.is_empty());
    assert!(changes.sessions.deleted.is_empty());
    assert!(changes.exercises.deleted.is_empty());
    assert!(changes.sets.deleted.is_empty());
}

#[test]
fn test_added_then_removed_node_is_not_in_changeset() {
    let baseline = details();
    let mut current = baseline.clone();
    let mut ids = TempIdGenerator::new();

    let week = Arc::make_mut(&mut current.weeks[0]);
    let day = Arc::make_mut(&mut week.days[0]);
    let session = Arc::make_mut(&mut day.sessions[0]);
    let exercise = Arc::make_mut(&mut session.exercises[1]);
    exercise
        .sets
        .push(Arc::new(ExerciseSet::new(ids.next_id(), set_fields(2))));
    exercise.sets.pop();

    assert!(Changeset::diff(&baseline, &current).is_empty());
}

#[test]
fn test_changeset_wire_format() {
    let baseline = details();
    let mut current = baseline.clone();
    let mut ids = TempIdGenerator::new();
    let temp = ids.next_id();

    let week = Arc::make_mut(&mut current.weeks[1]);
    let day = Arc::make_mut(&mut week.days[0]);
    day.sessions.push(Arc::new(crate::models::Session::new(
        temp,
        SessionFields {
            order_index: 1,
            ..Default::default()
        },
    )));
    current.weeks.remove(0);

    let changes = Changeset::diff(&baseline, &current);
    let json = serde_json::to_value(&changes).unwrap();
    assert_eq!(json["plan_id"], 1);
    assert_eq!(json["weeks"]["deleted"], serde_json::json!([10]));
    assert_eq!(json["sessions"]["added"][0]["temp_id"], "tmp-1");
    assert_eq!(json["sessions"]["added"][0]["parent"], 22);

    let parsed: Changeset = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, changes);
}

#[test]
fn test_apply_id_mapping_keeps_untouched_branches_shared() {
    let mut tree = details();
    let mut ids = TempIdGenerator::new();
    let temp = ids.next_id();

    let week = Arc::make_mut(&mut tree.weeks[1]);
    let day = Arc::make_mut(&mut week.days[0]);
    day.sessions.push(Arc::new(crate::models::Session::new(
        temp,
        SessionFields::default(),
    )));

    let before = tree.clone();
    let mapping: IdMapping = [(temp, 99)].into_iter().collect();
    assert_eq!(tree.apply_id_mapping(&mapping), 1);

    assert!(Arc::ptr_eq(&before.weeks[0], &tree.weeks[0]));
    assert!(!Arc::ptr_eq(&before.weeks[1], &tree.weeks[1]));
    assert_eq!(tree.weeks[1].days[0].sessions[0].id, NodeId::Persisted(99));
    assert!(!tree.node_ids().iter().any(|(_, id)| id.is_temp()));
}

#[test]
fn test_resolve_temp_ids_requires_complete_mapping() {
    let mut tree = details();
    let mut ids = TempIdGenerator::new();
    let (first, second) = (ids.next_id(), ids.next_id());

    let week = Arc::make_mut(&mut tree.weeks[1]);
    let day = Arc::make_mut(&mut week.days[0]);
    day.sessions.push(Arc::new(crate::models::Session::new(
        first,
        SessionFields::default(),
    )));
    day.sessions.push(Arc::new(crate::models::Session::new(
        second,
        SessionFields::default(),
    )));

    let mut mapping = IdMapping::new();
    mapping.insert(first, 70);
    let err = tree.resolve_temp_ids(&mapping).unwrap_err();
    assert!(err.to_string().contains("tmp-2"));

    mapping.insert(second, 71);
    let resolved = tree.resolve_temp_ids(&mapping).unwrap();
    assert!(resolved.contains(&NodeId::Persisted(71)));
    // The source tree is left untouched
    assert!(tree.contains(&NodeId::Temp(second)));
}
