//! Batched description of hierarchy changes.
//!
//! A [`Changeset`] is computed by comparing the tree last received from the
//! backend (the baseline) with the tree as edited locally. It is the only
//! payload a save sends:
//!
//! - `added`: nodes carrying a [`TempId`], with their parent (a persisted id,
//!   or the temp id of a parent added in the same changeset), listed parents
//!   first so they can be inserted level by level.
//! - `updated`: persisted nodes whose own fields differ from the baseline.
//! - `deleted`: persisted row ids missing from the edited tree. Only the root
//!   of a removed subtree is listed; the backend cascades to its descendants.
//!
//! Updates and deletions address rows by `u64`, so a temporary id can never
//! be submitted as if it named an existing row.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    ids::{NodeId, TempId},
    models::{
        DayFields, Level, PlanDetails, SessionExerciseFields, SessionFields, SetFields,
        WeekFields,
    },
};

mod remap;

pub use remap::IdMapping;

/// A node created locally, to be inserted by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddedNode<F> {
    pub temp_id: TempId,
    pub parent: NodeId,
    pub fields: F,
}

/// New field values for an existing row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdatedNode<F> {
    pub id: u64,
    pub fields: F,
}

/// Changes for one level of the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelChanges<F> {
    #[serde(default)]
    pub added: Vec<AddedNode<F>>,
    #[serde(default)]
    pub updated: Vec<UpdatedNode<F>>,
    #[serde(default)]
    pub deleted: Vec<u64>,
}

impl<F> Default for LevelChanges<F> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        }
    }
}

impl<F> LevelChanges<F> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// All changes to submit for one plan in a single save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Changeset {
    pub plan_id: u64,
    #[serde(default)]
    pub weeks: LevelChanges<WeekFields>,
    #[serde(default)]
    pub days: LevelChanges<DayFields>,
    #[serde(default)]
    pub sessions: LevelChanges<SessionFields>,
    #[serde(default)]
    pub exercises: LevelChanges<SessionExerciseFields>,
    #[serde(default)]
    pub sets: LevelChanges<SetFields>,
}

/// Per-operation totals of a changeset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl Changeset {
    /// Computes the changes turning `baseline` into `current`.
    pub fn diff(baseline: &PlanDetails, current: &PlanDetails) -> Self {
        let index = BaselineIndex::build(baseline);
        let mut seen = HashSet::new();
        let mut changes = Changeset {
            plan_id: current.plan.id,
            ..Default::default()
        };

        let plan_node = NodeId::Persisted(current.plan.id);
        for week in &current.weeks {
            let weeks = &mut changes.weeks;
            record(Level::Week, weeks, &index.weeks, &mut seen, week.id, plan_node, &week.fields);
            for day in &week.days {
                let days = &mut changes.days;
                record(Level::Day, days, &index.days, &mut seen, day.id, week.id, &day.fields);
                for session in &day.sessions {
                    let (id, fields) = (session.id, &session.fields);
                    let sessions = &mut changes.sessions;
                    record(Level::Session, sessions, &index.sessions, &mut seen, id, day.id, fields);
                    for exercise in &session.exercises {
                        let (id, fields) = (exercise.id, &exercise.fields);
                        let exercises = &mut changes.exercises;
                        record(Level::Exercise, exercises, &index.exercises, &mut seen, id, session.id, fields);
                        for set in &exercise.sets {
                            let sets = &mut changes.sets;
                            record(Level::Set, sets, &index.sets, &mut seen, set.id, exercise.id, &set.fields);
                        }
                    }
                }
            }
        }

        changes.collect_deletions(baseline, &seen);
        changes
    }

    /// Lists the persisted subtrees of `baseline` that were not seen in the
    /// edited tree, stopping at the first missing node of each branch.
    fn collect_deletions(&mut self, baseline: &PlanDetails, seen: &HashSet<(Level, u64)>) {
        let gone = |level: Level, id: NodeId| -> Option<u64> {
            id.persisted().filter(|id| !seen.contains(&(level, *id)))
        };

        for week in &baseline.weeks {
            if let Some(id) = gone(Level::Week, week.id) {
                self.weeks.deleted.push(id);
                continue;
            }
            for day in &week.days {
                if let Some(id) = gone(Level::Day, day.id) {
                    self.days.deleted.push(id);
                    continue;
                }
                for session in &day.sessions {
                    if let Some(id) = gone(Level::Session, session.id) {
                        self.sessions.deleted.push(id);
                        continue;
                    }
                    for exercise in &session.exercises {
                        if let Some(id) = gone(Level::Exercise, exercise.id) {
                            self.exercises.deleted.push(id);
                            continue;
                        }
                        self.sets.deleted.extend(
                            exercise
                                .sets
                                .iter()
                                .filter_map(|set| gone(Level::Set, set.id)),
                        );
                    }
                }
            }
        }
    }

    /// True when saving would not change anything.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
            && self.days.is_empty()
            && self.sessions.is_empty()
            && self.exercises.is_empty()
            && self.sets.is_empty()
    }

    /// Totals across all levels.
    pub fn counts(&self) -> ChangeCounts {
        fn add<F>(totals: &mut ChangeCounts, level: &LevelChanges<F>) {
            totals.added += level.added.len();
            totals.updated += level.updated.len();
            totals.deleted += level.deleted.len();
        }

        let mut totals = ChangeCounts::default();
        add(&mut totals, &self.weeks);
        add(&mut totals, &self.days);
        add(&mut totals, &self.sessions);
        add(&mut totals, &self.exercises);
        add(&mut totals, &self.sets);
        totals
    }

    /// Every temporary id the backend is expected to map to a row id.
    pub fn temp_ids(&self) -> Vec<TempId> {
        fn ids<F>(level: &LevelChanges<F>) -> impl Iterator<Item = TempId> + '_ {
            level.added.iter().map(|node| node.temp_id)
        }

        ids(&self.weeks)
            .chain(ids(&self.days))
            .chain(ids(&self.sessions))
            .chain(ids(&self.exercises))
            .chain(ids(&self.sets))
            .collect()
    }

    /// Persisted ids with changed fields, per level.
    pub fn updated_ids(&self) -> Vec<(Level, u64)> {
        fn ids<F>(level: Level, changes: &LevelChanges<F>) -> impl Iterator<Item = (Level, u64)> + '_ {
            changes.updated.iter().map(move |node| (level, node.id))
        }

        ids(Level::Week, &self.weeks)
            .chain(ids(Level::Day, &self.days))
            .chain(ids(Level::Session, &self.sessions))
            .chain(ids(Level::Exercise, &self.exercises))
            .chain(ids(Level::Set, &self.sets))
            .collect()
    }
}

fn record<F: Clone + PartialEq>(
    level: Level,
    changes: &mut LevelChanges<F>,
    baseline: &HashMap<u64, &F>,
    seen: &mut HashSet<(Level, u64)>,
    id: NodeId,
    parent: NodeId,
    fields: &F,
) {
    match id {
        NodeId::Temp(temp_id) => changes.added.push(AddedNode {
            temp_id,
            parent,
            fields: fields.clone(),
        }),
        NodeId::Persisted(id) => {
            seen.insert((level, id));
            let unchanged = baseline.get(&id).is_some_and(|before| *before == fields);
            if !unchanged {
                changes.updated.push(UpdatedNode {
                    id,
                    fields: fields.clone(),
                });
            }
        }
    }
}

/// Fields of every persisted node of the baseline, keyed by row id.
struct BaselineIndex<'a> {
    weeks: HashMap<u64, &'a WeekFields>,
    days: HashMap<u64, &'a DayFields>,
    sessions: HashMap<u64, &'a SessionFields>,
    exercises: HashMap<u64, &'a SessionExerciseFields>,
    sets: HashMap<u64, &'a SetFields>,
}

impl<'a> BaselineIndex<'a> {
    fn build(baseline: &'a PlanDetails) -> Self {
        let mut index = BaselineIndex {
            weeks: HashMap::new(),
            days: HashMap::new(),
            sessions: HashMap::new(),
            exercises: HashMap::new(),
            sets: HashMap::new(),
        };

        for week in &baseline.weeks {
            if let Some(id) = week.id.persisted() {
                index.weeks.insert(id, &week.fields);
            }
            for day in &week.days {
                if let Some(id) = day.id.persisted() {
                    index.days.insert(id, &day.fields);
                }
                for session in &day.sessions {
                    if let Some(id) = session.id.persisted() {
                        index.sessions.insert(id, &session.fields);
                    }
                    for exercise in &session.exercises {
                        if let Some(id) = exercise.id.persisted() {
                            index.exercises.insert(id, &exercise.fields);
                        }
                        for set in &exercise.sets {
                            if let Some(id) = set.id.persisted() {
                                index.sets.insert(id, &set.fields);
                            }
                        }
                    }
                }
            }
        }
        index
    }
}

#[cfg(test)]
mod tests;
