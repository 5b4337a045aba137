//! Plan model definition and the full plan tree.

use std::sync::Arc;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{
    Day, DayPath, Difficulty, ExercisePath, ExerciseSet, Level, Session, SessionExercise,
    SessionPath, SetPath, Visibility, Week, WeekPath,
};
use crate::ids::NodeId;

/// Plan metadata, without its hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the plan
    pub title: String,

    /// Detailed multi-line description of the plan
    pub description: Option<String>,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub visibility: Visibility,

    /// Team owning the plan, if any
    pub team_id: Option<u64>,

    /// User who created the plan
    pub created_by: String,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

/// A plan together with its complete week/day/session/exercise/set tree.
///
/// This is the document returned by the plan details query and the tree an
/// editor works on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDetails {
    #[serde(flatten)]
    pub plan: Plan,
    #[serde(default)]
    pub weeks: Vec<Arc<Week>>,
}

impl PlanDetails {
    /// Creates a tree with no weeks.
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            weeks: Vec::new(),
        }
    }

    pub fn with_weeks(mut self, weeks: impl IntoIterator<Item = Week>) -> Self {
        self.weeks = weeks.into_iter().map(Arc::new).collect();
        self
    }

    pub fn week(&self, path: WeekPath) -> Option<&Week> {
        self.weeks.get(path.week).map(Arc::as_ref)
    }

    pub fn day(&self, path: DayPath) -> Option<&Day> {
        self.week(path.week())?.days.get(path.day).map(Arc::as_ref)
    }

    pub fn session(&self, path: SessionPath) -> Option<&Session> {
        self.day(path.day())?
            .sessions
            .get(path.session)
            .map(Arc::as_ref)
    }

    pub fn exercise(&self, path: ExercisePath) -> Option<&SessionExercise> {
        self.session(path.session())?
            .exercises
            .get(path.exercise)
            .map(Arc::as_ref)
    }

    pub fn set(&self, path: SetPath) -> Option<&ExerciseSet> {
        self.exercise(path.exercise())?
            .sets
            .get(path.set)
            .map(Arc::as_ref)
    }

    /// Every node id in the tree, parents before children.
    pub fn node_ids(&self) -> Vec<(Level, NodeId)> {
        let mut ids = Vec::new();
        for week in &self.weeks {
            week.collect_ids(&mut ids);
        }
        ids
    }

    /// Whether any node of the tree carries `id`.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.node_ids().iter().any(|(_, candidate)| candidate == id)
    }

    /// Sorts every level by its ordering field. The sort is stable, so nodes
    /// sharing an ordering value keep their relative order.
    pub fn sort_children(&mut self) {
        self.weeks.sort_by_key(|w| w.fields.week_number);
        for week in &mut self.weeks {
            let week = Arc::make_mut(week);
            week.days.sort_by_key(|d| d.fields.day_number);
            for day in &mut week.days {
                let day = Arc::make_mut(day);
                day.sessions.sort_by_key(|s| s.fields.order_index);
                for session in &mut day.sessions {
                    let session = Arc::make_mut(session);
                    session
                        .exercises
                        .sort_by_key(|e| e.fields.order_within_session);
                    for exercise in &mut session.exercises {
                        Arc::make_mut(exercise)
                            .sets
                            .sort_by_key(|s| s.fields.set_number);
                    }
                }
            }
        }
    }
}

impl Week {
    pub(crate) fn collect_ids(&self, ids: &mut Vec<(Level, NodeId)>) {
        ids.push((Level::Week, self.id));
        for day in &self.days {
            day.collect_ids(ids);
        }
    }
}

impl Day {
    pub(crate) fn collect_ids(&self, ids: &mut Vec<(Level, NodeId)>) {
        ids.push((Level::Day, self.id));
        for session in &self.sessions {
            session.collect_ids(ids);
        }
    }
}

impl Session {
    pub(crate) fn collect_ids(&self, ids: &mut Vec<(Level, NodeId)>) {
        ids.push((Level::Session, self.id));
        for exercise in &self.exercises {
            exercise.collect_ids(ids);
        }
    }
}

impl SessionExercise {
    pub(crate) fn collect_ids(&self, ids: &mut Vec<(Level, NodeId)>) {
        ids.push((Level::Exercise, self.id));
        ids.extend(self.sets.iter().map(|set| (Level::Set, set.id)));
    }
}
