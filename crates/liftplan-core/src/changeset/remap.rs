//! Temporary id to row id reconciliation.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    error::{PlanError, Result},
    ids::{NodeId, TempId},
    models::{Day, PlanDetails, Session, SessionExercise, Week},
};

/// Row ids assigned by the backend to the temporary ids of a changeset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdMapping(BTreeMap<TempId, u64>);

impl IdMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, temp_id: TempId, id: u64) {
        self.0.insert(temp_id, id);
    }

    pub fn get(&self, temp_id: &TempId) -> Option<u64> {
        self.0.get(temp_id).copied()
    }

    /// Replaces `id` with its row id when it is a mapped temporary id.
    pub fn resolve(&self, id: NodeId) -> NodeId {
        match id {
            NodeId::Temp(temp_id) => self.get(&temp_id).map_or(id, NodeId::Persisted),
            NodeId::Persisted(_) => id,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TempId, &u64)> {
        self.0.iter()
    }
}

impl FromIterator<(TempId, u64)> for IdMapping {
    fn from_iter<I: IntoIterator<Item = (TempId, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl PlanDetails {
    /// Substitutes every mapped temporary id in place and returns how many
    /// nodes changed. Unmapped temporary ids are left alone, and branches
    /// without temporary ids keep their shared `Arc`s.
    pub fn apply_id_mapping(&mut self, mapping: &IdMapping) -> usize {
        let mut remapped = 0;
        for week in self.weeks.iter_mut().filter(|w| w.has_temp_ids()) {
            Arc::make_mut(week).remap(mapping, &mut remapped);
        }
        remapped
    }

    /// Returns a copy in which every temporary id has been replaced. Fails if
    /// the mapping misses any of them.
    pub fn resolve_temp_ids(&self, mapping: &IdMapping) -> Result<PlanDetails> {
        let mut resolved = self.clone();
        resolved.apply_id_mapping(mapping);

        match resolved.node_ids().into_iter().find(|(_, id)| id.is_temp()) {
            Some((level, id)) => Err(PlanError::reconcile(format!(
                "no row id returned for {level} {id}"
            ))),
            None => Ok(resolved),
        }
    }
}

fn remap_id(id: &mut NodeId, mapping: &IdMapping, remapped: &mut usize) {
    let resolved = mapping.resolve(*id);
    if resolved != *id {
        *id = resolved;
        *remapped += 1;
    }
}

impl Week {
    fn has_temp_ids(&self) -> bool {
        self.id.is_temp() || self.days.iter().any(|d| d.has_temp_ids())
    }

    fn remap(&mut self, mapping: &IdMapping, remapped: &mut usize) {
        remap_id(&mut self.id, mapping, remapped);
        for day in self.days.iter_mut().filter(|d| d.has_temp_ids()) {
            Arc::make_mut(day).remap(mapping, remapped);
        }
    }
}

impl Day {
    fn has_temp_ids(&self) -> bool {
        self.id.is_temp() || self.sessions.iter().any(|s| s.has_temp_ids())
    }

    fn remap(&mut self, mapping: &IdMapping, remapped: &mut usize) {
        remap_id(&mut self.id, mapping, remapped);
        for session in self.sessions.iter_mut().filter(|s| s.has_temp_ids()) {
            Arc::make_mut(session).remap(mapping, remapped);
        }
    }
}

impl Session {
    fn has_temp_ids(&self) -> bool {
        self.id.is_temp() || self.exercises.iter().any(|e| e.has_temp_ids())
    }

    fn remap(&mut self, mapping: &IdMapping, remapped: &mut usize) {
        remap_id(&mut self.id, mapping, remapped);
        for exercise in self.exercises.iter_mut().filter(|e| e.has_temp_ids()) {
            Arc::make_mut(exercise).remap(mapping, remapped);
        }
    }
}

impl SessionExercise {
    fn has_temp_ids(&self) -> bool {
        self.id.is_temp() || self.sets.iter().any(|s| s.id.is_temp())
    }

    fn remap(&mut self, mapping: &IdMapping, remapped: &mut usize) {
        remap_id(&mut self.id, mapping, remapped);
        for set in self.sets.iter_mut().filter(|s| s.id.is_temp()) {
            remap_id(&mut Arc::make_mut(set).id, mapping, remapped);
        }
    }
}
