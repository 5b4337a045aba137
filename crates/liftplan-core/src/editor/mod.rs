//! In-memory editing of a plan tree.
//!
//! A [`PlanEditor`] owns two versions of one plan: the baseline, which is the
//! tree as last persisted, and the current tree, which structural mutations
//! change optimistically without touching storage. Saving sends the
//! [`Changeset`] between the two and, once the backend answers with the row
//! ids of the added nodes, promotes the saved tree to be the new baseline:
//!
//! ```text
//!  mutate ──▶ current ──diff──▶ Changeset ──save──▶ IdMapping
//!                ▲                                      │
//!                └──────────── remap temp ids ◀─────────┘
//! ```
//!
//! A failed save keeps every local edit. The editor reports them as pending
//! and the status as failed until the save is retried or the edits are
//! discarded with [`PlanEditor::discard_changes`].
//!
//! The editor is a plain value: whoever drives the editing session owns it
//! and passes it to the code that needs it.

use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    changeset::{ChangeCounts, Changeset, IdMapping},
    error::{PlanError, Result},
    ids::{NodeId, TempId, TempIdGenerator},
    models::PlanDetails,
};

mod mutations;

#[cfg(test)]
mod tests;

/// Synchronization state of an editor with respect to its baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SyncStatus {
    /// No local edits
    Clean,
    /// Local edits not yet saved
    Dirty,
    /// A save has been started and not completed
    Saving,
    /// The last save failed; local edits are still pending
    Failed { message: String },
}

/// A save in flight: the changeset that was sent and the tree it was
/// computed from.
#[derive(Debug, Clone)]
pub struct PendingSave {
    changeset: Changeset,
    snapshot: PlanDetails,
}

impl PendingSave {
    pub fn changeset(&self) -> &Changeset {
        &self.changeset
    }

    pub fn plan_id(&self) -> u64 {
        self.changeset.plan_id
    }
}

/// Outcome of a completed save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReport {
    pub plan_id: u64,
    pub counts: ChangeCounts,
    /// Row ids assigned to the added nodes
    pub id_mapping: IdMapping,
}

/// Editing session for a single plan.
#[derive(Debug, Clone)]
pub struct PlanEditor {
    baseline: PlanDetails,
    current: PlanDetails,
    can_edit: bool,
    ids: TempIdGenerator,
    saving: bool,
    last_error: Option<String>,
}

impl PlanEditor {
    /// Starts editing `details`. Mutations fail with
    /// [`PlanError::ReadOnly`] unless `can_edit` is set.
    pub fn new(details: PlanDetails, can_edit: bool) -> Self {
        let mut ids = TempIdGenerator::new();
        for (_, id) in details.node_ids() {
            if let NodeId::Temp(temp_id) = id {
                ids.skip_past(temp_id);
            }
        }

        Self {
            baseline: details.clone(),
            current: details,
            can_edit,
            ids,
            saving: false,
            last_error: None,
        }
    }

    pub fn plan_id(&self) -> u64 {
        self.current.plan.id
    }

    /// The tree including local edits.
    pub fn current(&self) -> &PlanDetails {
        &self.current
    }

    /// The tree as last persisted.
    pub fn baseline(&self) -> &PlanDetails {
        &self.baseline
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    /// Issues a temporary id for a node about to be added.
    pub fn temp_id(&mut self) -> TempId {
        self.ids.next_id()
    }

    pub fn status(&self) -> SyncStatus {
        if self.saving {
            SyncStatus::Saving
        } else if let Some(message) = &self.last_error {
            SyncStatus::Failed {
                message: message.clone(),
            }
        } else if self.pending_changes().is_empty() {
            SyncStatus::Clean
        } else {
            SyncStatus::Dirty
        }
    }

    /// Changes that saving now would submit.
    pub fn pending_changes(&self) -> Changeset {
        Changeset::diff(&self.baseline, &self.current)
    }

    /// Ids of nodes that are new or modified locally. Deleted nodes are no
    /// longer in the tree and are not reported.
    pub fn pending_nodes(&self) -> HashSet<NodeId> {
        let changes = self.pending_changes();
        let mut pending: HashSet<NodeId> =
            changes.temp_ids().into_iter().map(NodeId::Temp).collect();
        pending.extend(
            changes
                .updated_ids()
                .into_iter()
                .map(|(_, id)| NodeId::Persisted(id)),
        );
        pending
    }

    /// Whether `id` names a node that has not been saved in its current form.
    pub fn is_pending(&self, id: &NodeId) -> bool {
        match id {
            NodeId::Temp(_) => self.current.contains(id),
            NodeId::Persisted(_) => self.pending_nodes().contains(id),
        }
    }

    /// Drops every local edit and returns to the baseline.
    pub fn discard_changes(&mut self) {
        debug!("Discarding local edits of plan {}", self.plan_id());
        self.current = self.baseline.clone();
        self.last_error = None;
    }

    /// Adopts a freshly fetched tree as both baseline and current tree.
    pub fn replace_baseline(&mut self, details: PlanDetails) {
        debug!("Replacing baseline of plan {}", details.plan.id);
        self.baseline = details.clone();
        self.current = details;
        self.last_error = None;
    }

    /// Starts a save. Returns `None` when there is nothing to save.
    pub fn begin_save(&mut self) -> Result<Option<PendingSave>> {
        if self.saving {
            return Err(PlanError::SaveInProgress {
                plan_id: self.plan_id(),
            });
        }

        let changeset = self.pending_changes();
        if changeset.is_empty() {
            self.last_error = None;
            return Ok(None);
        }

        let counts = changeset.counts();
        debug!(
            "Saving plan {}: {} added, {} updated, {} deleted",
            self.plan_id(),
            counts.added,
            counts.updated,
            counts.deleted
        );
        self.saving = true;
        Ok(Some(PendingSave {
            changeset,
            snapshot: self.current.clone(),
        }))
    }

    /// Finishes the save started by `begin_save` with the backend's answer.
    ///
    /// On success the saved tree becomes the baseline, and its temporary ids
    /// are replaced in the current tree too. Edits made after `begin_save`
    /// stay pending. On failure nothing is rolled back: the error is
    /// recorded, reported by [`status`](Self::status), and returned.
    pub fn complete_save(
        &mut self,
        pending: PendingSave,
        outcome: Result<IdMapping>,
    ) -> Result<SaveReport> {
        self.saving = false;

        let saved = outcome.and_then(|mapping| {
            if pending.plan_id() != self.plan_id() {
                return Err(PlanError::reconcile(format!(
                    "save for plan {} completed on editor of plan {}",
                    pending.plan_id(),
                    self.plan_id()
                )));
            }
            let baseline = pending.snapshot.resolve_temp_ids(&mapping)?;
            Ok((baseline, mapping))
        });

        match saved {
            Ok((baseline, id_mapping)) => {
                self.baseline = baseline;
                let remapped = self.current.apply_id_mapping(&id_mapping);
                self.last_error = None;
                debug!(
                    "Saved plan {}, {remapped} temporary ids replaced",
                    self.plan_id()
                );
                Ok(SaveReport {
                    plan_id: self.plan_id(),
                    counts: pending.changeset.counts(),
                    id_mapping,
                })
            }
            Err(e) => {
                warn!("Saving plan {} failed: {e}", self.plan_id());
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
