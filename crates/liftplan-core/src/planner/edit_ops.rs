//! Editing sessions: opening an editor on a plan and saving it.

use super::{Planner, plan_ops::ensure_creator};
use crate::{
    changeset::Changeset,
    editor::{PlanEditor, SaveReport},
    error::{PlanError, Result},
    params::{EditPlan, Id},
};

impl Planner {
    /// Loads a plan into a new editor. The editor is read-only unless the
    /// acting user created the plan.
    pub async fn open_editor(&self, plan_id: u64) -> Result<PlanEditor> {
        let details = self
            .get_plan_details(&Id { id: plan_id })
            .await?
            .ok_or(PlanError::PlanNotFound { id: plan_id })?;
        let can_edit = self.can_edit(&details.plan);
        Ok(PlanEditor::new(details, can_edit))
    }

    /// Saves the editor's pending changes as one changeset.
    ///
    /// Returns `None` when there was nothing to save. A failed save leaves
    /// the edits in the editor, which then reports them as pending and its
    /// status as failed.
    pub async fn save_editor(&self, editor: &mut PlanEditor) -> Result<Option<SaveReport>> {
        let Some(pending) = editor.begin_save()? else {
            return Ok(None);
        };

        let changeset = pending.changeset().clone();
        let user = self.user.clone();
        let outcome = self
            .with_database(move |db| {
                ensure_creator(db.get_plan(changeset.plan_id)?, changeset.plan_id, &user)?;
                db.save_plan_changes(&changeset)
            })
            .await;

        editor.complete_save(pending, outcome).map(Some)
    }

    /// Applies a batch of edits to a plan and saves them together. Nothing is
    /// saved if any edit fails.
    pub async fn edit_plan(&self, params: &EditPlan) -> Result<Option<SaveReport>> {
        let mut editor = self.open_editor(params.plan_id).await?;
        self.apply_edits(&mut editor, &params.edits).await?;
        self.save_editor(&mut editor).await
    }

    /// Applies a batch of edits without saving and returns the changeset a
    /// save would send.
    pub async fn preview_edits(&self, params: &EditPlan) -> Result<Changeset> {
        let mut editor = self.open_editor(params.plan_id).await?;
        self.apply_edits(&mut editor, &params.edits).await?;
        Ok(editor.pending_changes())
    }
}
