//! Wrappers formatting the outcome of create, update, delete and save
//! operations.

use std::fmt;

use crate::{
    editor::SaveReport,
    models::{Exercise, Plan},
};

/// A freshly created resource.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Exercise> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added exercise with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// An updated resource with the list of changed attributes.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// A deleted resource.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {}) with all its weeks",
            self.resource.title, self.resource.id
        )
    }
}

impl fmt::Display for SaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Saved plan {}: {} added, {} updated, {} deleted",
            self.plan_id, self.counts.added, self.counts.updated, self.counts.deleted
        )?;
        if !self.id_mapping.is_empty() {
            writeln!(f)?;
            for (temp_id, id) in self.id_mapping.iter() {
                writeln!(f, "- {temp_id} → {id}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{changeset::ChangeCounts, fixtures::plan, ids::TempId};

    #[test]
    fn test_create_and_delete_results() {
        let created = CreateResult::new(plan()).to_string();
        assert!(created.starts_with("Created plan with ID: 1\n"));
        assert!(created.contains("# 1. Strength Block"));

        let deleted = DeleteResult::new(plan()).to_string();
        assert!(deleted.contains("Deleted plan 'Strength Block' (ID: 1)"));
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(plan(), vec!["Title".to_string()]);
        let output = result.to_string();
        assert!(output.contains("Changes made:\n- Title"));
    }

    #[test]
    fn test_save_report_lists_assigned_ids() {
        let report = SaveReport {
            plan_id: 4,
            counts: ChangeCounts {
                added: 1,
                updated: 0,
                deleted: 2,
            },
            id_mapping: [("tmp-3".parse::<TempId>().unwrap(), 17)].into_iter().collect(),
        };
        let output = report.to_string();
        assert!(output.starts_with("Saved plan 4: 1 added, 0 updated, 2 deleted"));
        assert!(output.contains("- tmp-3 → 17"));
    }
}
